// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TelcoNova - field-service dispatch client.
//!
//! This is the binary entry point. Every command goes through the gateway,
//! which talks to the mock or the remote backend depending on config.

mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use telconova_config::TelconovaConfig;
use telconova_core::types::{
    AssignmentRequest, Availability, LoginCredentials, NotificationChannel, NotificationRequest,
    RegisterCredentials, ReportHistoryQuery, SaveReportRequest, SortOrder, TechnicianFilter,
    TechnicianRegistration, WorkOrderFilter, WorkOrderStatus,
};
use telconova_core::DispatchError;
use telconova_gateway::{credential_hints, Gateway};

/// TelcoNova - field-service dispatch client.
#[derive(Parser, Debug)]
#[command(name = "telconova", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and keep the session for later commands.
    Login {
        email: String,
        /// Prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Register a new user account.
    Register {
        name: String,
        email: String,
        #[arg(long, default_value = "supervisor")]
        role: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// End the current session.
    Logout,
    /// List technicians.
    Technicians {
        #[arg(long)]
        zone: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
        #[arg(long)]
        availability: Option<Availability>,
    },
    /// Show one technician.
    Technician { id: String },
    /// List work orders.
    Orders {
        #[arg(long)]
        status: Option<WorkOrderStatus>,
        #[arg(long)]
        zone: Option<String>,
    },
    /// Show one work order.
    Order { id: String },
    /// Assign a work order to a technician, or let the backend pick one.
    Assign {
        order_id: String,
        #[arg(long, conflicts_with = "auto", required_unless_present = "auto")]
        technician: Option<String>,
        #[arg(long)]
        auto: bool,
    },
    /// Notify a technician about a work order.
    Notify {
        order_id: String,
        technician_id: String,
        #[arg(long = "channel", default_value = "email")]
        channels: Vec<NotificationChannel>,
    },
    /// Create a technician.
    RegisterTechnician {
        name: String,
        #[arg(long)]
        zone: String,
        #[arg(long)]
        specialty: String,
        #[arg(long, default_value = "0")]
        workload: String,
    },
    /// Manage saved reports.
    Reports {
        #[command(subcommand)]
        command: ReportsCommand,
    },
    /// Show the test credentials for each backend.
    Hints,
    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Subcommand, Debug)]
enum ReportsCommand {
    /// List saved reports.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value = "creadoEn")]
        sort_by: String,
        #[arg(long, default_value = "desc")]
        sort_order: SortOrder,
    },
    /// Show one saved report.
    Show { id: String },
    /// Save a report read from a JSON file.
    Save { file: PathBuf },
    /// Delete a saved report.
    Delete { id: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match telconova_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            telconova_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);

    if let Err(e) = run(cli, &config).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &TelconovaConfig) -> Result<(), DispatchError> {
    let Some(command) = cli.command else {
        println!("telconova: use --help for available commands");
        return Ok(());
    };

    match command {
        Commands::Hints => return print_json(&credential_hints(&config.api.base_url)),
        Commands::Config => {
            let rendered = config
                .to_toml_string()
                .map_err(|e| DispatchError::Internal(format!("failed to render config: {e}")))?;
            print!("{rendered}");
            return Ok(());
        }
        _ => {}
    }

    let gateway = Gateway::from_config(config)?;

    match command {
        Commands::Login { email, password } => {
            let password = resolve_password(password, "Password")?;
            let resp = gateway
                .login(LoginCredentials {
                    email,
                    password: password.expose_secret().to_string(),
                })
                .await?;
            print_json(&resp.user)?;
        }
        Commands::Register {
            name,
            email,
            role,
            password,
        } => {
            let password = resolve_password(password, "New password")?;
            let resp = gateway
                .register(RegisterCredentials {
                    name,
                    role,
                    email,
                    password: password.expose_secret().to_string(),
                })
                .await?;
            print_json(&resp)?;
        }
        Commands::Logout => {
            gateway.logout().await?;
            eprintln!("logged out");
        }
        Commands::Technicians {
            zone,
            specialty,
            availability,
        } => {
            let filter = TechnicianFilter {
                zone,
                specialty,
                availability,
            };
            print_json(&gateway.technicians(filter).await?)?;
        }
        Commands::Technician { id } => print_json(&gateway.technician(&id).await?)?,
        Commands::Orders { status, zone } => {
            print_json(&gateway.work_orders(WorkOrderFilter { status, zone }).await?)?;
        }
        Commands::Order { id } => print_json(&gateway.work_order(&id).await?)?,
        Commands::Assign {
            order_id,
            technician,
            auto,
        } => {
            let order = match technician {
                Some(technician) if !auto => {
                    gateway
                        .assign_manually(AssignmentRequest::manual(order_id, technician))
                        .await?
                }
                _ => gateway.assign_automatically(&order_id).await?,
            };
            print_json(&order)?;
        }
        Commands::Notify {
            order_id,
            technician_id,
            channels,
        } => {
            gateway
                .send_notification(NotificationRequest {
                    order_id,
                    technician_id,
                    channels,
                })
                .await?;
            eprintln!("notification sent");
        }
        Commands::RegisterTechnician {
            name,
            zone,
            specialty,
            workload,
        } => {
            let resp = gateway
                .register_technician(TechnicianRegistration {
                    name,
                    zone,
                    workload,
                    specialty,
                })
                .await?;
            print_json(&resp)?;
        }
        Commands::Reports { command } => run_reports(&gateway, command).await?,
        Commands::Hints | Commands::Config => {}
    }

    Ok(())
}

async fn run_reports(gateway: &Gateway, command: ReportsCommand) -> Result<(), DispatchError> {
    match command {
        ReportsCommand::List {
            page,
            limit,
            sort_by,
            sort_order,
        } => {
            let query = ReportHistoryQuery {
                page,
                limit,
                sort_by,
                sort_order,
            };
            print_json(&gateway.report_history(query).await?)
        }
        ReportsCommand::Show { id } => print_json(&gateway.report_detail(&id).await?),
        ReportsCommand::Save { file } => {
            let content = std::fs::read_to_string(&file).map_err(|e| {
                DispatchError::InvalidRequest(format!("cannot read {}: {e}", file.display()))
            })?;
            let request: SaveReportRequest = serde_json::from_str(&content)
                .map_err(|e| DispatchError::decode(&file.display().to_string(), e))?;
            print_json(&gateway.save_report(request).await?)
        }
        ReportsCommand::Delete { id } => {
            gateway.delete_report(&id).await?;
            eprintln!("report {id} deleted");
            Ok(())
        }
    }
}

fn resolve_password(flag: Option<String>, label: &str) -> Result<SecretString, DispatchError> {
    match flag {
        Some(password) => Ok(SecretString::from(password)),
        None => prompt::get_password(label),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DispatchError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| DispatchError::Internal(format!("failed to render output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("telconova={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
