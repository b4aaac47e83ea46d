//! CLI entry and dispatch.

use anyhow::{Context, Result};
use attend_core::HrClient;
use attend_core::config::Config;
use attend_core::session::EXPIRY_CHECK_INTERVAL;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "attend")]
#[command(version)]
#[command(about = "Console for the attendance backend (directory, attendance, payslips)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with an email (password read from stdin)
    Login {
        /// Account email; normalized to lower-case
        email: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the current session
    Whoami,
    /// Employee directory
    Employees {
        #[command(subcommand)]
        command: EmployeeCommands,
    },
    /// Attendance records and clocking
    Attendance {
        #[command(subcommand)]
        command: AttendanceCommands,
    },
    /// Your own profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Admin operations
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Payslips
    Payslips {
        #[command(subcommand)]
        command: PayslipCommands,
    },
    /// Backend liveness probe
    Health,
    /// Backend clock
    Time,
}

#[derive(clap::Subcommand)]
enum EmployeeCommands {
    /// List the directory
    List,
    /// Show one employee
    Show {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Create an employee (admin)
    Add {
        name: String,
        email: String,
        /// Job title
        #[arg(long)]
        role: String,
        /// Gross monthly salary
        #[arg(long)]
        salary: f64,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Update an employee (admin)
    Update {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Job title
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        salary: Option<f64>,
    },
    /// Deactivate an employee (admin)
    Rm {
        #[arg(value_name = "ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum AttendanceCommands {
    /// Show attendance history (defaults to your own record)
    Show {
        #[arg(long)]
        employee: Option<i64>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Clock in (defaults to your own employee id)
    Checkin {
        #[arg(long)]
        employee: Option<i64>,
    },
    /// Clock out (defaults to your own employee id)
    Checkout {
        #[arg(long)]
        employee: Option<i64>,
    },
}

#[derive(clap::Subcommand)]
enum ProfileCommands {
    /// Show your profile
    Show,
    /// Update name and/or email
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change your password (read from stdin)
    ChangePassword,
}

#[derive(clap::Subcommand)]
enum AdminCommands {
    /// Dashboard counters (admin)
    Summary,
    /// Reset another account's password (admin; new password from stdin)
    ResetPassword { email: String },
}

#[derive(clap::Subcommand)]
enum PayslipCommands {
    /// List payslips
    List {
        /// Pay period (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        employee: Option<i64>,
        /// "Draft" or "Finalized"
        #[arg(long)]
        status: Option<String>,
    },
    /// Generate payslips for a month (admin)
    Generate {
        /// Pay period (YYYY-MM)
        month: String,
        #[arg(long)]
        employee: Option<i64>,
    },
    /// Set a payslip's status (admin)
    SetStatus {
        #[arg(value_name = "ID")]
        id: i64,
        /// "Draft" or "Finalized"
        status: String,
    },
    /// Print the CSV export address for a payslip
    ExportUrl {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long, default_value = "csv")]
        format: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let client = HrClient::connect(&config).context("connect client")?;

    // toast stand-in: surface forced logouts on stderr
    client.session().on_session_expired(|message| {
        eprintln!("{message}");
    });
    let _expiry_watch = client.session().spawn_expiry_watch(EXPIRY_CHECK_INTERVAL);

    match cli.command {
        Commands::Login { email } => commands::auth::login(&client, &email).await,
        Commands::Logout => commands::auth::logout(&client),
        Commands::Whoami => commands::auth::whoami(&client),
        Commands::Employees { command } => match command {
            EmployeeCommands::List => commands::employees::list(&client).await,
            EmployeeCommands::Show { id } => commands::employees::show(&client, id).await,
            EmployeeCommands::Add {
                name,
                email,
                role,
                salary,
                department,
                phone,
            } => {
                commands::employees::add(&client, name, email, role, salary, department, phone)
                    .await
            }
            EmployeeCommands::Update {
                id,
                name,
                email,
                phone,
                role,
                department,
                salary,
            } => {
                commands::employees::update(
                    &client, id, name, email, phone, role, department, salary,
                )
                .await
            }
            EmployeeCommands::Rm { id } => commands::employees::remove(&client, id).await,
        },
        Commands::Attendance { command } => match command {
            AttendanceCommands::Show {
                employee,
                from,
                to,
                limit,
                offset,
            } => commands::attendance::show(&client, employee, from, to, limit, offset).await,
            AttendanceCommands::Checkin { employee } => {
                commands::attendance::check_in(&client, employee).await
            }
            AttendanceCommands::Checkout { employee } => {
                commands::attendance::check_out(&client, employee).await
            }
        },
        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::profile::show(&client).await,
            ProfileCommands::Update { name, email } => {
                commands::profile::update(&client, name, email).await
            }
            ProfileCommands::ChangePassword => commands::profile::change_password(&client).await,
        },
        Commands::Admin { command } => match command {
            AdminCommands::Summary => commands::admin::summary(&client).await,
            AdminCommands::ResetPassword { email } => {
                commands::admin::reset_password(&client, &email).await
            }
        },
        Commands::Payslips { command } => match command {
            PayslipCommands::List {
                month,
                employee,
                status,
            } => commands::payslips::list(&client, month, employee, status).await,
            PayslipCommands::Generate { month, employee } => {
                commands::payslips::generate(&client, &month, employee).await
            }
            PayslipCommands::SetStatus { id, status } => {
                commands::payslips::set_status(&client, id, &status).await
            }
            PayslipCommands::ExportUrl { id, format } => {
                commands::payslips::export_url(&client, id, &format)
            }
        },
        Commands::Health => commands::status::health(&client).await,
        Commands::Time => commands::status::time(&client).await,
    }
}
