//! Trackboard CLI - Command-line frontend for the trackboard panel
//!
//! Provides login/logout session management and typed access to the
//! employee and admin surfaces of the panel API

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use trackboard_client::{
    api::types::{
        AddDownloadRecordRequest, AssignAccountsRequest, BulkAccountsRequest, CreateAccountRequest,
        CreateEmployeeRequest, NoteRequest, QuotaRequest, ResetPasswordRequest,
        SubmitReportRequest, UpdateAccountRequest,
    },
    ApiClientConfig, AuthService, FileSessionStore, PanelApiClient,
};
use trackboard_core::{
    config_error, init_logging, log_operation_error, log_operation_start, log_operation_success,
    validation_error, ErrorContext, LoggingConfig, Navigator, PanelError, PanelResult,
    SessionStore, TrackboardConfig,
};

#[derive(Parser)]
#[command(name = "trackboard")]
#[command(about = "Command-line client for the trackboard panel")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        /// Panel username
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the persisted session
    Logout,

    /// Check whether a session is persisted
    Status,

    /// Show the persisted session token presence and role
    Whoami,

    /// Show the employee dashboard
    Dashboard,

    /// Manage assigned accounts
    Accounts {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Submit and inspect daily reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Show download totals and recent activity
    Downloads,

    /// Show the employee download chart series
    Chart,

    /// Shared panel note
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },

    /// Admin operations
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Initialize default configuration
        #[arg(long)]
        init: bool,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// List accounts assigned to you
    List,

    /// Update credentials of an assigned account
    Update {
        /// Account id
        id: i64,

        /// New account username
        #[arg(long)]
        username: String,

        /// New account password
        #[arg(long)]
        password: String,
    },

    /// Add several accounts from a JSON file of {username, password} pairs
    Bulk {
        /// Path to the JSON file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// Submit today's follower count for an account
    Submit {
        /// Account id
        account_id: i64,

        /// Follower count
        count: i64,
    },

    /// Show today's submitted reports
    Today,
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Show the shared note
    Show,

    /// Replace the shared note
    Set {
        /// Note content
        content: String,
    },
}

#[derive(Subcommand)]
enum AdminCommands {
    /// List all employees
    Employees,

    /// Show one employee with assigned accounts
    Employee {
        /// Employee id
        id: i64,
    },

    /// Create an employee
    AddEmployee {
        /// Login username
        username: String,

        /// Display name
        #[arg(long)]
        full_name: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,

        /// Panel role
        #[arg(long, default_value = "employee")]
        role: String,
    },

    /// Delete an employee; their accounts become unassigned
    RmEmployee {
        /// Employee id
        id: i64,
    },

    /// Reset an employee's password
    ResetPassword {
        /// Employee id
        employee_id: i64,

        /// New password
        new_password: String,
    },

    /// Change an employee's account quota
    Quota {
        #[command(subcommand)]
        command: QuotaCommands,
    },

    /// Register a new unassigned account
    AddAccount {
        /// Account username
        username: String,

        /// Account password
        password: String,
    },

    /// Delete an account
    RmAccount {
        /// Account id
        id: i64,
    },

    /// Assign unassigned accounts to an employee
    Assign {
        /// Employee id
        employee_id: i64,

        /// Maximum number of accounts to assign
        #[arg(long, default_value = "10")]
        limit: i64,
    },

    /// Show today's summary
    Summary,

    /// List reports, optionally within a date range
    Reports {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Show recent audit log entries
    Logs {
        /// Maximum number of entries
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Show download statistics
    Stats {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
    },

    /// Record a delivery for an employee
    RecordDownload {
        /// Employee id
        employee_id: i64,

        /// Window start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Window end date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Delivered count
        #[arg(long)]
        count: i64,
    },

    /// Show the panel-wide download chart series
    Chart,
}

#[derive(Subcommand)]
enum QuotaCommands {
    /// Raise the quota by an amount
    Add {
        /// Employee id
        employee_id: i64,

        /// Amount to add
        amount: i64,
    },

    /// Set the quota to an amount
    Set {
        /// Employee id
        employee_id: i64,

        /// New total quota
        amount: i64,
    },
}

/// Navigator for the terminal: there is no login page to jump to, so it
/// prints guidance instead
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn to_login(&self) {
        println!("🔒 No valid session. Run 'trackboard login <username>' to sign in.");
    }
}

#[tokio::main]
async fn main() -> PanelResult<()> {
    let cli = Cli::parse();

    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| PanelError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting trackboard CLI v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref()).await?;

    match cli.command {
        Commands::Config { show, init } => {
            handle_config(show, init, &config).await?;
        }
        command => {
            let (auth, api) = build_clients(&config)?;
            dispatch(command, &auth, &api).await?;
        }
    }

    Ok(())
}

async fn dispatch(command: Commands, auth: &AuthService, api: &PanelApiClient) -> PanelResult<()> {
    match command {
        Commands::Login { username, password } => handle_login(auth, username, password).await,
        Commands::Logout => handle_logout(auth),
        Commands::Status => handle_status(auth),
        Commands::Whoami => handle_whoami(auth),
        Commands::Dashboard => handle_dashboard(api).await,
        Commands::Accounts { command } => handle_accounts(api, command).await,
        Commands::Report { command } => handle_report(api, command).await,
        Commands::Downloads => handle_downloads(api).await,
        Commands::Chart => handle_chart(api, false).await,
        Commands::Note { command } => handle_note(api, command).await,
        Commands::Admin { command } => handle_admin(api, command).await,
        Commands::Config { .. } => unreachable!("handled before client construction"),
    }
}

async fn load_config(config_path: Option<&PathBuf>) -> PanelResult<TrackboardConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        TrackboardConfig::from_file(path)
    } else {
        let default_paths = [
            dirs::config_dir().map(|d| d.join("trackboard").join("config.toml")),
            dirs::home_dir().map(|d| d.join(".trackboard").join("config.toml")),
            Some(PathBuf::from("trackboard.toml")),
        ];

        for path_opt in default_paths.iter() {
            if let Some(path) = path_opt {
                if path.exists() {
                    info!("Loading configuration from {:?}", path);
                    return TrackboardConfig::from_file(path);
                }
            }
        }

        info!("No configuration file found, using defaults");
        Ok(TrackboardConfig::default())
    }
}

fn build_clients(config: &TrackboardConfig) -> PanelResult<(AuthService, PanelApiClient)> {
    let data_dir = expand_home(&config.storage.data_dir);
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&data_dir));
    let navigator: Arc<dyn Navigator> = Arc::new(ConsoleNavigator);

    let api_config = ApiClientConfig::from_server(&config.server);
    let auth = AuthService::new(&api_config, store.clone(), navigator.clone())?;
    let api = PanelApiClient::new(api_config, store, navigator)?;

    Ok((auth, api))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

fn prompt_password() -> PanelResult<String> {
    use std::io::Write;

    print!("Password: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}

fn parse_date(value: &str, field: &str) -> PanelResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| validation_error!(format!("Invalid date: {}", value), field, "cli"))
}

fn parse_opt_date(value: Option<String>, field: &str) -> PanelResult<Option<NaiveDate>> {
    value.map(|v| parse_date(&v, field)).transpose()
}

async fn handle_login(
    auth: &AuthService,
    username: String,
    password: Option<String>,
) -> PanelResult<()> {
    log_operation_start!("login", username = %username);

    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };

    let body = auth.login(&username, &password).await.map_err(|e| {
        log_operation_error!("login", e, username = %username);
        e
    })?;

    println!("✅ Logged in as {} (role: {})", username, body.role);
    log_operation_success!("login", username = %username, role = %body.role);
    Ok(())
}

fn handle_logout(auth: &AuthService) -> PanelResult<()> {
    auth.logout()?;
    println!("✅ Session cleared");
    Ok(())
}

fn handle_status(auth: &AuthService) -> PanelResult<()> {
    if auth.check()? {
        println!("✅ Session present");
    }
    Ok(())
}

fn handle_whoami(auth: &AuthService) -> PanelResult<()> {
    match auth.token()? {
        Some(_) => {
            let role = auth.role()?.unwrap_or_else(|| "unknown".to_string());
            println!("🔑 Token persisted, role: {}", role);
        }
        None => println!("No session persisted"),
    }
    Ok(())
}

async fn handle_dashboard(api: &PanelApiClient) -> PanelResult<()> {
    let dashboard = api.dashboard().await?;

    println!(
        "📊 Quota: {} ({} accounts assigned)",
        dashboard.quota,
        dashboard.assigned_accounts.len()
    );
    for account in &dashboard.assigned_accounts {
        println!("  {:>4}  {}  {}", account.id, account.username, account.password);
    }
    Ok(())
}

async fn handle_accounts(api: &PanelApiClient, command: AccountCommands) -> PanelResult<()> {
    match command {
        AccountCommands::List => {
            let accounts = api.my_accounts().await?;
            if accounts.is_empty() {
                println!("No accounts assigned");
            }
            for account in accounts {
                println!("  {:>4}  {}", account.id, account.username);
            }
        }
        AccountCommands::Update {
            id,
            username,
            password,
        } => {
            let outcome = api
                .update_account(id, &UpdateAccountRequest { username, password })
                .await?;
            println!("✅ {}", outcome.status);
        }
        AccountCommands::Bulk { file } => {
            let content = std::fs::read_to_string(&file)?;
            let accounts: Vec<CreateAccountRequest> = serde_json::from_str(&content)?;
            let count = accounts.len();

            let outcome = api.bulk_add_accounts(&BulkAccountsRequest { accounts }).await?;
            println!("✅ {} ({} accounts submitted)", outcome.status, count);
        }
    }
    Ok(())
}

async fn handle_report(api: &PanelApiClient, command: ReportCommands) -> PanelResult<()> {
    match command {
        ReportCommands::Submit { account_id, count } => {
            log_operation_start!("submit_report", account_id = account_id);

            let outcome = api
                .submit_report(&SubmitReportRequest {
                    account_id,
                    follower_count: count,
                })
                .await?;

            if outcome.is_updated() {
                println!("✅ Today's report overwritten");
            } else {
                println!("✅ Report submitted");
            }
            log_operation_success!("submit_report", account_id = account_id);
        }
        ReportCommands::Today => {
            let reports = api.today_reports().await?;
            if reports.is_empty() {
                println!("No reports submitted today");
            }
            for report in reports {
                println!(
                    "  account {:>4}  {:>8} followers  {}",
                    report.account_id,
                    report.count,
                    if report.locked { "🔒 locked" } else { "open" }
                );
            }
        }
    }
    Ok(())
}

async fn handle_downloads(api: &PanelApiClient) -> PanelResult<()> {
    let overview = api.my_downloads().await?;

    println!("📦 Total downloads: {}", overview.total_downloads);
    if !overview.recent_activity.is_empty() {
        println!("Recent activity:");
        for activity in &overview.recent_activity {
            println!(
                "  {} → {}  {}",
                activity.start_date, activity.end_date, activity.count
            );
        }
    }
    Ok(())
}

async fn handle_chart(api: &PanelApiClient, admin: bool) -> PanelResult<()> {
    let chart = if admin {
        api.admin_chart_data().await?
    } else {
        api.my_chart_data().await?
    };

    if chart.labels.is_empty() {
        println!("No chart data");
        return Ok(());
    }
    for (label, value) in chart.labels.iter().zip(chart.data.iter()) {
        println!("  {}  {}", label, value);
    }
    Ok(())
}

async fn handle_note(api: &PanelApiClient, command: NoteCommands) -> PanelResult<()> {
    match command {
        NoteCommands::Show => {
            let note = api.note().await?;
            if note.content.is_empty() {
                println!("No note set");
            } else {
                println!("📝 {}", note.content);
                if !note.author.is_empty() {
                    println!("   — {}", note.author);
                }
            }
        }
        NoteCommands::Set { content } => {
            let outcome = api.set_note(&NoteRequest { content }).await?;
            println!("✅ {}", outcome.status);
        }
    }
    Ok(())
}

async fn handle_admin(api: &PanelApiClient, command: AdminCommands) -> PanelResult<()> {
    match command {
        AdminCommands::Employees => {
            let employees = api.list_employees().await?;
            for employee in employees {
                println!(
                    "  {:>4}  {:<24} {:<16} quota {:>3}  assigned {:>3}",
                    employee.id,
                    employee.full_name,
                    employee.user_name,
                    employee.account_quota,
                    employee.assigned_count
                );
            }
        }
        AdminCommands::Employee { id } => {
            let detail = api.employee_detail(id).await?;
            println!("👤 {} ({})", detail.full_name, detail.user_name);
            for account in &detail.assigned_accounts {
                println!("  {:>4}  {}  {}", account.id, account.username, account.password);
            }
        }
        AdminCommands::AddEmployee {
            username,
            full_name,
            password,
            role,
        } => {
            let password = match password {
                Some(password) => password,
                None => prompt_password()?,
            };
            let outcome = api
                .create_employee(&CreateEmployeeRequest {
                    username,
                    password,
                    full_name,
                    role,
                })
                .await?;
            println!("✅ {}", outcome.msg.unwrap_or(outcome.status));
        }
        AdminCommands::RmEmployee { id } => {
            let outcome = api.delete_employee(id).await?;
            println!("✅ {}", outcome.status);
        }
        AdminCommands::ResetPassword {
            employee_id,
            new_password,
        } => {
            let outcome = api
                .reset_password(&ResetPasswordRequest {
                    employee_id,
                    new_password,
                })
                .await?;
            println!("✅ {}", outcome.msg.unwrap_or(outcome.status));
        }
        AdminCommands::Quota { command } => match command {
            QuotaCommands::Add {
                employee_id,
                amount,
            } => {
                let updated = api
                    .add_quota(&QuotaRequest {
                        employee_id,
                        amount,
                    })
                    .await?;
                println!("✅ New quota: {}", updated.new_quota);
            }
            QuotaCommands::Set {
                employee_id,
                amount,
            } => {
                let updated = api
                    .update_quota(&QuotaRequest {
                        employee_id,
                        amount,
                    })
                    .await?;
                println!("✅ New quota: {}", updated.new_quota);
            }
        },
        AdminCommands::AddAccount { username, password } => {
            let outcome = api
                .create_account(&CreateAccountRequest { username, password })
                .await?;
            println!("✅ {}", outcome.status);
        }
        AdminCommands::RmAccount { id } => {
            let outcome = api.delete_account(id).await?;
            println!("✅ {}", outcome.status);
        }
        AdminCommands::Assign { employee_id, limit } => {
            let outcome = api
                .assign_accounts(&AssignAccountsRequest {
                    employee_id,
                    limit: Some(limit),
                })
                .await?;
            match outcome.count {
                Some(count) => println!("✅ Assigned {} accounts", count),
                None => println!("{}", outcome.msg.unwrap_or(outcome.status)),
            }
        }
        AdminCommands::Summary => {
            let summary = api.daily_summary().await?;
            println!(
                "📊 {}: {} followers across {} reports",
                summary.date,
                summary.total_followers,
                summary.reports.len()
            );
            for report in &summary.reports {
                println!(
                    "  {:<24} {:<16} {:>8}  {}",
                    report.employee_name,
                    report.account,
                    report.count,
                    if report.locked { "🔒" } else { "" }
                );
            }
            if !summary.downloads_by_date.is_empty() {
                println!("Downloads (last 7 days):");
                for day in &summary.downloads_by_date {
                    println!("  {}  {}", day.date, day.count);
                }
            }
        }
        AdminCommands::Reports { start, end } => {
            let start = parse_opt_date(start, "start")?;
            let end = parse_opt_date(end, "end")?;

            let reports = api.all_reports(start, end).await?;
            if reports.is_empty() {
                println!("No reports found");
            }
            for report in reports {
                println!(
                    "  {:>5}  {}  {:<24} {:<16} {:>8}  {}",
                    report.id,
                    report.date,
                    report.employee_name,
                    report.account_username,
                    report.count,
                    if report.locked { "🔒" } else { "" }
                );
            }
        }
        AdminCommands::Logs { limit } => {
            let logs = api.audit_logs(Some(limit)).await?;
            for entry in logs {
                println!(
                    "  {}  {:<16} {:<16} {}",
                    entry.timestamp, entry.username, entry.action, entry.details
                );
            }
        }
        AdminCommands::Stats { start, end } => {
            let start = parse_opt_date(start, "start")?;
            let end = parse_opt_date(end, "end")?;

            let stats = api.download_stats(start, end).await?;
            println!("📦 Total downloads: {}", stats.total_downloads);
            println!("   Quota sum: {}", stats.total_accounts);
            println!("   Range total: {}", stats.range_total);
            println!("   Best employee: {}", stats.best_employee);
            for employee in &stats.employees {
                println!(
                    "  {:<24} total {:>6}  in range {:>6}",
                    employee.full_name, employee.total_downloads, employee.range_downloads
                );
            }
        }
        AdminCommands::RecordDownload {
            employee_id,
            start,
            end,
            count,
        } => {
            let record = AddDownloadRecordRequest {
                employee_id,
                start_date: parse_date(&start, "start")?,
                end_date: parse_date(&end, "end")?,
                count,
            };
            let added = api.add_download_record(&record).await?;
            println!("✅ Recorded, new total: {}", added.new_total);
        }
        AdminCommands::Chart => {
            handle_chart(api, true).await?;
        }
    }
    Ok(())
}

async fn handle_config(show: bool, init: bool, config: &TrackboardConfig) -> PanelResult<()> {
    if init {
        let defaults = TrackboardConfig::default();
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
            .ok_or_else(|| config_error!("Could not determine a configuration directory", "cli"))?
            .join("trackboard");

        tokio::fs::create_dir_all(&config_dir).await?;
        let config_path = config_dir.join("config.toml");

        defaults.save_to_file(&config_path)?;
        println!("✅ Configuration initialized at: {:?}", config_path);
        println!("📝 Edit the file to point at your panel server.");
    }

    if show {
        println!("📋 Current configuration:");
        let rendered = toml::to_string_pretty(config).map_err(|e| PanelError::Config {
            message: format!("Failed to render config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("cli").with_operation("config_show"),
        })?;
        println!("{}", rendered);
    }

    Ok(())
}
