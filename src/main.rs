//! iPrescribe Admin CLI
//!
//! Command-line front end for the admin dashboard API:
//! - Sign in and out
//! - Show dashboard stats, charts and recent patients
//! - Generate a config file

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use iprescribe::api::{ApiClient, DashboardApi};
use iprescribe::config::Config;
use iprescribe::models::{ChartDataPoint, DashboardCharts, DashboardStat, RecentPatient};
use iprescribe::query::{DashboardQueries, QueryClient, RetryPolicy};
use iprescribe::session::AdminSession;
use iprescribe::storage::{FileStore, KeyValueStore};
use iprescribe::store::{Stores, ThemeMode};
use iprescribe::theme;
use iprescribe::validation::LoginForm;

#[derive(Parser)]
#[command(name = "iprescribe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "iPrescribe admin dashboard client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/iprescribe/config.toml or ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the admin API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in as an administrator
    Login {
        /// Email address
        #[arg(short, long, env = "IPRESCRIBE_EMAIL")]
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long, env = "IPRESCRIBE_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show the dashboard stat cards
    Stats,

    /// List recent patient sign-ups
    Patients {
        /// Rows to show (default: dashboard limit)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Show chart series
    Charts,

    /// Show the whole dashboard
    Dashboard {
        /// Rows in the patients table
        #[arg(short, long)]
        limit: Option<u32>,
        /// Use dark mode
        #[arg(long)]
        dark: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Everything a command may need, built once from config
struct App {
    stores: Stores,
    session: AdminSession,
    queries: DashboardQueries,
}

impl App {
    fn build(config: &Config) -> anyhow::Result<Self> {
        let data_dir = expand_home(&config.storage.data_dir);
        let storage: Arc<dyn KeyValueStore> = Arc::new(
            FileStore::open(&data_dir)
                .with_context(|| format!("Failed to open data directory {:?}", data_dir))?,
        );

        let stores = Stores::open(Arc::clone(&storage));
        let client = Arc::new(ApiClient::new(&config.api, Arc::clone(&storage))?);
        let session = AdminSession::new(Arc::clone(&client), storage, stores.auth.clone());
        let queries = DashboardQueries::new(
            QueryClient::new(),
            DashboardApi::new(client, config.api.placeholder_fallback),
            stores.dashboard.clone(),
            RetryPolicy::new(config.api.retry_attempts),
        );

        Ok(Self {
            stores,
            session,
            queries,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    iprescribe::logging::init(&config.logging)?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_deref());
    }

    let app = App::build(&config)?;

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(p) => p,
                None => read_password()?,
            };

            let user = app.session.login(&LoginForm::new(email, password)).await?;
            match cli.format {
                OutputFormat::Json => print_json(&user)?,
                OutputFormat::Table => println!("Signed in as {} <{}>", user.name, user.email),
            }
        }

        Commands::Logout => {
            app.session.logout()?;
            println!("Signed out");
        }

        Commands::Whoami => match app.session.current_user() {
            Some(user) => match cli.format {
                OutputFormat::Json => print_json(&user)?,
                OutputFormat::Table => {
                    println!("Name:  {}", user.name);
                    println!("Email: {}", user.email);
                    println!("Role:  {:?}", user.role);
                }
            },
            None => bail!("Not signed in. Run `iprescribe login --email <EMAIL>` first."),
        },

        Commands::Stats => {
            require_session(&app)?;
            let stats = app.queries.stats().await?;
            match cli.format {
                OutputFormat::Json => print_json(&stats)?,
                OutputFormat::Table => print_stats(&stats),
            }
        }

        Commands::Patients { limit } => {
            require_session(&app)?;
            if let Some(limit) = limit {
                app.stores.dashboard.set_limit(limit);
            }
            let limit = app.stores.dashboard.limit();
            let patients = app.queries.recent_patients(limit).await?;
            match cli.format {
                OutputFormat::Json => print_json(&patients)?,
                OutputFormat::Table => {
                    print_patients(&patients);
                    if app.stores.dashboard.shows_see_all() {
                        println!();
                        println!("Showing {} rows. Use --limit 50 to see all.", patients.len());
                    }
                }
            }
        }

        Commands::Charts => {
            require_session(&app)?;
            let charts = app.queries.charts().await?;
            match cli.format {
                OutputFormat::Json => print_json(&charts)?,
                OutputFormat::Table => print_charts(&charts),
            }
        }

        Commands::Dashboard { limit, dark } => {
            require_session(&app)?;
            if let Some(limit) = limit {
                app.stores.dashboard.set_limit(limit);
            }
            if dark {
                app.stores.theme.set_mode(ThemeMode::Dark);
            }

            let (view, charts) = tokio::join!(app.queries.dashboard_data(), app.queries.charts());
            if let Some(error) = view.error {
                return Err(error).context("Failed to load dashboard");
            }
            let charts = charts?;
            let stats = view.stats.unwrap_or_default();
            let patients = view.recent_patients.unwrap_or_default();

            match cli.format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "dateRange": app.stores.dashboard.date_range(),
                    "stats": stats,
                    "charts": charts,
                    "recentPatients": patients,
                }))?,
                OutputFormat::Table => {
                    let route = theme::route_for("/dashboard");
                    let mode = route
                        .map(|r| theme::resolve(r, app.stores.theme.mode()))
                        .unwrap_or_default();
                    if let Some(user) = app.session.current_user() {
                        println!("Welcome back, {}", user.name);
                    }
                    println!(
                        "{}  |  theme: {}  |  fetched {}",
                        app.stores.dashboard.date_range(),
                        mode,
                        Local::now().format("%H:%M:%S")
                    );
                    println!();
                    print_stats(&stats);
                    println!();
                    print_charts(&charts);
                    println!();
                    print_patients(&patients);
                }
            }
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn require_session(app: &App) -> anyhow::Result<()> {
    if !app.session.has_token() {
        bail!("Not signed in. Run `iprescribe login --email <EMAIL>` first.");
    }
    Ok(())
}

fn write_config(output: Option<&Path>) -> anyhow::Result<()> {
    let config = iprescribe::config::generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_stats(stats: &[DashboardStat]) {
    println!("{:<22} | {:>10} | {:<18}", "Stat", "Value", "Trend");
    println!("{}", "-".repeat(56));
    for stat in stats {
        println!(
            "{:<22} | {:>10} | {} {} {}",
            stat.label,
            stat.formatted_value(),
            stat.trend_direction().arrow(),
            stat.trend_percent_label(),
            stat.trend_label
        );
    }
}

fn print_patients(patients: &[RecentPatient]) {
    if patients.is_empty() {
        println!("No recent patients");
        return;
    }

    println!(
        "{:<12} | {:<22} | {:<32} | {:<16} | {:<24} | {:<8} | {:<8}",
        "Signed up", "Name", "Email", "Phone", "Location", "Device", "Status"
    );
    println!("{}", "-".repeat(140));
    for p in patients {
        println!(
            "{:<12} | {:<22} | {:<32} | {:<16} | {:<24} | {:<8} | {:<8}",
            p.sign_up_date, p.name, p.email, p.phone, p.location, p.device, p.status.to_string()
        );
    }
}

fn print_charts(charts: &DashboardCharts) {
    print_series("Consultations over time", &charts.consultation_trend);
    print_series("Prescription volume", &charts.prescription_trend);
    print_series("Active doctors vs patients", &charts.doctor_vs_patient);
    print_series("Top specialities", &charts.specialties);
}

fn print_series(title: &str, points: &[ChartDataPoint]) {
    println!("{}", title);
    if points.is_empty() {
        println!("  (no data)");
        return;
    }
    for point in points {
        match point.value2 {
            Some(second) => println!("  {:<18} {:>8.0} {:>8.0}", point.label, point.value, second),
            None => println!("  {:<18} {:>8.0}", point.label, point.value),
        }
    }
}
