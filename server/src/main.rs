mod config;
mod graphql;
mod http;
mod report;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use futures::future::join_all;
use platform_client::{HrClient, Service};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{Dashboard, DeptSelector, RefreshOutcome};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "teamflow", version, about = "TeamFlow HR dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Load all services once and print the reconciled table with totals.
    Report {
        #[arg(long, default_value = "all", help = "`all` or a department id")]
        dept: DeptSelector,
    },
    /// Find a payroll record by exact first and last name.
    Lookup {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
    },
    /// Print every employee with a freshly computed salary.
    Salaries,
    /// Check the health endpoint of each upstream service.
    Health,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
    #[arg(long, help = "Do not load the services before accepting requests")]
    skip_initial_load: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let obs = if matches!(cli.command, Command::Serve(_)) {
        ObsConfig::default()
    } else {
        ObsConfig::cli()
    };
    init_tracing(obs)?;
    let config = Arc::new(AppConfig::load()?);
    let dashboard = build_dashboard(&config)?;
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, config, dashboard).await,
        Command::Report { dept } => run_report(&dashboard, dept).await,
        Command::Lookup { first, last } => run_lookup(&dashboard, &first, &last).await,
        Command::Salaries => run_salaries(&dashboard).await,
        Command::Health => run_health(dashboard.client()).await,
    }
}

fn build_dashboard(config: &AppConfig) -> Result<Arc<Dashboard>> {
    let client = HrClient::new(config.client_settings()).context("invalid service endpoints")?;
    let dashboard = Dashboard::new(client).with_enrich_concurrency(config.enrich_concurrency);
    Ok(Arc::new(dashboard))
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>, dashboard: Arc<Dashboard>) -> Result<()> {
    if !cmd.skip_initial_load {
        match dashboard.refresh().await {
            Ok(RefreshOutcome::Loaded { employees }) => info!(employees, "initial load complete"),
            Ok(RefreshOutcome::AlreadyRunning) => {}
            Err(err) => warn!(error = %err, "initial load failed; serving an empty view until refresh"),
        }
    }
    let state = AppState {
        schema: graphql::build_schema(dashboard.clone()),
        dashboard,
        config,
    };
    http::serve(ServeConfig::from(&cmd), state).await
}

async fn run_report(dashboard: &Dashboard, dept: DeptSelector) -> Result<()> {
    dashboard.refresh().await?;
    let view = dashboard.view_for(dept).await;
    print!("{}", report::render_dashboard(&view));
    Ok(())
}

async fn run_lookup(dashboard: &Dashboard, first: &str, last: &str) -> Result<()> {
    let record = dashboard.lookup_by_name(first, last).await?;
    print!("{}", report::render_payroll(&record));
    Ok(())
}

async fn run_salaries(dashboard: &Dashboard) -> Result<()> {
    let entries = dashboard.salary_list().await?;
    print!("{}", report::render_salary_list(&entries));
    Ok(())
}

async fn run_health(client: &HrClient) -> Result<()> {
    let checks = Service::ALL.into_iter().map(|service| async move {
        let result = client.health(service).await.map_err(|err| err.to_string());
        (service.to_string(), result)
    });
    let results = join_all(checks).await;
    print!("{}", report::render_health(&results));
    if results.iter().any(|(_, result)| result.is_err()) {
        return Err(anyhow!("one or more services are down"));
    }
    Ok(())
}
