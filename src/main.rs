use std::path::PathBuf;

use anyhow::Result;
use bootgate_lib::bootstrap::config::{load_config_or_default, CONFIG_ENV};
use bootgate_lib::bootstrap::tracing::init_tracing_subscriber;
use bootgate_lib::GateRuntime;
use clap::{Parser, Subcommand};
use gate_app::usecases::navigation::NavigationGateWatcher;
use gate_core::ports::RouterPort;
use gate_core::{ReadinessSource, Theme};
use gate_infra::AppPaths;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bootgate")]
#[command(about = "Cold-start session bootstrap and navigation gate", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Router location at launch
    #[arg(short, long, default_value = "/")]
    route: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap and print where the gate lands (default)
    Status,
    /// Sign in with a freshly issued anonymous identity
    SignInAnonymous,
    /// Mark onboarding as completed
    CompleteOnboarding,
    /// Clear the session and the onboarding flag
    SignOut,
    /// Dismiss the gender reminder
    DismissReminder,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env 需要在参数解析前加载，以便 BOOTGATE_CONFIG 生效
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let (config, config_error) = load_config_or_default(cli.config.clone());
    let paths = AppPaths::resolve(&config.data_dir)?;
    init_tracing_subscriber(config.log_to_file.then_some(paths.log_dir.as_path()))?;
    if let Some(err) = config_error {
        warn!(error = ?err, "config not loaded, using defaults");
    }

    let runtime = GateRuntime::build(&config, paths, &cli.route);
    // No font assets in a headless host.
    runtime.readiness.mark_ready(ReadinessSource::Fonts);

    let report = runtime.bootstrap_sequencer().run().await?;
    info!(outcome = ?report.restoration, "bootstrap report");

    let mut gate = runtime.gate_watcher();
    gate.settle().await;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => {}
        Commands::SignInAnonymous => {
            let identity_id = runtime.issue_anonymous_session().execute().await?;
            println!("signed in: {identity_id}");
        }
        Commands::CompleteOnboarding => {
            runtime.complete_onboarding().execute().await?;
            println!("onboarding completed");
        }
        Commands::SignOut => {
            runtime.sign_out().execute().await?;
            println!("signed out");
        }
        Commands::DismissReminder => {
            runtime.dismiss_gender_reminder().execute().await?;
            println!("gender reminder dismissed");
        }
    }

    gate.settle().await;
    print_status(&runtime, &gate, report.theme).await;
    Ok(())
}

async fn print_status(runtime: &GateRuntime, gate: &NavigationGateWatcher, theme: Theme) {
    let session = runtime.session.snapshot();
    let identity = match &session.identity {
        Some(identity) => format!("{} ({})", identity.id, identity.kind),
        None => "none".to_string(),
    };
    let state = gate
        .state()
        .map_or_else(|| "unknown".to_string(), |state| format!("{state:?}"));

    println!("route:            {}", runtime.router.current_path());
    println!("gate:             {state}");
    println!("identity:         {identity}");
    println!("theme:            {theme}");
    println!(
        "display ready:    {}",
        if runtime.readiness.is_ready() { "yes" } else { "no" }
    );
    println!(
        "reminder hidden:  {}",
        runtime.gender_reminder_status().execute().await
    );
}
