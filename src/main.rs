use clap::Parser;
use employee_directory::cli::{utils::report_error, Cli, OutputFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SERVER_PORT, EMPLOYEE_UPSTREAM_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = employee_directory::config::config();
    tracing::debug!("Starting employee directory in {:?} mode", config.environment);

    let cli = Cli::parse();
    let output_format = OutputFormat::from_cli(&cli);

    if let Err(e) = employee_directory::cli::run(cli).await {
        let verbose = matches!(std::env::var("CLI_VERBOSE").as_deref(), Ok("true") | Ok("1"));
        if report_error(&output_format, &e, verbose).is_err() {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }

    Ok(())
}
