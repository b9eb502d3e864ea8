use quote_relay::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let config = cli.load_config()?;

    // Initialize telemetry
    let _telemetry = quote_relay::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command() {
        Commands::Serve => {
            tracing::info!("Starting quote relay");
            cli::serve(config).await?;
        }
        Commands::Config => {
            println!("{}", cli::render_config(&config)?);
        }
    }

    Ok(())
}
