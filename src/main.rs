pub mod config;
pub mod data;
pub mod figure;
pub mod server;
pub mod types;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the market share dashboard
    Serve {
        #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { config } => {
            let app_config = config::AppConfig::load_from_file(config)?;

            // The dataset and figure are built exactly once here and
            // handed to the server; nothing re-renders after startup.
            let dataset = data::load_dataset(&app_config.input.data_csv)?;
            let figure = figure::build_figure(&dataset, &app_config.map.title);

            server::start_server(app_config, figure).await?;
        }
    }

    Ok(())
}
