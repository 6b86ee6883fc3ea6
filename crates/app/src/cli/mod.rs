use clap::{Parser, Subcommand};
use storeops_app::logging::{LoggingConfig, init_logging};

mod campaigns;

#[derive(Debug, Parser)]
#[command(name = "storeops-app", about = "Store operations CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Campaigns(campaigns::CampaignsCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_logging(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Campaigns(command) => campaigns::run(command).await,
        }
    }
}
