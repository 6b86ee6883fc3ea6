use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use storeops::campaigns::RawCampaignRecord;
use storeops_app::{
    campaigns::{CampaignFilter, CampaignsService, PgCampaignsService, today},
    config::DatabaseConfig,
};

mod process;
mod render;
mod summary;
mod validate;

#[derive(Debug, Args)]
pub(crate) struct CampaignsCommand {
    #[command(subcommand)]
    command: CampaignsSubcommand,
}

#[derive(Debug, Subcommand)]
enum CampaignsSubcommand {
    /// Enrich campaigns with PIM data and print their pricing
    Process(process::ProcessArgs),

    /// Check stored campaigns for data problems
    Validate(validate::ValidateArgs),

    /// Print statistics over enriched campaigns
    Summary(summary::SummaryArgs),
}

pub(crate) async fn run(command: CampaignsCommand) -> Result<(), String> {
    match command.command {
        CampaignsSubcommand::Process(args) => process::run(args).await,
        CampaignsSubcommand::Validate(args) => validate::run(args).await,
        CampaignsSubcommand::Summary(args) => summary::run(args).await,
    }
}

/// Output format for campaign commands.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,

    /// JSON document.
    Json,
}

/// Which stored campaigns a command works on.
#[derive(Debug, Args)]
pub(crate) struct FilterArgs {
    /// Only include these campaign types (repeatable)
    #[arg(long = "campaign-type")]
    campaign_types: Vec<String>,

    /// Only include campaigns in this segment
    #[arg(long)]
    segment: Option<String>,

    /// Only include campaigns for this brand
    #[arg(long)]
    brand: Option<String>,

    /// Earliest live date (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<Date>,

    /// Latest end date (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<Date>,

    /// Include campaigns outside their live window
    #[arg(long)]
    include_inactive: bool,
}

impl FilterArgs {
    fn to_filter(&self) -> CampaignFilter {
        CampaignFilter {
            campaign_types: self.campaign_types.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            segment: self.segment.clone(),
            brand: self.brand.clone(),
            active_only: !self.include_inactive,
        }
    }
}

async fn load_campaigns(
    database: &DatabaseConfig,
    filter: &FilterArgs,
) -> Result<Vec<RawCampaignRecord>, String> {
    let pool = storeops_app::database::connect(database)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    PgCampaignsService::new(pool)
        .list_campaigns(filter.to_filter(), today())
        .await
        .map_err(|error| format!("failed to load campaigns: {error}"))
}
