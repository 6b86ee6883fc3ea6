use std::{
    io::{self, Write as _},
    sync::Arc,
};

use clap::Args;
use storeops::summary::summarize;
use storeops_app::{
    campaigns::CampaignEnricher,
    config::{DatabaseConfig, PimArgs, PricingArgs},
    pim::AkeneoClient,
};

use super::{FilterArgs, OutputFormat, load_campaigns, render};

#[derive(Debug, Args)]
pub(crate) struct SummaryArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    pim: PimArgs,

    #[command(flatten)]
    pricing: PricingArgs,

    #[command(flatten)]
    filter: FilterArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

pub(crate) async fn run(args: SummaryArgs) -> Result<(), String> {
    let campaigns = load_campaigns(&args.database, &args.filter).await?;

    let enricher = CampaignEnricher::new(
        Arc::new(AkeneoClient::new(args.pim.to_config())),
        args.pricing.to_policy(),
    )
    .with_concurrency(args.pricing.batch_concurrency);

    let batch = enricher.process_batch(campaigns).await;
    let summary = summarize(batch.campaigns());

    let mut out = io::stdout().lock();

    match args.format {
        OutputFormat::Table => render::write_summary_table(&mut out, &summary)
            .map_err(|error| format!("failed to write output: {error}"))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &summary)
                .map_err(|error| format!("failed to write output: {error}"))?;

            writeln!(out).map_err(|error| format!("failed to write output: {error}"))?;
        }
    }

    Ok(())
}
