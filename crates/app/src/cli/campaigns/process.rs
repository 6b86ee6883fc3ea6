use std::{
    io::{self, Write as _},
    sync::Arc,
    time::Instant,
};

use clap::Args;
use humanize_duration::{Truncate, prelude::DurationExt};
use storeops_app::{
    campaigns::CampaignEnricher,
    config::{DatabaseConfig, PimArgs, PricingArgs},
    pim::AkeneoClient,
};

use super::{FilterArgs, OutputFormat, load_campaigns, render};

#[derive(Debug, Args)]
pub(crate) struct ProcessArgs {
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

pub(crate) async fn run(args: ProcessArgs) -> Result<(), String> {
    let campaigns = load_campaigns(&args.database, &args.filter).await?;

    let enricher = CampaignEnricher::new(
        Arc::new(AkeneoClient::new(args.pim.to_config())),
        args.pricing.to_policy(),
    )
    .with_concurrency(args.pricing.batch_concurrency);

    let started = Instant::now();
    let batch = enricher.process_batch(campaigns).await;
    let elapsed = started.elapsed();

    let mut out = io::stdout().lock();

    match args.format {
        OutputFormat::Table => {
            render::write_pricing_table(&mut out, batch.campaigns())
                .map_err(|error| format!("failed to write output: {error}"))?;

            writeln!(
                out,
                "processed {} of {} campaigns ({} failed) in {}",
                batch.processed_count(),
                batch.total_count(),
                batch.failed_count(),
                elapsed.human(Truncate::Millis)
            )
            .map_err(|error| format!("failed to write output: {error}"))?;
        }
        OutputFormat::Json => {
            let records: Vec<_> = batch
                .campaigns()
                .iter()
                .map(|campaign| &campaign.pricing)
                .collect();

            let document = serde_json::json!({
                "total_count": batch.total_count(),
                "processed_count": batch.processed_count(),
                "failed_count": batch.failed_count(),
                "campaigns": records,
            });

            serde_json::to_writer_pretty(&mut out, &document)
                .map_err(|error| format!("failed to write output: {error}"))?;

            writeln!(out).map_err(|error| format!("failed to write output: {error}"))?;
        }
    }

    Ok(())
}
