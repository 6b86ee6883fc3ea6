use std::io::{self, Write as _};

use clap::Args;
use storeops::validation::validate_all;
use storeops_app::config::DatabaseConfig;

use super::{FilterArgs, OutputFormat, load_campaigns, render};

#[derive(Debug, Args)]
pub(crate) struct ValidateArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    filter: FilterArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Exit with an error when any campaign is invalid
    #[arg(long)]
    strict: bool,
}

pub(crate) async fn run(args: ValidateArgs) -> Result<(), String> {
    let campaigns = load_campaigns(&args.database, &args.filter).await?;
    let report = validate_all(&campaigns);

    let mut out = io::stdout().lock();

    match args.format {
        OutputFormat::Table => render::write_validation_table(&mut out, &report)
            .map_err(|error| format!("failed to write output: {error}"))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)
                .map_err(|error| format!("failed to write output: {error}"))?;

            writeln!(out).map_err(|error| format!("failed to write output: {error}"))?;
        }
    }

    if args.strict && report.invalid_campaigns > 0 {
        return Err(format!(
            "{} of {} campaigns are invalid",
            report.invalid_campaigns, report.total_campaigns
        ));
    }

    Ok(())
}
