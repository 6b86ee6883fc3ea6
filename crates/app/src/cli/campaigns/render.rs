use std::io;

use storeops::{
    batch::ProcessedCampaign, pricing::EnrichedPricingRecord, summary::CampaignSummary,
    validation::ValidationReport,
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};

pub(crate) fn write_pricing_table(
    out: &mut impl io::Write,
    campaigns: &[ProcessedCampaign],
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(EnrichedPricingRecord::COLUMNS);

    for campaign in campaigns {
        builder.push_record(campaign.pricing.to_row().map(|cell| cell.to_string()));
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")
}

pub(crate) fn write_validation_table(
    out: &mut impl io::Write,
    report: &ValidationReport,
) -> io::Result<()> {
    writeln!(
        out,
        "{} campaigns checked: {} valid, {} invalid",
        report.total_campaigns, report.valid_campaigns, report.invalid_campaigns
    )?;

    if report.validation_errors.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["product_id", "errors"]);

    for campaign in &report.validation_errors {
        let errors: Vec<String> = campaign.errors.iter().map(ToString::to_string).collect();

        builder.push_record([campaign.product_id.clone(), errors.join("\n")]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());

    writeln!(out, "{table}")
}

pub(crate) fn write_summary_table(
    out: &mut impl io::Write,
    summary: &CampaignSummary,
) -> io::Result<()> {
    let Some(statistics) = &summary.statistics else {
        return writeln!(out, "no campaigns to summarise");
    };

    let mut builder = Builder::default();

    builder.push_record(["statistic", "value"]);
    builder.push_record(["total_campaigns".to_string(), summary.total_campaigns.to_string()]);
    builder.push_record(["campaign_types".to_string(), statistics.campaign_types.join(", ")]);
    builder.push_record(["avg_selling_price".to_string(), format!("{:.2}", statistics.avg_selling_price)]);
    builder.push_record(["min_selling_price".to_string(), format!("{:.2}", statistics.min_selling_price)]);
    builder.push_record(["max_selling_price".to_string(), format!("{:.2}", statistics.max_selling_price)]);
    builder.push_record(["avg_mrp".to_string(), format!("{:.2}", statistics.avg_mrp)]);
    builder.push_record([
        "total_potential_revenue".to_string(),
        format!("{:.2}", statistics.total_potential_revenue),
    ]);

    for (campaign_type, count) in &statistics.campaign_type_counts {
        builder.push_record([format!("count[{campaign_type}]"), count.to_string()]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::last(), Alignment::right());

    writeln!(out, "{table}")
}
