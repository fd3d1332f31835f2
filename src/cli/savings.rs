use super::ui;
use crate::core::config::AppConfig;
use crate::core::savings::{self, CashSummary};
use crate::core::store::FundStore;
use anyhow::{Context, Result};
use comfy_table::Cell;

pub async fn run(store: &dyn FundStore, config: &AppConfig) -> Result<()> {
    let records = store
        .list_cash_records()
        .await
        .context("Failed to load cash records")?;

    if records.is_empty() {
        println!("No cash records found.");
        return Ok(());
    }

    let summary = savings::summarize(&records);
    println!("{}", render(&summary, &config.currency.display));
    Ok(())
}

pub fn render(summary: &CashSummary, display_currency: &str) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell(&format!("Net ({display_currency})")),
    ]);
    for ((year, month), net) in &summary.monthly_net {
        table.add_row(vec![
            Cell::new(format!("{year}-{:02}", month.number())),
            ui::signed_amount_cell(*net),
        ]);
    }

    let period = match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => "N/A".to_string(),
    };

    format!(
        "{}\n\n{table}\n\nRecords: {}  Period: {}\nInflows: {}  Outflows: {}\nNet Savings ({}): {}",
        ui::style_text("Savings", ui::StyleType::Title),
        summary.count,
        period,
        ui::format_amount(summary.inflows),
        ui::format_amount(summary.outflows),
        ui::style_text(display_currency, ui::StyleType::TotalLabel),
        ui::style_text(&ui::format_amount(summary.net), ui::StyleType::TotalValue),
    )
}
