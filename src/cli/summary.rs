use super::ui;
use crate::core::config::AppConfig;
use crate::core::currency::Multipliers;
use crate::core::holding::AssetClass;
use crate::core::store::{FundStore, Snapshot};
use crate::core::valuation::{self, Valuation, ValueSource};
use anyhow::{Context, Result};
use comfy_table::Cell;
use tracing::debug;

pub async fn run(store: &dyn FundStore, config: &AppConfig) -> Result<()> {
    let valuation = load_valuation(
        store,
        &config.currency.multipliers,
        config.holdings.len() as u64,
    )
    .await?;
    println!("{}", render(&valuation, &config.currency.display));
    Ok(())
}

/// Reads one snapshot from the store and values it.
pub async fn load_valuation(
    store: &dyn FundStore,
    multipliers: &Multipliers,
    expected_holdings: u64,
) -> Result<Valuation> {
    let pb = ui::new_progress_bar(expected_holdings, true);
    pb.set_message("Loading holdings...");
    let snapshot = Snapshot::load(store, &|| pb.inc(1))
        .await
        .context("Failed to load fund records")?;
    pb.finish_and_clear();

    debug!(
        holdings = snapshot.holdings.len(),
        series = snapshot.series.len(),
        cash_records = snapshot.cash_records.len(),
        "Loaded snapshot"
    );

    let valuation = valuation::aggregate(
        &snapshot.holdings,
        &snapshot.series,
        &snapshot.cash_records,
        multipliers,
    );
    for skipped in &valuation.skipped {
        debug!("Skipped holding {}: {}", skipped.name, skipped.reason);
    }
    Ok(valuation)
}

pub fn render(valuation: &Valuation, display_currency: &str) -> String {
    let mut classes = ui::new_styled_table();
    classes.set_header(vec![
        ui::header_cell("Asset Class"),
        ui::header_cell(&format!("Value ({display_currency})")),
        ui::header_cell("Share"),
    ]);
    for class in AssetClass::ALL {
        let (name, emoji) = class.display_info();
        let total = valuation.class_total(class);
        let share = (valuation.grand_total > 0.0).then(|| total * 100.0 / valuation.grand_total);
        classes.add_row(vec![
            Cell::new(format!("{emoji} {name}")),
            ui::amount_cell(total),
            ui::format_optional_cell(share, |s| format!("{s:.2}%")),
        ]);
    }

    let mut holdings = ui::new_styled_table();
    holdings.set_header(vec![
        ui::header_cell("Holding"),
        ui::header_cell("Class"),
        ui::header_cell("As Of"),
        ui::header_cell("Base Value"),
        ui::header_cell(&format!("Value ({display_currency})")),
        ui::header_cell("Weight in Class"),
    ]);
    for value in &valuation.holdings {
        let as_of = match value.source {
            ValueSource::Month(month) => month.to_string(),
            ValueSource::BaseValue => ui::style_text("base", ui::StyleType::Subtle),
        };
        holdings.add_row(vec![
            Cell::new(&value.name),
            Cell::new(value.asset_class.to_string()),
            Cell::new(as_of),
            ui::amount_cell(value.base_amount),
            ui::amount_cell(value.display_value),
            ui::format_optional_cell(value.class_weight, |w| format!("{w:.2}%")),
        ]);
    }

    let mut output = format!(
        "{}\n\n{classes}\n\n{}\n\n{holdings}",
        ui::style_text("Asset Classes", ui::StyleType::Title),
        ui::style_text("Holdings", ui::StyleType::Title),
    );

    output.push_str(&format!(
        "\n\nGrand Total ({}): {}",
        ui::style_text(display_currency, ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_amount(valuation.grand_total),
            ui::StyleType::TotalValue
        )
    ));

    output.push_str(&format!(
        "\n{}",
        ui::style_text(
            &format!("Cash from {} record(s)", valuation.cash_record_count),
            ui::StyleType::Subtle
        )
    ));

    if !valuation.skipped.is_empty() {
        let names: Vec<&str> = valuation.skipped.iter().map(|s| s.name.as_str()).collect();
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!(
                    "Skipped {} malformed holding(s): {}",
                    valuation.skipped_count(),
                    names.join(", ")
                ),
                ui::StyleType::Error
            )
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::holding::{CashRecord, Holding};
    use crate::core::month::Month;
    use crate::core::series::MonthlySeries;
    use crate::store::Records;
    use crate::store::memory::MemoryStore;
    use std::collections::HashMap;

    fn store() -> MemoryStore {
        let mut broken = Holding::new("Broken REIT", 0.0, AssetClass::Alternative);
        broken.base_value = None;
        let mut series = HashMap::new();
        series.insert(
            "Sukuk".to_string(),
            MonthlySeries::new().with(Month::Feb, 2000.0),
        );
        MemoryStore::new(Records {
            holdings: vec![
                Holding::new("SPUS ETF", 57.24, AssetClass::Equity),
                Holding::new("Sukuk", 1000.0, AssetClass::Bond),
                broken,
            ],
            series,
            cash_records: vec![
                CashRecord {
                    id: None,
                    amount: 800.0,
                    date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                    note: None,
                },
                CashRecord {
                    id: None,
                    amount: -300.0,
                    date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    note: Some("Tuition".to_string()),
                },
            ],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_load_valuation() {
        let store = store();
        let valuation = load_valuation(&store, &Multipliers::default(), 3)
            .await
            .unwrap();

        assert_eq!(valuation.holdings.len(), 2);
        assert_eq!(valuation.skipped_count(), 1);
        assert!((valuation.class_total(AssetClass::Bond) - 7500.0).abs() < 1e-9);
        assert!((valuation.class_total(AssetClass::Cash) - 500.0).abs() < 1e-9);
        assert_eq!(valuation.cash_record_count, 2);
    }

    #[tokio::test]
    async fn test_render_summary() {
        let store = store();
        let valuation = load_valuation(&store, &Multipliers::default(), 3)
            .await
            .unwrap();

        let output = render(&valuation, "SAR");

        assert!(output.contains("SPUS ETF"));
        assert!(output.contains("214.65"));
        assert!(output.contains("7500.00"));
        assert!(output.contains("Grand Total"));
        assert!(output.contains("Cash from 2 record(s)"));
        assert!(output.contains("Skipped 1 malformed holding(s): Broken REIT"));
    }
}
