use super::{summary, ui};
use crate::core::allocation::{self, AllocationPlan};
use crate::core::config::AppConfig;
use crate::core::holding::{AssetClass, Fund};
use crate::core::store::FundStore;
use crate::core::valuation::Valuation;
use anyhow::{Context, Result, anyhow};
use comfy_table::Cell;
use tracing::debug;

pub async fn run(store: &dyn FundStore, config: &AppConfig, fund_id: Option<&str>) -> Result<()> {
    let fund_id = config
        .fund_id(fund_id)
        .ok_or_else(|| anyhow!("No fund configured, add one under `funds` in the config"))?;
    let fund = store
        .get_fund(fund_id)
        .await
        .with_context(|| format!("Failed to load fund '{fund_id}'"))?;
    let plan = store
        .get_allocation_plan()
        .await
        .context("Failed to load allocation plan")?;
    debug!("Using plan {plan:?} for fund {}", fund.id);

    let valuation = summary::load_valuation(
        store,
        &config.currency.multipliers,
        config.holdings.len() as u64,
    )
    .await?;

    println!("{}", render(&fund, &plan, &valuation, &config.currency.display));
    Ok(())
}

pub fn render(
    fund: &Fund,
    plan: &AllocationPlan,
    valuation: &Valuation,
    display_currency: &str,
) -> String {
    let recommendation = allocation::recommend(fund.target_value, plan);
    let current = allocation::current_allocation(valuation);
    let drift = allocation::drift(&recommendation, valuation);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset Class"),
        ui::header_cell("Target"),
        ui::header_cell(&format!("Recommended ({display_currency})")),
        ui::header_cell(&format!("Current ({display_currency})")),
        ui::header_cell("Current Share"),
        ui::header_cell("To Target"),
    ]);

    for class in AssetClass::ALL {
        table.add_row(vec![
            Cell::new(class.to_string()),
            ui::format_percentage_cell(f64::from(plan.percentage(class))),
            ui::amount_cell(recommendation.amount(class)),
            ui::amount_cell(valuation.class_total(class)),
            ui::format_optional_cell(current.get(&class).copied(), |s| format!("{s:.2}%")),
            ui::signed_amount_cell(drift.get(&class).copied().unwrap_or(0.0)),
        ]);
    }

    let fund_label = match &fund.fund_type {
        Some(kind) => format!("{} ({kind})", fund.id),
        None => fund.id.clone(),
    };
    let progress = allocation::progress(valuation.grand_total, fund)
        .map_or("N/A".to_string(), |p| format!("{p:.2}%"));

    format!(
        "Fund: {}\n\n{table}\n\nTarget Value ({display_currency}): {}\nCurrent Value ({display_currency}): {}\nProgress: {}",
        ui::style_text(&fund_label, ui::StyleType::Title),
        ui::format_amount(fund.target_value),
        ui::style_text(
            &ui::format_amount(valuation.grand_total),
            ui::StyleType::TotalValue
        ),
        progress,
    )
}
