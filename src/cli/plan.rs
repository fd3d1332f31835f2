use super::ui;
use crate::core::allocation::{AllocationPlan, PlanSession};
use crate::core::holding::AssetClass;
use crate::core::store::FundStore;
use anyhow::{Context, Result};
use comfy_table::Cell;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanCommand {
    Show,
    Set(PlanChanges),
    Reset,
}

/// Percentages to change in the draft; `None` keeps the committed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanChanges {
    pub equities: Option<u32>,
    pub fixed_income: Option<u32>,
    pub alternatives: Option<u32>,
    pub cash: Option<u32>,
}

impl PlanChanges {
    fn iter(&self) -> impl Iterator<Item = (AssetClass, u32)> {
        [
            (AssetClass::Equity, self.equities),
            (AssetClass::Bond, self.fixed_income),
            (AssetClass::Alternative, self.alternatives),
            (AssetClass::Cash, self.cash),
        ]
        .into_iter()
        .filter_map(|(class, value)| value.map(|v| (class, v)))
    }
}

pub async fn run(store: &dyn FundStore, command: PlanCommand) -> Result<()> {
    let committed = store
        .get_allocation_plan()
        .await
        .context("Failed to load allocation plan")?;

    match command {
        PlanCommand::Show => {
            println!("{}", render(&committed));
        }
        PlanCommand::Set(changes) => {
            let plan = edit(store, committed, &changes).await?;
            info!("Committed allocation plan {plan:?}");
            println!("{}", render(&plan));
        }
        PlanCommand::Reset => {
            let mut session = PlanSession::new(committed);
            *session.begin_edit() = AllocationPlan::default();
            let plan = session.commit()?;
            store.save_allocation_plan(&plan).await?;
            println!("{}", render(&plan));
        }
    }
    Ok(())
}

/// Applies `changes` to a draft of `committed` and commits it to the store.
///
/// Nothing is written unless the draft sums to 100.
pub async fn edit(
    store: &dyn FundStore,
    committed: AllocationPlan,
    changes: &PlanChanges,
) -> Result<AllocationPlan> {
    let mut session = PlanSession::new(committed);
    let draft = session.begin_edit();
    for (class, value) in changes.iter() {
        draft.set_percentage(class, value)?;
    }

    let plan = session
        .commit()
        .context("Allocation plan not saved, the committed plan is unchanged")?;
    store
        .save_allocation_plan(&plan)
        .await
        .context("Failed to save allocation plan")?;
    Ok(plan)
}

pub fn render(plan: &AllocationPlan) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Asset Class"), ui::header_cell("Target")]);
    for class in AssetClass::ALL {
        let (name, emoji) = class.display_info();
        table.add_row(vec![
            Cell::new(format!("{emoji} {name}")),
            ui::format_percentage_cell(f64::from(plan.percentage(class))),
        ]);
    }
    format!(
        "{}\n\n{table}",
        ui::style_text("Target Allocation", ui::StyleType::Title)
    )
}
