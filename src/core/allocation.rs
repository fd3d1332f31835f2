//! Target allocation plans, recommendations and the plan editing session.

use super::currency::round_currency;
use super::error::ValidationError;
use super::holding::{AssetClass, Fund};
use super::valuation::Valuation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target percentages per asset class. Committed plans sum to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub equities: u32,
    pub fixed_income: u32,
    pub alternatives: u32,
    pub cash: u32,
}

impl Default for AllocationPlan {
    fn default() -> Self {
        Self {
            equities: 60,
            fixed_income: 30,
            alternatives: 8,
            cash: 2,
        }
    }
}

impl AllocationPlan {
    pub fn new(equities: u32, fixed_income: u32, alternatives: u32, cash: u32) -> Self {
        Self {
            equities,
            fixed_income,
            alternatives,
            cash,
        }
    }

    pub fn sum(&self) -> u32 {
        [self.fixed_income, self.alternatives, self.cash]
            .iter()
            .fold(self.equities, |acc, pct| acc.saturating_add(*pct))
    }

    pub fn percentage(&self, class: AssetClass) -> u32 {
        match class {
            AssetClass::Equity => self.equities,
            AssetClass::Bond => self.fixed_income,
            AssetClass::Alternative => self.alternatives,
            AssetClass::Cash => self.cash,
        }
    }

    /// Sets one class's percentage. The plan may stop summing to 100 until
    /// the remaining classes are adjusted.
    pub fn set_percentage(&mut self, class: AssetClass, value: u32) -> Result<(), ValidationError> {
        if value > 100 {
            return Err(ValidationError::PercentageOutOfRange {
                field: class.display_info().0,
                value,
            });
        }
        match class {
            AssetClass::Equity => self.equities = value,
            AssetClass::Bond => self.fixed_income = value,
            AssetClass::Alternative => self.alternatives = value,
            AssetClass::Cash => self.cash = value,
        }
        Ok(())
    }

    /// Checks the commit invariant, reporting the actual sum on failure.
    pub fn check(&self) -> Result<(), ValidationError> {
        let sum = self.sum();
        if sum == 100 {
            Ok(())
        } else {
            Err(ValidationError::AllocationSum { sum })
        }
    }
}

/// True iff the four percentages sum to exactly 100.
pub fn validate(plan: &AllocationPlan) -> bool {
    plan.sum() == 100
}

/// Recommended amount per class in display currency, each rounded on its own.
///
/// The rounded amounts need not add back up to the target total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub equities: f64,
    pub fixed_income: f64,
    pub alternatives: f64,
    pub cash: f64,
}

impl Recommendation {
    pub fn amount(&self, class: AssetClass) -> f64 {
        match class {
            AssetClass::Equity => self.equities,
            AssetClass::Bond => self.fixed_income,
            AssetClass::Alternative => self.alternatives,
            AssetClass::Cash => self.cash,
        }
    }
}

pub fn recommend(target_total: f64, plan: &AllocationPlan) -> Recommendation {
    let share = |pct: u32| round_currency(target_total * f64::from(pct) / 100.0);
    Recommendation {
        equities: share(plan.equities),
        fixed_income: share(plan.fixed_income),
        alternatives: share(plan.alternatives),
        cash: share(plan.cash),
    }
}

/// Each class's share of the grand total, in percent. Empty when the total is not positive.
pub fn current_allocation(valuation: &Valuation) -> BTreeMap<AssetClass, f64> {
    if valuation.grand_total <= 0.0 {
        return BTreeMap::new();
    }
    AssetClass::ALL
        .iter()
        .map(|c| (*c, valuation.class_total(*c) * 100.0 / valuation.grand_total))
        .collect()
}

/// Recommended minus current amount per class. Positive means the class is under target.
pub fn drift(recommendation: &Recommendation, valuation: &Valuation) -> BTreeMap<AssetClass, f64> {
    AssetClass::ALL
        .iter()
        .map(|c| (*c, recommendation.amount(*c) - valuation.class_total(*c)))
        .collect()
}

/// Current total as a percentage of the fund's target value.
pub fn progress(grand_total: f64, fund: &Fund) -> Option<f64> {
    (fund.target_value > 0.0).then(|| grand_total * 100.0 / fund.target_value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanState {
    Committed,
    Draft,
}

/// An editing session over the committed plan.
///
/// `begin_edit` opens a draft copy; `commit` promotes it only when it sums to
/// 100, and `cancel` throws it away. The draft lives only as long as the session.
#[derive(Debug, Clone)]
pub struct PlanSession {
    committed: AllocationPlan,
    draft: Option<AllocationPlan>,
}

impl PlanSession {
    pub fn new(committed: AllocationPlan) -> Self {
        Self {
            committed,
            draft: None,
        }
    }

    pub fn state(&self) -> PlanState {
        if self.draft.is_some() {
            PlanState::Draft
        } else {
            PlanState::Committed
        }
    }

    pub fn committed(&self) -> &AllocationPlan {
        &self.committed
    }

    /// Opens a draft from the committed plan, or returns the open one.
    pub fn begin_edit(&mut self) -> &mut AllocationPlan {
        let committed = self.committed;
        self.draft.get_or_insert(committed)
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Commits the draft. On failure the draft stays open and the committed plan is untouched.
    pub fn commit(&mut self) -> Result<AllocationPlan, ValidationError> {
        let Some(draft) = self.draft else {
            return Ok(self.committed);
        };
        draft.check()?;
        self.committed = draft;
        self.draft = None;
        Ok(self.committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Multipliers;
    use crate::core::holding::Holding;
    use crate::core::valuation::aggregate;
    use std::collections::HashMap;

    #[test]
    fn test_validate() {
        assert!(validate(&AllocationPlan::new(60, 30, 8, 2)));
        assert!(!validate(&AllocationPlan::new(60, 30, 8, 3)));
        assert!(validate(&AllocationPlan::new(100, 0, 0, 0)));
        assert!(!validate(&AllocationPlan::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_check_reports_sum() {
        assert_eq!(
            AllocationPlan::new(60, 30, 8, 3).check(),
            Err(ValidationError::AllocationSum { sum: 101 })
        );
    }

    #[test]
    fn test_recommend() {
        let rec = recommend(1_000_000.0, &AllocationPlan::new(60, 30, 8, 2));
        assert_eq!(rec.equities, 600000.00);
        assert_eq!(rec.fixed_income, 300000.00);
        assert_eq!(rec.alternatives, 80000.00);
        assert_eq!(rec.cash, 20000.00);
    }

    #[test]
    fn test_recommend_rounds_each_class() {
        let rec = recommend(100.005, &AllocationPlan::new(33, 33, 33, 1));
        assert_eq!(rec.equities, 33.0);
        assert_eq!(rec.cash, 1.0);
    }

    #[test]
    fn test_set_percentage_range() {
        let mut plan = AllocationPlan::default();
        assert!(plan.set_percentage(AssetClass::Cash, 40).is_ok());
        assert_eq!(plan.cash, 40);
        assert_eq!(
            plan.set_percentage(AssetClass::Equity, 101),
            Err(ValidationError::PercentageOutOfRange {
                field: "Equities",
                value: 101
            })
        );
    }

    #[test]
    fn test_session_commit_and_reject() {
        let mut session = PlanSession::new(AllocationPlan::new(60, 30, 8, 2));
        assert_eq!(session.state(), PlanState::Committed);

        session.begin_edit().cash = 3;
        assert_eq!(session.state(), PlanState::Draft);
        assert_eq!(
            session.commit(),
            Err(ValidationError::AllocationSum { sum: 101 })
        );
        assert_eq!(*session.committed(), AllocationPlan::new(60, 30, 8, 2));
        assert_eq!(session.state(), PlanState::Draft);

        session.begin_edit().equities = 59;
        assert_eq!(session.commit(), Ok(AllocationPlan::new(59, 30, 8, 3)));
        assert_eq!(session.state(), PlanState::Committed);
        assert_eq!(*session.committed(), AllocationPlan::new(59, 30, 8, 3));
    }

    #[test]
    fn test_session_cancel_reverts() {
        let mut session = PlanSession::new(AllocationPlan::default());
        session.begin_edit().equities = 10;
        session.cancel();
        assert_eq!(session.state(), PlanState::Committed);
        assert_eq!(*session.committed(), AllocationPlan::default());
        assert_eq!(session.begin_edit().equities, 60);
    }

    #[test]
    fn test_current_allocation_and_drift() {
        let m = Multipliers {
            equity_bond_multiplier: 1.0,
            alternative_multiplier: 1.0,
        };
        let holdings = vec![
            Holding::new("Stocks", 700.0, AssetClass::Equity),
            Holding::new("Bonds", 300.0, AssetClass::Bond),
        ];
        let valuation = aggregate(&holdings, &HashMap::new(), &[], &m);

        let current = current_allocation(&valuation);
        assert_eq!(current[&AssetClass::Equity], 70.0);
        assert_eq!(current[&AssetClass::Bond], 30.0);
        assert_eq!(current[&AssetClass::Cash], 0.0);

        let rec = recommend(1000.0, &AllocationPlan::default());
        let gaps = drift(&rec, &valuation);
        assert_eq!(gaps[&AssetClass::Equity], -100.0);
        assert_eq!(gaps[&AssetClass::Bond], 0.0);
        assert_eq!(gaps[&AssetClass::Alternative], 80.0);
        assert_eq!(gaps[&AssetClass::Cash], 20.0);
    }

    #[test]
    fn test_progress() {
        let fund = Fund {
            id: "family".to_string(),
            target_value: 1_000_000.0,
            fund_type: None,
        };
        assert_eq!(progress(250_000.0, &fund), Some(25.0));
        let empty = Fund {
            target_value: 0.0,
            ..fund
        };
        assert_eq!(progress(250_000.0, &empty), None);
    }
}
