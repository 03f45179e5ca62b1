//! Budget status against the planned budget.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Under,
    Near,
    Over,
}

impl BudgetStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetStatus::Under => "under budget",
            BudgetStatus::Near => "near budget",
            BudgetStatus::Over => "over budget",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ratios of spend to plan at which the status changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetThresholds {
    /// Above `planned * near_ratio` the trip is Near
    pub near_ratio: f64,
    /// Above `planned * over_ratio` the trip is Over
    pub over_ratio: f64,
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            near_ratio: 0.9,
            over_ratio: 1.1,
        }
    }
}

impl BudgetThresholds {
    /// A trip without a planned budget is always Under.
    pub fn status(&self, total: f64, planned: f64) -> BudgetStatus {
        if planned <= 0.0 {
            BudgetStatus::Under
        } else if total > planned * self.over_ratio {
            BudgetStatus::Over
        } else if total > planned * self.near_ratio {
            BudgetStatus::Near
        } else {
            BudgetStatus::Under
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = BudgetThresholds::default();
        assert_eq!(t.status(500.0, 1000.0), BudgetStatus::Under);
        assert_eq!(t.status(900.0, 1000.0), BudgetStatus::Under);
        assert_eq!(t.status(901.0, 1000.0), BudgetStatus::Near);
        assert_eq!(t.status(1100.0, 1000.0), BudgetStatus::Near);
        assert_eq!(t.status(1101.0, 1000.0), BudgetStatus::Over);
    }

    #[test]
    fn test_no_plan_is_under() {
        let t = BudgetThresholds::default();
        assert_eq!(t.status(10_000.0, 0.0), BudgetStatus::Under);
        assert_eq!(t.status(0.0, 0.0), BudgetStatus::Under);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = BudgetThresholds { near_ratio: 0.5, over_ratio: 1.0 };
        assert_eq!(t.status(600.0, 1000.0), BudgetStatus::Near);
        assert_eq!(t.status(1000.5, 1000.0), BudgetStatus::Over);
    }
}
