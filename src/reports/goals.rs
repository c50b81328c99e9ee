//! Goal completion

use serde::Serialize;

use crate::models::Money;

/// Percentage of `target` reached by `current`, rounded and clamped to 0..=100
///
/// A non-positive target counts as complete.
pub fn goal_completion(current: Money, target: Money) -> u8 {
    if !target.is_positive() {
        return 100;
    }
    let ratio = current.cents() as f64 / target.cents() as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// A named savings or revenue goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub name: String,
    pub current: Money,
    pub target: Money,
}

impl GoalProgress {
    pub fn new(name: impl Into<String>, current: Money, target: Money) -> Self {
        Self {
            name: name.into(),
            current,
            target,
        }
    }

    pub fn completion(&self) -> u8 {
        goal_completion(self.current, self.target)
    }

    pub fn is_complete(&self) -> bool {
        self.completion() >= 100
    }

    /// Amount still missing; zero once the target is met
    pub fn remaining(&self) -> Money {
        if self.current >= self.target {
            Money::zero()
        } else {
            self.target - self.current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(current: i64, target: i64) -> u8 {
        goal_completion(Money::from_cents(current), Money::from_cents(target))
    }

    #[test]
    fn test_rounds_to_nearest() {
        assert_eq!(pct(1, 3), 33);
        assert_eq!(pct(2, 3), 67);
        assert_eq!(pct(50, 100), 50);
        assert_eq!(pct(1, 200), 1);
    }

    #[test]
    fn test_clamped() {
        assert_eq!(pct(300, 100), 100);
        assert_eq!(pct(-50, 100), 0);
    }

    #[test]
    fn test_non_positive_target_is_complete() {
        assert_eq!(pct(0, 0), 100);
        assert_eq!(pct(10, -5), 100);
    }

    #[test]
    fn test_goal_progress() {
        let goal = GoalProgress::new(
            "Emergency fund",
            Money::from_cents(7_500),
            Money::from_cents(10_000),
        );
        assert_eq!(goal.completion(), 75);
        assert_eq!(goal.remaining().cents(), 2_500);
        assert!(!goal.is_complete());

        let done = GoalProgress::new(
            "Laptop",
            Money::from_cents(12_000),
            Money::from_cents(10_000),
        );
        assert!(done.is_complete());
        assert!(done.remaining().is_zero());
    }
}
