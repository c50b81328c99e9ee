//! Derived aggregation
//!
//! Pure functions over transactions and bills: totals, the monthly
//! series, goal completion, calendar events and the dashboard summary.
//! Nothing here is stored; callers recompute on demand.

pub mod calendar;
pub mod goals;
pub mod monthly;
pub mod summary;
pub mod totals;

pub use calendar::{calendar_event, calendar_events, CalendarEvent, PAID_COLOR, PENDING_COLOR};
pub use goals::{goal_completion, GoalProgress};
pub use monthly::{monthly_series, MonthlyPoint};
pub use summary::DashboardSummary;
pub use totals::Totals;
