//! Bill calendar events

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Bill, BillId};

pub const PAID_COLOR: &str = "#16a34a";
pub const PENDING_COLOR: &str = "#f97316";

/// One all-day calendar entry per bill, on its due date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: BillId,
    pub title: String,
    pub date: NaiveDate,
    pub color: &'static str,
    pub paid: bool,
}

/// Event for `bill`, its amount shown with `currency_symbol`
pub fn calendar_event(bill: &Bill, currency_symbol: &str) -> CalendarEvent {
    CalendarEvent {
        id: bill.id.clone(),
        title: format!(
            "{} • {}",
            bill.description,
            bill.amount.format_with_symbol(currency_symbol)
        ),
        date: bill.due_date,
        color: if bill.is_paid() { PAID_COLOR } else { PENDING_COLOR },
        paid: bill.is_paid(),
    }
}

/// Events in the same order as `bills`
pub fn calendar_events(bills: &[Bill], currency_symbol: &str) -> Vec<CalendarEvent> {
    bills
        .iter()
        .map(|bill| calendar_event(bill, currency_symbol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewBill, TransactionId};
    use chrono::Utc;

    #[test]
    fn test_event_colors_follow_status() {
        let due = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let pending = NewBill::new("Electricity", Money::from_cents(18_990), due, "Main")
            .with_id("b1")
            .into_bill(due);
        let mut paid = pending.clone();
        paid.mark_paid(TransactionId::from("t"), Utc::now()).unwrap();

        let events = calendar_events(&[pending, paid], "$");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Electricity • $189.90");
        assert_eq!(events[0].color, PENDING_COLOR);
        assert_eq!(events[0].date, due);
        assert_eq!(events[1].color, PAID_COLOR);
        assert!(events[1].paid);
    }

    #[test]
    fn test_title_uses_currency_symbol() {
        let due = NaiveDate::from_ymd_opt(2025, 6, 18).unwrap();
        let bill = NewBill::new("Rent", Money::from_cents(210_000), due, "Main").into_bill(due);

        assert_eq!(calendar_event(&bill, "€").title, "Rent • €2100.00");
        assert_eq!(calendar_event(&bill, "").title, "Rent • 2100.00");
    }
}
