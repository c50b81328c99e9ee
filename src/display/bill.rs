//! Bill display formatting

use chrono::NaiveDate;

use super::report::truncate;
use crate::models::Bill;
use crate::reports::CalendarEvent;

fn status_label(bill: &Bill, today: NaiveDate) -> &'static str {
    if bill.is_paid() {
        "paid"
    } else if bill.is_overdue(today) {
        "OVERDUE"
    } else {
        "pending"
    }
}

/// Format bills as a table, earliest due first as given
pub fn format_bill_list(bills: &[Bill], today: NaiveDate, symbol: &str) -> String {
    if bills.is_empty() {
        return "No bills found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<38} {:10} {:<24} {:>12}  {}\n",
        "ID", "Due", "Description", "Amount", "Status"
    ));
    output.push_str(&"-".repeat(96));
    output.push('\n');

    for bill in bills {
        output.push_str(&format!(
            "{:<38} {} {:<24} {:>12}  {}\n",
            bill.id,
            bill.due_date.format("%Y-%m-%d"),
            truncate(&bill.description, 24),
            bill.amount.format_with_symbol(symbol),
            status_label(bill, today)
        ));
    }

    output
}

/// Format bill details for display
pub fn format_bill_details(bill: &Bill, today: NaiveDate, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bill:        {}\n", bill.id));
    output.push_str(&format!("Description: {}\n", bill.description));
    output.push_str(&format!(
        "Amount:      {}\n",
        bill.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Due:         {}\n", bill.due_date.format("%Y-%m-%d")));
    output.push_str(&format!("Account:     {}\n", bill.account));
    output.push_str(&format!("Status:      {}\n", status_label(bill, today)));

    if let Some(paid_at) = bill.paid_at {
        output.push_str(&format!(
            "Paid at:     {}\n",
            paid_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    if let Some(txn_id) = &bill.transaction_id {
        output.push_str(&format!("Transaction: {}\n", txn_id));
    }
    if let Some(notes) = &bill.notes {
        output.push_str(&format!("Notes:       {}\n", notes));
    }

    output
}

/// Calendar events grouped under their dates
pub fn format_calendar(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No bills scheduled.\n".to_string();
    }

    let mut sorted: Vec<&CalendarEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut output = String::new();
    let mut current = None;
    for event in sorted {
        if current != Some(event.date) {
            output.push_str(&format!("{}\n", event.date.format("%a %Y-%m-%d")));
            current = Some(event.date);
        }
        let mark = if event.paid { "✓" } else { "•" };
        output.push_str(&format!("  {} {} ({})\n", mark, event.title, event.color));
    }

    output
}
