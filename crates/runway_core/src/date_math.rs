//! Month arithmetic for projection labels and runout dates.
//!
//! Every date the engine emits is the first day of a calendar month, so the
//! helpers here work on (year, month) pairs directly instead of going through
//! jiff's `Span` machinery. The reference date ("now") is always passed in by
//! the caller; nothing here reads the system clock.

use jiff::civil::Date;

/// Snap a date to the first day of its month.
#[inline]
pub fn first_of_month(d: Date) -> Date {
    jiff::civil::date(d.year(), d.month(), 1)
}

/// First day of the month `n` months after the month containing `d`.
///
/// Negative `n` walks backwards. `None` when the result falls outside the
/// calendar jiff supports (years -9999 to 9999).
#[inline]
pub fn add_months(d: Date, n: i32) -> Option<Date> {
    // Zero-based month count since year 0
    let total = (i32::from(d.year()) * 12 + (i32::from(d.month()) - 1)).checked_add(n)?;
    let year = i16::try_from(total.div_euclid(12)).ok()?;
    let month = (total.rem_euclid(12) + 1) as i8;
    Date::new(year, month, 1).ok()
}

/// Short display label such as `Mar '26` for the month `offset` months after `as_of`.
pub fn month_label(as_of: Date, offset: i32) -> Option<String> {
    add_months(as_of, offset).map(|d| d.strftime("%b '%y").to_string())
}
