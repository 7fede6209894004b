use chrono::NaiveDate;

use crate::booking::DateRange;

/// Price of one night, in VND.
pub const NIGHTLY_RATE: u64 = 500_000;

/// Whole days from `start` to `end`. Negative when `end` is before `start`.
pub fn nights_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Total price for the stay, or 0 when `end` is not after `start`.
pub fn compute_total_cost(start: NaiveDate, end: NaiveDate, nightly_rate: u64) -> u64 {
    match u64::try_from(nights_between(start, end)) {
        Ok(nights) => nights.saturating_mul(nightly_rate),
        Err(_) => 0,
    }
}

impl DateRange {
    pub fn total_cost(&self, nightly_rate: u64) -> u64 {
        compute_total_cost(self.start(), self.end(), nightly_rate)
    }
}

/// Render an amount with comma thousands separators, e.g. `1,500,000`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
