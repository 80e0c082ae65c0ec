//! Small helpers shared across the pipeline.

use chrono::{Local, NaiveDate};

/// Today's date in local time; the report covers one calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest char boundary at or
/// below `max` and get `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
