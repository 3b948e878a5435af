//! Price text handling.
//!
//! Prices are typed with Indian digit grouping ("1,40,000") and stored as
//! whole units (140000).

/// Parse price text, ignoring grouping commas and whitespace.
///
/// Returns `None` for empty input, any other non-digit character, or
/// overflow.
pub fn parse_grouped(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Format with Indian grouping: last three digits, then pairs.
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Normalise a price input as the user types: keep digits, regroup.
///
/// A digit run too large for a price is returned as typed, so validation
/// reports it instead of the field going blank.
pub fn reformat_input(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    match digits.parse::<u64>() {
        Ok(value) => format_grouped(value),
        Err(_) => raw.trim().to_string(),
    }
}
