/// Formats a number with thousands separators (dots)
///
/// ```text
/// format_number(1234567) == "1.234.567"
/// format_number(42) == "42"
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Fraction rendered as a percentage with two decimals: 0.5 -> "50.00"
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}", fraction * 100.0)
}

/// Money amount with two decimals
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}
