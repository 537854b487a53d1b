//! Display formatting utilities

/// Format a count with thousands separators (`1234567` → `1,234,567`)
#[inline]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a percentage with one decimal place
#[inline]
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
