//! Display helpers in the Austrian German style the dashboard uses

use chrono::NaiveDate;

/// Placeholder for a missing value
pub const DASH: &str = "—";

/// `1234.5` → `1.234,50 €`
pub fn format_currency(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let cents = (amount.abs() * 100.0).round() as u64;
    let euros = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::new();
    for (i, digit) in euros.chars().enumerate() {
        if i > 0 && (euros.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02} €", sign, grouped, fraction)
}

/// `2024-03-05` → `05.03.2024`; other text is returned unchanged
pub fn format_date(iso: &str) -> String {
    if iso.trim().is_empty() {
        return DASH.to_string();
    }
    match NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// `12` → `12x`, dash when unset
pub fn format_multiplier(x: f64) -> String {
    if x != 0.0 {
        format!("{}x", x)
    } else {
        DASH.to_string()
    }
}

/// Text or a dash when blank
pub fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        DASH
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "0,00 €");
        assert_eq!(format_currency(150.5), "150,50 €");
        assert_eq!(format_currency(1234.5), "1.234,50 €");
        assert_eq!(format_currency(1_000_000.0), "1.000.000,00 €");
        assert_eq!(format_currency(-42.1), "-42,10 €");
        assert_eq!(format_currency(f64::NAN), "0,00 €");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05"), "05.03.2024");
        assert_eq!(format_date(""), "—");
        assert_eq!(format_date("irgendwann"), "irgendwann");
    }

    #[test]
    fn test_format_multiplier() {
        assert_eq!(format_multiplier(12.0), "12x");
        assert_eq!(format_multiplier(2.5), "2.5x");
        assert_eq!(format_multiplier(0.0), "—");
        assert_eq!(or_dash("  "), "—");
        assert_eq!(or_dash("Domi"), "Domi");
    }
}
