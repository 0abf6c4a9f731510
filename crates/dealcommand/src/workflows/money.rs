//! Rounding and formatting helpers for dollar amounts.

/// Round to the nearest whole number, with halves rounding toward positive infinity.
pub fn round_whole(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place using the same half-up rule as [`round_whole`].
pub fn round_tenth(value: f64) -> f64 {
    round_whole(value * 10.0) / 10.0
}

/// Render a number with US thousands separators and at most three fraction digits.
pub fn format_usd(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_negative() { "-∞" } else { "∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && (grouped != "0" || !fraction.is_empty());
    let mut rendered = String::new();
    if negative {
        rendered.push('-');
    }
    rendered.push_str(&grouped);
    if !fraction.is_empty() {
        rendered.push('.');
        rendered.push_str(fraction);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_halves_up() {
        assert_eq!(round_whole(2.5), 3.0);
        assert_eq!(round_whole(-2.5), -2.0);
        assert_eq!(round_tenth(31.95), 32.0);
        assert_eq!(round_tenth(12.34), 12.3);
    }

    #[test]
    fn formats_with_grouping() {
        assert_eq!(format_usd(0.0), "0");
        assert_eq!(format_usd(950.0), "950");
        assert_eq!(format_usd(80_000.0), "80,000");
        assert_eq!(format_usd(1_234_567.0), "1,234,567");
        assert_eq!(format_usd(-12_500.0), "-12,500");
        assert_eq!(format_usd(1_500.25), "1,500.25");
        assert_eq!(format_usd(0.0004), "0");
    }
}
