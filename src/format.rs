/// Number and text formatting
///
/// Large amounts are shown in crore (1,00,00,000) and lakh (1,00,000); smaller
/// ones use Indian digit grouping, where the last three digits form one group
/// and every group above it has two digits.

use std::borrow::Cow;

/// One crore
pub const CRORE: f64 = 10_000_000.0;
/// One lakh
pub const LAKH: f64 = 100_000.0;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Fixed-point text with exactly `places` decimals.
pub fn to_fixed(value: f64, places: usize) -> String {
    format!("{:.*}", places, round_to(value, places as u32))
}

/// Group the digits of a whole number the Indian way.
///
/// ```
/// use fundscope::format::group_indian;
///
/// assert_eq!(group_indian(999), "999");
/// assert_eq!(group_indian(1234567), "12,34,567");
/// assert_eq!(group_indian(-45000), "-45,000");
/// ```
pub fn group_indian(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{}{}", sign, digits);
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

    format!("{}{},{}", sign, groups.join(","), tail)
}

/// Compact amount: "x.y Cr" from one crore, "x.y L" from one lakh, else grouped digits.
///
/// ```
/// use fundscope::format::format_inr;
///
/// assert_eq!(format_inr(25_000_000.0), "2.5 Cr");
/// assert_eq!(format_inr(150_000.0), "1.5 L");
/// assert_eq!(format_inr(45_678.0), "45,678");
/// ```
pub fn format_inr(value: f64) -> String {
    if value >= CRORE {
        format!("{} Cr", to_fixed(value / CRORE, 1))
    } else if value >= LAKH {
        format!("{} L", to_fixed(value / LAKH, 1))
    } else {
        group_indian(value.round() as i64)
    }
}

/// Escape text for insertion into HTML. Text without special characters is
/// returned unchanged.
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(17.456, 1), 17.5);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to(650.5, 0), 651.0);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(18.0, 1), "18.0");
        assert_eq!(to_fixed(0.6234, 2), "0.62");
        assert_eq!(to_fixed(71.6, 0), "72");
    }

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian(0), "0");
        assert_eq!(group_indian(1000), "1,000");
        assert_eq!(group_indian(99999), "99,999");
        assert_eq!(group_indian(100000), "1,00,000");
        assert_eq!(group_indian(123456789), "12,34,56,789");
    }

    #[test]
    fn test_format_inr_thresholds() {
        assert_eq!(format_inr(10_000_000.0), "1.0 Cr");
        assert_eq!(format_inr(9_999_999.0), "100.0 L");
        assert_eq!(format_inr(100_000.0), "1.0 L");
        assert_eq!(format_inr(99_999.0), "99,999");
        assert_eq!(format_inr(0.0), "0");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("L&T <Fund>"), "L&amp;T &lt;Fund&gt;");
        assert_eq!(escape_html("Children's \"Gift\""), "Children&#39;s &quot;Gift&quot;");
        assert!(matches!(escape_html("Axis Bluechip"), Cow::Borrowed("Axis Bluechip")));
    }
}
