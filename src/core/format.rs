//! Compact number formatting for amounts shown in tables and cards

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Formats an amount for display.
///
/// - `>= 1B` is shown in billions with no decimals, e.g. `2B`
/// - `>= 1M` is shown in millions with one decimal, e.g. `1.5M`
/// - `>= 1K` is grouped with thousands separators, e.g. `12,345.5`
/// - anything else is shown as a plain decimal
///
/// No currency symbol is added. Every input produces a string.
pub fn format_number(num: f64) -> String {
    if !num.is_finite() {
        return format_non_finite(num);
    }

    if num >= BILLION {
        format!("{}B", (num / BILLION).round())
    } else if num >= MILLION {
        format!("{:.1}M", (num / (MILLION / 10.0)).round() / 10.0)
    } else if num >= THOUSAND {
        group_thousands(num)
    } else {
        plain_number(num)
    }
}

/// Shortest decimal form, switching to exponent notation for very small or very
/// large magnitudes the way JavaScript number strings do.
fn plain_number(num: f64) -> String {
    let magnitude = num.abs();
    if magnitude == 0.0 {
        // Covers -0.0.
        "0".to_string()
    } else if magnitude < 1e-6 {
        format!("{num:e}")
    } else if magnitude >= 1e21 {
        format!("{num:e}").replacen('e', "e+", 1)
    } else {
        num.to_string()
    }
}

/// Groups the integer part with commas and keeps up to three fraction digits.
fn group_thousands(num: f64) -> String {
    // Callers only pass values in [1e3, 1e6), so the scaled value fits in a u64.
    let scaled = (num * 1000.0).round() as u64;
    let integer = (scaled / 1000).to_string();
    let fraction = scaled % 1000;

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction > 0 {
        let digits = format!("{fraction:03}");
        grouped.push('.');
        grouped.push_str(digits.trim_end_matches('0'));
    }
    grouped
}

fn format_non_finite(num: f64) -> String {
    if num.is_nan() {
        "NaN".to_string()
    } else if num > 0.0 {
        "InfinityB".to_string()
    } else {
        "-Infinity".to_string()
    }
}
