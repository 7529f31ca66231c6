//! Number formatting for reports and axis labels

/// Insert `,` between groups of three digits of an unsigned digit string
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Integer with thousands separators, e.g. `1,250,000`
pub fn thousands(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Fixed-point number with thousands separators, e.g. `1,250,000.50`
///
/// Non-finite values render as `nan`, `inf` or `-inf`.
pub fn thousands_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value).to_lowercase();
    }
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let sign = if value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, group_digits(int_part), f),
        None => format!("{}{}", sign, group_digits(int_part)),
    }
}

/// Axis label for money: truncated toward zero, thousands separated
pub fn money_axis_label(value: f64) -> String {
    thousands(value.trunc() as i64)
}

/// Axis label for other measurements: shortest form that keeps 4 significant digits
pub fn plain_axis_label(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (3 - magnitude).clamp(0, 6) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
