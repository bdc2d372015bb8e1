/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use erp_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-379.5, 2), "-379.50");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals as usize, value.abs());
    let (int_digits, frac_digits) = match fixed.split_once('.') {
        Some((int_digits, frac_digits)) => (int_digits, Some(frac_digits)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // A value that rounds to zero prints without a sign.
    if value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_digits));
    if let Some(frac_digits) = frac_digits {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

/// Format a length in meters, e.g. `"1,234.50 m"`.
///
/// ```
/// use erp_core::formatting::format_meters;
///
/// assert_eq!(format_meters(5.2, 2), "5.20 m");
/// assert_eq!(format_meters(0.05, 3), "0.050 m");
/// ```
pub fn format_meters(value: f64, decimals: u32) -> String {
    format!("{} m", format_number(value, decimals))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// `"1234567"` becomes `"1,234,567"`.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ── Tests ──────────────────────────────────────────────────────────────────────
