//! Display formatting rules shared by every screen: fixed two-decimal
//! currency/percent, and T/B/M/K compaction for large magnitudes.

/// `$312.50`; the sign leads the symbol for losses: `-$12.34`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        format!("${value:.2}")
    }
}

/// `12.34%`; the sign is passed through as-is.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Market cap with two decimals and T/B/M thresholds at 1e12/1e9/1e6;
/// `N/A` when the metric is absent or non-positive (zero doubles as the
/// provider's unavailable sentinel).
#[must_use]
pub fn format_market_cap(value: Option<f64>) -> String {
    let Some(v) = value.filter(|&v| v > 0.0) else {
        return "N/A".to_string();
    };
    if v >= 1e12 {
        format!("${:.2}T", v / 1e12)
    } else if v >= 1e9 {
        format!("${:.2}B", v / 1e9)
    } else if v >= 1e6 {
        format!("${:.2}M", v / 1e6)
    } else {
        format!("${}", group_thousands(v as u64))
    }
}

/// Chart-axis volume with one decimal and B/M/K thresholds at 1e9/1e6/1e3.
#[must_use]
pub fn format_volume(volume: u64) -> String {
    if volume >= 1_000_000_000 {
        format!("{:.1}B", volume as f64 / 1e9)
    } else if volume >= 1_000_000 {
        format!("{:.1}M", volume as f64 / 1e6)
    } else if volume >= 1_000 {
        format!("{:.1}K", volume as f64 / 1e3)
    } else {
        volume.to_string()
    }
}

/// `1234567` → `1,234,567`.
#[must_use]
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
