//! Indonesian (id-ID) display formatting for numbers and dates.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

/// Western Indonesia Time (UTC+7), the local time of Pekanbaru
const WIB_OFFSET_SECS: i32 = 7 * 3600;

const MONTHS_LONG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Format a number the way `Intl.NumberFormat('id-ID')` does:
/// `.` groups thousands, `,` separates at most three fraction digits.
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let integer = rounded.trunc() as u64;
    let fraction = ((rounded - rounded.trunc()) * 1000.0).round() as u64;

    let digits = integer.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if fraction > 0 {
        let frac = format!("{:03}", fraction);
        grouped.push(',');
        grouped.push_str(frac.trim_end_matches('0'));
    }

    if negative && (integer > 0 || fraction > 0) {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Format a timestamp in WIB, e.g. `19 Oktober 2026 pukul 14.30`
pub fn format_date_long(at: &DateTime<Utc>) -> String {
    format_date(at, &MONTHS_LONG)
}

/// Format a timestamp in WIB with abbreviated month, e.g. `19 Okt 2026 pukul 14.30`
pub fn format_date_short(at: &DateTime<Utc>) -> String {
    format_date(at, &MONTHS_SHORT)
}

fn format_date(at: &DateTime<Utc>, months: &[&str; 12]) -> String {
    let local = match FixedOffset::east_opt(WIB_OFFSET_SECS) {
        Some(offset) => at.with_timezone(&offset),
        None => at.fixed_offset(),
    };

    format!(
        "{} {} {} pukul {:02}.{:02}",
        local.day(),
        months[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}

/// One flag per star position: `true` for filled, `false` for empty
pub fn star_flags(rating: f64) -> Vec<bool> {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    (1..=5).map(|i| i <= filled).collect()
}
