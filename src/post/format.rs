//! Display formatting for individual post fields

use std::path::Path;

use crate::tracks::NOT_AVAILABLE;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// "2h 3m", "45m", or N/A for missing/zero runtimes
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => {
            let (h, m) = (m / 60, m % 60);
            if h > 0 {
                format!("{}h {}m", h, m)
            } else {
                format!("{}m", m)
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Size in GB with two decimals
pub fn format_file_size(size_bytes: Option<u64>) -> String {
    match size_bytes {
        Some(b) if b > 0 => format!("{:.2} GB", b as f64 / BYTES_PER_GB),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Upper-cased extension of the filename
pub fn file_format(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|ext| ext.to_string_lossy().to_uppercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Leading four-digit year of the first date that has one
pub fn year_from_dates(dates: &[Option<&str>]) -> String {
    dates
        .iter()
        .flatten()
        .find_map(|date| {
            let year = date.trim().get(..4)?;
            year.chars().all(|c| c.is_ascii_digit()).then(|| year.to_string())
        })
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Number as text, or N/A
pub fn number_or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Text unless blank, otherwise N/A
pub fn text_or_na(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}
