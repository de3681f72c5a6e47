//! Display formatting shared by every front end.

use std::time::Duration;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const ROW_ENTRANCE_STEP: Duration = Duration::from_millis(50);

/// Binary-prefix size with up to two decimals, e.g. `"10 KB"` or `"1.5 MB"`.
///
/// Values at or above 1024 GB stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut divisor: u64 = 1;
    while unit + 1 < SIZE_UNITS.len() && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let mantissa = ((bytes as f64 / divisor as f64) * 100.0).round() / 100.0;
    format!("{mantissa} {}", SIZE_UNITS[unit])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 70.0 {
            Self::High
        } else if confidence >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{confidence:.2}%")
}

pub fn format_probability(probability: f64) -> String {
    format!("{probability:.1}%")
}

/// Bar width for a 0-100 value as a fraction of the full bar.
pub fn percent_fill(value: f64) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    (value / 100.0).clamp(0.0, 1.0) as f32
}

pub fn entrance_delay(index: usize) -> Duration {
    ROW_ENTRANCE_STEP * index as u32
}
