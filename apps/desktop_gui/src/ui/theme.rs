use std::time::Duration;

use eframe::egui::Color32;
use shared::format::ConfidenceTier;

pub const ACCENT: Color32 = Color32::from_rgb(102, 126, 234);
pub const DRAG_FILL: Color32 = Color32::from_rgb(38, 44, 70);
pub const ERROR_FILL: Color32 = Color32::from_rgb(64, 28, 32);
pub const ERROR_TEXT: Color32 = Color32::from_rgb(255, 138, 128);

/// Fade-in length of one probability row.
pub const ROW_FADE: Duration = Duration::from_millis(300);

pub fn tier_color(tier: ConfidenceTier) -> Color32 {
    match tier {
        ConfidenceTier::High => Color32::from_rgb(76, 175, 80),
        ConfidenceTier::Medium => Color32::from_rgb(255, 167, 38),
        ConfidenceTier::Low => Color32::from_rgb(239, 83, 80),
    }
}

pub fn row_opacity(shown_for: Duration, entrance_delay: Duration) -> f32 {
    let visible_for = shown_for.saturating_sub(entrance_delay);
    (visible_for.as_secs_f32() / ROW_FADE.as_secs_f32()).clamp(0.0, 1.0)
}
