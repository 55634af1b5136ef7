//! Timeline settings (lives in the OS config directory).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Padding, fallback window and zoom limits for the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Days shown before the earliest item.
    pub lead_in_days: i64,
    /// Days shown after the latest item.
    pub trailing_days: i64,
    /// Visible window used when there are no items at all.
    pub fallback_start: NaiveDate,
    pub fallback_end: NaiveDate,
    pub zoom: ZoomConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            lead_in_days: 3,
            trailing_days: 10,
            fallback_start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            fallback_end: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap_or_default(),
            zoom: ZoomConfig::default(),
        }
    }
}

/// Pixels-per-day limits. Zoom buttons step linearly by `step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub default_pixels_per_day: f32,
    pub min_pixels_per_day: f32,
    pub max_pixels_per_day: f32,
    pub step: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            default_pixels_per_day: 40.0,
            min_pixels_per_day: 20.0,
            max_pixels_per_day: 80.0,
            step: 10.0,
        }
    }
}

impl ZoomConfig {
    pub fn clamp(&self, pixels_per_day: f32) -> f32 {
        pixels_per_day.clamp(self.min_pixels_per_day, self.max_pixels_per_day)
    }
}

impl TimelineConfig {
    /// Load `settings.json` from the platform config dir, or defaults.
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No timeline settings, using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&contents) {
            Ok(config) => config.sanitized(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse timeline settings");
                Self::default()
            }
        }
    }

    pub fn settings_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "gantt-timeline", "GanttTimeline")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Repair values that would break the coordinate mapping.
    fn sanitized(mut self) -> Self {
        let defaults = ZoomConfig::default();
        let zoom = &mut self.zoom;
        if !(zoom.step > 0.0) {
            tracing::warn!(step = zoom.step, "Invalid zoom step in settings, using default");
            zoom.step = defaults.step;
        }
        if !(zoom.min_pixels_per_day > 0.0) || zoom.min_pixels_per_day > zoom.max_pixels_per_day {
            tracing::warn!("Invalid zoom limits in settings, using defaults");
            *zoom = defaults;
        }
        self.zoom.default_pixels_per_day = self.zoom.clamp(self.zoom.default_pixels_per_day);
        self.lead_in_days = self.lead_in_days.max(0);
        self.trailing_days = self.trailing_days.max(0);
        if self.fallback_start > self.fallback_end {
            std::mem::swap(&mut self.fallback_start, &mut self.fallback_end);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_timeline_padding() {
        let config = TimelineConfig::default();
        assert_eq!(config.lead_in_days, 3);
        assert_eq!(config.trailing_days, 10);
        assert_eq!(config.zoom.default_pixels_per_day, 40.0);
        assert_eq!(config.zoom.clamp(5.0), 20.0);
        assert_eq!(config.zoom.clamp(500.0), 80.0);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "trailing_days": 14, "zoom": {{ "step": 5.0 }} }}"#).unwrap();

        let config = TimelineConfig::load_from(file.path());
        assert_eq!(config.trailing_days, 14);
        assert_eq!(config.lead_in_days, 3);
        assert_eq!(config.zoom.step, 5.0);
        assert_eq!(config.zoom.max_pixels_per_day, 80.0);
    }

    #[test]
    fn malformed_or_missing_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert_eq!(TimelineConfig::load_from(file.path()), TimelineConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("settings.json");
        assert_eq!(TimelineConfig::load_from(&missing), TimelineConfig::default());
    }

    #[test]
    fn nonsensical_zoom_is_repaired() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "lead_in_days": -4, "zoom": {{ "min_pixels_per_day": 0.0 }} }}"#
        )
        .unwrap();
        let config = TimelineConfig::load_from(file.path());
        assert_eq!(config.zoom, ZoomConfig::default());
        assert_eq!(config.lead_in_days, 0);
    }

    #[test]
    fn non_positive_zoom_step_is_reset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "zoom": {{ "step": -10.0, "max_pixels_per_day": 120.0 }} }}"#).unwrap();

        let config = TimelineConfig::load_from(file.path());
        assert_eq!(config.zoom.step, 10.0);
        assert_eq!(config.zoom.max_pixels_per_day, 120.0);
    }
}
