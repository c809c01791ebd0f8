//! Tunable timings and thresholds for every page behaviour.
//!
//! Defaults reproduce the shipped page. A page may pass a (partial) JSON
//! document to `start_site_with_config`; missing fields keep their default.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiteError};

/// Viewport width (px) at or below which the page is treated as mobile.
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

pub const DEFAULT_PHRASES: &[&str] = &[
    "CA Intermediate Student",
    "Bot Developer",
    "Web Developer",
    "Tech Enthusiast",
    "Problem Solver",
    "Code Craftsman",
];

/// Most verbose console level that is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_tracing(self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    pub log_level: LogLevel,
    pub mobile_breakpoint_px: f64,
    pub loader: LoaderTiming,
    /// Sections count as "current" this many px before their top edge.
    pub scroll_spy_offset_px: f64,
    pub navbar_scrolled_px: f64,
    pub cursor_trail_ms: u32,
    pub typing: TypingTiming,
    pub reveal_margin_px: f64,
    pub form: FormTiming,
    pub notification: NotificationTiming,
    pub scroll_debounce_ms: u32,
    pub resize_throttle_ms: u32,
    pub glitch: GlitchTiming,
    pub matrix: MatrixTiming,
    pub smooth_scroll_ms: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            loader: LoaderTiming::default(),
            scroll_spy_offset_px: 150.0,
            navbar_scrolled_px: 100.0,
            cursor_trail_ms: 50,
            typing: TypingTiming::default(),
            reveal_margin_px: 150.0,
            form: FormTiming::default(),
            notification: NotificationTiming::default(),
            scroll_debounce_ms: 10,
            resize_throttle_ms: 250,
            glitch: GlitchTiming::default(),
            matrix: MatrixTiming::default(),
            smooth_scroll_ms: 1000.0,
        }
    }
}

impl SiteConfig {
    /// Parse a partial override. Values that would stall a feature (the
    /// loader never finishing, a zero-width rain column) are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("loader.maxIncrement", self.loader.max_increment),
            ("matrix.fontPx", self.matrix.font_px),
            ("smoothScrollMs", self.smooth_scroll_ms),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SiteError::InvalidSetting { field, value });
            }
        }
        Ok(())
    }

    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width <= self.mobile_breakpoint_px
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LoaderTiming {
    pub tick_ms: u32,
    /// Upper bound of the random per-tick increment, in percent.
    pub max_increment: f64,
    pub settle_ms: u32,
}

impl Default for LoaderTiming {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            max_increment: 15.0,
            settle_ms: 500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TypingTiming {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub hold_ms: u32,
    pub next_ms: u32,
    pub phrases: Vec<String>,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            next_ms: 200,
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FormTiming {
    pub pending_ms: u32,
    pub success_ms: u32,
}

impl Default for FormTiming {
    fn default() -> Self {
        Self {
            pending_ms: 1500,
            success_ms: 2000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NotificationTiming {
    pub enter_delay_ms: u32,
    pub dwell_ms: u32,
    pub exit_ms: u32,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100,
            dwell_ms: 3000,
            exit_ms: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GlitchTiming {
    pub interval_ms: u32,
    /// Probability per interval that an element flickers.
    pub chance: f64,
    pub flicker_ms: u32,
}

impl Default for GlitchTiming {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            chance: 0.1,
            flicker_ms: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct MatrixTiming {
    pub frame_ms: u32,
    pub font_px: f64,
    /// Probability that a drop already past the bottom restarts at the top.
    pub reset_chance: f64,
}

impl Default for MatrixTiming {
    fn default() -> Self {
        Self {
            frame_ms: 100,
            font_px: 16.0,
            reset_chance: 0.025,
        }
    }
}
