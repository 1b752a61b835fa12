//! Editor configuration
//!
//! Geometry constants the consistency engine enforces while the user drags
//! and resizes. A session owns one [`EditorConfig`]; the factory and the
//! stores read it instead of hard-coding sizes.

/// Narrowest an activity may be resized to
pub const ACTIVITY_MIN_WIDTH: f64 = 100.0;

/// Lowest an activity may be fitted to (the icon row without any title text)
pub const ACTIVITY_MIN_HEIGHT: f64 = 40.0;

/// Side length of the start/end marker icons
pub const NORMAL_ICON_SIZE: f64 = 40.0;

/// Geometry limits used by an editor session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub activity_min_width: f64,
    pub activity_min_height: f64,
    pub icon_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            activity_min_width: ACTIVITY_MIN_WIDTH,
            activity_min_height: ACTIVITY_MIN_HEIGHT,
            icon_size: NORMAL_ICON_SIZE,
        }
    }
}

impl EditorConfig {
    /// Create a configuration with the default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the minimum activity width
    pub fn with_activity_min_width(mut self, width: f64) -> Self {
        self.activity_min_width = width.max(0.0);
        self
    }

    /// Override the minimum activity height
    pub fn with_activity_min_height(mut self, height: f64) -> Self {
        self.activity_min_height = height.max(0.0);
        self
    }

    /// Override the start/end icon size
    pub fn with_icon_size(mut self, size: f64) -> Self {
        self.icon_size = size.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = EditorConfig::default();
        assert_eq!(config.activity_min_width, ACTIVITY_MIN_WIDTH);
        assert_eq!(config.activity_min_height, ACTIVITY_MIN_HEIGHT);
        assert_eq!(config.icon_size, NORMAL_ICON_SIZE);
    }

    #[test]
    fn test_builder_clamps_negative_sizes() {
        let config = EditorConfig::new()
            .with_activity_min_width(-5.0)
            .with_icon_size(24.0);
        assert_eq!(config.activity_min_width, 0.0);
        assert_eq!(config.icon_size, 24.0);
    }
}
