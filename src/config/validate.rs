//! Configuration validation.

use crate::config::Config;
use crate::constants::MAX_HIGHLIGHT_DURATION;
use crate::constants::overlay::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults(config)?;
    validate_overlay(config)?;
    Ok(())
}

fn validate_defaults(config: &Config) -> Result<()> {
    let duration = config.defaults.duration;
    if !(1..=MAX_HIGHLIGHT_DURATION).contains(&duration) {
        return Err(Error::ConfigValidation {
            message: format!(
                "duration must be between 1 and {MAX_HIGHLIGHT_DURATION} seconds, got {duration}"
            ),
        });
    }
    Ok(())
}

fn validate_overlay(config: &Config) -> Result<()> {
    let overlay = &config.overlay;

    if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&overlay.font_size) {
        return Err(Error::ConfigValidation {
            message: format!(
                "font_size must be between {MIN_FONT_SIZE} and {MAX_FONT_SIZE}, got {}",
                overlay.font_size
            ),
        });
    }

    // A configured font must exist; an unset one falls back to system fonts
    if let Some(ref font) = overlay.font
        && !font.is_file()
    {
        return Err(Error::ConfigValidation {
            message: format!("font file not found: {}", font.display()),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut config = Config::default();
        config.defaults.duration = 0;
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));
    }

    #[test]
    fn test_excessive_duration_rejected() {
        let mut config = Config::default();
        config.defaults.duration = MAX_HIGHLIGHT_DURATION + 1;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_font_size_out_of_range_rejected() {
        let mut config = Config::default();
        config.overlay.font_size = 1.0;
        assert!(validate_config(&config).is_err());
        config.overlay.font_size = f32::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_missing_font_file_rejected() {
        let mut config = Config::default();
        config.overlay.font = Some(PathBuf::from("/nonexistent/font.ttf"));
        assert!(validate_config(&config).is_err());
    }
}
