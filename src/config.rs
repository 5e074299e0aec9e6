//! Engine configuration with environment overrides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{HANDLE_SIZE, REPEAT_COUNT, RESIZE_DAMPING, ROTATE_DRAG_SENSITIVITY, SURFACE_EXTENT};
use crate::error::ConfigError;

pub const ENV_SURFACE_EXTENT: &str = "UVPAINT_SURFACE_EXTENT";
pub const ENV_HANDLE_SIZE: &str = "UVPAINT_HANDLE_SIZE";
pub const ENV_ROTATE_SENSITIVITY: &str = "UVPAINT_ROTATE_SENSITIVITY";
pub const ENV_RESIZE_DAMPING: &str = "UVPAINT_RESIZE_DAMPING";
pub const ENV_REPEAT_COUNT: &str = "UVPAINT_REPEAT_COUNT";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Side length of the design surface; UVs are multiplied by it.
    pub surface_extent: f64,
    /// Width and height of each corner handle.
    pub handle_size: f64,
    /// Pointer-delta multiplier for the rotate handle.
    pub rotate_sensitivity: f64,
    /// Damping divisor for the resize handle.
    pub resize_damping: f64,
    /// Clones produced by a tiled duplicate.
    pub repeat_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            surface_extent: SURFACE_EXTENT,
            handle_size: HANDLE_SIZE,
            rotate_sensitivity: ROTATE_DRAG_SENSITIVITY,
            resize_damping: RESIZE_DAMPING,
            repeat_count: REPEAT_COUNT,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `UVPAINT_SURFACE_EXTENT`: default 600
    /// - `UVPAINT_HANDLE_SIZE`: default 20
    /// - `UVPAINT_ROTATE_SENSITIVITY`: default 1.8
    /// - `UVPAINT_RESIZE_DAMPING`: default 18
    /// - `UVPAINT_REPEAT_COUNT`: default 5
    ///
    /// # Errors
    ///
    /// Returns `Parse` for a value that isn't a number and `NotPositive` for a
    /// setting that is not a finite positive number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let cfg = Self {
            surface_extent: env_parse_f64(ENV_SURFACE_EXTENT, defaults.surface_extent)?,
            handle_size: env_parse_f64(ENV_HANDLE_SIZE, defaults.handle_size)?,
            rotate_sensitivity: env_parse_f64(ENV_ROTATE_SENSITIVITY, defaults.rotate_sensitivity)?,
            resize_damping: env_parse_f64(ENV_RESIZE_DAMPING, defaults.resize_damping)?,
            repeat_count: env_parse_usize(ENV_REPEAT_COUNT, defaults.repeat_count)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that every float setting is finite and strictly positive, and
    /// that the repeat count is at least one.
    ///
    /// # Errors
    ///
    /// Returns `NotPositive` naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (var, value) in [
            (ENV_SURFACE_EXTENT, self.surface_extent),
            (ENV_HANDLE_SIZE, self.handle_size),
            (ENV_ROTATE_SENSITIVITY, self.rotate_sensitivity),
            (ENV_RESIZE_DAMPING, self.resize_damping),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { var: var.into(), value });
            }
        }
        if self.repeat_count == 0 {
            return Err(ConfigError::NotPositive { var: ENV_REPEAT_COUNT.into(), value: 0.0 });
        }
        Ok(())
    }
}

fn env_raw(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}

fn env_parse_f64(key: &str, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = env_raw(key) else {
        return Ok(default);
    };
    let parsed = raw.trim().parse::<f64>();
    match parsed {
        Ok(v) => Ok(v),
        Err(_) => Err(ConfigError::Parse { var: key.into(), value: raw }),
    }
}

fn env_parse_usize(key: &str, default: usize) -> Result<usize, ConfigError> {
    let Some(raw) = env_raw(key) else {
        return Ok(default);
    };
    let parsed = raw.trim().parse::<usize>();
    match parsed {
        Ok(v) => Ok(v),
        Err(_) => Err(ConfigError::Parse { var: key.into(), value: raw }),
    }
}
