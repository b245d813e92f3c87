//! Controller configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Tunables of a [`MoveController`](crate::MoveController).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoverConfig {
    /// Cells per second scaling. A tile of cost `c` takes `c / speed`
    /// seconds to enter. Must be > 0.
    pub speed: f32,
    /// Maximum number of cells a single search may expand. Must be ≥ 1.
    pub max_expansions: usize,
}

impl Default for MoverConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            max_expansions: 1000,
        }
    }
}

impl MoverConfig {
    /// Check the documented ranges. The speed must also leave the base
    /// interval representable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if self.max_expansions == 0 {
            return Err(ConfigError::ZeroExpansions);
        }
        self.base_interval()?;
        Ok(())
    }

    /// The wait before the first tick: `1 / speed` seconds.
    pub fn base_interval(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(1.0 / f64::from(self.speed)).map_err(|_| {
            ConfigError::IntervalOutOfRange {
                tile: None,
                speed: self.speed,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = MoverConfig::default();
        assert_eq!(cfg.speed, 2.0);
        assert_eq!(cfg.max_expansions, 1000);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_speed() {
        for speed in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let cfg = MoverConfig {
                speed,
                ..MoverConfig::default()
            };
            assert!(matches!(cfg.validate(), Err(ConfigError::InvalidSpeed(_))));
        }
    }

    #[test]
    fn rejects_zero_budget() {
        let cfg = MoverConfig {
            max_expansions: 0,
            ..MoverConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroExpansions));
    }

    #[test]
    fn rejects_speed_too_slow_for_a_duration() {
        let cfg = MoverConfig {
            speed: 1e-20,
            ..MoverConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::IntervalOutOfRange {
                tile: None,
                speed: 1e-20
            })
        );
    }

    #[test]
    fn base_interval_is_inverse_speed() {
        let cfg = MoverConfig {
            speed: 4.0,
            ..MoverConfig::default()
        };
        assert_eq!(cfg.base_interval(), Ok(Duration::from_millis(250)));
    }
}
