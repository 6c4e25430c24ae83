use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::PixelSize;
use crate::color::Rgba;

pub const DEFAULT_CELL_SIZE: PixelSize = 10;
pub const DEFAULT_FILL_PROBABILITY: f64 = 0.2;
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

pub const DEFAULT_LIVE_COLOR: Rgba = Rgba::rgb(0xff, 0xf9, 0x0d);
pub const DEFAULT_DEAD_COLOR: Rgba = DEFAULT_LIVE_COLOR.with_alpha(0x44);
pub const DEFAULT_BACKGROUND: Rgba = Rgba::BLACK;

pub const ENV_CELL_SIZE: &str = "CONWAY_CELL_SIZE";
pub const ENV_LIVE_COLOR: &str = "CONWAY_LIVE_COLOR";
pub const ENV_DEAD_COLOR: &str = "CONWAY_DEAD_COLOR";
pub const ENV_BACKGROUND: &str = "CONWAY_BACKGROUND";
pub const ENV_FILL_PROBABILITY: &str = "CONWAY_FILL_PROBABILITY";
pub const ENV_TICK_MS: &str = "CONWAY_TICK_MS";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Side length of a cell, in device pixels
    pub cell_size: PixelSize,

    pub live_color: Rgba,

    /// Usually a translucent variant of `live_color`
    pub dead_color: Rgba,

    /// What translucent cells are blended with. Must be opaque.
    pub background: Rgba,

    /// Chance of each cell being alive in the initial grid
    pub fill_probability: f64,

    /// Time between two generations
    pub tick: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            live_color: DEFAULT_LIVE_COLOR,
            dead_color: DEFAULT_DEAD_COLOR,
            background: DEFAULT_BACKGROUND,
            fill_probability: DEFAULT_FILL_PROBABILITY,
            tick: DEFAULT_TICK,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Cell size must be at least one pixel")]
    ZeroCellSize,

    #[error("Fill probability must lie in [0, 1], got {0}")]
    Probability(f64),

    #[error("Tick period must be non-zero")]
    ZeroTick,

    #[error("Background {0} must be opaque")]
    TranslucentBackground(Rgba),

    #[error("Invalid value \"{value}\" for {var}: {reason}")]
    Var {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    /// Defaults, overridden by any of the `CONWAY_*` environment variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for the `CONWAY_*` variables. The result
    /// is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(cell_size) = parse_var(&lookup, ENV_CELL_SIZE)? {
            config.cell_size = cell_size;
        }

        if let Some(color) = parse_var(&lookup, ENV_LIVE_COLOR)? {
            config.live_color = color;
        }

        if let Some(color) = parse_var(&lookup, ENV_DEAD_COLOR)? {
            config.dead_color = color;
        }

        if let Some(color) = parse_var(&lookup, ENV_BACKGROUND)? {
            config.background = color;
        }

        if let Some(p) = parse_var(&lookup, ENV_FILL_PROBABILITY)? {
            config.fill_probability = p;
        }

        if let Some(ms) = parse_var(&lookup, ENV_TICK_MS)? {
            config.tick = Duration::from_millis(ms);
        }

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        // Also rejects NaN
        if !(0f64..=1f64).contains(&self.fill_probability) {
            return Err(ConfigError::Probability(self.fill_probability));
        }

        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }

        if !self.background.is_opaque() {
            return Err(ConfigError::TranslucentBackground(self.background));
        }

        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };

    debug!("{var} = {value}");

    match value.trim().parse() {
        Ok(v) => Ok(Some(v)),
        Err(e) => Err(ConfigError::Var {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::Config;
    use super::ConfigError;
    use crate::color::Rgba;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |var: &str| vars.get(var).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.cell_size, 10);
        assert_eq!(config.fill_probability, 0.2);
        assert_eq!(config.tick, Duration::from_millis(100));
        assert_eq!(config.live_color.to_string(), "#fff90dff");
        assert_eq!(config.dead_color.to_string(), "#fff90d44");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn no_overrides() {
        assert_eq!(Config::from_lookup(lookup(&[])), Ok(Config::default()));
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CONWAY_CELL_SIZE", "4"),
            ("CONWAY_LIVE_COLOR", "#00ff00"),
            ("CONWAY_DEAD_COLOR", "#00ff0020"),
            ("CONWAY_BACKGROUND", "#101010"),
            ("CONWAY_FILL_PROBABILITY", " 0.5 "),
            ("CONWAY_TICK_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(config.cell_size, 4);
        assert_eq!(config.live_color, Rgba::rgb(0, 255, 0));
        assert_eq!(config.dead_color, Rgba::new(0, 255, 0, 0x20));
        assert_eq!(config.background, Rgba::rgb(0x10, 0x10, 0x10));
        assert_eq!(config.fill_probability, 0.5);
        assert_eq!(config.tick, Duration::from_millis(250));
    }

    #[test]
    fn unparsable_var() {
        let err = Config::from_lookup(lookup(&[("CONWAY_TICK_MS", "soon")])).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Var {
                var: "CONWAY_TICK_MS",
                ..
            }
        ));
    }

    #[test]
    fn invalid_values() {
        let cases = [
            ("CONWAY_CELL_SIZE", "0", ConfigError::ZeroCellSize),
            ("CONWAY_FILL_PROBABILITY", "1.5", ConfigError::Probability(1.5)),
            ("CONWAY_TICK_MS", "0", ConfigError::ZeroTick),
            (
                "CONWAY_BACKGROUND",
                "#00000080",
                ConfigError::TranslucentBackground(Rgba::new(0, 0, 0, 0x80)),
            ),
        ];

        for (var, value, expected) in cases {
            assert_eq!(Config::from_lookup(lookup(&[(var, value)])), Err(expected));
        }
    }

    #[test]
    fn nan_probability() {
        let config = Config {
            fill_probability: f64::NAN,
            ..Config::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Probability(_))));
    }
}
