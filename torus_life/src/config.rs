// config.rs - Runtime options for the simulation and its display

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const TICK_RATE_RANGE: std::ops::RangeInclusive<u32> = 1..=60;
pub const CELL_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tick rate {0} must be between 1 and 60")]
    TickRate(u32),
    #[error("cell size {0} must be between 1 and 100")]
    CellSize(u32),
    #[error("density {0} must be between 0.0 and 1.0")]
    Density(f64),
    #[error("invalid color {0:?}: expected r,g,b with values 0-255")]
    InvalidColor(String),
}

/// An RGB display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let channels: Vec<u8> = s
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<_, _>>()
            .map_err(|_| invalid())?;
        match channels.as_slice() {
            &[r, g, b] => Ok(Rgb::new(r, g, b)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{r},{g},{b}")
    }
}

/// Every option can be re-applied while the simulation runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub survival_lower: String,
    pub survival_upper: String,
    pub reproduction: String,
    pub tick_rate: u32,   // generations per second
    pub cell_size: u32,   // pixels per cell edge
    pub alive_color: Rgb,
    pub stable_color: Rgb,
    pub edge_color: Rgb,
    pub stable_highlight: bool,  // false renders stable cells in alive_color
    pub density: f64,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            survival_lower: "2".into(),
            survival_upper: "3".into(),
            reproduction: "3".into(),
            tick_rate: 15,
            cell_size: 10,
            alive_color: Rgb::new(100, 200, 100),
            stable_color: Rgb::new(100, 200, 100),
            edge_color: Rgb::new(50, 200, 50),
            stable_highlight: true,
            density: 0.2,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !TICK_RATE_RANGE.contains(&self.tick_rate) {
            return Err(ConfigError::TickRate(self.tick_rate));
        }
        if !CELL_SIZE_RANGE.contains(&self.cell_size) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::Density(self.density));
        }
        Ok(())
    }

    /// Colour for a living cell.
    pub fn alive_fill(&self, stable: bool) -> Rgb {
        if stable && self.stable_highlight { self.stable_color } else { self.alive_color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_triples() {
        assert_eq!("100, 200,100".parse::<Rgb>(), Ok(Rgb::new(100, 200, 100)));
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "1,2,3");
    }

    #[test]
    fn rejects_bad_colors() {
        for bad in ["", "1,2", "1,2,3,4", "256,0,0", "red"] {
            assert_eq!(bad.parse::<Rgb>(), Err(ConfigError::InvalidColor(bad.into())), "{bad}");
        }
    }

    #[test]
    fn validation_ranges() {
        assert!(SimulationConfig::default().validate().is_ok());

        let config = SimulationConfig { tick_rate: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::TickRate(0)));
        let config = SimulationConfig { cell_size: 101, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::CellSize(101)));
        let config = SimulationConfig { density: 1.5, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigError::Density(1.5)));
    }

    #[test]
    fn stable_highlight_can_be_disabled() {
        let mut config = SimulationConfig {
            stable_color: Rgb::new(0, 0, 255),
            ..Default::default()
        };
        assert_eq!(config.alive_fill(true), Rgb::new(0, 0, 255));
        assert_eq!(config.alive_fill(false), config.alive_color);
        config.stable_highlight = false;
        assert_eq!(config.alive_fill(true), config.alive_color);
    }
}
