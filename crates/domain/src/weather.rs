//! Two-day forecast captured by the weather agent.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Forecast summary for a single day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayWeather {
    /// Daily maximum, degrees Celsius.
    pub temperature_high: f32,
    /// Daily minimum, degrees Celsius.
    pub temperature_low: f32,
    pub sunrise: Timestamp,
    pub sunset: Timestamp,
    pub rainy: bool,
    pub windy: bool,
    pub cloudy: bool,
    pub snowy: bool,
    /// Average relative humidity, percent.
    pub humidity: f32,
}

/// Precipitation flag shown on weather pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precipitation {
    Snow,
    Rain,
}

impl Precipitation {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Snow => "Snow",
            Self::Rain => "Rain",
        }
    }
}

impl DayWeather {
    /// Snow wins over rain; a dry day has no precipitation flag.
    #[must_use]
    pub fn precipitation(&self) -> Option<Precipitation> {
        if self.snowy {
            Some(Precipitation::Snow)
        } else if self.rainy {
            Some(Precipitation::Rain)
        } else {
            None
        }
    }

    /// One-word sky description.
    #[must_use]
    pub fn sky(&self) -> &'static str {
        if self.cloudy { "Cloudy" } else { "Sunny" }
    }
}

/// Forecast for today and tomorrow, captured together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwoDayWeather {
    pub today: DayWeather,
    pub tomorrow: DayWeather,
}
