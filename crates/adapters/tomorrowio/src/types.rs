//! Wire types for the tomorrow.io forecast endpoint.
//!
//! Only the fields the clock displays are decoded; everything else in the
//! `core` field set is ignored.

use matrixclock_domain::time::Timestamp;
use matrixclock_domain::weather::{DayWeather, TwoDayWeather};
use serde::Deserialize;

use crate::error::TomorrowIoError;

/// Rain is flagged above this average precipitation probability, in percent.
const RAINY_PROBABILITY: f64 = 25.0;
/// Wind is flagged above this average speed, in m/s.
const WINDY_SPEED: f64 = 6.0;
/// ... or above this average gust speed, in m/s.
const WINDY_GUST: f64 = 12.0;
/// Cloud cover is a percentage in `[0, 100]`.
const CLOUDY_COVER: f64 = 60.0;

/// Body returned alongside 4xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastResponse {
    pub timelines: Timelines,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Timelines {
    #[serde(default)]
    pub daily: Vec<Daily>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Daily {
    pub values: Values,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Values {
    pub cloud_cover_avg: f64,
    pub humidity_avg: f64,
    pub precipitation_probability_avg: f64,
    pub snow_accumulation_sum: f64,
    pub sunrise_time: Timestamp,
    pub sunset_time: Timestamp,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub wind_gust_avg: f64,
    pub wind_speed_avg: f64,
}

impl Values {
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_domain(&self) -> DayWeather {
        DayWeather {
            temperature_high: self.temperature_max as f32,
            temperature_low: self.temperature_min as f32,
            sunrise: self.sunrise_time,
            sunset: self.sunset_time,
            rainy: self.precipitation_probability_avg > RAINY_PROBABILITY,
            windy: self.wind_speed_avg > WINDY_SPEED || self.wind_gust_avg > WINDY_GUST,
            cloudy: self.cloud_cover_avg > CLOUDY_COVER,
            snowy: self.snow_accumulation_sum > 0.0,
            humidity: self.humidity_avg as f32,
        }
    }
}

impl ForecastResponse {
    /// Today is the first daily entry, tomorrow the second.
    pub fn into_two_day(self) -> Result<TwoDayWeather, TomorrowIoError> {
        match self.timelines.daily.as_slice() {
            [today, tomorrow, ..] => Ok(TwoDayWeather {
                today: today.values.to_domain(),
                tomorrow: tomorrow.values.to_domain(),
            }),
            days => Err(TomorrowIoError::MissingDays { count: days.len() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use matrixclock_domain::time::parse_timestamp;

    use super::*;

    const FORECAST: &str = r#"{
        "timelines": {
            "daily": [
                {
                    "time": "2026-10-18T05:00:00Z",
                    "values": {
                        "cloudCoverAvg": 72.4,
                        "humidityAvg": 81.2,
                        "precipitationProbabilityAvg": 30,
                        "snowAccumulationSum": 0,
                        "sunriseTime": "2026-10-18T06:27:00Z",
                        "sunsetTime": "2026-10-18T17:03:00Z",
                        "temperatureMax": 14.6,
                        "temperatureMin": 7.9,
                        "windGustAvg": 9.1,
                        "windSpeedAvg": 4.2,
                        "uvIndexMax": 2
                    }
                },
                {
                    "time": "2026-10-19T05:00:00Z",
                    "values": {
                        "cloudCoverAvg": 12,
                        "humidityAvg": 64,
                        "precipitationProbabilityAvg": 5,
                        "snowAccumulationSum": 1.5,
                        "sunriseTime": "2026-10-19T06:29:00Z",
                        "sunsetTime": "2026-10-19T17:01:00Z",
                        "temperatureMax": 11.0,
                        "temperatureMin": -1.0,
                        "windGustAvg": 13.4,
                        "windSpeedAvg": 3.0
                    }
                }
            ]
        },
        "location": { "lat": 51.5, "lon": -0.12 }
    }"#;

    #[test]
    fn should_map_first_two_days() {
        let forecast: ForecastResponse = serde_json::from_str(FORECAST).unwrap();
        let weather = forecast.into_two_day().unwrap();

        assert!((weather.today.temperature_high - 14.6).abs() < 1e-4);
        assert!((weather.today.temperature_low - 7.9).abs() < 1e-4);
        assert_eq!(
            weather.today.sunrise,
            parse_timestamp("2026-10-18T06:27:00Z").unwrap()
        );
        assert!(weather.today.rainy);
        assert!(!weather.today.windy);
        assert!(weather.today.cloudy);
        assert!(!weather.today.snowy);

        assert!(!weather.tomorrow.rainy);
        assert!(weather.tomorrow.windy);
        assert!(!weather.tomorrow.cloudy);
        assert!(weather.tomorrow.snowy);
        assert!((weather.tomorrow.humidity - 64.0).abs() < 1e-4);
    }

    #[test]
    fn should_apply_strict_thresholds() {
        let values = Values {
            precipitation_probability_avg: 25.0,
            wind_speed_avg: 6.0,
            wind_gust_avg: 12.0,
            cloud_cover_avg: 60.0,
            ..Values::default()
        };
        let day = values.to_domain();
        assert!(!day.rainy);
        assert!(!day.windy);
        assert!(!day.cloudy);
        assert!(!day.snowy);
    }

    #[test]
    fn should_flag_wind_from_speed_alone() {
        let values = Values {
            wind_speed_avg: 6.5,
            ..Values::default()
        };
        assert!(values.to_domain().windy);
    }

    #[test]
    fn should_reject_single_day_forecast() {
        let json = r#"{"timelines": {"daily": [{"values": {}}]}}"#;
        let forecast: ForecastResponse = serde_json::from_str(json).unwrap();
        let err = forecast.into_two_day().unwrap_err();
        assert!(matches!(err, TomorrowIoError::MissingDays { count: 1 }));
    }

    #[test]
    fn should_decode_error_body() {
        let json = r#"{"code": 401001, "type": "Invalid Auth", "message": "The method requires authentication but it was not presented or is invalid."}"#;
        let body: ErrorResponse = serde_json::from_str(json).unwrap();
        assert!(body.message.starts_with("The method requires authentication"));
    }
}
