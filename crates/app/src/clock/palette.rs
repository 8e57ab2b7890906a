//! Colours used by the pages.

use embedded_graphics::pixelcolor::Rgb888;

pub const HEADER: Rgb888 = Rgb888::new(255, 255, 255);
pub const TITLE: Rgb888 = Rgb888::new(215, 0, 88);

pub const TEMPERATURE_LOW: Rgb888 = Rgb888::new(80, 80, 255);
pub const TEMPERATURE_HIGH: Rgb888 = Rgb888::new(255, 150, 0);
pub const CLOUDY: Rgb888 = Rgb888::new(179, 161, 136);
pub const SUNNY: Rgb888 = Rgb888::new(255, 213, 0);
pub const SNOW: Rgb888 = Rgb888::new(255, 255, 255);
pub const RAIN: Rgb888 = Rgb888::new(0, 113, 237);
pub const WINDY: Rgb888 = Rgb888::new(0, 247, 255);

pub const SUNRISE: Rgb888 = Rgb888::new(152, 168, 27);
pub const SUNSET: Rgb888 = Rgb888::new(194, 27, 27);

pub const EVENT_NAME: Rgb888 = Rgb888::new(60, 60, 215);
pub const EVENT_COUNTDOWN: Rgb888 = Rgb888::new(215, 0, 0);

pub const GREEN: Rgb888 = Rgb888::new(0, 200, 0);
pub const YELLOW: Rgb888 = Rgb888::new(200, 200, 0);
pub const ORANGE: Rgb888 = Rgb888::new(255, 140, 0);
pub const RED: Rgb888 = Rgb888::new(200, 0, 0);
