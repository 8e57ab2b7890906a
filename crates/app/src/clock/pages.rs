//! Per-page drawing. Positions assume a 64x32 panel and a 4x6 font;
//! anything past the frame edge is clipped.

use chrono::FixedOffset;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use matrixclock_domain::diagnostics::{DiagnosticsStatus, PingLevel};
use matrixclock_domain::event::Event;
use matrixclock_domain::frame::Frame;
use matrixclock_domain::hue::HueGradient;
use matrixclock_domain::sensor::{AreaSensors, SensorState};
use matrixclock_domain::time::{Timestamp, format_age, format_countdown};
use matrixclock_domain::weather::{DayWeather, Precipitation};

use super::palette;

const TITLE_ORIGIN: Point = Point::new(0, 8);
const WEATHER_Y: i32 = 15;
const LINE_SPACING: i32 = 7;
const HIGH_X: i32 = 17;
const FLAGS_X: i32 = 36;

const SUNRISE_ORIGIN: Point = Point::new(4, 10);
const SUNSET_ORIGIN: Point = Point::new(8, 18);

const EVENT_IMAGE_ORIGIN: Point = Point::new(44, 9);
const EVENT_NAME_Y: i32 = 15;
const EVENT_COUNTDOWN_Y: i32 = 22;

const DIAG_SINCE_ORIGIN: Point = Point::new(0, 10);
const DIAG_PING_ORIGIN: Point = Point::new(0, 18);

const AREA_TITLE_ORIGIN: Point = Point::new(0, 7);
const AREA_FIRST_ROW_Y: i32 = 14;
const AREA_ROW_HEIGHT: usize = 6;

/// A frame paired with the font every page writes in.
pub(super) struct Canvas<'a> {
    frame: &'a mut Frame,
    font: &'static MonoFont<'static>,
}

impl<'a> Canvas<'a> {
    pub(super) fn new(frame: &'a mut Frame, font: &'static MonoFont<'static>) -> Self {
        Self { frame, font }
    }

    /// Write `text` with its top-left corner at `origin`.
    pub(super) fn text(&mut self, origin: Point, text: &str, color: Rgb888) {
        let style = MonoTextStyle::new(self.font, color);
        let Ok(_) = Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut *self.frame);
    }

    /// Write `text` horizontally centred on row `y`.
    pub(super) fn centered(&mut self, y: i32, text: &str, color: Rgb888) {
        let width = i32::try_from(self.frame.width()).unwrap_or(i32::MAX);
        let x = ((width - self.text_width(text)) / 2).max(0);
        self.text(Point::new(x, y), text, color);
    }

    fn text_width(&self, text: &str) -> i32 {
        let count = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        let advance = self.font.character_size.width + self.font.character_spacing;
        let width = count.saturating_mul(advance).saturating_sub(self.font.character_spacing);
        i32::try_from(width).unwrap_or(i32::MAX)
    }

    fn overlay(&mut self, image: &Frame, origin: Point) {
        self.frame.overlay(image, origin);
    }
}

/// Today / Tomorrow: title, low and high, sky, then precipitation and wind.
pub(super) fn weather(canvas: &mut Canvas<'_>, title: &str, day: &DayWeather) {
    canvas.text(TITLE_ORIGIN, title, palette::TITLE);

    canvas.text(
        Point::new(0, WEATHER_Y),
        &temperature(day.temperature_low),
        palette::TEMPERATURE_LOW,
    );
    canvas.text(
        Point::new(HIGH_X, WEATHER_Y),
        &temperature(day.temperature_high),
        palette::TEMPERATURE_HIGH,
    );

    let sky_color = if day.cloudy {
        palette::CLOUDY
    } else {
        palette::SUNNY
    };
    canvas.text(Point::new(0, WEATHER_Y + LINE_SPACING), day.sky(), sky_color);

    if let Some(precipitation) = day.precipitation() {
        let color = match precipitation {
            Precipitation::Snow => palette::SNOW,
            Precipitation::Rain => palette::RAIN,
        };
        canvas.text(Point::new(FLAGS_X, WEATHER_Y), precipitation.label(), color);
    }
    if day.windy {
        canvas.text(
            Point::new(FLAGS_X, WEATHER_Y + LINE_SPACING),
            "Windy",
            palette::WINDY,
        );
    }
}

/// Sunrise and sunset in the display's local offset.
pub(super) fn daylight(canvas: &mut Canvas<'_>, day: &DayWeather, offset: &FixedOffset) {
    let sunrise = day.sunrise.with_timezone(offset).format("%H:%M");
    let sunset = day.sunset.with_timezone(offset).format("%H:%M");
    canvas.text(SUNRISE_ORIGIN, &format!("Sunrise {sunrise}"), palette::SUNRISE);
    canvas.text(SUNSET_ORIGIN, &format!("Sunset {sunset}"), palette::SUNSET);
}

/// Next event: picture first, then centred name and time left.
pub(super) fn countdown(canvas: &mut Canvas<'_>, event: Option<&Event>, now: Timestamp) {
    let Some(event) = event else {
        return;
    };
    if let Some(image) = &event.image {
        canvas.overlay(image, EVENT_IMAGE_ORIGIN);
    }
    canvas.centered(EVENT_NAME_Y, &event.name, palette::EVENT_NAME);
    canvas.centered(
        EVENT_COUNTDOWN_Y,
        &format_countdown(event.until(now)),
        palette::EVENT_COUNTDOWN,
    );
}

pub(super) fn diagnostics(canvas: &mut Canvas<'_>, status: &DiagnosticsStatus, now: Timestamp) {
    let (since, since_color) = since_line(status, now);
    let (ping, ping_color) = ping_line(status);
    canvas.text(DIAG_SINCE_ORIGIN, &since, since_color);
    canvas.text(DIAG_PING_ORIGIN, &ping, ping_color);
}

/// Area name, then one gradient-coloured line per sensor.
pub(super) fn area(canvas: &mut Canvas<'_>, area: &AreaSensors) {
    canvas.text(AREA_TITLE_ORIGIN, &area.area, palette::TITLE);
    let rows = (AREA_FIRST_ROW_Y..).step_by(AREA_ROW_HEIGHT);
    for (index, (sensor, y)) in area.sensors.iter().zip(rows).enumerate() {
        canvas.text(
            Point::new(0, y),
            &sensor_line(sensor),
            HueGradient::SENSORS.color(index),
        );
    }
}

fn temperature(celsius: f32) -> String {
    format!("{celsius:02.0}oC")
}

fn since_line(status: &DiagnosticsStatus, now: Timestamp) -> (String, Rgb888) {
    let Some(healthy_at) = status.last_healthy_at else {
        return ("Last ok never".to_string(), palette::RED);
    };
    let text = format!("Last ok {}", format_age(now - healthy_at));
    let color = if status.is_stale(now) {
        palette::RED
    } else {
        palette::GREEN
    };
    (text, color)
}

fn ping_line(status: &DiagnosticsStatus) -> (String, Rgb888) {
    match status.last_ping {
        Some(ping) if status.last_ping_ok => (
            format!("Ping {}ms", ping.as_millis()),
            ping_color(status.ping_level()),
        ),
        _ => ("Ping n/a".to_string(), palette::RED),
    }
}

fn ping_color(level: PingLevel) -> Rgb888 {
    match level {
        PingLevel::Green => palette::GREEN,
        PingLevel::Yellow => palette::YELLOW,
        PingLevel::Orange => palette::ORANGE,
        PingLevel::Red => palette::RED,
    }
}

fn sensor_line(sensor: &SensorState) -> String {
    format!("{} {}", sensor.short_name(), sensor.reading())
}
