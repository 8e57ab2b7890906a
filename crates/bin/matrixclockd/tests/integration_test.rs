//! End-to-end tests for the full matrixclockd pipeline.
//!
//! Each test wires the real agents, page controller, calendar, frame streamer
//! and terminal sink around in-memory providers and a fixed clock. Time is
//! paused, so no test waits on the wall clock and nothing touches the network.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone};
use embedded_graphics::geometry::Size;
use matrixclock_adapter_calendar::{CalendarConfig, EventConfig, StaticCalendar};
use matrixclock_adapter_terminal::{SinkStyle, drain};
use matrixclock_app::agents::{DiagnosticsAgent, SensorAgent, WeatherAgent, WeatherOptions};
use matrixclock_app::clock::{ClockOptions, PageController};
use matrixclock_app::frame_streamer::FrameStreamer;
use matrixclock_app::ports::{Probe, StateProvider, TimeSource, WeatherProvider};
use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::sensor::{AreaGrouping, AttributeValue, EntitySnapshot};
use matrixclock_domain::weather::{DayWeather, TwoDayWeather};
use tokio_util::sync::CancellationToken;

const ROWS: u32 = 32;
const COLS: u32 = 64;

struct FakeWeather;

impl WeatherProvider for FakeWeather {
    async fn two_day_weather(
        &self,
        _latitude: &str,
        _longitude: &str,
    ) -> Result<TwoDayWeather, MatrixClockError> {
        let day = DayWeather {
            temperature_high: 18.0,
            temperature_low: 9.0,
            rainy: true,
            ..DayWeather::default()
        };
        Ok(TwoDayWeather {
            today: day.clone(),
            tomorrow: DayWeather {
                cloudy: true,
                ..day
            },
        })
    }
}

struct FakeProbe;

impl Probe for FakeProbe {
    async fn probe(&self) -> Result<Duration, MatrixClockError> {
        Ok(Duration::from_millis(12))
    }
}

struct FakeHome;

impl StateProvider for FakeHome {
    async fn state(&self, _entity_id: &str) -> Result<EntitySnapshot, MatrixClockError> {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            "unit_of_measurement".to_string(),
            AttributeValue::from("°C"),
        );
        attributes.insert("friendly_name".to_string(), AttributeValue::from("Kitchen"));
        Ok(EntitySnapshot {
            state: "21.5".to_string(),
            attributes,
            last_updated: matrixclock_domain::time::now(),
        })
    }

    async fn area_groupings(&self) -> Result<Vec<AreaGrouping>, MatrixClockError> {
        Ok(vec![AreaGrouping {
            area: "Kitchen".to_string(),
            entity_ids: vec!["sensor.kitchen_temperature".to_string()],
        }])
    }
}

struct FixedTime(DateTime<FixedOffset>);

impl TimeSource for FixedTime {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

fn at(hour: u32) -> Arc<FixedTime> {
    let offset = FixedOffset::east_opt(3600).unwrap();
    Arc::new(FixedTime(
        offset.with_ymd_and_hms(2026, 10, 18, hour, 0, 0).unwrap(),
    ))
}

fn calendar() -> StaticCalendar {
    StaticCalendar::from_config(&CalendarConfig {
        events: vec![EventConfig {
            name: "XMAS".to_string(),
            starts_at: "2026-12-25T00:00:00Z".to_string(),
            image: Some(vec!["..#..".to_string(), ".###.".to_string()]),
            image_color: [0, 200, 0],
        }],
    })
    .unwrap()
}

/// Build every agent and the controller, sharing `cancel`.
async fn controller(time: Arc<FixedTime>, cancel: &CancellationToken) -> Arc<PageController> {
    let weather = WeatherAgent::new(
        FakeWeather,
        WeatherOptions {
            latitude: "51.5".to_string(),
            longitude: "-0.12".to_string(),
            refresh: Duration::from_secs(900),
        },
    )
    .await
    .unwrap();
    weather.spawn_refresh(cancel.clone());

    let diagnostics = DiagnosticsAgent::new(FakeProbe, Duration::from_secs(120)).unwrap();
    diagnostics.spawn_probing(cancel.clone());

    let sensors = SensorAgent::new(
        FakeHome,
        vec!["sensor.kitchen_temperature".to_string()],
        Duration::from_secs(60),
    )
    .await
    .unwrap();
    sensors.spawn_refresh(cancel.clone());

    let controller = PageController::builder()
        .weather(weather)
        .diagnostics(diagnostics)
        .sensors(sensors)
        .calendar(Arc::new(calendar()))
        .time_source(time)
        .options(ClockOptions {
            rotation_interval: Duration::from_secs(1),
            debug: false,
        })
        .build()
        .unwrap();
    controller.spawn_rotation(cancel.clone());
    Arc::new(controller)
}

/// Split ASCII sink output into frames of `ROWS` lines.
fn frames(output: &[u8]) -> Vec<String> {
    let text = String::from_utf8(output.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
    assert_eq!(lines.len() % ROWS as usize, 0);
    lines
        .chunks(ROWS as usize)
        .map(|chunk| chunk.join("\n"))
        .collect()
}

/// Run the streamer into the ASCII sink for `run_for`, then cancel everything.
async fn run(
    controller: Arc<PageController>,
    cancel: CancellationToken,
    run_for: Duration,
) -> Vec<String> {
    let (mut streamer, stream) = FrameStreamer::new(
        Size::new(COLS, ROWS),
        controller,
        Duration::from_millis(250),
        &cancel,
    )
    .unwrap();
    streamer.start();

    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(run_for).await;
        stopper.cancel();
    });

    let mut out = Vec::new();
    drain(stream, &mut out, SinkStyle::Ascii).await.unwrap();
    streamer.stop().await;
    assert!(!streamer.is_running());
    assert!(streamer.stats().frames_published > 0);
    frames(&out)
}

#[tokio::test(start_paused = true)]
async fn should_stream_every_page_to_terminal() {
    let cancel = CancellationToken::new();
    let controller = controller(at(12), &cancel).await;
    assert_eq!(controller.pages().len(), 6);

    let frames = run(controller, cancel, Duration::from_millis(7_100)).await;

    assert!(frames.len() >= 20, "only {} frames", frames.len());
    for frame in &frames {
        let mut lines = frame.lines();
        assert!(lines.all(|line| line.len() == COLS as usize));
    }
    let distinct: HashSet<&String> = frames.iter().collect();
    assert_eq!(distinct.len(), 6);
}

#[tokio::test(start_paused = true)]
async fn should_show_only_header_overnight() {
    let cancel = CancellationToken::new();
    let controller = controller(at(23), &cancel).await;

    let frames = run(controller, cancel, Duration::from_millis(3_100)).await;

    let distinct: HashSet<&String> = frames.iter().collect();
    assert_eq!(distinct.len(), 1);
    let frame = frames[0].lines().collect::<Vec<_>>();
    assert!(frame[..6].iter().any(|line| line.contains('#')));
    assert!(frame[6..].iter().all(|line| !line.contains('#')));
}

#[tokio::test(start_paused = true)]
async fn should_end_stream_with_render_error_when_panel_is_too_small() {
    let cancel = CancellationToken::new();
    let controller = controller(at(12), &cancel).await;

    let (mut streamer, stream) = FrameStreamer::new(
        Size::new(COLS, 4),
        controller,
        Duration::from_millis(250),
        &cancel,
    )
    .unwrap();
    streamer.start();

    let err = drain(stream, Vec::new(), SinkStyle::Ascii)
        .await
        .unwrap_err();
    assert!(matches!(err, MatrixClockError::Render(_)));

    cancel.cancel();
    streamer.stop().await;
}
