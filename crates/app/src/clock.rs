//! Page rotation controller: decides what each frame shows.
//!
//! [`PageController`] implements [`Renderer`]: every call draws the clock
//! header, then (outside the overnight window) the active page. A separate
//! rotation task advances the active page on its own cadence; draws only
//! read the index, so the two never wait on each other.

mod pages;
pub mod palette;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::prelude::*;
use matrixclock_domain::error::{MatrixClockError, RenderError, ValidationError};
use matrixclock_domain::frame::{BACKGROUND, Frame};
use matrixclock_domain::page::{Page, PageSet};
use matrixclock_domain::time::{format_header, is_overnight};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::ports::{
    Calendar, DiagnosticsReader, Renderer, SensorReader, SystemClock, TimeSource, WeatherReader,
};

use self::pages::Canvas;

/// Default time each page stays on screen.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(5);

const HEADER_ORIGIN: Point = Point::new(0, 0);

/// Behaviour switches for [`PageController`].
#[derive(Debug, Clone, Copy)]
pub struct ClockOptions {
    pub rotation_interval: Duration,
    /// Keep drawing pages through the overnight window.
    pub debug: bool,
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self {
            rotation_interval: ROTATION_INTERVAL,
            debug: false,
        }
    }
}

/// Composes frames from agent snapshots and owns the rotation index.
pub struct PageController {
    weather: Arc<dyn WeatherReader>,
    diagnostics: Arc<dyn DiagnosticsReader>,
    sensors: Option<Arc<dyn SensorReader>>,
    calendar: Arc<dyn Calendar>,
    time: Arc<dyn TimeSource>,
    font: &'static MonoFont<'static>,
    pages: PageSet,
    index: Arc<AtomicUsize>,
    options: ClockOptions,
}

impl PageController {
    /// Create a builder for constructing a [`PageController`].
    #[must_use]
    pub fn builder() -> PageControllerBuilder {
        PageControllerBuilder::default()
    }

    /// The rotation set, fixed at construction.
    #[must_use]
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn current_page(&self) -> &Page {
        self.pages.get(self.current_index())
    }

    /// Spawn the task advancing the active page every rotation interval.
    /// It is the only writer of the index.
    pub fn spawn_rotation(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let index = Arc::clone(&self.index);
        let len = self.pages.len();
        let mut ticker = crate::agents::ticker(self.options.rotation_interval);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let next = (index.load(Ordering::Relaxed) + 1) % len;
                        index.store(next, Ordering::Relaxed);
                        tracing::trace!(index = next, "page rotated");
                    }
                }
            }
            tracing::debug!("page rotation stopped");
        })
    }

    fn draw_page(&self, canvas: &mut Canvas<'_>, page: &Page, local: &DateTime<FixedOffset>) {
        let now = local.with_timezone(&Utc);
        match page {
            Page::Today => pages::weather(canvas, "Today", &self.weather.today()),
            Page::Tomorrow => pages::weather(canvas, "Tomorrow", &self.weather.tomorrow()),
            Page::Daylight => pages::daylight(canvas, &self.weather.today(), local.offset()),
            Page::Countdown => {
                let event = self.calendar.next_upcoming(now);
                pages::countdown(canvas, event.as_ref(), now);
            }
            Page::Diagnostics => pages::diagnostics(canvas, &self.diagnostics.status(), now),
            Page::Area(name) => {
                if let Some(area) = self.sensors.as_ref().and_then(|sensors| sensors.area(name)) {
                    pages::area(canvas, &area);
                }
            }
        }
    }
}

impl Renderer for PageController {
    fn draw_frame(&self, target: &mut Frame) -> Result<(), MatrixClockError> {
        let min_height = self.font.character_size.height;
        if target.size().height < min_height {
            return Err(RenderError::FrameTooSmall {
                actual_width: target.size().width,
                actual_height: target.size().height,
                min_width: self.font.character_size.width,
                min_height,
            }
            .into());
        }

        target.fill(BACKGROUND);
        let local = self.time.now();
        let mut canvas = Canvas::new(target, self.font);
        canvas.text(HEADER_ORIGIN, &format_header(&local), palette::HEADER);

        if !self.options.debug && is_overnight(local.time()) {
            return Ok(());
        }
        self.draw_page(&mut canvas, self.current_page(), &local);
        Ok(())
    }
}

/// Step-by-step builder for [`PageController`].
#[derive(Default)]
pub struct PageControllerBuilder {
    weather: Option<Arc<dyn WeatherReader>>,
    diagnostics: Option<Arc<dyn DiagnosticsReader>>,
    sensors: Option<Arc<dyn SensorReader>>,
    calendar: Option<Arc<dyn Calendar>>,
    time: Option<Arc<dyn TimeSource>>,
    font: Option<&'static MonoFont<'static>>,
    options: ClockOptions,
}

impl PageControllerBuilder {
    #[must_use]
    pub fn weather(mut self, weather: Arc<dyn WeatherReader>) -> Self {
        self.weather = Some(weather);
        self
    }

    #[must_use]
    pub fn diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsReader>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Enables one area page per area the reader knows about.
    #[must_use]
    pub fn sensors(mut self, sensors: Arc<dyn SensorReader>) -> Self {
        self.sensors = Some(sensors);
        self
    }

    #[must_use]
    pub fn calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Defaults to the host clock.
    #[must_use]
    pub fn time_source(mut self, time: Arc<dyn TimeSource>) -> Self {
        self.time = Some(time);
        self
    }

    /// Defaults to the 4x6 ASCII font.
    #[must_use]
    pub fn font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub fn options(mut self, options: ClockOptions) -> Self {
        self.options = options;
        self
    }

    /// Consume the builder, validate, and return a [`PageController`].
    ///
    /// # Errors
    ///
    /// Returns [`MatrixClockError::Validation`] if the weather, diagnostics
    /// or calendar collaborator is missing, or the rotation interval is zero.
    pub fn build(self) -> Result<PageController, MatrixClockError> {
        crate::agents::ensure_positive(self.options.rotation_interval, "page rotation")?;
        let weather = self
            .weather
            .ok_or(ValidationError::MissingCollaborator("weather reader"))?;
        let diagnostics = self
            .diagnostics
            .ok_or(ValidationError::MissingCollaborator("diagnostics reader"))?;
        let calendar = self
            .calendar
            .ok_or(ValidationError::MissingCollaborator("calendar"))?;

        let areas = self
            .sensors
            .as_ref()
            .map(|sensors| sensors.area_names())
            .unwrap_or_default();
        let pages = PageSet::new(areas);
        tracing::info!(pages = pages.len(), "page rotation configured");

        Ok(PageController {
            weather,
            diagnostics,
            sensors: self.sensors,
            calendar,
            time: self.time.unwrap_or_else(|| Arc::new(SystemClock)),
            font: self.font.unwrap_or(&FONT_4X6),
            pages,
            index: Arc::new(AtomicUsize::new(0)),
            options: self.options,
        })
    }
}
