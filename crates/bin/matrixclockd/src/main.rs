//! # matrixclockd: matrix clock daemon
//!
//! Composition root that wires the agents, the page controller and the frame
//! streamer together and prints frames to the terminal.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber (stderr, so frames own stdout)
//! - Construct adapters and inject them into the agents via port traits
//! - Build the page controller and start rotation and frame streaming
//! - Handle graceful shutdown (Ctrl-C or the sink ending)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use embedded_graphics::geometry::Size;
use matrixclock_adapter_calendar::StaticCalendar;
use matrixclock_adapter_homeassistant::HomeAssistantClient;
use matrixclock_adapter_terminal::drain;
use matrixclock_adapter_tomorrowio::TomorrowIoClient;
use matrixclock_app::agents::{DiagnosticsAgent, SensorAgent, TcpProbe, WeatherAgent};
use matrixclock_app::clock::PageController;
use matrixclock_app::frame_streamer::FrameStreamer;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_logging(&config.logging.filter);

    let cancel = CancellationToken::new();
    let mut tasks: Vec<JoinHandle<()>> = Vec::new();

    // Agents
    let weather = WeatherAgent::new(
        TomorrowIoClient::new(config.tomorrowio())?,
        config.weather_options(),
    )
    .await?;
    tasks.push(weather.spawn_refresh(cancel.clone()));

    let probe = TcpProbe::new(
        config.diagnostics.address.clone(),
        config.diagnostics.timeout(),
    );
    let diagnostics = DiagnosticsAgent::new(probe, config.diagnostics.interval())?;
    tasks.push(diagnostics.spawn_probing(cancel.clone()));

    let calendar = StaticCalendar::from_config(&config.calendar)?;

    // Pages
    let mut builder = PageController::builder()
        .weather(weather)
        .diagnostics(diagnostics)
        .calendar(Arc::new(calendar))
        .options(config.clock_options());
    if let Some(section) = &config.home_assistant {
        let client = HomeAssistantClient::new(section.client_config())?;
        let sensors =
            SensorAgent::new(client, section.entity_ids.clone(), section.refresh()).await?;
        tasks.push(sensors.spawn_refresh(cancel.clone()));
        builder = builder.sensors(sensors);
    }
    let controller = Arc::new(builder.build()?);
    tasks.push(controller.spawn_rotation(cancel.clone()));

    // Frames
    let size = Size::new(config.display.cols, config.display.rows);
    let (mut streamer, stream) = FrameStreamer::new(
        size,
        Arc::clone(&controller),
        config.frame_interval(),
        &cancel,
    )?;
    streamer.start();
    let mut sink = tokio::spawn(drain(stream, tokio::io::stdout(), config.display.style));

    tracing::info!(
        cols = config.display.cols,
        rows = config.display.rows,
        pages = controller.pages().len(),
        "matrixclockd running"
    );

    let finished = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal?;
            tracing::info!("shutdown requested");
            None
        }
        result = &mut sink => Some(result),
    };

    cancel.cancel();
    streamer.stop().await;
    for task in tasks {
        if let Err(err) = task.await {
            tracing::warn!(%err, "background task ended abnormally");
        }
    }
    let sink_result = match finished {
        Some(result) => result,
        None => sink.await,
    };

    let stats = streamer.stats();
    tracing::info!(
        published = stats.frames_published,
        dropped = stats.frames_dropped,
        reallocated = stats.buffers_reallocated,
        "matrixclockd stopped"
    );

    sink_result??;
    Ok(())
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|err| {
        eprintln!("invalid log filter {filter:?}: {err}, falling back to info");
        EnvFilter::new("info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
