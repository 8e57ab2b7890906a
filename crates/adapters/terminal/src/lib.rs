//! Terminal display sink for matrixclock.
//!
//! Stands in for the LED matrix driver: every frame published by the
//! [`FrameStreamer`](matrixclock_app::frame_streamer::FrameStreamer) is
//! printed to a writer, usually stdout.
//!
//! ## Responsibilities
//!
//! - Encode a frame as ANSI truecolor half-blocks (two pixel rows per line)
//! - Encode a frame as plain ASCII for dumb terminals and logs
//! - Drain a frame stream until it closes or reports a render error
//!
//! ## Dependency rule
//!
//! Depends on `matrixclock-domain` and `matrixclock-app` (for the stream type).

pub mod error;
mod render;

use matrixclock_app::frame_streamer::FrameStream;
use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::frame::Frame;
use serde::Deserialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub use error::SinkError;
pub use render::{render_ansi, render_ascii};

/// Moves the cursor to the top-left corner so frames redraw in place.
const CURSOR_HOME: &str = "\x1b[H";
/// Clears the screen once before the first frame.
const CLEAR_SCREEN: &str = "\x1b[2J";

/// How frames are encoded on the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkStyle {
    #[default]
    Ansi,
    Ascii,
}

impl SinkStyle {
    #[must_use]
    pub fn render(self, frame: &Frame) -> String {
        match self {
            Self::Ansi => render_ansi(frame),
            Self::Ascii => render_ascii(frame),
        }
    }
}

/// Print every frame from `stream` to `out` until the frame channel closes.
///
/// `out` is any tokio writer, usually [`tokio::io::stdout`].
///
/// # Errors
///
/// Returns the render error published by the streamer, or
/// [`MatrixClockError::External`] if writing to `out` fails.
pub async fn drain<W: AsyncWrite + Unpin + Send>(
    mut stream: FrameStream,
    mut out: W,
    style: SinkStyle,
) -> Result<(), MatrixClockError> {
    if style == SinkStyle::Ansi {
        write_str(&mut out, CLEAR_SCREEN).await?;
    }
    let mut printed: u64 = 0;
    loop {
        tokio::select! {
            biased;
            Some(err) = stream.errors.recv() => {
                tracing::error!(%err, printed, "frame stream reported a render error");
                return Err(err);
            }
            frame = stream.frames.recv() => {
                let Some(frame) = frame else { break };
                write_frame(&mut out, &frame, style).await?;
                printed += 1;
            }
        }
    }

    // The streamer publishes its error before closing the frame channel.
    if let Ok(err) = stream.errors.try_recv() {
        return Err(err);
    }
    tracing::debug!(printed, "frame stream closed");
    Ok(())
}

async fn write_frame<W: AsyncWrite + Unpin>(
    out: &mut W,
    frame: &Frame,
    style: SinkStyle,
) -> Result<(), SinkError> {
    match style {
        SinkStyle::Ansi => out.write_all(CURSOR_HOME.as_bytes()).await?,
        SinkStyle::Ascii => out.write_all(b"\n").await?,
    }
    out.write_all(style.render(frame).as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

async fn write_str<W: AsyncWrite + Unpin>(out: &mut W, value: &str) -> Result<(), SinkError> {
    out.write_all(value.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::sync::Arc;
    use std::task::{Context, Poll};

    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::prelude::*;
    use matrixclock_domain::error::RenderError;
    use tokio::io::AsyncReadExt;
    use tokio::sync::mpsc;

    use super::*;

    fn frame() -> Arc<Frame> {
        let mut frame = Frame::new(Size::new(2, 1)).unwrap();
        frame.fill(Rgb888::RED);
        Arc::new(frame)
    }

    fn channels() -> (
        mpsc::Sender<Arc<Frame>>,
        mpsc::Sender<MatrixClockError>,
        FrameStream,
    ) {
        let (frame_tx, frames) = mpsc::channel(4);
        let (error_tx, errors) = mpsc::channel(1);
        (frame_tx, error_tx, FrameStream { frames, errors })
    }

    #[tokio::test]
    async fn should_print_frames_until_stream_closes() {
        let (frame_tx, error_tx, stream) = channels();
        frame_tx.send(frame()).await.unwrap();
        frame_tx.send(frame()).await.unwrap();
        drop(frame_tx);
        drop(error_tx);

        let mut out = Vec::new();
        drain(stream, &mut out, SinkStyle::Ascii).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\n##\n\n##\n");
    }

    #[tokio::test]
    async fn should_home_cursor_before_each_ansi_frame() {
        let (frame_tx, _error_tx, stream) = channels();
        frame_tx.send(frame()).await.unwrap();
        drop(frame_tx);

        let mut out = Vec::new();
        drain(stream, &mut out, SinkStyle::Ansi).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[2J\x1b[H"));
        assert_eq!(text.matches(CURSOR_HOME).count(), 1);
    }

    #[tokio::test]
    async fn should_return_render_error() {
        let (frame_tx, error_tx, stream) = channels();
        frame_tx.send(frame()).await.unwrap();
        let too_small = RenderError::FrameTooSmall {
            actual_width: 2,
            actual_height: 1,
            min_width: 1,
            min_height: 6,
        };
        error_tx.send(too_small.into()).await.unwrap();
        drop(frame_tx);

        let err = drain(stream, Vec::new(), SinkStyle::Ascii).await.unwrap_err();
        assert!(matches!(err, MatrixClockError::Render(_)));
    }

    #[tokio::test]
    async fn should_surface_write_failure() {
        struct Broken;

        impl AsyncWrite for Broken {
            fn poll_write(
                self: Pin<&mut Self>,
                _cx: &mut Context<'_>,
                _buf: &[u8],
            ) -> Poll<std::io::Result<usize>> {
                Poll::Ready(Err(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "closed",
                )))
            }

            fn poll_flush(
                self: Pin<&mut Self>,
                _cx: &mut Context<'_>,
            ) -> Poll<std::io::Result<()>> {
                Poll::Ready(Ok(()))
            }

            fn poll_shutdown(
                self: Pin<&mut Self>,
                _cx: &mut Context<'_>,
            ) -> Poll<std::io::Result<()>> {
                Poll::Ready(Ok(()))
            }
        }

        let (frame_tx, _error_tx, stream) = channels();
        frame_tx.send(frame()).await.unwrap();

        let err = drain(stream, Broken, SinkStyle::Ascii).await.unwrap_err();
        assert!(matches!(err, MatrixClockError::External(_)));
    }

    #[tokio::test]
    async fn should_stream_frames_through_async_pipe() {
        let (frame_tx, _error_tx, stream) = channels();
        frame_tx.send(frame()).await.unwrap();
        frame_tx.send(frame()).await.unwrap();
        drop(frame_tx);

        // A tiny pipe forces the sink to wait on the reader between writes.
        let (writer, mut reader) = tokio::io::duplex(2);
        let sink = tokio::spawn(drain(stream, writer, SinkStyle::Ascii));

        let mut text = String::new();
        reader.read_to_string(&mut text).await.unwrap();
        sink.await.unwrap().unwrap();
        assert_eq!(text, "\n##\n\n##\n");
    }

    #[test]
    fn should_deserialize_style_from_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            style: SinkStyle,
        }
        let wrapper: Wrapper = toml::from_str(r#"style = "ascii""#).unwrap();
        assert_eq!(wrapper.style, SinkStyle::Ascii);
        assert_eq!(SinkStyle::default(), SinkStyle::Ansi);
    }
}
