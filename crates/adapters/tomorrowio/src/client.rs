//! HTTP client implementing the weather provider port.

use matrixclock_app::ports::WeatherProvider;
use matrixclock_domain::error::MatrixClockError;
use matrixclock_domain::weather::TwoDayWeather;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;

use crate::config::TomorrowIoConfig;
use crate::error::TomorrowIoError;
use crate::types::{ErrorResponse, ForecastResponse};

/// tomorrow.io forecast client.
#[derive(Debug, Clone)]
pub struct TomorrowIoClient {
    http: reqwest::Client,
    config: TomorrowIoConfig,
}

impl TomorrowIoClient {
    /// Build a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TomorrowIoError::Http`] if the TLS backend fails to initialise.
    pub fn new(config: TomorrowIoConfig) -> Result<Self, TomorrowIoError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { http, config })
    }

    async fn forecast(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<ForecastResponse, TomorrowIoError> {
        let location = format!("{latitude},{longitude}");
        let response = self
            .http
            .get(&self.config.base_url)
            .header(ACCEPT, "application/json")
            .query(&[
                ("location", location.as_str()),
                ("fields", "core"),
                ("units", "metric"),
                ("timesteps", "1d"),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        Ok(response.json::<ForecastResponse>().await?)
    }
}

/// Client errors carry a JSON body with a human-readable message.
fn status_error(status: StatusCode, body: &str) -> TomorrowIoError {
    let message = if status.is_client_error() {
        serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .map(|err| err.message)
    } else {
        None
    };
    TomorrowIoError::Status {
        status: status.as_u16(),
        message,
    }
}

impl WeatherProvider for TomorrowIoClient {
    async fn two_day_weather(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<TwoDayWeather, MatrixClockError> {
        let forecast = self.forecast(latitude, longitude).await?;
        let weather = forecast.into_two_day()?;
        tracing::debug!(
            high = weather.today.temperature_high,
            low = weather.today.temperature_low,
            "fetched two-day forecast"
        );
        Ok(weather)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Read the request head plus any `content-length` body.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            raw.extend_from_slice(&chunk[..read]);
            let text = String::from_utf8_lossy(&raw).into_owned();
            if let Some(head_end) = text.find("\r\n\r\n") {
                let body_len = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if read == 0 || raw.len() >= head_end + 4 + body_len {
                    return text;
                }
            } else if read == 0 {
                return text;
            }
        }
    }

    /// Serve a single canned HTTP response and hand back the request head.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v4/weather/forecast", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            request
        });
        (url, handle)
    }

    fn client(base_url: String) -> TomorrowIoClient {
        TomorrowIoClient::new(TomorrowIoConfig {
            api_key: "secret".to_string(),
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn should_request_daily_metric_forecast() {
        let body = r#"{"timelines":{"daily":[{"values":{"temperatureMax":20}},{"values":{"temperatureMax":18}}]}}"#;
        let (url, server) = serve_once("200 OK", body).await;

        let weather = client(url).two_day_weather("51.5", "-0.12").await.unwrap();
        let request = server.await.unwrap();

        assert!((weather.today.temperature_high - 20.0).abs() < 1e-4);
        assert!((weather.tomorrow.temperature_high - 18.0).abs() < 1e-4);
        assert!(request.starts_with("GET /v4/weather/forecast?"));
        assert!(request.contains("location=51.5%2C-0.12"));
        assert!(request.contains("fields=core"));
        assert!(request.contains("units=metric"));
        assert!(request.contains("timesteps=1d"));
        assert!(request.contains("apikey=secret"));
        assert!(request.to_lowercase().contains("accept: application/json"));
    }

    #[tokio::test]
    async fn should_surface_api_message_on_client_error() {
        let body = r#"{"code":429001,"type":"Too Many Calls","message":"rate limit reached"}"#;
        let (url, _server) = serve_once("429 Too Many Requests", body).await;

        let err = client(url).forecast("0", "0").await.unwrap_err();
        match err {
            TomorrowIoError::Status { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message.as_deref(), Some("rate limit reached"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_report_server_error_status() {
        let (url, _server) = serve_once("502 Bad Gateway", "oops").await;

        let err = client(url).forecast("0", "0").await.unwrap_err();
        assert!(matches!(
            err,
            TomorrowIoError::Status {
                status: 502,
                message: None
            }
        ));
    }

    #[test]
    fn should_ignore_undecodable_client_error_body() {
        let err = status_error(StatusCode::FORBIDDEN, "<html>");
        assert!(matches!(
            err,
            TomorrowIoError::Status {
                status: 403,
                message: None
            }
        ));
    }
}
