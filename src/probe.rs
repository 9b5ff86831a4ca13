//! Timed HTTP probes against game day targets

use crate::errors::{GameDayError, Result};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Outcome of a single timed HTTP call
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProbeResult {
    pub url: String,
    pub status_code: Option<u16>,
    pub latency_ms: f64,
    pub error: Option<String>,
    pub success: bool,
}

impl ProbeResult {
    pub fn succeeded(url: impl Into<String>, status_code: u16, latency_ms: f64) -> Self {
        Self {
            url: url.into(),
            status_code: Some(status_code),
            latency_ms,
            error: None,
            success: true,
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>, latency_ms: f64) -> Self {
        Self {
            url: url.into(),
            status_code: None,
            latency_ms,
            error: Some(error.into()),
            success: false,
        }
    }

    /// Error message, or an empty string for successful probes
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

/// Per-call request options
#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    pub json: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl ProbeOptions {
    pub fn json(body: Value) -> Self {
        Self {
            json: Some(body),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client that turns every request into a `ProbeResult`
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(http_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("game_day/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GameDayError::Http)?;

        Ok(Self {
            client,
            timeout: http_timeout,
        })
    }

    pub async fn get(&self, url: &str) -> ProbeResult {
        self.probe(Method::GET, url, ProbeOptions::default()).await
    }

    pub async fn post_json(&self, url: &str, options: ProbeOptions) -> ProbeResult {
        self.probe(Method::POST, url, options).await
    }

    /// Issue one request; failures are captured, never returned
    pub async fn probe(&self, method: Method, url: &str, options: ProbeOptions) -> ProbeResult {
        let request_timeout = options.timeout.unwrap_or(self.timeout);

        let mut request = self.client.request(method.clone(), url);
        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.json {
            request = request.json(body);
        }

        // The timeout and the stopwatch both cover the body download
        let exchange = async {
            let response = request.send().await?.error_for_status()?;
            let status_code = response.status().as_u16();
            response.bytes().await?;
            Ok::<u16, reqwest::Error>(status_code)
        };

        let start_time = Instant::now();
        let outcome = match timeout(request_timeout, exchange).await {
            Ok(Ok(status_code)) => Ok(status_code),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!(
                "Request timeout after {}ms",
                request_timeout.as_millis()
            )),
        };
        let latency_ms = round2(start_time.elapsed().as_secs_f64() * 1000.0);

        match outcome {
            Ok(status_code) => {
                debug!("{} {} -> {} ({}ms)", method, url, status_code, latency_ms);
                ProbeResult::succeeded(url, status_code, latency_ms)
            }
            Err(error) => {
                warn!("{} {} failed ({}ms): {}", method, url, latency_ms, error);
                ProbeResult::failed(url, error, latency_ms)
            }
        }
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn prober() -> HttpProber {
        HttpProber::new(Duration::from_secs(5)).unwrap()
    }

    /// Server that sends the response headers at once and the body after `delay`
    async fn slow_body_server(delay: Duration) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\n")
                    .await;
                let _ = socket.flush().await;
                tokio::time::sleep(delay).await;
                let _ = socket.write_all(b"hello").await;
                let _ = socket.flush().await;
            }
        });

        format!("http://{}/metrics", addr)
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345_6), 12.35);
        assert_eq!(round2(0.004), 0.0);
        assert_eq!(round2(100.0), 100.0);
    }

    #[tokio::test]
    async fn test_probe_success_records_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/health", server.uri());
        let result = prober().get(&url).await;

        assert!(result.success);
        assert_eq!(result.status_code, Some(200));
        assert!(result.error.is_none());
        assert_eq!(result.url, url);
        assert!(result.latency_ms >= 0.0);
    }

    #[tokio::test]
    async fn test_probe_non_success_status_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ready"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = prober().get(&format!("{}/ready", server.uri())).await;

        assert!(!result.success);
        assert_eq!(result.status_code, None);
        assert!(result.error_message().contains("503"));
    }

    #[tokio::test]
    async fn test_probe_sends_json_and_headers() {
        let server = MockServer::start().await;
        let body = json!({"project_id": "proj_123", "content": "hello"});
        Mock::given(method("POST"))
            .and(path("/manuscript/sync"))
            .and(header("traceparent", "00-abc-def-01"))
            .and(body_json(body.clone()))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let options = ProbeOptions::json(body).with_header("traceparent", "00-abc-def-01");
        let result = prober()
            .post_json(&format!("{}/manuscript/sync", server.uri()), options)
            .await;

        assert!(result.success);
        assert_eq!(result.status_code, Some(201));
    }

    #[tokio::test]
    async fn test_probe_timeout_is_captured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let options = ProbeOptions::default().with_timeout(Duration::from_millis(50));
        let result = prober()
            .probe(Method::GET, &format!("{}/slow", server.uri()), options)
            .await;

        assert!(!result.success);
        assert!(result.error_message().contains("timeout"));
    }

    #[tokio::test]
    async fn test_latency_includes_body_download() {
        let url = slow_body_server(Duration::from_millis(400)).await;

        let result = prober().get(&url).await;

        assert!(result.success, "unexpected error: {}", result.error_message());
        assert_eq!(result.status_code, Some(200));
        assert!(result.latency_ms >= 400.0, "latency was {}ms", result.latency_ms);
    }

    #[tokio::test]
    async fn test_stalled_body_times_out() {
        let url = slow_body_server(Duration::from_secs(3)).await;

        let options = ProbeOptions::default().with_timeout(Duration::from_millis(300));
        let result = prober().probe(Method::GET, &url, options).await;

        assert!(!result.success);
        assert!(result.status_code.is_none());
        assert!(result.error_message().contains("timeout"));
        assert!(result.latency_ms < 3000.0);
    }

    #[tokio::test]
    async fn test_probe_connection_refused() {
        let result = prober().get("http://127.0.0.1:1/health").await;

        assert!(!result.success);
        assert!(result.status_code.is_none());
        assert!(!result.error_message().is_empty());
    }
}
