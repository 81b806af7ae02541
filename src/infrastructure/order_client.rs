use crate::application::OrderGateway;
use crate::domain::{FormValues, OrderReceipt, SubmissionError};
use crate::infrastructure::config::AppConfig;
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Posts orders as JSON to the order service.
pub struct HttpOrderClient {
    client: Client,
    endpoint: Url,
}

impl HttpOrderClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SubmissionError::Transport)?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Uses a preconfigured client, e.g. one with custom proxy settings.
    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, SubmissionError> {
        Self::new(config.endpoint.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl OrderGateway for HttpOrderClient {
    fn place_order(&self, order: &FormValues) -> Result<OrderReceipt, SubmissionError> {
        debug!(endpoint = %self.endpoint, body = ?serde_json::to_string(order).ok(), "posting order");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(order)
            .send()
            .map_err(SubmissionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Status { status: status.as_u16() });
        }

        let receipt = response.json::<OrderReceipt>().map_err(SubmissionError::Decode)?;
        debug!(message = %receipt.message, "order service replied");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread::{self, JoinHandle};
    use std::time::Instant;

    /// Serves one HTTP exchange and hands back the request body it received.
    fn serve_once(status_line: &str, body: &str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/api/order", listener.local_addr().unwrap())).unwrap();
        let status_line = status_line.to_string();
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());

            let mut content_length: usize = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            let mut request_body = vec![0u8; content_length];
            reader.read_exact(&mut request_body).unwrap();

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            String::from_utf8(request_body).unwrap()
        });

        (url, handle)
    }

    fn client_with_timeout(url: Url, timeout: Duration) -> HttpOrderClient {
        let client = Client::builder().no_proxy().timeout(timeout).build().unwrap();
        HttpOrderClient::with_client(client, url)
    }

    fn direct_client(url: Url) -> HttpOrderClient {
        client_with_timeout(url, Duration::from_secs(5))
    }

    fn jane_doe() -> FormValues {
        FormValues {
            full_name: "Jane Doe".to_string(),
            size: "M".to_string(),
            toppings: ["1", "3"].iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_posts_order_and_reads_message() {
        let (url, server) = serve_once("200 OK", r#"{"message":"order placed"}"#);
        let client = direct_client(url);

        let receipt = client.place_order(&jane_doe()).unwrap();
        assert_eq!(receipt.message, "order placed");

        let sent: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({"fullName": "Jane Doe", "size": "M", "toppings": ["1", "3"]})
        );
    }

    #[test]
    fn test_non_success_status_is_a_fault() {
        let (url, server) = serve_once("500 Internal Server Error", r#"{"message":"oven on fire"}"#);
        let client = direct_client(url);

        let err = client.place_order(&jane_doe()).unwrap_err();
        assert!(matches!(err, SubmissionError::Status { status: 500 }));
        server.join().unwrap();
    }

    #[test]
    fn test_unexpected_body_is_a_fault() {
        let (url, server) = serve_once("200 OK", r#"{"status":"ok"}"#);
        let client = direct_client(url);

        let err = client.place_order(&jane_doe()).unwrap_err();
        assert!(matches!(err, SubmissionError::Decode(_)));
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_service_is_a_fault() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/api/order")).unwrap();
        let client = direct_client(url);

        let err = client.place_order(&jane_doe()).unwrap_err();
        assert!(matches!(err, SubmissionError::Transport(_)));
        assert!(err.to_string().starts_with("could not reach the order service"));
    }

    #[test]
    fn test_silent_service_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!("http://{}/api/order", listener.local_addr().unwrap())).unwrap();
        let (release, held) = mpsc::channel::<()>();

        // Accepts the connection and never answers
        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let _ = held.recv_timeout(Duration::from_secs(10));
            drop(stream);
        });

        let client = client_with_timeout(url, Duration::from_millis(300));
        let started = Instant::now();
        let err = client.place_order(&jane_doe()).unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        match &err {
            SubmissionError::Transport(source) => assert!(source.is_timeout(), "{source:?}"),
            other => panic!("expected a transport fault, got {other:?}"),
        }
        release.send(()).unwrap();
        server.join().unwrap();
    }
}
