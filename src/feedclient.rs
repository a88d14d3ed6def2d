//! Name feed client.
//!
//! The feed is a single HTTP endpoint answering `GET` with a JSON object:
//!
//! ```json
//! { "Names": ["Bessie", "Elsie"] }
//! ```
//!
//! [`HttpFeed`] performs one blocking request per [`NameFeed::poll`] and
//! decodes the list. There is no retry: a failed poll is reported as a
//! [`FetchError`] and the caller simply waits for the next interval.
//!
//! Anything implementing [`NameFeed`] can stand in for the HTTP client,
//! including plain closures, which keeps the schedulers testable without a
//! network.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use serde_json::{Map, Value};

/// Why a poll produced no names.
#[derive(Debug)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure.
    Transport {
        url: String,
        source: Box<dyn Error + Send + Sync>,
    },
    /// The server answered with a non-success status.
    Status(u16),
    /// The response body could not be read.
    Body(std::io::Error),
    /// The body was not a valid feed payload.
    Decode(serde_json::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { url, source } => write!(f, "GET {url} failed: {source}"),
            Self::Status(code) => write!(f, "feed answered with HTTP status {code}"),
            Self::Body(e) => write!(f, "failed to read feed response: {e}"),
            Self::Decode(e) => write!(f, "malformed feed payload: {e}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport { source, .. } => Some(source.as_ref()),
            Self::Status(_) => None,
            Self::Body(e) => Some(e),
            Self::Decode(e) => Some(e),
        }
    }
}

/// Source of names to spawn.
pub trait NameFeed: Send + Sync {
    /// Fetch the current batch of names.
    fn poll(&self) -> Result<Vec<String>, FetchError>;
}

impl<F> NameFeed for F
where
    F: Fn() -> Result<Vec<String>, FetchError> + Send + Sync,
{
    fn poll(&self) -> Result<Vec<String>, FetchError> {
        self()
    }
}

/// Key of the name list in a feed response.
const NAMES_KEY: &str = "Names";

/// Decode a feed response body into its list of names.
///
/// The key is matched exactly first, then ignoring ASCII case. A top-level
/// `null`, a missing key or a `null` list is an empty batch.
pub fn decode_names(body: &str) -> Result<Vec<String>, FetchError> {
    let response: Option<Map<String, Value>> =
        serde_json::from_str(body).map_err(FetchError::Decode)?;
    let Some(mut fields) = response else {
        return Ok(Vec::new());
    };
    let key = if fields.contains_key(NAMES_KEY) {
        Some(NAMES_KEY.to_string())
    } else {
        fields
            .keys()
            .find(|k| k.eq_ignore_ascii_case(NAMES_KEY))
            .cloned()
    };
    let Some(names) = key.and_then(|k| fields.remove(&k)) else {
        return Ok(Vec::new());
    };
    let names: Option<Vec<String>> = serde_json::from_value(names).map_err(FetchError::Decode)?;
    Ok(names.unwrap_or_default())
}

/// Blocking HTTP implementation of [`NameFeed`].
pub struct HttpFeed {
    url: String,
    agent: ureq::Agent,
}

impl HttpFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            url: url.into(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl NameFeed for HttpFeed {
    fn poll(&self) -> Result<Vec<String>, FetchError> {
        let response = self.agent.get(&self.url).call().map_err(|e| match e {
            ureq::Error::Status(code, _) => FetchError::Status(code),
            ureq::Error::Transport(transport) => FetchError::Transport {
                url: self.url.clone(),
                source: Box::new(transport),
            },
        })?;
        let body = response.into_string().map_err(FetchError::Body)?;
        decode_names(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve a single canned HTTP response on a local port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let addr = listener.local_addr().expect("local addr");
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = Vec::new();
                let mut buf = [0u8; 512];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/drain")
    }

    #[test]
    fn decode_names_list() {
        let names = decode_names(r#"{"Names": ["Bessie", "Elsie"]}"#).unwrap();
        assert_eq!(names, vec!["Bessie".to_string(), "Elsie".to_string()]);
    }

    #[test]
    fn decode_empty_list() {
        assert!(decode_names(r#"{"Names": []}"#).unwrap().is_empty());
    }

    #[test]
    fn decode_missing_or_null_names_is_empty() {
        assert!(decode_names("{}").unwrap().is_empty());
        assert!(decode_names(r#"{"Names": null}"#).unwrap().is_empty());
    }

    #[test]
    fn decode_lowercase_field() {
        let names = decode_names(r#"{"names": ["Daisy"]}"#).unwrap();
        assert_eq!(names, vec!["Daisy".to_string()]);
    }

    #[test]
    fn decode_matches_field_case_insensitively() {
        let names = decode_names(r#"{"NAMES": ["Bessie"]}"#).unwrap();
        assert_eq!(names, vec!["Bessie".to_string()]);
        let names = decode_names(r#"{"nAmEs": ["Elsie"]}"#).unwrap();
        assert_eq!(names, vec!["Elsie".to_string()]);
    }

    #[test]
    fn decode_prefers_exact_field_name() {
        let names = decode_names(r#"{"names": ["lower"], "Names": ["exact"]}"#).unwrap();
        assert_eq!(names, vec!["exact".to_string()]);
    }

    #[test]
    fn decode_top_level_null_is_empty() {
        assert!(decode_names("null").unwrap().is_empty());
        assert!(decode_names(" null ").unwrap().is_empty());
    }

    #[test]
    fn decode_ignores_extra_fields() {
        let names = decode_names(r#"{"Names": ["Daisy"], "Count": 1}"#).unwrap();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn decode_rejects_malformed_payloads() {
        assert!(matches!(decode_names("not json"), Err(FetchError::Decode(_))));
        assert!(matches!(decode_names("[]"), Err(FetchError::Decode(_))));
        assert!(matches!(
            decode_names(r#"{"Names": [1, 2]}"#),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn closures_are_feeds() {
        let feed = || -> Result<Vec<String>, FetchError> { Ok(vec!["Bessie".to_string()]) };
        assert_eq!(feed.poll().unwrap(), vec!["Bessie".to_string()]);
    }

    #[test]
    fn error_messages_name_the_cause() {
        let err = FetchError::Transport {
            url: "http://localhost:1/drain".into(),
            source: "connection refused".into(),
        };
        assert_eq!(
            err.to_string(),
            "GET http://localhost:1/drain failed: connection refused"
        );
        assert!(err.source().is_some());
        assert_eq!(
            FetchError::Status(503).to_string(),
            "feed answered with HTTP status 503"
        );
    }

    #[test]
    fn http_feed_fetches_names() {
        let url = serve_once("HTTP/1.1 200 OK", r#"{"Names":["Bessie","Elsie"]}"#);
        let feed = HttpFeed::new(url, Duration::from_secs(5));
        let names = feed.poll().unwrap();
        assert_eq!(names, vec!["Bessie".to_string(), "Elsie".to_string()]);
    }

    #[test]
    fn http_feed_reports_status() {
        let url = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
        let feed = HttpFeed::new(url, Duration::from_secs(5));
        assert!(matches!(feed.poll(), Err(FetchError::Status(500))));
    }

    #[test]
    fn http_feed_reports_malformed_body() {
        let url = serve_once("HTTP/1.1 200 OK", "<html></html>");
        let feed = HttpFeed::new(url, Duration::from_secs(5));
        assert!(matches!(feed.poll(), Err(FetchError::Decode(_))));
    }

    #[test]
    fn http_feed_reports_transport_failure() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let feed = HttpFeed::new(
            format!("http://127.0.0.1:{port}/drain"),
            Duration::from_secs(2),
        );
        assert!(matches!(feed.poll(), Err(FetchError::Transport { .. })));
    }
}
