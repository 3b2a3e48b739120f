//! The I/O seam between the client core and the network.
//!
//! # Design
//! `OmedaClient` never touches a socket itself. It derives a
//! `TransportSettings` from configuration and hands it to a caller-supplied
//! constructor, then pushes every `HttpRequest` through the resulting
//! `Transport`. `UreqTransport` is the blocking default; tests substitute
//! their own implementations.

use std::fmt;

use tracing::trace;
use ureq::{Agent, RequestBuilder};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Base URL and client-wide headers derived from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub base_url: String,
    pub default_headers: Vec<(String, String)>,
}

/// Executes one request and returns the raw response.
///
/// Non-2xx statuses are returned as data; only failures that produce no
/// response at all are errors. Implementations must be safe to share if the
/// client is shared across threads.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    base_url: String,
    default_headers: Vec<(String, String)>,
}

impl UreqTransport {
    pub fn new(settings: TransportSettings) -> Self {
        // Status interpretation belongs to the client, not the agent.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            default_headers: settings.default_headers,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_headers<B>(
        &self,
        mut builder: RequestBuilder<B>,
        request: &HttpRequest,
    ) -> RequestBuilder<B> {
        for (name, value) in self.default_headers.iter().chain(request.headers.iter()) {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        trace!(method = %request.method, url = %url, "executing request");

        let body = request.body.as_deref().map(str::as_bytes);
        let result = match request.method {
            HttpMethod::Get => self.with_headers(self.agent.get(&url), request).call(),
            HttpMethod::Delete => {
                let builder = self.with_headers(self.agent.delete(&url), request);
                match body {
                    Some(bytes) => builder.force_send_body().send(bytes),
                    None => builder.call(),
                }
            }
            HttpMethod::Post => {
                let builder = self.with_headers(self.agent.post(&url), request);
                match body {
                    Some(bytes) => builder.send(bytes),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = self.with_headers(self.agent.put(&url), request);
                match body {
                    Some(bytes) => builder.send(bytes),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| ApiError::TransportError(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::TransportError(e.to_string()))?;
        let body = match String::from_utf8(bytes) {
            Ok(text) => text,
            // A successful reply that is not text can never decode as JSON.
            Err(e) if (200..300).contains(&status) => {
                return Err(ApiError::DeserializationError(e.to_string()))
            }
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let transport = UreqTransport::new(TransportSettings {
            base_url: "https://ows.omeda.com/".to_string(),
            default_headers: Vec::new(),
        });
        assert_eq!(transport.base_url(), "https://ows.omeda.com");
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let transport = UreqTransport::new(TransportSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            default_headers: Vec::new(),
        });
        let request = HttpRequest {
            method: HttpMethod::Get,
            path: "/webservices/rest/brand/acme/comp/*".to_string(),
            headers: Vec::new(),
            body: None,
        };
        let err = transport.execute(&request).unwrap_err();
        assert!(matches!(err, ApiError::TransportError(_)));
    }
}
