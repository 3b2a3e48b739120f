//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! client builds `HttpRequest` values and parses `HttpResponse` values; a
//! [`Transport`](crate::Transport) performs the actual I/O. Request paths are
//! relative to the transport's base URL.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Case-insensitive lookup by method name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which methods a client accepts, and which of those are writes.
///
/// Writes carry a JSON body plus the input-id header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodPolicy {
    allowed: BTreeSet<HttpMethod>,
    modifying: BTreeSet<HttpMethod>,
}

impl MethodPolicy {
    pub fn new(
        allowed: impl IntoIterator<Item = HttpMethod>,
        modifying: impl IntoIterator<Item = HttpMethod>,
    ) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
            modifying: modifying.into_iter().collect(),
        }
    }

    /// Normalize `method` and check it against the allowed set.
    pub fn resolve(&self, method: &str) -> Result<HttpMethod, ApiError> {
        HttpMethod::from_name(method)
            .filter(|m| self.allowed.contains(m))
            .ok_or_else(|| ApiError::UnsupportedMethod {
                method: method.to_ascii_uppercase(),
                allowed: self.allowed.iter().map(|m| m.as_str().to_string()).collect(),
            })
    }

    pub fn is_modifying(&self, method: HttpMethod) -> bool {
        self.modifying.contains(&method)
    }

    pub fn allowed(&self) -> impl Iterator<Item = HttpMethod> + '_ {
        self.allowed.iter().copied()
    }
}

impl Default for MethodPolicy {
    fn default() -> Self {
        Self::new(
            [HttpMethod::Get, HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete],
            [HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete],
        )
    }
}

/// An HTTP request described as plain data.
///
/// Built by `OmedaClient::build_request`. `headers` holds only the
/// per-request headers; client-wide headers live on the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names_are_case_insensitive() {
        assert_eq!(HttpMethod::from_name("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::from_name("Delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_name("PATCH"), None);
    }

    #[test]
    fn default_policy_allows_crud_methods() {
        let policy = MethodPolicy::default();
        for name in ["get", "POST", "Put", "delete"] {
            assert!(policy.resolve(name).is_ok(), "{name}");
        }
        assert!(!policy.is_modifying(HttpMethod::Get));
        assert!(policy.is_modifying(HttpMethod::Delete));
        assert_eq!(
            policy.allowed().collect::<Vec<_>>(),
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete]
        );
    }

    #[test]
    fn resolve_rejects_methods_outside_allowed_set() {
        let policy = MethodPolicy::new([HttpMethod::Get], []);
        for name in ["post", "PATCH", "head", ""] {
            let err = policy.resolve(name).unwrap_err();
            match err {
                ApiError::UnsupportedMethod { method, allowed } => {
                    assert_eq!(method, name.to_ascii_uppercase());
                    assert_eq!(allowed, vec!["GET".to_string()]);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Post,
            path: "/x".to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
        };
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("x-omeda-inputid"), None);
    }
}
