//! Email deployment and opt-in/opt-out services.
//!
//! Deployment calls live under the brand; the email filter calls apply to
//! the whole client account.

use serde::Serialize;
use serde_json::Value;

use super::{to_body, ResourceHost};
use crate::error::ApiError;
use crate::types::DeploymentSearch;

#[derive(Debug)]
pub struct OmailResource<'a, H: ?Sized> {
    host: &'a H,
}

impl<'a, H: ResourceHost + ?Sized> OmailResource<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self { host }
    }

    pub fn lookup_deployment(&self, track_id: &str) -> Result<Value, ApiError> {
        let track_id = urlencoding::encode(track_id);
        self.host.send(
            &format!("/omail/deployment/lookup/{track_id}/*"),
            None,
            "GET",
            false,
        )
    }

    pub fn search_deployments(&self, criteria: &DeploymentSearch) -> Result<Value, ApiError> {
        let body = to_body(criteria)?;
        self.host
            .send("/omail/deployment/search/*", Some(&body), "POST", false)
    }

    /// Opt-in/opt-out state for `email`, percent-encoded as one path segment.
    pub fn lookup_email_filter(&self, email: &str) -> Result<Value, ApiError> {
        let email = urlencoding::encode(email);
        self.host
            .send(&format!("/filter/email/{email}/*"), None, "GET", true)
    }

    pub fn queue_opt_in<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        let body = to_body(payload)?;
        self.host.send("/optinfilterqueue/*", Some(&body), "POST", true)
    }

    pub fn queue_opt_out<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        let body = to_body(payload)?;
        self.host.send("/optoutfilterqueue/*", Some(&body), "POST", true)
    }
}
