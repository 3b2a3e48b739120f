//! Customer lookup and write services.

use serde::Serialize;
use serde_json::Value;

use super::{to_body, ResourceHost};
use crate::error::ApiError;
use crate::types::{BehaviorSelector, RunProcessor};

#[derive(Debug)]
pub struct CustomerResource<'a, H: ?Sized> {
    host: &'a H,
}

impl<'a, H: ResourceHost + ?Sized> CustomerResource<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self { host }
    }

    pub fn lookup_by_id(&self, customer_id: u64) -> Result<Value, ApiError> {
        self.get(&format!("/customer/{customer_id}/*"))
    }

    /// Customers matching `email`, optionally narrowed to those holding
    /// `product_id`. The address is percent-encoded as one path segment.
    pub fn lookup_by_email(
        &self,
        email: &str,
        product_id: Option<u64>,
    ) -> Result<Value, ApiError> {
        let email = urlencoding::encode(email);
        let path = match product_id {
            Some(pid) => format!("/customer/email/{email}/productid/{pid}/*"),
            None => format!("/customer/email/{email}/*"),
        };
        self.get(&path)
    }

    pub fn lookup_by_external_id(
        &self,
        namespace: &str,
        external_id: &str,
    ) -> Result<Value, ApiError> {
        let external_id = urlencoding::encode(external_id);
        let namespace = urlencoding::encode(namespace);
        self.get(&format!("/customer/{external_id}/externalid/{namespace}/*"))
    }

    /// Behaviors recorded for a customer.
    ///
    /// With neither id every behavior is returned. A behavior id takes
    /// precedence over a product id; this ordering has not been confirmed
    /// against the upstream service documentation.
    pub fn lookup_behavior(
        &self,
        customer_id: u64,
        behavior_id: Option<u64>,
        product_id: Option<u64>,
    ) -> Result<Value, ApiError> {
        let selector = BehaviorSelector::from_ids(behavior_id, product_id);
        self.get(&format!("/customer/{customer_id}{}", selector.path()))
    }

    pub fn lookup_subscriptions(
        &self,
        customer_id: u64,
        product_id: Option<u64>,
    ) -> Result<Value, ApiError> {
        let path = match product_id {
            Some(pid) => format!("/customer/{customer_id}/subscription/product/{pid}/*"),
            None => format!("/customer/{customer_id}/subscription/*"),
        };
        self.get(&path)
    }

    pub fn lookup_demographics(&self, customer_id: u64) -> Result<Value, ApiError> {
        self.get(&format!("/customer/{customer_id}/demographic/*"))
    }

    pub fn lookup_addresses(&self, customer_id: u64) -> Result<Value, ApiError> {
        self.get(&format!("/customer/{customer_id}/address/*"))
    }

    pub fn lookup_emails(&self, customer_id: u64) -> Result<Value, ApiError> {
        self.get(&format!("/customer/{customer_id}/email/*"))
    }

    pub fn lookup_phones(&self, customer_id: u64) -> Result<Value, ApiError> {
        self.get(&format!("/customer/{customer_id}/phone/*"))
    }

    /// Queue a customer (and optionally an order) for storage. The response
    /// carries transaction ids to hand to `run_processor`.
    pub fn store_customer_and_order<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<Value, ApiError> {
        let body = to_body(payload)?;
        self.host.send("/storecustomerandorder/*", Some(&body), "POST", false)
    }

    pub fn run_processor(&self, request: &RunProcessor) -> Result<Value, ApiError> {
        let body = to_body(request)?;
        self.host.send("/runprocessor/*", Some(&body), "POST", false)
    }

    fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.host.send(path, None, "GET", false)
    }
}
