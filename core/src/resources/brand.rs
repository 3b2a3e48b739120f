//! Brand-wide reference data.

use serde_json::Value;

use super::ResourceHost;
use crate::error::ApiError;

#[derive(Debug)]
pub struct BrandResource<'a, H: ?Sized> {
    host: &'a H,
}

impl<'a, H: ResourceHost + ?Sized> BrandResource<'a, H> {
    pub fn new(host: &'a H) -> Self {
        Self { host }
    }

    /// Products, demographics, deployment types and other cross-reference
    /// data for the configured brand.
    pub fn comprehensive_lookup(&self) -> Result<Value, ApiError> {
        self.host.send("/comp/*", None, "GET", false)
    }

    pub fn behaviors(&self) -> Result<Value, ApiError> {
        self.host.send("/behavior/*", None, "GET", false)
    }

    pub fn behavior(&self, behavior_id: u64) -> Result<Value, ApiError> {
        self.host.send(&format!("/behavior/{behavior_id}/*"), None, "GET", false)
    }

    pub fn deployment_types(&self) -> Result<Value, ApiError> {
        self.host.send("/deploymenttypes/*", None, "GET", false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::RecordingHost;

    #[test]
    fn brand_lookups_are_brand_scoped_gets() {
        let host = RecordingHost::default();
        let brand = BrandResource::new(&host);
        brand.comprehensive_lookup().unwrap();
        brand.behaviors().unwrap();
        brand.behavior(12).unwrap();
        brand.deployment_types().unwrap();

        let calls = host.calls.borrow();
        let paths: Vec<&str> = calls.iter().map(|(p, ..)| p.as_str()).collect();
        assert_eq!(
            paths,
            ["/comp/*", "/behavior/*", "/behavior/12/*", "/deploymenttypes/*"]
        );
        assert!(calls.iter().all(|(_, body, method, scoped)| {
            body.is_none() && method == "GET" && !scoped
        }));
    }
}
