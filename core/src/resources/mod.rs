//! API areas exposed by `OmedaClient`.
//!
//! # Design
//! Each resource borrows a `ResourceHost` and does nothing but format a path
//! and delegate to `ResourceHost::send`. The set of resources is fixed;
//! `ResourceKind` covers the string-keyed lookup.

mod brand;
mod customer;
mod omail;

use std::str::FromStr;

use serde_json::Value;

use crate::error::ApiError;

pub use brand::BrandResource;
pub use customer::CustomerResource;
pub use omail::OmailResource;

/// The single chokepoint resources send requests through.
pub trait ResourceHost {
    fn send(
        &self,
        path: &str,
        body: Option<&Value>,
        method: &str,
        scoped_to_client: bool,
    ) -> Result<Value, ApiError>;
}

impl<H: ResourceHost + ?Sized> ResourceHost for &H {
    fn send(
        &self,
        path: &str,
        body: Option<&Value>,
        method: &str,
        scoped_to_client: bool,
    ) -> Result<Value, ApiError> {
        (**self).send(path, body, method, scoped_to_client)
    }
}

/// Serialize a typed payload into a request body.
pub(crate) fn to_body<P: serde::Serialize + ?Sized>(payload: &P) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::SerializationError(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Customer,
    Brand,
    Omail,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Customer, Self::Brand, Self::Omail];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Brand => "brand",
            Self::Omail => "omail",
        }
    }

    pub fn bind<H: ResourceHost + ?Sized>(self, host: &H) -> Resource<'_, H> {
        match self {
            Self::Customer => Resource::Customer(CustomerResource::new(host)),
            Self::Brand => Resource::Brand(BrandResource::new(host)),
            Self::Omail => Resource::Omail(OmailResource::new(host)),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = ApiError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| ApiError::UnknownResource(key.to_string()))
    }
}

/// A resource bound to its host.
#[derive(Debug)]
pub enum Resource<'a, H: ?Sized> {
    Customer(CustomerResource<'a, H>),
    Brand(BrandResource<'a, H>),
    Omail(OmailResource<'a, H>),
}

impl<H: ?Sized> Resource<'_, H> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Customer(_) => ResourceKind::Customer,
            Self::Brand(_) => ResourceKind::Brand,
            Self::Omail(_) => ResourceKind::Omail,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// A `(path, body, method, scoped_to_client)` tuple as seen by the host.
    pub type Call = (String, Option<Value>, String, bool);

    /// Records every call and answers with `{"path": ...}`.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub calls: RefCell<Vec<Call>>,
    }

    impl RecordingHost {
        pub fn last(&self) -> Call {
            self.calls.borrow().last().cloned().expect("no calls recorded")
        }
    }

    impl ResourceHost for RecordingHost {
        fn send(
            &self,
            path: &str,
            body: Option<&Value>,
            method: &str,
            scoped_to_client: bool,
        ) -> Result<Value, ApiError> {
            self.calls.borrow_mut().push((
                path.to_string(),
                body.cloned(),
                method.to_string(),
                scoped_to_client,
            ));
            Ok(serde_json::json!({ "path": path }))
        }
    }
}
