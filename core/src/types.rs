//! Request payloads and lookup selectors for the Omeda API.
//!
//! # Design
//! Responses stay as `serde_json::Value`; only the handful of payloads the
//! client itself composes get typed structs. Field names follow the upstream
//! PascalCase wire format.

use serde::{Deserialize, Serialize};

/// Which slice of a customer's behaviors to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorSelector {
    All,
    Behavior(u64),
    Product(u64),
}

impl BehaviorSelector {
    /// A behavior id takes precedence over a product id when both are given.
    pub fn from_ids(behavior_id: Option<u64>, product_id: Option<u64>) -> Self {
        match (behavior_id, product_id) {
            (Some(id), _) => Self::Behavior(id),
            (None, Some(id)) => Self::Product(id),
            (None, None) => Self::All,
        }
    }

    /// Path fragment below `/customer/{id}`.
    pub fn path(&self) -> String {
        match self {
            Self::All => "/behavior/*".to_string(),
            Self::Behavior(id) => format!("/behavior/{id}/*"),
            Self::Product(id) => format!("/behavior/product/{id}/*"),
        }
    }
}

/// Body for the run-processor service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunProcessor {
    pub process: Vec<ProcessTransaction>,
}

impl RunProcessor {
    pub fn new(transaction_ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            process: transaction_ids
                .into_iter()
                .map(|transaction_id| ProcessTransaction { transaction_id })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessTransaction {
    pub transaction_id: u64,
}

/// Criteria for the deployment search service. Omitted fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_type_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_results: Option<u32>,
}
