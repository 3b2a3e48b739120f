//! Option map consumed by `OmedaClient` at construction time.
//!
//! # Design
//! `Config` is a flat map of option name to string value. It can be built in
//! code, parsed from a JSON object, or read from the environment. The client
//! validates it once against its required option names and never mutates it
//! afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    options: BTreeMap<String, String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any previous value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Parse a flat JSON object of string values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Read each of `names` from `{PREFIX}_{NAME}` environment variables.
    ///
    /// A `.env` file in the working directory is honored. Variables that are
    /// not set are left out so that `validate` names them.
    pub fn from_env<'a>(prefix: &str, names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .filter_map(|name| {
                let var = format!("{}_{}", prefix, name).to_ascii_uppercase();
                dotenvy::var(&var).ok().map(|value| (name.to_string(), value))
            })
            .collect()
    }

    /// Fail with `MissingOption` for the first required name that is absent
    /// or empty.
    pub fn validate<'a>(
        &self,
        required: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ConfigError> {
        for name in required {
            match self.options.get(name) {
                Some(value) if !value.is_empty() => {}
                _ => return Err(ConfigError::MissingOption(name.to_string())),
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&str, ConfigError> {
        self.options
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownOption(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            options: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new()
            .with("host", "ows.omeda.com")
            .with("brand", "acme")
    }

    #[test]
    fn validate_accepts_present_options() {
        assert!(config().validate(["host", "brand"]).is_ok());
    }

    #[test]
    fn validate_reports_first_missing_option() {
        let err = config().validate(["host", "client", "appid"]).unwrap_err();
        assert_eq!(err, ConfigError::MissingOption("client".to_string()));
    }

    #[test]
    fn validate_treats_empty_value_as_missing() {
        let err = config().with("client", "").validate(["client"]).unwrap_err();
        assert_eq!(err, ConfigError::MissingOption("client".to_string()));
    }

    #[test]
    fn get_unknown_option_fails() {
        let err = config().get("inputid").unwrap_err();
        assert_eq!(err, ConfigError::UnknownOption("inputid".to_string()));
        assert_eq!(config().get("brand").unwrap(), "acme");
    }

    #[test]
    fn with_replaces_existing_value() {
        let cfg = config().with("brand", "other");
        assert_eq!(cfg.get("brand").unwrap(), "other");
        assert_eq!(cfg.len(), 2);
    }

    #[test]
    fn from_json_parses_flat_object() {
        let cfg = Config::from_json(r#"{"host":"ows.omeda.com","brand":"acme"}"#).unwrap();
        assert_eq!(cfg, config());
    }

    #[test]
    fn from_json_rejects_non_string_values() {
        let err = Config::from_json(r#"{"host":1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn from_env_reads_prefixed_variables() {
        // Tests run in parallel; no other test reads the OMEDACFGTEST_ prefix.
        std::env::set_var("OMEDACFGTEST_BRAND", "env-brand");
        let cfg = Config::from_env("omedacfgtest", ["brand", "host"]);
        assert_eq!(cfg.get("brand").unwrap(), "env-brand");
        assert!(matches!(cfg.get("host"), Err(ConfigError::UnknownOption(_))));
    }

    #[test]
    fn collects_from_pairs() {
        let cfg: Config = [("host", "ows.omeda.com"), ("brand", "acme")]
            .into_iter()
            .collect();
        assert_eq!(cfg, config());
    }
}
