//! Request composition and dispatch for the Omeda REST API.
//!
//! # Design
//! `OmedaClient` validates its configuration once, derives the base URL and
//! client-wide headers from it, and is read-only afterwards. Every call goes
//! through `send`, which is split into `build_request` (pure, produces an
//! `HttpRequest`) and `parse_response` (consumes an `HttpResponse`) with the
//! transport round-trip in between. Callers that want to perform I/O
//! themselves can use the two halves directly.

use serde_json::Value;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpRequest, HttpResponse, MethodPolicy};
use crate::resources::{
    BrandResource, CustomerResource, OmailResource, Resource, ResourceHost, ResourceKind,
};
use crate::transport::{Transport, TransportSettings, UreqTransport};

/// Options every `OmedaClient` configuration must carry.
pub const REQUIRED_OPTIONS: [&str; 5] = ["host", "client", "brand", "appid", "inputid"];

/// Sent on every request.
pub const APP_ID_HEADER: &str = "X-Omeda-Appid";

/// Sent on every modifying request.
pub const INPUT_ID_HEADER: &str = "X-Omeda-Inputid";

const REST_ROOT: &str = "/webservices/rest";

#[derive(Debug, Clone)]
struct Settings {
    host: String,
    client: String,
    brand: String,
    app_id: String,
    input_id: String,
}

impl Settings {
    fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate(REQUIRED_OPTIONS)?;
        Ok(Self {
            host: config.get("host")?.trim_matches('/').to_string(),
            client: config.get("client")?.to_string(),
            brand: config.get("brand")?.to_string(),
            app_id: config.get("appid")?.to_string(),
            input_id: config.get("inputid")?.to_string(),
        })
    }
}

/// Client for the Omeda customer, brand and Omail services.
#[derive(Debug)]
pub struct OmedaClient<T = UreqTransport> {
    config: Config,
    settings: Settings,
    methods: MethodPolicy,
    transport: T,
}

impl OmedaClient<UreqTransport> {
    /// Build a client over a blocking `ureq` transport with the default
    /// method policy.
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Self::with_transport(config, MethodPolicy::default(), UreqTransport::new)
    }
}

impl<T: Transport> OmedaClient<T> {
    /// Validate `config` and build the transport from the derived settings.
    ///
    /// Fails with `ApiError::Configuration` naming the first missing option.
    pub fn with_transport<F>(
        config: Config,
        methods: MethodPolicy,
        connect: F,
    ) -> Result<Self, ApiError>
    where
        F: FnOnce(TransportSettings) -> T,
    {
        let settings = Settings::from_config(&config)?;
        let transport = connect(TransportSettings {
            base_url: format!("https://{}", settings.host),
            default_headers: vec![(APP_ID_HEADER.to_string(), settings.app_id.clone())],
        });
        Ok(Self {
            config,
            settings,
            methods,
            transport,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn methods(&self) -> &MethodPolicy {
        &self.methods
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn host(&self) -> &str {
        &self.settings.host
    }

    pub fn client_id(&self) -> &str {
        &self.settings.client
    }

    pub fn brand_id(&self) -> &str {
        &self.settings.brand
    }

    pub fn app_id(&self) -> &str {
        &self.settings.app_id
    }

    pub fn input_id(&self) -> &str {
        &self.settings.input_id
    }

    pub fn base_url(&self) -> String {
        format!("https://{}", self.settings.host)
    }

    /// Compose the request path for `path`, rooted under the client
    /// namespace when `scoped_to_client` is set and the brand otherwise.
    pub fn endpoint(&self, path: Option<&str>, scoped_to_client: bool) -> String {
        let mut formatted = if scoped_to_client {
            format!("{REST_ROOT}/client/{}", self.settings.client)
        } else {
            format!("{REST_ROOT}/brand/{}", self.settings.brand)
        };
        if let Some(path) = path {
            formatted.push_str(path.trim_end_matches('/'));
        }
        formatted
    }

    pub fn build_request(
        &self,
        path: &str,
        body: Option<&Value>,
        method: &str,
        scoped_to_client: bool,
    ) -> Result<HttpRequest, ApiError> {
        let method = self.methods.resolve(method)?;

        let (headers, body) = if self.methods.is_modifying(method) {
            let headers = vec![
                (INPUT_ID_HEADER.to_string(), self.settings.input_id.clone()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ];
            (headers, encode_body(body)?)
        } else {
            (Vec::new(), None)
        };

        let request = HttpRequest {
            method,
            path: self.endpoint(Some(path), scoped_to_client),
            headers,
            body,
        };
        trace!(
            method = %request.method,
            path = %request.path,
            has_body = request.body.is_some(),
            "built request"
        );
        Ok(request)
    }

    /// Check the status and decode the body as JSON.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn send(
        &self,
        path: &str,
        body: Option<&Value>,
        method: &str,
        scoped_to_client: bool,
    ) -> Result<Value, ApiError> {
        let request = self.build_request(path, body, method, scoped_to_client)?;
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(&request)?;
        self.parse_response(response)
    }

    pub fn customer(&self) -> CustomerResource<'_, Self> {
        CustomerResource::new(self)
    }

    pub fn brand(&self) -> BrandResource<'_, Self> {
        BrandResource::new(self)
    }

    pub fn omail(&self) -> OmailResource<'_, Self> {
        OmailResource::new(self)
    }

    /// Look up a resource by its string key.
    pub fn resource(&self, key: &str) -> Result<Resource<'_, Self>, ApiError> {
        Ok(key.parse::<ResourceKind>()?.bind(self))
    }
}

impl<T: Transport> ResourceHost for OmedaClient<T> {
    fn send(
        &self,
        path: &str,
        body: Option<&Value>,
        method: &str,
        scoped_to_client: bool,
    ) -> Result<Value, ApiError> {
        OmedaClient::send(self, path, body, method, scoped_to_client)
    }
}

/// Scalars are sent as their text, structured values as JSON, null as
/// nothing at all.
fn encode_body(body: Option<&Value>) -> Result<Option<String>, ApiError> {
    match body {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(scalar @ (Value::Bool(_) | Value::Number(_))) => Ok(Some(scalar.to_string())),
        Some(structured) => serde_json::to_string(structured)
            .map(Some)
            .map_err(|e| ApiError::SerializationError(e.to_string())),
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200..=299 => Ok(()),
        404 => Err(ApiError::NotFound(response.body.clone())),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
