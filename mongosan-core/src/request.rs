// mongosan-core/src/request.rs
//! Request adapter: applies the engine to the user-controlled parts of an
//! inbound request.
//!
//! The adapter never overwrites the original input. Each sanitized field is
//! stored in a separate slot, and every slot is initialized to an empty object
//! first so downstream code can always read it.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::SanitizeOptions;
use crate::engine::{SanitizationEngine, SanitizationResult};
use crate::engines::operator_engine::OperatorEngine;
use crate::errors::MongosanError;
use crate::validators::ensure_max_depth;

/// The request fields that may carry untrusted data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestField {
    Body,
    Query,
    Params,
    Headers,
}

impl RequestField {
    pub const ALL: [RequestField; 4] = [
        RequestField::Body,
        RequestField::Query,
        RequestField::Params,
        RequestField::Headers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestField::Body => "body",
            RequestField::Query => "query",
            RequestField::Params => "params",
            RequestField::Headers => "headers",
        }
    }
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything the adapter can read fields from and write sanitized copies into.
pub trait RequestLike {
    /// The original value of `field`, if present.
    fn field(&self, field: RequestField) -> Option<&Value>;

    /// Stores the sanitized copy of `field` in its own slot.
    fn set_sanitized(&mut self, field: RequestField, value: Value);
}

/// A request envelope with the four fields as JSON, plus their sanitized slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,
    pub sanitized_body: Value,
    pub sanitized_query: Value,
    pub sanitized_params: Value,
    pub sanitized_headers: Value,
}

impl RequestLike for JsonRequest {
    fn field(&self, field: RequestField) -> Option<&Value> {
        match field {
            RequestField::Body => self.body.as_ref(),
            RequestField::Query => self.query.as_ref(),
            RequestField::Params => self.params.as_ref(),
            RequestField::Headers => self.headers.as_ref(),
        }
    }

    fn set_sanitized(&mut self, field: RequestField, value: Value) {
        let slot = match field {
            RequestField::Body => &mut self.sanitized_body,
            RequestField::Query => &mut self.sanitized_query,
            RequestField::Params => &mut self.sanitized_params,
            RequestField::Headers => &mut self.sanitized_headers,
        };
        *slot = value;
    }
}

/// Callback raised once per field the engine reported as modified.
pub type SanitizeCallback = Box<dyn Fn(RequestField) + Send + Sync>;

/// Runs the engine over the selected fields of a request.
pub struct RequestSanitizer {
    engine: Box<dyn SanitizationEngine>,
    fields: Vec<RequestField>,
    max_depth: Option<usize>,
    on_sanitize: Option<SanitizeCallback>,
}

impl fmt::Debug for RequestSanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSanitizer")
            .field("policy", self.engine.policy())
            .field("fields", &self.fields)
            .field("max_depth", &self.max_depth)
            .field("on_sanitize", &self.on_sanitize.is_some())
            .finish()
    }
}

impl RequestSanitizer {
    pub fn new(options: &SanitizeOptions) -> Self {
        Self::with_engine(Box::new(OperatorEngine::new(options.to_policy())), options)
    }

    /// Uses a custom engine; only `fields` and `max_depth` are read from `options`.
    pub fn with_engine(engine: Box<dyn SanitizationEngine>, options: &SanitizeOptions) -> Self {
        let mut fields: Vec<RequestField> = Vec::with_capacity(options.fields.len());
        for field in &options.fields {
            if !fields.contains(field) {
                fields.push(*field);
            }
        }
        Self {
            engine,
            fields,
            max_depth: options.max_depth,
            on_sanitize: None,
        }
    }

    #[must_use]
    pub fn on_sanitize<F>(mut self, callback: F) -> Self
    where
        F: Fn(RequestField) + Send + Sync + 'static,
    {
        self.on_sanitize = Some(Box::new(callback));
        self
    }

    pub fn fields(&self) -> &[RequestField] {
        &self.fields
    }

    /// Sanitizes the selected fields of `request` and returns the ones that
    /// needed rewriting, in processing order.
    ///
    /// All four sanitized slots are reset to `{}` before any field is
    /// processed. Fields that are absent, scalar or empty containers keep the
    /// empty slot. With `max_depth` set, a field nested too deeply aborts the
    /// call with [`MongosanError::DepthLimitExceeded`]; slots of fields
    /// processed before it keep their sanitized values.
    pub fn sanitize_request<R>(&self, request: &mut R) -> Result<Vec<RequestField>, MongosanError>
    where
        R: RequestLike + ?Sized,
    {
        for field in RequestField::ALL {
            request.set_sanitized(field, Value::Object(Map::new()));
        }

        let mut modified_fields = Vec::new();
        for &field in &self.fields {
            let result = match request.field(field) {
                Some(value) if is_non_empty_container(value) => {
                    if let Some(limit) = self.max_depth {
                        ensure_max_depth(value, limit)?;
                    }
                    self.engine.sanitize_value(value)
                }
                _ => {
                    debug!("Skipping request field '{}': nothing to sanitize.", field);
                    continue;
                }
            };

            debug!("Sanitized request field '{}' (modified: {}).", field, result.modified);
            request.set_sanitized(field, result.value);
            if result.modified {
                if let Some(callback) = &self.on_sanitize {
                    callback(field);
                }
                modified_fields.push(field);
            }
        }
        Ok(modified_fields)
    }

    /// Sanitizes a single route-parameter value, passed to the engine as a bare string.
    pub fn sanitize_param(&self, value: &str) -> SanitizationResult {
        self.engine.sanitize_value(&Value::String(value.to_string()))
    }
}

fn is_non_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => false,
    }
}
