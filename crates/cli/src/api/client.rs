// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Generic dispatcher for the operation tables in [`super::resource`].
//!
//! Every entity operation goes through [`ApiClient::invoke`]:
//! 1. Resolve parameters (entity-derived defaults, caller parameters, then
//!    session parameters)
//! 2. Expand the URL template and append leftover parameters as the query
//! 3. Perform the exchange
//! 4. Route failures through the interceptor, normalize successes

use std::sync::Arc;
use std::time::Duration;

use em_core::{AppInstanceId, Reply};
use serde_json::Value;
use url::Url;

use super::entities::{EntityClient, Events, Infos, Settings, Tickets, Users};
use super::interceptor::{ErrorInterceptor, FailureKind, RequestFailure};
use super::params::Params;
use super::resource::{Operation, ParamSource, ResourceSpec};
use super::template::UrlTemplate;
use super::transport::{HttpRequest, HttpTransport, ReqwestTransport, TransportError};

/// Error type for API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The exchange failed; the interceptor has already seen it.
    #[error("request failed: {0}")]
    Request(RequestFailure),

    #[error("unknown operation '{operation}' on {entity}")]
    UnknownOperation {
        entity: &'static str,
        operation: String,
    },

    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Session-scoped values read by the dispatcher at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    app_instance_id: AppInstanceId,
}

impl Session {
    /// Starts a session with a freshly generated app instance identifier.
    pub fn new() -> Self {
        Session {
            app_instance_id: AppInstanceId::generate(),
        }
    }

    /// Starts a session with a known identifier.
    pub fn with_instance_id(app_instance_id: AppInstanceId) -> Self {
        Session { app_instance_id }
    }

    pub fn app_instance_id(&self) -> AppInstanceId {
        self.app_instance_id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the backend's REST API.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    root: Url,
    session: Session,
    transport: Box<dyn HttpTransport>,
    interceptor: Arc<dyn ErrorInterceptor>,
}

impl ApiClient {
    /// Create a client backed by reqwest.
    pub fn new(
        root: &str,
        timeout: Option<Duration>,
        session: Session,
        interceptor: Arc<dyn ErrorInterceptor>,
    ) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(timeout)?;
        Self::with_transport(root, transport, session, interceptor)
    }

    /// Create a client with a custom transport (for testing).
    pub fn with_transport<T: HttpTransport + 'static>(
        root: &str,
        transport: T,
        session: Session,
        interceptor: Arc<dyn ErrorInterceptor>,
    ) -> ApiResult<Self> {
        Ok(ApiClient {
            inner: Arc::new(Inner {
                root: parse_root(root)?,
                session,
                transport: Box::new(transport),
                interceptor,
            }),
        })
    }

    /// The API root relative templates resolve under. Always ends in `/`.
    pub fn root(&self) -> &Url {
        &self.inner.root
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn events(&self) -> EntityClient<Events> {
        EntityClient::new(self.clone())
    }

    pub fn tickets(&self) -> EntityClient<Tickets> {
        EntityClient::new(self.clone())
    }

    pub fn settings(&self) -> EntityClient<Settings> {
        EntityClient::new(self.clone())
    }

    pub fn info(&self) -> EntityClient<Infos> {
        EntityClient::new(self.clone())
    }

    pub fn users(&self) -> EntityClient<Users> {
        EntityClient::new(self.clone())
    }

    /// Run a named operation of an entity.
    ///
    /// `body` is the entity being acted on. It fills `@field` parameters for
    /// every verb and is sent only for POST and PUT.
    ///
    /// An `{"error": ...}` body resolves as [`Reply::Failed`]. Transport
    /// failures are passed to the interceptor and then returned as
    /// [`ApiError::Request`].
    pub async fn invoke(
        &self,
        spec: &'static ResourceSpec,
        operation: &str,
        params: Params,
        body: Option<Value>,
    ) -> ApiResult<Reply> {
        let op = spec
            .operation(operation)
            .ok_or_else(|| ApiError::UnknownOperation {
                entity: spec.name,
                operation: operation.to_string(),
            })?;
        let request = self.build_request(spec, op, &params, body)?;

        tracing::debug!(
            entity = spec.name,
            operation = op.name,
            method = %request.method,
            url = %request.url,
            "dispatching request"
        );

        let response = match self.inner.transport.execute(&request).await {
            Ok(response) => response,
            Err(TransportError::Timeout) => {
                return Err(self.intercept(&request, FailureKind::Timeout, None));
            }
            Err(e) => {
                return Err(self.intercept(&request, FailureKind::Network(e.to_string()), None));
            }
        };

        if !response.is_success() {
            let kind = FailureKind::Status(response.status);
            return Err(self.intercept(&request, kind, Some(response.body)));
        }

        let payload = match decode_body(&response.body) {
            Ok(payload) => payload,
            Err(e) => {
                let kind = FailureKind::Decode(e.to_string());
                return Err(self.intercept(&request, kind, Some(response.body)));
            }
        };

        Ok(Reply::from_normalized(op.normalizer.apply(payload)))
    }

    /// Resolve parameters and the URL for an operation.
    pub fn build_request(
        &self,
        spec: &ResourceSpec,
        op: &Operation,
        params: &Params,
        body: Option<Value>,
    ) -> ApiResult<HttpRequest> {
        let resolved = self.resolve_params(spec, op, params, body.as_ref());
        let template = UrlTemplate::new(spec.url_for(op));
        if let Some(value) = template.dot_segment(&resolved) {
            return Err(ApiError::InvalidUrl {
                url: template.as_str().to_string(),
                reason: format!("'{}' is not a valid identifier", value),
            });
        }
        let expanded = template.expand(&resolved);

        let mut url = self
            .inner
            .root
            .join(&expanded.path)
            .map_err(|e| ApiError::InvalidUrl {
                url: expanded.path.clone(),
                reason: e.to_string(),
            })?;
        if !expanded.query.is_empty() {
            url.query_pairs_mut().extend_pairs(expanded.query);
        }

        Ok(HttpRequest {
            method: op.method,
            url,
            body: if op.method.has_body() { body } else { None },
        })
    }

    fn resolve_params(
        &self,
        spec: &ResourceSpec,
        op: &Operation,
        params: &Params,
        body: Option<&Value>,
    ) -> Params {
        let defaults = spec.defaults_for(op);
        let mut resolved = Params::new();

        for (key, source) in &defaults {
            if let ParamSource::Entity(field) = source {
                if let Some(value) = body.and_then(|b| b.get(field)).and_then(param_value) {
                    resolved.set(*key, value);
                }
            }
        }
        for (key, value) in params.iter() {
            resolved.set(key, value);
        }
        // Session parameters win over anything the caller passed.
        for (key, source) in &defaults {
            if let ParamSource::AppInstance = source {
                resolved.set(*key, self.inner.session.app_instance_id().to_string());
            }
        }

        resolved
    }

    fn intercept(
        &self,
        request: &HttpRequest,
        kind: FailureKind,
        body: Option<String>,
    ) -> ApiError {
        let failure = RequestFailure {
            method: request.method,
            url: request.url.to_string(),
            kind,
            body,
        };
        self.inner.interceptor.on_failure(&failure);
        ApiError::Request(failure)
    }
}

fn parse_root(root: &str) -> ApiResult<Url> {
    let invalid = |reason: String| ApiError::InvalidUrl {
        url: root.to_string(),
        reason,
    };

    let mut url = Url::parse(root).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an http or https url".to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Renders an entity field as a parameter value. `null` means unset.
fn param_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Empty bodies (e.g. DELETE responses) decode to `null`.
fn decode_body(body: &str) -> serde_json::Result<Value> {
    if body.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str(body)
    }
}
