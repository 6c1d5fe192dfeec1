//! Uniform outbound request pipeline to the remote API.
//!
//! DESIGN
//! ======
//! `HttpGateway` wraps every API call: it snapshots the bearer credential
//! from the session store at dispatch time, hands the request to an
//! injected `Dispatch` transport, and classifies the response. A 401
//! anywhere clears the session and forces a single navigation to the
//! login route; every other failure passes through untouched for the
//! caller to surface. The gateway never retries.
//!
//! Both seams (`Dispatch`, `Navigator`) are traits so the whole pipeline
//! runs under native tests with in-memory fakes; the browser
//! implementations live in `net::browser`.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::types::ApiEnvelope;
use crate::state::session::SessionHandle;

/// Route the gateway forces on credential invalidation.
pub const LOGIN_PATH: &str = "/login";

/// Bound on how long a single request may stay in flight.
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// API base URL, overridable at build time.
#[must_use]
pub fn default_base_url() -> &'static str {
    option_env!("RENTALHUB_API_URL").unwrap_or("http://127.0.0.1:8000/api")
}

/// Errors surfaced by the request pipeline.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The server rejected the credential; the session has been cleared.
    #[error("session expired, please sign in again")]
    Unauthorized,
    /// Any non-2xx, non-401 response.
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    /// Transport-level failure before a response arrived.
    #[error("network failure: {0}")]
    Network(String),
    /// The request exceeded the gateway timeout.
    #[error("request timed out")]
    Timeout,
    /// A 2xx response whose body did not decode as the expected envelope.
    #[error("unexpected response payload: {0}")]
    UnexpectedPayload(String),
}

/// HTTP method for an outbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A fully prepared request handed to the transport.
#[derive(Clone, Debug)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    /// Credential snapshot taken when the request was dispatched.
    pub bearer: Option<String>,
    /// JSON body, already serialized.
    pub body: Option<String>,
}

/// Raw response as the transport saw it.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Transport seam. The browser implementation uses `gloo-net`; tests
/// script responses in memory.
#[allow(async_fn_in_trait)] // single-threaded client, no Send bound wanted
pub trait Dispatch {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, GatewayError>;
}

/// Navigation seam for the forced redirect on credential invalidation.
pub trait Navigator {
    fn current_path(&self) -> String;
    fn replace(&self, path: &str);
}

/// Configured HTTP client wrapping every outbound API call.
///
/// Clones share the redirect guard, so a tab-wide shared gateway fires
/// the 401 navigation at most once no matter how many calls are in flight.
#[derive(Clone)]
pub struct HttpGateway<D, N> {
    base_url: String,
    dispatch: D,
    navigator: N,
    session: SessionHandle,
    redirected: Rc<Cell<bool>>,
}

impl<D: Dispatch, N: Navigator> HttpGateway<D, N> {
    pub fn new(
        base_url: impl Into<String>,
        dispatch: D,
        navigator: N,
        session: SessionHandle,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            dispatch,
            navigator,
            session,
            redirected: Rc::new(Cell::new(false)),
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// # Errors
    ///
    /// See [`GatewayError`] for the classification of failures.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>, GatewayError> {
        self.request(Method::Get, path, None).await
    }

    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, GatewayError> {
        self.request(Method::Post, path, Some(encode_body(body)?)).await
    }

    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, GatewayError> {
        self.request(Method::Put, path, Some(encode_body(body)?)).await
    }

    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, GatewayError> {
        self.request(Method::Patch, path, Some(encode_body(body)?)).await
    }

    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>, GatewayError> {
        self.request(Method::Delete, path, None).await
    }

    /// Dispatch one request through the full pipeline.
    ///
    /// # Errors
    ///
    /// See [`GatewayError`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<ApiEnvelope<T>, GatewayError> {
        let request = OutboundRequest {
            method,
            url: format!("{}{path}", self.base_url),
            // Re-read per request: the credential changes over the
            // process lifetime.
            bearer: self.session.token(),
            body,
        };
        log::debug!("{} {}", method.as_str(), request.url);
        let response = self.dispatch.send(request).await?;
        self.classify(response)
    }

    fn classify<T: DeserializeOwned>(
        &self,
        response: RawResponse,
    ) -> Result<ApiEnvelope<T>, GatewayError> {
        match response.status {
            200..=299 => serde_json::from_str::<ApiEnvelope<T>>(&response.body)
                .map_err(|err| GatewayError::UnexpectedPayload(err.to_string())),
            401 => {
                self.invalidate_session();
                Err(GatewayError::Unauthorized)
            }
            status => Err(GatewayError::Http {
                status,
                message: error_message(&response.body, status),
            }),
        }
    }

    /// Credential invalidation: clear the session, then redirect to the
    /// login route at most once, and never when the failing request was
    /// issued from the login page itself.
    fn invalidate_session(&self) {
        log::warn!("credential rejected by server, clearing session");
        self.session.logout();
        if self.redirected.get() || self.navigator.current_path() == LOGIN_PATH {
            return;
        }
        self.redirected.set(true);
        self.navigator.replace(LOGIN_PATH);
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<String, GatewayError> {
    serde_json::to_string(body)
        .map_err(|err| GatewayError::Network(format!("failed to encode request body: {err}")))
}

/// Pull the server's error message out of a failure body when it parses
/// as the standard envelope; otherwise fall back to the status code.
fn error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| format!("HTTP {status}"))
}
