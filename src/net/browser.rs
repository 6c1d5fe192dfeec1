//! Browser wiring for the gateway and session store.
//!
//! Client-side (hydrate): a real `gloo-net` transport, `window.location`
//! navigation, and one shared session/gateway pair per tab.
//! Server-side (SSR): stubs that skip storage entirely and only terminate
//! the session's loading phase, so hydration never observes browser state
//! the server invented.

#![allow(clippy::unused_async)]

use leptos::prelude::RwSignal;
#[cfg(feature = "hydrate")]
use leptos::prelude::Set;
#[cfg(not(feature = "hydrate"))]
use leptos::prelude::Update;

use crate::net::types::{Identity, LoginForm, RegisterForm};
use crate::state::session::SessionState;

#[cfg(feature = "hydrate")]
use crate::net::gateway::{
    Dispatch, GatewayError, HttpGateway, Method, Navigator, OutboundRequest, RawResponse,
    REQUEST_TIMEOUT_MS, default_base_url,
};
#[cfg(feature = "hydrate")]
use crate::state::session::SessionHandle;

/// Transport backed by the browser's fetch API, with the gateway timeout
/// applied around every call.
#[cfg(feature = "hydrate")]
#[derive(Clone)]
pub struct GlooDispatch;

#[cfg(feature = "hydrate")]
impl Dispatch for GlooDispatch {
    async fn send(&self, request: OutboundRequest) -> Result<RawResponse, GatewayError> {
        use futures::future::{Either, select};
        use futures::pin_mut;

        let method = match request.method {
            Method::Get => gloo_net::http::Method::GET,
            Method::Post => gloo_net::http::Method::POST,
            Method::Put => gloo_net::http::Method::PUT,
            Method::Patch => gloo_net::http::Method::PATCH,
            Method::Delete => gloo_net::http::Method::DELETE,
        };
        let mut builder = gloo_net::http::RequestBuilder::new(&request.url)
            .method(method)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(bearer) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {bearer}"));
        }
        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|err| GatewayError::Network(err.to_string()))?;

        let send = prepared.send();
        pin_mut!(send);
        let deadline =
            gloo_timers::future::sleep(std::time::Duration::from_millis(REQUEST_TIMEOUT_MS));
        pin_mut!(deadline);

        let response = match select(send, deadline).await {
            Either::Left((result, _)) => {
                result.map_err(|err| GatewayError::Network(err.to_string()))?
            }
            Either::Right(((), _)) => return Err(GatewayError::Timeout),
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(RawResponse { status, body })
    }
}

/// Navigation by mutating `window.location`. A full navigation on purpose:
/// the forced login redirect must tear down all in-flight UI state.
#[cfg(feature = "hydrate")]
#[derive(Clone)]
pub struct WindowNavigator;

#[cfg(feature = "hydrate")]
impl Navigator for WindowNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn replace(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().replace(path);
        }
    }
}

#[cfg(feature = "hydrate")]
thread_local! {
    static GATEWAY: HttpGateway<GlooDispatch, WindowNavigator> = HttpGateway::new(
        default_base_url(),
        GlooDispatch,
        WindowNavigator,
        SessionHandle::new(crate::util::storage::platform_storage()),
    );
}

/// The tab-wide shared gateway. Clones share the session store and the
/// 401 redirect guard.
#[cfg(feature = "hydrate")]
#[must_use]
pub fn gateway() -> HttpGateway<GlooDispatch, WindowNavigator> {
    GATEWAY.with(Clone::clone)
}

/// Bridge the session store into the reactive UI state and kick off the
/// one-time restore from storage.
pub fn wire_session(auth: RwSignal<SessionState>) {
    #[cfg(feature = "hydrate")]
    {
        let session = gateway().session().clone();
        session.subscribe(move |state| auth.set(state.clone()));
        session.restore();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        // No storage to restore from on the server.
        auth.update(|state| state.loading = false);
    }
}

/// Submit the login form and adopt the issued session.
///
/// # Errors
///
/// A user-presentable message on any failure.
pub async fn submit_login(form: &LoginForm) -> Result<Identity, String> {
    #[cfg(feature = "hydrate")]
    {
        crate::net::api::perform_login(&gateway(), form)
            .await
            .map_err(|err| err.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = form;
        Err("not available on server".to_owned())
    }
}

/// Submit the registration form and adopt the issued session.
///
/// # Errors
///
/// A user-presentable message on any failure.
pub async fn submit_register(form: &RegisterForm) -> Result<Identity, String> {
    #[cfg(feature = "hydrate")]
    {
        crate::net::api::perform_register(&gateway(), form)
            .await
            .map_err(|err| err.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = form;
        Err("not available on server".to_owned())
    }
}

/// Sign out: best-effort server revocation, then local purge. The UI
/// reacts to the session change through its subscription.
pub async fn sign_out() {
    #[cfg(feature = "hydrate")]
    {
        crate::net::api::perform_logout(&gateway()).await;
    }
}
