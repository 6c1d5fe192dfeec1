//! Typed endpoint services over the HTTP gateway.
//!
//! One function per REST endpoint, grouped by resource. Every function is
//! generic over the gateway's transport and navigation seams so the whole
//! surface runs against in-memory fakes in tests.
//!
//! The login/register orchestration lives here too: it is the one flow
//! that exercises the full contract between the gateway and the session
//! store (call, check the success flag, extract the credential pair,
//! adopt it, hand the identity back for navigation).

// Every endpoint returns the taxonomy documented on `GatewayError`.
#![allow(clippy::missing_errors_doc)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::net::gateway::{Dispatch, GatewayError, HttpGateway, Method, Navigator};
use crate::net::types::{
    ApiEnvelope, Identity, Item, ItemDraft, LoginForm, NewRental, NewUser, RegisterForm, Rental,
    RentalDraft, RentalStatusChange, UserDraft,
};
use crate::state::session::{SessionError, SessionHandle};

/// Untyped `data` payload for endpoints whose body we do not consume.
pub type Opaque = serde_json::Value;

// =============================================================================
// AUTH ORCHESTRATION
// =============================================================================

/// User-visible failures of the login/register flows.
#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    /// The server answered, but not with a success envelope.
    #[error("{0}")]
    Rejected(String),
    /// Success envelope without a usable `user`/`token` pair.
    #[error("response did not include an identity and credential")]
    MissingAuthPair,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Submit credentials, adopt the issued session, return the identity.
///
/// # Errors
///
/// Any [`AuthFlowError`]; the session is only mutated on full success.
pub async fn perform_login<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    form: &LoginForm,
) -> Result<Identity, AuthFlowError> {
    let envelope = gateway.post::<Opaque, _>("/login", form).await?;
    adopt_auth_envelope(gateway.session(), envelope)
}

/// Register an account and adopt the issued session.
///
/// # Errors
///
/// Any [`AuthFlowError`]; the session is only mutated on full success.
pub async fn perform_register<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    form: &RegisterForm,
) -> Result<Identity, AuthFlowError> {
    let envelope = gateway.post::<Opaque, _>("/register", form).await?;
    adopt_auth_envelope(gateway.session(), envelope)
}

/// Revoke the session server-side (best effort) and purge it locally.
pub async fn perform_logout<D: Dispatch, N: Navigator>(gateway: &HttpGateway<D, N>) {
    // The local purge happens regardless of what the server says; a 401
    // here already cleared the session through the gateway.
    let _: Result<ApiEnvelope<Opaque>, _> = gateway.request(Method::Post, "/logout", None).await;
    gateway.session().logout();
}

/// The credential pair is read from the top-level `token`/`user` fields
/// only; that is the canonical envelope shape for auth responses.
fn adopt_auth_envelope(
    session: &SessionHandle,
    envelope: ApiEnvelope<Opaque>,
) -> Result<Identity, AuthFlowError> {
    if !envelope.is_success() {
        return Err(AuthFlowError::Rejected(envelope.message_or("request rejected")));
    }
    let (Some(identity), Some(token)) = (envelope.user, envelope.token) else {
        return Err(AuthFlowError::MissingAuthPair);
    };
    session.login(identity.clone(), &token)?;
    Ok(identity)
}

/// Fetch the identity behind the current credential (`GET /user`).
///
/// # Errors
///
/// See [`GatewayError`].
pub async fn fetch_profile<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
) -> Result<ApiEnvelope<Identity>, GatewayError> {
    gateway.get("/user").await
}

// =============================================================================
// INVENTORY ITEMS
// =============================================================================

pub async fn list_items<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    filters: &[(&str, &str)],
) -> Result<ApiEnvelope<Vec<Item>>, GatewayError> {
    gateway.get(&with_query("/barangs", filters)).await
}

pub async fn list_available_items<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    filters: &[(&str, &str)],
) -> Result<ApiEnvelope<Vec<Item>>, GatewayError> {
    gateway.get(&with_query("/barangs/available/list", filters)).await
}

pub async fn list_item_categories<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
) -> Result<ApiEnvelope<Vec<String>>, GatewayError> {
    gateway.get("/barangs/categories/list").await
}

pub async fn fetch_item<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
) -> Result<ApiEnvelope<Item>, GatewayError> {
    gateway.get(&format!("/barangs/{id}")).await
}

pub async fn create_item<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    draft: &ItemDraft,
) -> Result<ApiEnvelope<Item>, GatewayError> {
    gateway.post("/barangs", draft).await
}

pub async fn update_item<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
    draft: &ItemDraft,
) -> Result<ApiEnvelope<Item>, GatewayError> {
    gateway.put(&format!("/barangs/{id}"), draft).await
}

pub async fn delete_item<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
) -> Result<ApiEnvelope<Opaque>, GatewayError> {
    gateway.delete(&format!("/barangs/{id}")).await
}

// =============================================================================
// RENTALS
// =============================================================================

pub async fn list_rentals<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    filters: &[(&str, &str)],
) -> Result<ApiEnvelope<Vec<Rental>>, GatewayError> {
    gateway.get(&with_query("/rentals", filters)).await
}

pub async fn list_my_rentals<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    filters: &[(&str, &str)],
) -> Result<ApiEnvelope<Vec<Rental>>, GatewayError> {
    gateway.get(&with_query("/rentals/user/mine", filters)).await
}

pub async fn list_pending_rentals<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
) -> Result<ApiEnvelope<Vec<Rental>>, GatewayError> {
    gateway.get("/rentals/pending/list").await
}

pub async fn list_ongoing_rentals<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
) -> Result<ApiEnvelope<Vec<Rental>>, GatewayError> {
    gateway.get("/rentals/ongoing/list").await
}

pub async fn list_completed_rentals<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
) -> Result<ApiEnvelope<Vec<Rental>>, GatewayError> {
    gateway.get("/rentals/completed/list").await
}

pub async fn fetch_rental<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
) -> Result<ApiEnvelope<Rental>, GatewayError> {
    gateway.get(&format!("/rentals/{id}")).await
}

pub async fn create_rental<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    rental: &NewRental,
) -> Result<ApiEnvelope<Rental>, GatewayError> {
    gateway.post("/rentals", rental).await
}

pub async fn update_rental<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
    draft: &RentalDraft,
) -> Result<ApiEnvelope<Rental>, GatewayError> {
    gateway.put(&format!("/rentals/{id}"), draft).await
}

pub async fn set_rental_status<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
    change: &RentalStatusChange,
) -> Result<ApiEnvelope<Rental>, GatewayError> {
    gateway.patch(&format!("/rentals/{id}/status"), change).await
}

// =============================================================================
// USER ADMINISTRATION
// =============================================================================

pub async fn list_users<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    filters: &[(&str, &str)],
) -> Result<ApiEnvelope<Vec<Identity>>, GatewayError> {
    gateway.get(&with_query("/users", filters)).await
}

pub async fn fetch_user<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
) -> Result<ApiEnvelope<Identity>, GatewayError> {
    gateway.get(&format!("/users/{id}")).await
}

pub async fn create_user<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    user: &NewUser,
) -> Result<ApiEnvelope<Identity>, GatewayError> {
    gateway.post("/users", user).await
}

pub async fn update_user<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
    draft: &UserDraft,
) -> Result<ApiEnvelope<Identity>, GatewayError> {
    gateway.put(&format!("/users/{id}"), draft).await
}

pub async fn delete_user<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
) -> Result<ApiEnvelope<Opaque>, GatewayError> {
    gateway.delete(&format!("/users/{id}")).await
}

pub async fn toggle_user_status<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
    id: i64,
) -> Result<ApiEnvelope<Identity>, GatewayError> {
    gateway.request(Method::Patch, &format!("/users/{id}/toggle-status"), None).await
}

// =============================================================================
// DASHBOARD / REPORTS
// =============================================================================

pub async fn fetch_dashboard_stats<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
) -> Result<ApiEnvelope<Opaque>, GatewayError> {
    gateway.get("/dashboard/stats").await
}

pub async fn fetch_reports_summary<D: Dispatch, N: Navigator>(
    gateway: &HttpGateway<D, N>,
) -> Result<ApiEnvelope<Opaque>, GatewayError> {
    gateway.get("/reports/summary").await
}

// =============================================================================
// QUERY ENCODING
// =============================================================================

fn with_query(path: &str, filters: &[(&str, &str)]) -> String {
    if filters.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?{}", encode_query(filters))
    }
}

/// Percent-encode filter pairs into a query string.
fn encode_query(filters: &[(&str, &str)]) -> String {
    filters
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
