use futures::executor::block_on;

use super::*;
use crate::net::gateway::{GatewayError, HttpGateway, LOGIN_PATH};
use crate::net::testing::{MockDispatch, RecordingNavigator};
use crate::state::session::TOKEN_KEY;
use crate::util::storage::{MemoryStorage, StorageAccess};

struct Fixture {
    gateway: HttpGateway<MockDispatch, RecordingNavigator>,
    dispatch: MockDispatch,
    navigator: RecordingNavigator,
    storage: MemoryStorage,
}

fn fixture() -> Fixture {
    let storage = MemoryStorage::new();
    let session = SessionHandle::new(Box::new(storage.clone()));
    session.restore();
    let dispatch = MockDispatch::new();
    let navigator = RecordingNavigator::at("/");
    let gateway =
        HttpGateway::new("http://api.test/api", dispatch.clone(), navigator.clone(), session);
    Fixture { gateway, dispatch, navigator, storage }
}

fn login_form() -> LoginForm {
    LoginForm { email: "a@b.com".to_owned(), password: "x".to_owned() }
}

const LOGIN_OK: &str = r#"{
    "status": "success",
    "message": "Login berhasil",
    "token": "T1",
    "user": {"id":1,"name":"A","email":"a@b.com","role":"member","is_active":true}
}"#;

// =============================================================
// Login orchestration
// =============================================================

#[test]
fn successful_login_adopts_session() {
    let f = fixture();
    f.dispatch.reply(200, LOGIN_OK);

    let identity = block_on(perform_login(&f.gateway, &login_form())).expect("login");

    assert_eq!(identity.name, "A");
    assert!(f.gateway.session().is_authenticated());
    assert_eq!(f.gateway.session().identity().expect("identity").name, "A");
    assert_eq!(f.storage.get(TOKEN_KEY).as_deref(), Some("T1"));
    assert_eq!(f.dispatch.sent()[0].url, "http://api.test/api/login");
}

#[test]
fn rejected_login_surfaces_message_without_session_mutation() {
    let f = fixture();
    f.dispatch.reply(200, r#"{"status":"error","message":"Email atau password salah"}"#);

    let result = block_on(perform_login(&f.gateway, &login_form()));

    match result {
        Err(AuthFlowError::Rejected(message)) => assert_eq!(message, "Email atau password salah"),
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(!f.gateway.session().is_authenticated());
    assert!(f.storage.get(TOKEN_KEY).is_none());
}

#[test]
fn success_without_pair_is_missing_auth_pair() {
    let f = fixture();
    f.dispatch.reply(200, r#"{"status":"success","message":"ok"}"#);

    let result = block_on(perform_login(&f.gateway, &login_form()));

    assert!(matches!(result, Err(AuthFlowError::MissingAuthPair)));
    assert!(!f.gateway.session().is_authenticated());
}

#[test]
fn login_then_expired_credential_ends_anonymous_with_one_redirect() {
    let f = fixture();
    f.dispatch.reply(200, LOGIN_OK);
    block_on(perform_login(&f.gateway, &login_form())).expect("login");

    f.dispatch.reply(401, r#"{"status":"error","message":"Unauthenticated."}"#);
    let result = block_on(fetch_profile(&f.gateway));

    assert!(matches!(result, Err(GatewayError::Unauthorized)));
    assert!(!f.gateway.session().is_authenticated());
    assert!(f.storage.get(TOKEN_KEY).is_none());
    assert_eq!(f.navigator.replacements(), vec![LOGIN_PATH.to_owned()]);
}

#[test]
fn register_adopts_session_like_login() {
    let f = fixture();
    f.dispatch.reply(200, LOGIN_OK);
    let form = RegisterForm {
        name: "A".to_owned(),
        email: "a@b.com".to_owned(),
        password: "x".to_owned(),
        password_confirmation: "x".to_owned(),
    };

    block_on(perform_register(&f.gateway, &form)).expect("register");

    assert!(f.gateway.session().is_authenticated());
    assert_eq!(f.dispatch.sent()[0].url, "http://api.test/api/register");
}

#[test]
fn logout_purges_locally_even_when_server_fails() {
    let f = fixture();
    f.dispatch.reply(200, LOGIN_OK);
    block_on(perform_login(&f.gateway, &login_form())).expect("login");

    f.dispatch.fail(GatewayError::Network("offline".to_owned()));
    block_on(perform_logout(&f.gateway));

    assert!(!f.gateway.session().is_authenticated());
    assert!(f.storage.get(TOKEN_KEY).is_none());
}

// =============================================================
// Endpoint plumbing
// =============================================================

#[test]
fn list_items_applies_query_filters() {
    let f = fixture();
    f.dispatch.reply(200, r#"{"status":"success","data":[]}"#);

    block_on(list_items(&f.gateway, &[("kategori", "Electronics"), ("status", "tersedia")]))
        .expect("items");

    assert_eq!(
        f.dispatch.sent()[0].url,
        "http://api.test/api/barangs?kategori=Electronics&status=tersedia"
    );
}

#[test]
fn list_items_without_filters_has_no_query() {
    let f = fixture();
    f.dispatch.reply(200, r#"{"status":"success","data":[]}"#);

    block_on(list_items(&f.gateway, &[])).expect("items");

    assert_eq!(f.dispatch.sent()[0].url, "http://api.test/api/barangs");
}

#[test]
fn toggle_user_status_patches_without_body() {
    let f = fixture();
    f.dispatch.reply(
        200,
        r#"{"status":"success","data":{"id":2,"name":"B","email":"b@b.com","role":"gudang","is_active":false}}"#,
    );

    let envelope = block_on(toggle_user_status(&f.gateway, 2)).expect("toggle");

    let sent = f.dispatch.sent();
    assert_eq!(sent[0].method, Method::Patch);
    assert_eq!(sent[0].url, "http://api.test/api/users/2/toggle-status");
    assert!(sent[0].body.is_none());
    assert!(!envelope.data.expect("user").is_active);
}

#[test]
fn encode_query_escapes_reserved_characters() {
    let encoded = encode_query(&[("q", "a b&c=d")]);
    assert_eq!(encoded, "q=a%20b%26c%3Dd");
}
