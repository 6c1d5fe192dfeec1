//! # rentalhub-client
//!
//! Leptos + WASM frontend for the RentalHub inventory-rental service.
//!
//! The crate is organised around two cooperating pieces: the session
//! store (`state::session`), the single durable source of truth for who
//! is logged in, and the HTTP gateway (`net::gateway`), which attaches
//! the bearer credential to every outbound API call and turns a 401 into
//! a forced logout plus a redirect to the login page. Pages and endpoint
//! services sit on top of those two.
//!
//! Browser-only code is gated behind the `hydrate` feature; with default
//! features the crate and its tests build natively against in-memory
//! fakes.

pub mod app;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Hydration entry point invoked from the generated JS glue.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(crate::app::App);
}
