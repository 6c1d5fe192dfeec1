//! Network layer: wire types, the HTTP gateway, and endpoint services.

pub mod api;
pub mod browser;
pub mod gateway;
#[cfg(test)]
pub mod testing;
pub mod types;
