//! Client core for the attend HR/attendance console.
//!
//! Owns the authenticated-session lifecycle (login, logout, expiry
//! detection) and the typed API-access layer that UI frontends build on.
//! [`HrClient`] is the entry point; it wires the gateway, session store and
//! lifecycle controller together with no hidden static state, so tests can
//! create fully isolated instances.

pub mod client;
pub mod config;
pub mod gateway;
pub mod session;
pub mod token;
pub mod types;

pub use client::HrClient;
pub use gateway::{ApiError, ApiErrorKind, ApiResult};
