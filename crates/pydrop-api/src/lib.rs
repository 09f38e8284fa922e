//! Pydrop HTTP API
//!
//! Axum service exposing authenticated upload, listing, and download of
//! Python source files. The binary in `main.rs` wires configuration,
//! database, and storage through [`setup::initialize_app`]; integration
//! tests build the same router against in-memory backends.

pub mod auth;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod utils;
