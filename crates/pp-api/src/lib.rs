//! PayPilot backend: library crate for the HTTP server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `pp-e2e-tests`) can reach `AppState`, `build_router` and the
//! bridge quote clients.

pub mod bridge;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
