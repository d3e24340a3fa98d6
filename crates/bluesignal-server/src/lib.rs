//! BlueSignal Server
//!
//! HTTP surface over the verification pipeline and the event broadcaster:
//! report intake, authority views, single-shot classification, and SSE
//! streams with snapshot seeding and tagged keepalives.

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod persistence;
pub mod routes;
pub mod sse;
pub mod state;

pub use app::{build_app, run_server};
pub use auth::{AuthService, Identity, Role, StaticTokenAuth};
pub use persistence::{InMemoryStore, Persistence};
pub use state::{topics, AppState, Envelope};
