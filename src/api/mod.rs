//! HTTP API: routes, error envelope and server bootstrap.

pub mod error;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use server::{build_router, start_server, AppState};
