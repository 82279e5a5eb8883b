mod client_addr;
mod http_server;

pub use client_addr::resolve_client_addr;
pub use http_server::{AppState, HttpServer};
