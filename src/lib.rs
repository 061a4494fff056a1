//! docserve - keep-alive static file server
//!
//! Core library: configuration, the accept loop, and the per-connection
//! HTTP/1.1 request handling.

pub mod config;
pub mod http;
pub mod server;
