//! HTTP protocol handling for the file server.
//!
//! A deliberately small subset of HTTP/1.1: only the first two tokens of a
//! request are read, targets map straight onto files, and successful
//! responses keep the connection open for the next request.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine
//! - **`parser`**: Extracts one request head from the read buffer
//! - **`request`**: Method and target of a parsed request
//! - **`resolve`**: Maps a target onto a path under the document root
//! - **`response`**: Status codes and the fixed response heads
//! - **`writer`**: Serializes heads and streams file bodies
//! - **`mime`**: Content type from file extension
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← read until a full head is buffered
//!        └──────┬───────────┘
//!               │ head parsed          (EOF / read error → Closed,
//!               ▼                       head too large → 413 → Closed)
//!        ┌──────────────────┐
//!        │    Resolving     │ ← map target, open file
//!        └──────┬───────────┘
//!               ├─ opened   → RespondingOk → AwaitingRequest (keep-alive)
//!               └─ failed   → RespondingNotFound → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docserve::config::Config;
//! use docserve::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::default());
//!     let listener = TcpListener::bind("127.0.0.1:8888").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let config = Arc::clone(&config);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, config);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod resolve;
pub mod response;
pub mod writer;
