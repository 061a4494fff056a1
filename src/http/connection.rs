use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use bytes::{Buf, BytesMut};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::Config;
use crate::http::mime::mime_type;
use crate::http::parser::{parse_request_at_eof, parse_request_head, ParseError};
use crate::http::request::Request;
use crate::http::resolve::{resolve_target, ResolvedPath};
use crate::http::response::Response;
use crate::http::writer::{stream_body, ResponseWriter};

/// Owns one client connection for its whole life.
///
/// Generic over the stream so the state machine can be driven by an
/// in-memory duplex in tests as well as a `TcpStream`.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    scratch: Vec<u8>,
    config: Arc<Config>,
    state: ConnectionState,
}

pub enum ConnectionState {
    AwaitingRequest,
    Resolving(Request),
    RespondingOk {
        file: File,
        len: u64,
        resolved: ResolvedPath,
    },
    RespondingNotFound(String),
    RespondingTooLarge,
    Closed,
}

enum ReadOutcome {
    Request(Request),
    Disconnected,
    TooLarge,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, config: Arc<Config>) -> Self {
        let buffer_size = config.server.buffer_size;
        Self {
            stream,
            buffer: BytesMut::with_capacity(buffer_size),
            scratch: vec![0u8; buffer_size],
            config,
            state: ConnectionState::AwaitingRequest,
        }
    }

    /// Serves requests until the client disconnects, a 404 or oversized
    /// request ends the connection, or an I/O error occurs.
    ///
    /// I/O errors are returned after the socket is dropped; an open file
    /// held by the current state is dropped with it.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let state = std::mem::replace(&mut self.state, ConnectionState::Closed);

            self.state = match state {
                ConnectionState::AwaitingRequest => match self.read_request().await? {
                    ReadOutcome::Request(req) => {
                        debug!(method = %req.method, uri = %req.target, "Request received");
                        ConnectionState::Resolving(req)
                    }
                    ReadOutcome::Disconnected => {
                        debug!("Client disconnected");
                        ConnectionState::Closed
                    }
                    ReadOutcome::TooLarge => ConnectionState::RespondingTooLarge,
                },

                ConnectionState::Resolving(req) => self.resolve(req).await,

                ConnectionState::RespondingOk {
                    mut file,
                    len,
                    resolved,
                } => {
                    let mime = mime_type(&resolved.relative);
                    let mut writer = ResponseWriter::new(&Response::file_ok(mime, len));
                    writer.write_to_stream(&mut self.stream).await?;

                    stream_body(&mut file, &mut self.stream, len, self.config.server.buffer_size)
                        .await
                        .with_context(|| format!("failed to send {}", resolved.relative))?;
                    drop(file);

                    info!(path = %resolved.relative, bytes = len, "200 OK");
                    ConnectionState::AwaitingRequest
                }

                ConnectionState::RespondingNotFound(target) => {
                    info!(uri = %target, "404 Not Found");
                    self.send_and_close(&Response::not_found()).await;
                    ConnectionState::Closed
                }

                ConnectionState::RespondingTooLarge => {
                    info!(
                        limit = self.config.server.max_request_size,
                        "413 request head too large"
                    );
                    self.send_and_close(&Response::payload_too_large()).await;
                    ConnectionState::Closed
                }

                ConnectionState::Closed => {
                    if let Err(e) = self.stream.shutdown().await {
                        debug!(error = %e, "Failed to shut down connection");
                    }
                    break;
                }
            };
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        let limit = self.config.server.max_request_size;

        loop {
            // Try parsing whatever we already have
            match parse_request_head(&self.buffer, limit) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {}

                Err(ParseError::TooLarge { .. }) => return Ok(ReadOutcome::TooLarge),
            }

            let n = self
                .stream
                .read(&mut self.scratch)
                .await
                .context("failed to read from client")?;

            if n == 0 {
                if let Some(request) = parse_request_at_eof(&self.buffer) {
                    debug!(pending = self.buffer.len(), "Client closed before end of head");
                    self.buffer.clear();
                    return Ok(ReadOutcome::Request(request));
                }
                return Ok(ReadOutcome::Disconnected);
            }

            self.buffer.extend_from_slice(&self.scratch[..n]);
        }
    }

    async fn resolve(&self, req: Request) -> ConnectionState {
        let Some(resolved) = resolve_target(&req.target, &self.config.static_files) else {
            return ConnectionState::RespondingNotFound(req.target);
        };

        match open_regular_file(&resolved.full).await {
            Ok((file, len)) => ConnectionState::RespondingOk {
                file,
                len,
                resolved,
            },
            Err(e) => {
                debug!(path = %resolved.full.display(), error = %e, "Open failed");
                ConnectionState::RespondingNotFound(req.target)
            }
        }
    }

    // Send failures are only logged; the next state is always Closed.
    async fn send_and_close(&mut self, response: &Response) {
        let mut writer = ResponseWriter::new(response);
        if let Err(e) = writer.write_to_stream(&mut self.stream).await {
            debug!(error = %e, "Failed to send final response");
        }
    }
}

/// Opens `path` read-only and returns it with its size. Anything that is not
/// a regular file counts as an open failure.
pub async fn open_regular_file(path: &Path) -> anyhow::Result<(File, u64)> {
    let file = File::open(path).await?;
    let metadata = file.metadata().await?;

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok((file, metadata.len()))
}
