use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{lookup_host, TcpListener, TcpSocket};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinSet};
use tracing::{error, info, info_span, Instrument};

use crate::config::Config;
use crate::http::connection::Connection;

/// The bound listening socket plus everything the accept loop hands to
/// connection tasks.
pub struct Listener {
    inner: TcpListener,
    config: Arc<Config>,
    limiter: Option<Arc<Semaphore>>,
}

impl Listener {
    /// Creates the listening socket with address reuse enabled and starts
    /// listening with the configured backlog.
    pub async fn bind(config: Config) -> anyhow::Result<Self> {
        let listen_addr = config.server.listen_addr();
        let addr = lookup_host(listen_addr.as_str())
            .await
            .with_context(|| format!("failed to resolve {}", listen_addr))?
            .next()
            .with_context(|| format!("no address found for {}", listen_addr))?;

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .context("failed to create socket")?;

        socket
            .set_reuseaddr(true)
            .context("failed to enable address reuse")?;
        socket
            .bind(addr)
            .with_context(|| format!("failed to bind {}", addr))?;
        let inner = socket
            .listen(config.server.backlog)
            .with_context(|| format!("failed to listen on {}", addr))?;

        let limiter = config
            .server
            .max_connections
            .map(|max| Arc::new(Semaphore::new(max)));

        info!("Listening on {}", inner.local_addr()?);

        Ok(Self {
            inner,
            config: Arc::new(config),
            limiter,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Accepts connections until accept fails.
    ///
    /// Each connection runs in its own task inside a `JoinSet`. Finished
    /// tasks are reaped between accepts, and when this future returns or is
    /// dropped every remaining connection task is aborted.
    pub async fn run(self) -> anyhow::Result<()> {
        let mut connections = JoinSet::new();

        loop {
            let permit = self.acquire_slot().await?;

            let (socket, peer) = loop {
                tokio::select! {
                    accepted = self.inner.accept() => {
                        break accepted.context("accept failed")?;
                    }

                    Some(joined) = connections.join_next() => {
                        log_finished(joined);
                    }
                }
            };
            info!("Accepted connection from {}", peer);

            let config = Arc::clone(&self.config);
            connections.spawn(
                async move {
                    let _permit = permit;
                    let mut conn = Connection::new(socket, config);
                    if let Err(e) = conn.run().await {
                        error!("Connection error from {}: {:#}", peer, e);
                    }
                }
                .instrument(info_span!("connection", %peer)),
            );
        }
    }

    async fn acquire_slot(&self) -> anyhow::Result<Option<OwnedSemaphorePermit>> {
        match &self.limiter {
            Some(limiter) => {
                let permit = Arc::clone(limiter)
                    .acquire_owned()
                    .await
                    .context("connection limiter closed")?;
                Ok(Some(permit))
            }
            None => Ok(None),
        }
    }
}

fn log_finished(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            error!("Connection task panicked: {}", e);
        }
    }
}
