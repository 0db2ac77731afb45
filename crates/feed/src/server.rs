//! TCP feed server.
//!
//! Accepts connections and reads line-delimited JSON messages into the
//! shared state holder. Runs on its own tokio runtime so the render loop
//! stays synchronous.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::payload::FeedMessage;
use crate::state::SharedGridState;

/// Feed server configuration.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    pub host: String,
    pub port: u16,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl FeedConfig {
    /// Create from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("CYCLES_FEED_HOST").unwrap_or(defaults.host);
        let port = env::var("CYCLES_FEED_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);
        Self { host, port }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid feed address {}:{}", self.host, self.port))
    }
}

/// Running feed instance; dropping it stops the server.
pub struct Feed {
    _rt: Runtime,
}

impl Feed {
    pub fn start(config: FeedConfig, state: SharedGridState) -> Result<Self> {
        let addr = config.socket_addr()?;
        let rt = Runtime::new().context("failed to create feed runtime")?;
        rt.spawn(async move {
            if let Err(err) = run_feed(addr, state, None).await {
                warn!(%err, "feed server stopped");
            }
        });
        Ok(Self { _rt: rt })
    }

    pub fn start_from_env(state: SharedGridState) -> Result<Self> {
        Self::start(FeedConfig::from_env(), state)
    }
}

/// Accept loop. One reader task per connection.
///
/// `port_tx` reports the actually bound port, for callers binding port 0.
pub async fn run_feed(
    addr: SocketAddr,
    state: SharedGridState,
    port_tx: Option<tokio::sync::oneshot::Sender<u16>>,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind feed listener on {addr}"))?;
    if let Some(tx) = port_tx {
        let _ = tx.send(listener.local_addr()?.port());
    }
    info!(%addr, "feed listening");

    loop {
        let (stream, peer) = listener.accept().await.context("feed accept failed")?;
        info!(%peer, "feed client connected");
        let state = state.clone();
        tokio::spawn(async move {
            read_lines(stream, state).await;
            info!(%peer, "feed client disconnected");
        });
    }
}

async fn read_lines(stream: TcpStream, state: SharedGridState) {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<FeedMessage>(&line) {
                    Ok(message) => state.apply(message),
                    // Reject the whole line; the previous state stays current.
                    Err(err) => warn!(%err, "rejecting malformed feed line"),
                }
            }
            Ok(None) => break,
            Err(err) => {
                warn!(%err, "feed read error");
                break;
            }
        }
    }
}
