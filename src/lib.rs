pub mod config;
pub mod correlation;
pub mod errors;
pub mod forwarder;
pub mod metrics_defs;
pub mod notification;
pub mod service;
pub mod upstream;

#[cfg(test)]
pub(crate) mod testutils;

use crate::config::Config;
use crate::errors::Result;
use crate::forwarder::Forwarder;
use crate::service::NotifierService;
use crate::upstream::HttpUpstreamClient;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Wires the service together, binds the listener, and serves until the
/// process is stopped. A failure to bind is returned to the caller, which
/// treats it as fatal.
pub async fn run(config: Config) -> Result<()> {
    let client = HttpUpstreamClient::new();
    let service = NotifierService::new(Forwarder::new(config.clone(), client));
    let service_arc = Arc::new(service);

    let listener = TcpListener::bind(&config.listen_address).await?;
    tracing::info!(address = %config.listen_address, "listening for notifications");

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let _ = stream.set_nodelay(true);
        let io = TokioIo::new(stream);
        let svc = service_arc.clone();

        // Hand the connection to hyper; auto-detect h1/h2 on this socket
        tokio::spawn(async move {
            if let Err(e) = Builder::new(TokioExecutor::new())
                .serve_connection(io, svc)
                .await
            {
                tracing::debug!(peer = %peer_addr, error = %e, "connection ended with error");
            }
        });
    }
}
