//! The server engine: accepts connections on a listening socket and drives
//! each through the per-connection request pipeline in [`connection`].

mod config;
mod connection;
mod message;

pub use config::ServerConfig;
pub use message::{Request, Response};
#[cfg(test)]
pub(crate) use connection::serve as connection_serve_for_tests;

use crate::handler::HandlerTable;
use crate::protocol::HttpError;
use crate::transport;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Accepts connections and dispatches requests through a [`HandlerTable`].
pub struct Server {
    config: ServerConfig,
    handlers: HandlerTable,
}

impl Server {
    pub fn new(config: ServerConfig, handlers: HandlerTable) -> Self {
        Self { config, handlers }
    }

    /// Runs the accept loop until `Ctrl-C` is received. Each connection is
    /// handled on its own spawned task; accept errors are logged and do not
    /// stop the loop.
    pub async fn run(self) -> Result<(), HttpError> {
        let listener = transport::bind(self.config.bind_addr, self.config.reuse_address).await?;
        info!(addr = %self.config.bind_addr, "listening");

        let config = Arc::new(self.config);
        let handlers = Arc::new(self.handlers);

        loop {
            let accepted = tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received");
                    return Ok(());
                }
                result = transport::accept(&listener) => result,
            };

            let (stream, remote_addr) = match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(cause = %e, "failed to accept connection");
                    continue;
                }
            };

            let handlers = Arc::clone(&handlers);
            let config = Arc::clone(&config);

            tokio::spawn(async move {
                if let Err(e) = connection::serve(stream, remote_addr, handlers, config).await {
                    error!(cause = %e, %remote_addr, "connection ended with error");
                }
            });
        }
    }
}
