//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{ApiError, Result};
use std::path::Path;
use tracing::{info, warn};

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ApiError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

/// Load configuration, then build and run the server until shutdown
///
/// A missing file falls back to environment variables; a file that exists
/// but does not parse or validate is an error.
pub async fn run_server(config_path: &Path) -> Result<()> {
    info!("Starting rbac-api v{}", crate::VERSION);

    let config = if config_path.exists() {
        Config::from_file(config_path).await?
    } else {
        warn!(
            "Configuration file {:?} not found, using environment and defaults",
            config_path
        );
        Config::from_env()?
    };

    let server = ServerBuilder::new().with_config(config).build().await?;
    info!("Server starting at: http://{}", server.config().address());

    server.start().await
}
