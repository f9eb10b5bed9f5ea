pub mod client;
pub mod file;

use std::sync::Arc;

use autoscan_core::prelude::*;

pub use client::PlexClient;
pub use file::{AutoscanConfig, load_config};

/// Plex 1.20 is the first release whose library API this target speaks.
pub const MINIMUM_VERSION: MinimumVersion = MinimumVersion::new(1, 20);

pub type PlexTarget = ServerTarget<PlexClient>;

/// Builds a Plex target: validates the config, probes the server version and
/// loads the library catalog. Any failure leaves no target behind.
pub async fn new_target(config: &TargetConfig) -> Result<PlexTarget> {
    config.validate()?;

    let log = TargetLog::new("plex", &config.url, &config.verbosity);
    let rewriter = Rewriter::new(&config.rewrite)?;
    let timeout = config.timeout()?;

    let client = PlexClient::new(
        &config.url,
        config.token.clone(),
        timeout,
        config.product(),
        config.client_identifier(),
    )?;

    ServerTarget::connect(Arc::new(client), rewriter, MINIMUM_VERSION, log).await
}
