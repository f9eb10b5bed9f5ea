use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{Instrument, Level, debug, info, trace, warn};

use crate::error::Result;
use crate::library::LibraryCatalog;
use crate::logging::TargetLog;
use crate::rewrite::Rewriter;
use crate::target::{LibraryClient, Scan, Target, TargetEvent};
use crate::version::MinimumVersion;

/// A target backed by a library-indexing service: rewrites each scanned
/// folder, resolves it against the library catalog fetched at connect time
/// and asks the service to scan every matching library.
pub struct ServerTarget<C: LibraryClient> {
    client: Arc<C>,
    catalog: LibraryCatalog,
    rewriter: Rewriter,
    log: TargetLog,
    events: broadcast::Sender<TargetEvent>,
}

impl<C: LibraryClient> ServerTarget<C> {
    /// Checks the service version against `floor`, then loads the catalog.
    /// Transport errors are returned unchanged; an unsupported version is
    /// fatal.
    pub async fn connect(
        client: Arc<C>,
        rewriter: Rewriter,
        floor: MinimumVersion,
        log: TargetLog,
    ) -> Result<Self> {
        let span = log.span().clone();

        let version = client.version().instrument(span.clone()).await?;
        if log.enabled(Level::DEBUG) {
            debug!(parent: &span, %version, "Retrieved {} version", log.service());
        }
        floor.ensure_supported(log.service(), &version)?;

        let libraries = client.libraries().instrument(span.clone()).await?;
        if log.enabled(Level::DEBUG) {
            debug!(parent: &span, ?libraries, "Retrieved libraries");
        }

        let (events, _) = broadcast::channel(16);
        Ok(Self {
            client,
            catalog: LibraryCatalog::new(libraries),
            rewriter,
            log,
            events,
        })
    }

    pub fn catalog(&self) -> &LibraryCatalog {
        &self.catalog
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TargetEvent> {
        self.events.subscribe()
    }

    fn emit_event(&self, event: TargetEvent) {
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl<C: LibraryClient> Target for ServerTarget<C> {
    async fn available(&self) -> Result<()> {
        self.client
            .version()
            .instrument(self.log.span().clone())
            .await
            .map(|_| ())
    }

    async fn scan(&self, scan: &Scan) -> Result<()> {
        let span = self.log.span();
        let folder = self.rewriter.rewrite(&scan.folder);

        let libraries = match self.catalog.resolve(&folder) {
            Ok(libraries) => libraries,
            Err(err) => {
                if self.log.enabled(Level::WARN) {
                    warn!(parent: span, error = %err, "No target libraries found");
                }
                return Ok(());
            }
        };

        for library in libraries {
            if self.log.enabled(Level::TRACE) {
                trace!(parent: span, path = %folder, library = %library.name, "Sending scan request");
            }

            // stop at the first failure; earlier libraries stay triggered
            self.client
                .scan(&folder, &library.id)
                .instrument(span.clone())
                .await?;

            if self.log.enabled(Level::INFO) {
                info!(parent: span, path = %folder, library = %library.name, "Scan moved to target");
            }
            self.emit_event(TargetEvent::ScanMoved {
                library: library.id.clone(),
                name: library.name.clone(),
                path: folder.clone(),
            });
        }

        Ok(())
    }
}
