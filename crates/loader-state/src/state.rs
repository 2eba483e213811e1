use crate::EventBus;
use cssloader_core::{BrowseThemeEntry, CssLoaderError, RawThemeRecord, Theme};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Read-only snapshot of the container. Cloning is cheap and the lists can
/// not be changed through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicState {
    pub installed_themes: Arc<[Theme]>,
    pub browse_catalog: Arc<[BrowseThemeEntry]>,
}

impl Default for PublicState {
    fn default() -> Self {
        Self {
            installed_themes: Arc::from(Vec::new()),
            browse_catalog: Arc::from(Vec::new()),
        }
    }
}

/// Single owner of the installed theme list and the browse catalog.
///
/// Every successful setter replaces one list wholesale and then emits exactly
/// one `stateUpdate` on [`CssLoaderState::event_bus`]. Independent instances
/// share nothing.
pub struct CssLoaderState {
    inner: RwLock<PublicState>,
    event_bus: EventBus,
}

impl CssLoaderState {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(PublicState::default()),
            event_bus: EventBus::new(),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn get_public_state(&self) -> PublicState {
        self.inner.read().clone()
    }

    /// Enriches every record and replaces the installed list in input order.
    ///
    /// If any record fails enrichment the call returns the error, the current
    /// list is kept and no notification is sent.
    pub fn set_installed_themes(&self, records: Vec<RawThemeRecord>) -> Result<(), CssLoaderError> {
        let themes = match Theme::from_batch(records) {
            Ok(themes) => themes,
            Err(e) => {
                warn!("Rejected installed theme list: {}", e);
                return Err(e);
            }
        };

        let count = themes.len();
        self.inner.write().installed_themes = Arc::from(themes);
        info!(count, "Installed theme list replaced");

        self.event_bus.emit();
        Ok(())
    }

    pub fn set_browse_catalog(&self, entries: Vec<BrowseThemeEntry>) {
        let count = entries.len();
        self.inner.write().browse_catalog = Arc::from(entries);
        info!(count, "Browse catalog replaced");

        self.event_bus.emit();
    }
}

impl Default for CssLoaderState {
    fn default() -> Self {
        Self::new()
    }
}
