use crate::{CssLoaderState, ListenerId, PublicState, StateListener};
use cssloader_core::{BrowseThemeEntry, CssLoaderError, RawThemeRecord, Theme};
use flume::{Receiver, Sender};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Something that redraws from a [`PublicState`], e.g. one mounted UI tree.
pub trait Surface: Send + Sync {
    fn render(&self, state: &PublicState);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPhase {
    Detached,
    Attached,
}

/// Mirrors one [`CssLoaderState`] into one surface.
///
/// Attaching takes a snapshot and subscribes; each `stateUpdate` refreshes the
/// mirror and renders the surface once. Dropping the binding detaches it, so a
/// surface that goes away never keeps receiving updates.
pub struct StateBinding {
    container: Option<Arc<CssLoaderState>>,
    listener: Option<ListenerId>,
    mirror: Arc<RwLock<PublicState>>,
}

struct MirrorListener {
    container: Weak<CssLoaderState>,
    mirror: Arc<RwLock<PublicState>>,
    surface: Arc<dyn Surface>,
}

impl StateListener for MirrorListener {
    fn on_state_update(&self) {
        let Some(container) = self.container.upgrade() else {
            return;
        };
        // Read under the mirror lock so concurrent updates land in order.
        let snapshot = {
            let mut mirror = self.mirror.write();
            *mirror = container.get_public_state();
            mirror.clone()
        };
        self.surface.render(&snapshot);
    }
}

impl StateBinding {
    pub fn attach(container: &Arc<CssLoaderState>, surface: Arc<dyn Surface>) -> Self {
        let mirror = Arc::new(RwLock::new(PublicState::default()));
        let listener = container.event_bus().subscribe(Arc::new(MirrorListener {
            container: Arc::downgrade(container),
            mirror: mirror.clone(),
            surface,
        }));
        // Subscribed first, so a write racing the attach is either in this
        // snapshot or delivered to the listener.
        *mirror.write() = container.get_public_state();
        debug!(listener_id = listener.get(), "Binding attached");

        Self {
            container: Some(container.clone()),
            listener: Some(listener),
            mirror,
        }
    }

    pub fn phase(&self) -> BindingPhase {
        if self.container.is_some() {
            BindingPhase::Attached
        } else {
            BindingPhase::Detached
        }
    }

    /// Current mirrored state. After detaching this is the last state seen.
    pub fn state(&self) -> PublicState {
        self.mirror.read().clone()
    }

    pub fn installed_themes(&self) -> Arc<[Theme]> {
        self.mirror.read().installed_themes.clone()
    }

    pub fn browse_catalog(&self) -> Arc<[BrowseThemeEntry]> {
        self.mirror.read().browse_catalog.clone()
    }

    pub fn set_installed_themes(&self, records: Vec<RawThemeRecord>) -> Result<(), CssLoaderError> {
        self.container()?.set_installed_themes(records)
    }

    pub fn set_browse_catalog(&self, entries: Vec<BrowseThemeEntry>) -> Result<(), CssLoaderError> {
        self.container()?.set_browse_catalog(entries);
        Ok(())
    }

    /// Unsubscribes and releases the container. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if let Some(container) = self.container.take() {
            if let Some(id) = self.listener.take() {
                container.event_bus().unsubscribe(id);
                debug!(listener_id = id.get(), "Binding detached");
            }
        }
    }

    fn container(&self) -> Result<&Arc<CssLoaderState>, CssLoaderError> {
        self.container.as_ref().ok_or(CssLoaderError::Detached)
    }
}

impl Drop for StateBinding {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Surface that forwards every render over a channel, for render loops that
/// live on another task.
pub struct ChannelSurface {
    tx: Sender<PublicState>,
}

impl ChannelSurface {
    pub fn new() -> (Arc<Self>, Receiver<PublicState>) {
        let (tx, rx) = flume::unbounded();
        (Arc::new(Self { tx }), rx)
    }
}

impl Surface for ChannelSurface {
    fn render(&self, state: &PublicState) {
        // A closed receiver means the render loop is gone; nothing left to draw.
        let _ = self.tx.send(state.clone());
    }
}
