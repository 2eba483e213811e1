use crate::{
    BrowseQuery, DropdownOption, InstallStatus, ThemeBackend, install_status, matches_search,
    sort_entries, target_options,
};
use cssloader_core::{
    BrowseThemeEntry, CssLoaderError, Theme, parse_catalog_entries, parse_theme_records,
};
use cssloader_state::{CssLoaderState, StateBinding, Surface};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// One catalog entry as the browse page shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeCard {
    pub entry: BrowseThemeEntry,
    pub status: InstallStatus,
    /// Target label is only shown while no target filter is active.
    pub show_target: bool,
    pub button_disabled: bool,
}

impl ThemeCard {
    pub fn button_text(&self) -> &'static str {
        self.status.button_text()
    }

    pub fn button_filter(&self) -> &'static str {
        self.status.button_filter()
    }
}

pub fn browse_cards(
    catalog: &[BrowseThemeEntry],
    installed: &[Theme],
    query: &BrowseQuery,
    installing: bool,
) -> Vec<ThemeCard> {
    let mut visible: Vec<&BrowseThemeEntry> = catalog
        .iter()
        .filter(|e| matches_search(e, &query.search))
        .filter(|e| query.target.matches(e))
        .collect();
    sort_entries(&mut visible, query.sort);

    visible
        .into_iter()
        .map(|entry| {
            let status = install_status(entry, installed);
            ThemeCard {
                entry: entry.clone(),
                status,
                show_target: query.target.is_any(),
                button_disabled: status == InstallStatus::Installed || installing,
            }
        })
        .collect()
}

/// Browse page controller: keeps a bound view of the shared state and routes
/// backend results into it.
pub struct ThemeBrowser<B: ThemeBackend> {
    binding: StateBinding,
    backend: Arc<B>,
    installing: AtomicBool,
}

struct InstallingGuard<'a>(&'a AtomicBool);

impl Drop for InstallingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<B: ThemeBackend> ThemeBrowser<B> {
    pub fn mount(state: &Arc<CssLoaderState>, backend: Arc<B>, surface: Arc<dyn Surface>) -> Self {
        Self {
            binding: StateBinding::attach(state, surface),
            backend,
            installing: AtomicBool::new(false),
        }
    }

    pub fn binding(&self) -> &StateBinding {
        &self.binding
    }

    pub fn is_installing(&self) -> bool {
        self.installing.load(Ordering::Acquire)
    }

    /// Fetches the catalog and the installed themes, as done when the page opens.
    pub async fn load(&self) -> Result<(), CssLoaderError> {
        self.refresh_catalog().await?;
        self.refresh_installed().await
    }

    pub async fn refresh_catalog(&self) -> Result<(), CssLoaderError> {
        let values = self.backend.get_theme_db_data().await?;
        let entries = parse_catalog_entries(values)?;
        self.binding.set_browse_catalog(entries)
    }

    pub async fn refresh_installed(&self) -> Result<(), CssLoaderError> {
        let values = self.backend.get_themes().await?;
        let records = parse_theme_records(values)?;
        self.binding.set_installed_themes(records)
    }

    /// Reloads the catalog source and rescans installed themes. Both halves run
    /// even if the other fails; the first error is returned.
    pub async fn reload(&self) -> Result<(), CssLoaderError> {
        let catalog = self.reload_catalog().await;
        let installed = self.rescan_installed().await;

        if let Err(e) = &catalog {
            warn!("Catalog reload failed: {}", e);
        }
        if let Err(e) = &installed {
            warn!("Installed theme reload failed: {}", e);
        }
        catalog.and(installed)
    }

    async fn reload_catalog(&self) -> Result<(), CssLoaderError> {
        self.backend.reload_theme_db_data().await?;
        self.refresh_catalog().await
    }

    async fn rescan_installed(&self) -> Result<(), CssLoaderError> {
        self.backend.reset().await?;
        self.refresh_installed().await
    }

    pub async fn install(&self, id: &str) -> Result<(), CssLoaderError> {
        if self.installing.swap(true, Ordering::AcqRel) {
            return Err(CssLoaderError::InstallInProgress);
        }
        let _guard = InstallingGuard(&self.installing);

        info!(theme_id = id, "Installing theme");
        self.backend.download_theme(id).await?;
        self.rescan_installed().await
    }

    pub fn target_options(&self, search: &str) -> Vec<DropdownOption> {
        target_options(&self.binding.browse_catalog(), search)
    }

    pub fn cards(&self, query: &BrowseQuery) -> Vec<ThemeCard> {
        let state = self.binding.state();
        browse_cards(
            &state.browse_catalog,
            &state.installed_themes,
            query,
            self.is_installing(),
        )
    }
}
