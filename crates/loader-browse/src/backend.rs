use async_trait::async_trait;
use cssloader_core::CssLoaderError;
use serde_json::Value;

/// Bridge to the process that owns theme files.
///
/// Payloads are untyped; callers parse them with
/// [`cssloader_core::parse_theme_records`] and
/// [`cssloader_core::parse_catalog_entries`].
#[async_trait]
pub trait ThemeBackend: Send + Sync {
    /// Installed themes as last loaded by [`ThemeBackend::reset`].
    async fn get_themes(&self) -> Result<Vec<Value>, CssLoaderError>;

    /// Cached catalog of remote themes.
    async fn get_theme_db_data(&self) -> Result<Vec<Value>, CssLoaderError>;

    /// Refreshes the cached catalog from its source.
    async fn reload_theme_db_data(&self) -> Result<(), CssLoaderError>;

    /// Rescans installed themes.
    async fn reset(&self) -> Result<(), CssLoaderError>;

    async fn download_theme(&self, id: &str) -> Result<(), CssLoaderError>;
}
