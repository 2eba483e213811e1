use async_trait::async_trait;
use cssloader_browse::ThemeBackend;
use cssloader_core::CssLoaderError;
use parking_lot::Mutex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Backend bridge over the plugin's data directory:
/// `themes/<dir>/theme.json` for installed themes and `themes.json` for the
/// cached catalog.
pub struct FileBackend {
    root: PathBuf,
    installed: Mutex<Vec<Value>>,
    catalog: Mutex<Vec<Value>>,
}

impl FileBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            installed: Mutex::new(Vec::new()),
            catalog: Mutex::new(Vec::new()),
        }
    }

    fn themes_dir(&self) -> PathBuf {
        self.root.join("themes")
    }

    fn catalog_path(&self) -> PathBuf {
        self.root.join("themes.json")
    }

    async fn scan_installed(&self) -> Result<Vec<Value>, CssLoaderError> {
        let dir = self.themes_dir();
        if !tokio::fs::try_exists(&dir).await? {
            debug!("No themes directory at {}", dir.display());
            return Ok(Vec::new());
        }

        let mut theme_dirs = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                theme_dirs.push(entry.path());
            }
        }
        theme_dirs.sort();

        let mut themes = Vec::with_capacity(theme_dirs.len());
        for theme_dir in theme_dirs {
            let manifest = theme_dir.join("theme.json");
            if !tokio::fs::try_exists(&manifest).await? {
                debug!("Skipping {} (no theme.json)", theme_dir.display());
                continue;
            }
            themes.push(read_json(&manifest).await?);
        }
        Ok(themes)
    }
}

async fn read_json(path: &Path) -> Result<Value, CssLoaderError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

#[async_trait]
impl ThemeBackend for FileBackend {
    async fn get_themes(&self) -> Result<Vec<Value>, CssLoaderError> {
        Ok(self.installed.lock().clone())
    }

    async fn get_theme_db_data(&self) -> Result<Vec<Value>, CssLoaderError> {
        Ok(self.catalog.lock().clone())
    }

    async fn reload_theme_db_data(&self) -> Result<(), CssLoaderError> {
        let path = self.catalog_path();
        let catalog = if tokio::fs::try_exists(&path).await? {
            match read_json(&path).await? {
                Value::Array(entries) => entries,
                _ => {
                    return Err(CssLoaderError::Backend(format!(
                        "{} does not contain a list",
                        path.display()
                    )));
                }
            }
        } else {
            debug!("No catalog at {}", path.display());
            Vec::new()
        };

        info!("Loaded {} catalog entries", catalog.len());
        *self.catalog.lock() = catalog;
        Ok(())
    }

    async fn reset(&self) -> Result<(), CssLoaderError> {
        let themes = self.scan_installed().await?;
        info!("Found {} installed themes", themes.len());
        *self.installed.lock() = themes;
        Ok(())
    }

    async fn download_theme(&self, id: &str) -> Result<(), CssLoaderError> {
        Err(CssLoaderError::Backend(format!(
            "theme {} can only be downloaded by the plugin backend",
            id
        )))
    }
}
