use cssloader_core::{BrowseThemeEntry, Theme};

/// CSS filter that tints the install button blue for available updates.
pub const OUTDATED_BUTTON_FILTER: &str =
    "invert(6%) sepia(90%) saturate(200%) hue-rotate(160deg) contrast(122%)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Installed,
    Outdated,
    Uninstalled,
}

impl InstallStatus {
    pub fn button_text(self) -> &'static str {
        match self {
            InstallStatus::Installed => "Installed",
            InstallStatus::Outdated => "Update",
            InstallStatus::Uninstalled => "Install",
        }
    }

    pub fn button_filter(self) -> &'static str {
        match self {
            InstallStatus::Outdated => OUTDATED_BUTTON_FILTER,
            _ => "",
        }
    }
}

/// Compares a catalog entry with the first installed theme of the same name and author.
pub fn install_status(entry: &BrowseThemeEntry, installed: &[Theme]) -> InstallStatus {
    match installed
        .iter()
        .find(|t| t.name() == entry.name && t.author() == entry.author)
    {
        Some(theme) if theme.version() == entry.version => InstallStatus::Installed,
        Some(_) => InstallStatus::Outdated,
        None => InstallStatus::Uninstalled,
    }
}
