mod backend;
mod browser;
mod filter;
mod status;

pub use backend::ThemeBackend;
pub use browser::{ThemeBrowser, ThemeCard, browse_cards};
pub use filter::{
    BrowseQuery, DropdownOption, SortOrder, TargetFilter, matches_search, sort_entries,
    target_options,
};
pub use status::{InstallStatus, OUTDATED_BUTTON_FILTER, install_status};
