use crate::bridge::FileBackend;
use anyhow::{Context, Result};
use cssloader_browse::{BrowseQuery, SortOrder, TargetFilter, ThemeBackend, ThemeBrowser, ThemeCard};
use cssloader_core::{Theme, parse_theme_records};
use cssloader_state::{ChannelSurface, CssLoaderState, StateBinding};
use std::path::PathBuf;
use std::sync::Arc;

pub struct BrowseArgs {
    pub search: String,
    pub sort: SortOrder,
    pub target: Option<String>,
    pub list_targets: bool,
}

pub struct InstalledArgs {
    pub stylesheet: Option<String>,
}

pub fn browse(data_dir: PathBuf, args: BrowseArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { browse_async(data_dir, args).await })
}

pub fn installed(data_dir: PathBuf, args: InstalledArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { installed_async(data_dir, args).await })
}

async fn browse_async(data_dir: PathBuf, args: BrowseArgs) -> Result<()> {
    let state = Arc::new(CssLoaderState::new());
    let backend = Arc::new(FileBackend::new(&data_dir));
    let (surface, renders) = ChannelSurface::new();
    let browser = ThemeBrowser::mount(&state, backend, surface);

    browser
        .reload()
        .await
        .with_context(|| format!("Failed to load themes from {}", data_dir.display()))?;
    tracing::debug!("Browse page rendered {} updates", renders.drain().count());

    if args.list_targets {
        for option in browser.target_options(&args.search) {
            println!("{}", option.label);
        }
        return Ok(());
    }

    let query = BrowseQuery {
        search: args.search,
        sort: args.sort,
        target: args
            .target
            .as_deref()
            .map(TargetFilter::from_label)
            .unwrap_or_default(),
    };

    let cards = browser.cards(&query);
    if cards.is_empty() {
        eprintln!("No themes match.");
        return Ok(());
    }

    let name_width = name_column_width(&cards);
    for card in &cards {
        println!("{}", format_card(card, name_width));
    }

    Ok(())
}

fn name_column_width(cards: &[ThemeCard]) -> usize {
    cards
        .iter()
        .map(|c| c.entry.name.chars().count())
        .max()
        .unwrap_or(0)
}

fn format_card(card: &ThemeCard, name_width: usize) -> String {
    let target = if card.show_target {
        format!(" [{}]", card.entry.target)
    } else {
        String::new()
    };
    let button = if card.button_disabled {
        format!("({})", card.button_text())
    } else {
        card.button_text().to_string()
    };

    format!(
        "{:<width$}  {:<10} by {:<16} {:>9}  {}{}",
        card.entry.name,
        button,
        card.entry.author,
        card.entry.version,
        card.entry.last_changed.format("%Y-%m-%d"),
        target,
        width = name_width
    )
}

async fn installed_async(data_dir: PathBuf, args: InstalledArgs) -> Result<()> {
    let state = Arc::new(CssLoaderState::new());
    let backend = FileBackend::new(&data_dir);
    let (surface, _renders) = ChannelSurface::new();
    let binding = StateBinding::attach(&state, surface);

    backend.reset().await?;
    let records = parse_theme_records(backend.get_themes().await?)?;
    binding.set_installed_themes(records)?;

    let themes = binding.installed_themes();
    if themes.is_empty() {
        eprintln!("No themes installed in {}", data_dir.display());
        return Ok(());
    }

    for theme in themes.iter() {
        match &args.stylesheet {
            Some(target) => {
                if let Some(sheet) = theme.stylesheet_for(target) {
                    println!("/* {} */", sheet.id);
                    print!("{}", sheet.css);
                }
            }
            None => println!("{}", format_theme(theme)),
        }
    }

    Ok(())
}

fn format_theme(theme: &Theme) -> String {
    let status = if theme.data().enabled { "on " } else { "off" };
    let targets = theme.targets();
    let targets = if targets.is_empty() {
        theme.data().target.clone().unwrap_or_default()
    } else {
        targets.join(", ")
    };

    format!(
        "[{}] {} {} by {}  {}",
        status,
        theme.name(),
        theme.version(),
        theme.author(),
        targets
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cssloader_browse::InstallStatus;
    use cssloader_core::{BrowseThemeEntry, RawThemeRecord};

    #[test]
    fn test_format_card() {
        let card = ThemeCard {
            entry: BrowseThemeEntry {
                id: "n".into(),
                name: "Neon".into(),
                author: "x".into(),
                version: "1.0".into(),
                target: "Keyboard".into(),
                preview_image: String::new(),
                last_changed: Utc.with_ymd_and_hms(2022, 7, 23, 19, 19, 52).unwrap(),
                description: None,
            },
            status: InstallStatus::Installed,
            show_target: true,
            button_disabled: true,
        };

        let line = format_card(&card, 6);
        assert!(line.starts_with("Neon    (Installed)"));
        assert!(line.contains("2022-07-23"));
        assert!(line.ends_with("[Keyboard]"));
    }

    #[test]
    fn test_format_card_pads_by_chars() {
        let mut card = ThemeCard {
            entry: BrowseThemeEntry {
                id: "n".into(),
                name: "Néon".into(),
                author: "x".into(),
                version: "1.0".into(),
                target: "Keyboard".into(),
                preview_image: String::new(),
                last_changed: Utc.with_ymd_and_hms(2022, 7, 23, 0, 0, 0).unwrap(),
                description: None,
            },
            status: InstallStatus::Uninstalled,
            show_target: false,
            button_disabled: false,
        };
        assert_eq!(name_column_width(std::slice::from_ref(&card)), 4);
        let accented = format_card(&card, name_column_width(std::slice::from_ref(&card)));

        card.entry.name = "Neon".into();
        let plain = format_card(&card, name_column_width(std::slice::from_ref(&card)));

        assert_eq!(accented.chars().count(), plain.chars().count());
        assert!(accented.starts_with("Néon  Install"));
    }

    #[test]
    fn test_format_theme() {
        let theme = Theme::from_raw(
            RawThemeRecord::new("Neon", "x", "1.0").with_inject("neon.css", ["SP", "Keyboard"]),
        )
        .unwrap();
        assert_eq!(format_theme(&theme), "[off] Neon 1.0 by x  Keyboard, SP");
    }
}
