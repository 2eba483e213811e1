use crate::{CssLoaderError, RawThemeRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleInjection {
    pub file: String,
    pub targets: Vec<String>,
}

/// Stylesheet generated for one UI surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSheet {
    pub id: String,
    pub css: String,
}

/// An installed theme: the backend record plus the data derived from it.
///
/// Only constructed through [`Theme::from_raw`], so every instance has passed
/// validation and carries its generated style data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    data: RawThemeRecord,
    style_id: String,
    injections: Vec<StyleInjection>,
}

impl Theme {
    pub fn from_raw(data: RawThemeRecord) -> Result<Self, CssLoaderError> {
        for (field, value) in [
            ("name", &data.name),
            ("author", &data.author),
            ("version", &data.version),
        ] {
            if value.trim().is_empty() {
                return Err(CssLoaderError::InvalidTheme(format!(
                    "missing required field `{field}`"
                )));
            }
        }

        let mut injections = Vec::with_capacity(data.inject.len());
        for (file, targets) in &data.inject {
            if !file.ends_with(".css") {
                return Err(CssLoaderError::InvalidTheme(format!(
                    "inject file `{file}` is not a stylesheet"
                )));
            }
            if targets.is_empty() {
                return Err(CssLoaderError::InvalidTheme(format!(
                    "inject file `{file}` has no targets"
                )));
            }
            injections.push(StyleInjection {
                file: file.clone(),
                targets: targets.clone(),
            });
        }

        let style_id = format!("{}-{}", slug(&data.author), slug(&data.name));

        Ok(Self {
            data,
            style_id,
            injections,
        })
    }

    /// Enriches a whole batch, rejecting it at the first invalid record.
    pub fn from_batch(records: Vec<RawThemeRecord>) -> Result<Vec<Self>, CssLoaderError> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Self::from_raw(raw).map_err(|e| match e {
                    CssLoaderError::InvalidTheme(reason) => CssLoaderError::malformed(index, reason),
                    other => other,
                })
            })
            .collect()
    }

    /// The backend record this theme was built from.
    pub fn data(&self) -> &RawThemeRecord {
        &self.data
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn author(&self) -> &str {
        &self.data.author
    }

    pub fn version(&self) -> &str {
        &self.data.version
    }

    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    pub fn injections(&self) -> &[StyleInjection] {
        &self.injections
    }

    pub fn targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = self
            .injections
            .iter()
            .flat_map(|i| i.targets.iter().map(String::as_str))
            .collect();
        targets.sort_unstable();
        targets.dedup();
        targets
    }

    /// Builds the stylesheet for `target`, or `None` if the theme injects nothing there.
    pub fn stylesheet_for(&self, target: &str) -> Option<StyleSheet> {
        let files: Vec<&str> = self
            .injections
            .iter()
            .filter(|i| i.targets.iter().any(|t| t == target))
            .map(|i| i.file.as_str())
            .collect();

        if files.is_empty() {
            return None;
        }

        let mut css = format!(
            "/* {} {} by {} */\n",
            self.data.name, self.data.version, self.data.author
        );
        for file in files {
            css.push_str(&format!("@import url(\"{}/{}\");\n", self.style_id, file));
        }

        Some(StyleSheet {
            id: format!("{}:{}", self.style_id, slug(target)),
            css,
        })
    }
}

fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "theme".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard_theme() -> RawThemeRecord {
        RawThemeRecord::new("Clean Keyboard", "Such Meme", "2.1")
            .with_inject("keyboard.css", ["Keyboard"])
            .with_inject("shared.css", ["SP", "Keyboard"])
    }

    #[test]
    fn test_enrichment_is_pure() {
        let a = Theme::from_raw(keyboard_theme()).unwrap();
        let b = Theme::from_raw(keyboard_theme()).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.style_id(), "such-meme-clean-keyboard");
        assert_eq!(a.stylesheet_for("SP"), b.stylesheet_for("SP"));
    }

    #[test]
    fn test_missing_required_field() {
        let err = Theme::from_raw(RawThemeRecord::new("Neon", "  ", "1.0")).unwrap_err();
        match err {
            CssLoaderError::InvalidTheme(reason) => assert!(reason.contains("author")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_inject_must_be_css() {
        let raw = RawThemeRecord::new("Neon", "x", "1.0").with_inject("neon.js", ["SP"]);
        assert!(Theme::from_raw(raw).is_err());

        let raw = RawThemeRecord::new("Neon", "x", "1.0").with_inject("neon.css", Vec::<String>::new());
        assert!(Theme::from_raw(raw).is_err());
    }

    #[test]
    fn test_data_accessor_returns_source_record() {
        let theme = Theme::from_raw(keyboard_theme()).unwrap();
        assert_eq!(theme.data(), &keyboard_theme());
        assert_eq!(theme.data().inject.len(), theme.injections().len());
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let err = Theme::from_batch(vec![
            RawThemeRecord::new("Neon", "x", "1.0"),
            RawThemeRecord::new("", "x", "1.0"),
        ])
        .unwrap_err();

        assert!(matches!(err, CssLoaderError::MalformedRecord { index: 1, .. }));
    }

    #[test]
    fn test_stylesheet_for_target() {
        let theme = Theme::from_raw(keyboard_theme()).unwrap();

        let sheet = theme.stylesheet_for("Keyboard").unwrap();
        assert_eq!(sheet.id, "such-meme-clean-keyboard:keyboard");
        assert!(sheet.css.starts_with("/* Clean Keyboard 2.1 by Such Meme */\n"));
        assert!(sheet.css.contains("@import url(\"such-meme-clean-keyboard/keyboard.css\");"));
        assert!(sheet.css.contains("@import url(\"such-meme-clean-keyboard/shared.css\");"));

        let sheet = theme.stylesheet_for("SP").unwrap();
        assert!(!sheet.css.contains("keyboard.css"));

        assert!(theme.stylesheet_for("QuickAccess").is_none());
        assert_eq!(theme.targets(), vec!["Keyboard", "SP"]);
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Neon Dreams!"), "neon-dreams");
        assert_eq!(slug("--"), "theme");
        assert_eq!(slug("A  B"), "a-b");
    }
}
