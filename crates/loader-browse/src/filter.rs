use cssloader_core::BrowseThemeEntry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub data: u32,
    pub label: String,
}

impl DropdownOption {
    pub fn new(data: u32, label: impl Into<String>) -> Self {
        Self {
            data,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    DateNewest,
    DateOldest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::NameAsc,
        SortOrder::NameDesc,
        SortOrder::DateNewest,
        SortOrder::DateOldest,
    ];

    pub fn data(self) -> u32 {
        match self {
            SortOrder::NameAsc => 1,
            SortOrder::NameDesc => 2,
            SortOrder::DateNewest => 3,
            SortOrder::DateOldest => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::NameAsc => "Name: A-Z",
            SortOrder::NameDesc => "Name: Z-A",
            SortOrder::DateNewest => "Date: Newest-Oldest",
            SortOrder::DateOldest => "Date: Oldest-Newest",
        }
    }

    /// Unknown values fall back to A-Z.
    pub fn from_data(data: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|order| order.data() == data)
            .unwrap_or_default()
    }

    pub fn options() -> Vec<DropdownOption> {
        Self::ALL
            .into_iter()
            .map(|order| DropdownOption::new(order.data(), order.label()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetFilter {
    #[default]
    Any,
    Target(String),
}

impl TargetFilter {
    pub const ANY_LABEL: &'static str = "Any";

    pub fn from_label(label: &str) -> Self {
        if label == Self::ANY_LABEL {
            TargetFilter::Any
        } else {
            TargetFilter::Target(label.to_string())
        }
    }

    pub fn matches(&self, entry: &BrowseThemeEntry) -> bool {
        match self {
            TargetFilter::Any => true,
            TargetFilter::Target(target) => entry.target == *target,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, TargetFilter::Any)
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrowseQuery {
    pub search: String,
    pub sort: SortOrder,
    pub target: TargetFilter,
}

/// Case-insensitive substring match on the theme name. An empty query matches everything.
pub fn matches_search(entry: &BrowseThemeEntry, query: &str) -> bool {
    query.is_empty() || entry.name.to_lowercase().contains(&query.to_lowercase())
}

/// "Any" followed by the distinct targets of entries matching `search`, in
/// first-seen order.
pub fn target_options(catalog: &[BrowseThemeEntry], search: &str) -> Vec<DropdownOption> {
    let mut targets: Vec<&str> = Vec::new();
    for entry in catalog.iter().filter(|e| matches_search(e, search)) {
        if !targets.contains(&entry.target.as_str()) {
            targets.push(&entry.target);
        }
    }

    let mut options = vec![DropdownOption::new(1, TargetFilter::ANY_LABEL)];
    options.extend(
        targets
            .into_iter()
            .enumerate()
            .map(|(i, target)| DropdownOption::new(i as u32 + 2, target)),
    );
    options
}

pub fn sort_entries(entries: &mut [&BrowseThemeEntry], order: SortOrder) {
    match order {
        SortOrder::NameAsc => entries.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOrder::NameDesc => entries.sort_by(|a, b| compare_names(&b.name, &a.name)),
        SortOrder::DateNewest => entries.sort_by(|a, b| b.last_changed.cmp(&a.last_changed)),
        SortOrder::DateOldest => entries.sort_by(|a, b| a.last_changed.cmp(&b.last_changed)),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(name: &str, target: &str, day: u32) -> BrowseThemeEntry {
        BrowseThemeEntry {
            id: name.to_lowercase(),
            name: name.to_string(),
            author: "x".to_string(),
            version: "1.0".to_string(),
            target: target.to_string(),
            preview_image: String::new(),
            last_changed: Utc.with_ymd_and_hms(2022, 8, day, 12, 0, 0).unwrap(),
            description: None,
        }
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let neon = entry("Neon Dreams", "System-Wide", 1);
        assert!(matches_search(&neon, ""));
        assert!(matches_search(&neon, "neon"));
        assert!(matches_search(&neon, "DREAM"));
        assert!(!matches_search(&neon, "amber"));
    }

    #[test]
    fn test_target_options_first_seen_order() {
        let catalog = vec![
            entry("Neon", "Keyboard", 1),
            entry("Amber", "System-Wide", 2),
            entry("Neon Keys", "Keyboard", 3),
            entry("Bezel", "Home", 4),
        ];

        let options = target_options(&catalog, "");
        assert_eq!(
            options,
            vec![
                DropdownOption::new(1, "Any"),
                DropdownOption::new(2, "Keyboard"),
                DropdownOption::new(3, "System-Wide"),
                DropdownOption::new(4, "Home"),
            ]
        );

        let options = target_options(&catalog, "neon");
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].label, "Keyboard");
    }

    #[test]
    fn test_sort_orders() {
        let catalog = vec![
            entry("bezel", "Home", 3),
            entry("Amber", "Home", 1),
            entry("Neon", "Home", 2),
        ];
        let names = |order| {
            let mut refs: Vec<&BrowseThemeEntry> = catalog.iter().collect();
            sort_entries(&mut refs, order);
            refs.iter().map(|e| e.name.clone()).collect::<Vec<_>>()
        };

        assert_eq!(names(SortOrder::NameAsc), vec!["Amber", "bezel", "Neon"]);
        assert_eq!(names(SortOrder::NameDesc), vec!["Neon", "bezel", "Amber"]);
        assert_eq!(names(SortOrder::DateNewest), vec!["bezel", "Neon", "Amber"]);
        assert_eq!(names(SortOrder::DateOldest), vec!["Amber", "Neon", "bezel"]);
    }

    #[test]
    fn test_sort_order_data() {
        assert_eq!(SortOrder::from_data(3), SortOrder::DateNewest);
        assert_eq!(SortOrder::from_data(42), SortOrder::NameAsc);
        assert_eq!(SortOrder::options()[1], DropdownOption::new(2, "Name: Z-A"));
    }

    #[test]
    fn test_target_filter() {
        let keyboard = entry("Neon", "Keyboard", 1);
        assert!(TargetFilter::from_label("Any").matches(&keyboard));
        assert!(TargetFilter::from_label("Keyboard").matches(&keyboard));
        assert!(!TargetFilter::from_label("Home").matches(&keyboard));
    }
}
