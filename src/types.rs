use crate::error::{PicksError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Core trait that every catalog entry must implement
pub trait Selectable: Send + Sync {
    /// Unique, stable key for this item within its catalog
    fn key(&self) -> &str;

    /// One-line description for listings
    fn summary(&self) -> String {
        self.key().to_string()
    }

    /// `(field, value)` lines shown when an item is expanded
    fn details(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// A movie in the Flick Pick catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub poster: String,
}

impl Selectable for Movie {
    fn key(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> String {
        match (self.year.is_empty(), self.genre.is_empty()) {
            (true, true) => self.title.clone(),
            (false, true) => format!("{} ({})", self.title, self.year),
            (true, false) => format!("{} [{}]", self.title, self.genre),
            (false, false) => format!("{} ({}) [{}]", self.title, self.year, self.genre),
        }
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        [("Year", &self.year), ("Genre", &self.genre), ("Poster", &self.poster)]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| (field, value.clone()))
            .collect()
    }
}

/// Season statistics attached to a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub interceptions: u32,
    #[serde(default)]
    pub passing_yards: u32,
    #[serde(default)]
    pub touchdowns: u32,
}

/// A player in the Start/Bench/Cut catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

impl Selectable for Player {
    fn key(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> String {
        let mut line = self.name.clone();
        if let Some(team) = &self.team {
            line.push_str(" - ");
            line.push_str(team);
        }
        if !self.position.is_empty() {
            line.push_str(&format!(" ({})", self.position));
        }
        line
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut lines = Vec::new();
        if !self.position.is_empty() {
            lines.push(("Position", self.position.clone()));
        }
        if let Some(team) = &self.team {
            lines.push(("Team", team.clone()));
        }
        if let Some(description) = &self.description {
            lines.push(("Description", description.clone()));
        }
        if let Some(stats) = &self.stats {
            lines.push((
                "Stats",
                format!(
                    "{} passing yards, {} touchdowns, {} interceptions",
                    stats.passing_yards, stats.touchdowns, stats.interceptions
                ),
            ));
        }
        if let Some(image_url) = &self.image_url {
            lines.push(("Image", image_url.clone()));
        }
        lines
    }
}

/// Opaque handle to an item in a [`crate::catalog::Catalog`].
///
/// Handles are only minted by the catalog, which keeps out-of-catalog keys
/// away from the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Opaque handle to a category in a [`CategorySet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId(pub(crate) usize);

impl CategoryId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One mutually exclusive label, e.g. `own` shown as "Own it"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub display: String,
}

impl Category {
    pub fn new(label: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            display: display.into(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The fixed, ordered set of categories for one app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Builds a category set, rejecting empty sets and duplicate labels.
    ///
    /// Labels are trimmed, and two labels that differ only in ASCII case count
    /// as duplicates, matching how [`CategorySet::id_of`] resolves them.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        if categories.is_empty() {
            return Err(PicksError::Config("category set must contain at least one category".into()));
        }
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(categories.len());
        for mut category in categories {
            let label = category.label.trim();
            if label.is_empty() {
                return Err(PicksError::Config("category labels must not be blank".into()));
            }
            if !seen.insert(label.to_ascii_lowercase()) {
                return Err(PicksError::Config(format!("duplicate category label '{}'", label)));
            }
            category.label = label.to_string();
            normalized.push(category);
        }
        Ok(Self { categories: normalized })
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        Self::new(pairs.iter().map(|(label, display)| Category::new(*label, *display)).collect())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> &Category {
        &self.categories[id.0]
    }

    /// Looks a category up by label, case-insensitively
    pub fn id_of(&self, label: &str) -> Option<CategoryId> {
        let wanted = label.trim();
        self.categories
            .iter()
            .position(|c| c.label.eq_ignore_ascii_case(wanted))
            .map(CategoryId)
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> {
        (0..self.categories.len()).map(CategoryId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &Category)> {
        self.categories.iter().enumerate().map(|(i, c)| (CategoryId(i), c))
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }
}
