//! Item catalog
//!
//! An ordered chain of levels. Each item on level `i > 0` may name
//! "sources": ids of items on level `i - 1`. The catalog is built once and
//! never mutated; construction builds an id index and a reverse (children)
//! index per level so both directions of the source relation are O(1)
//! lookups.
//!
//! Levels are independent namespaces: `"x"` on level 0 and `"x"` on level 1
//! are unrelated items.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A selectable entry on one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Identifier, unique within its level.
    #[serde(alias = "value")]
    pub id: String,
    pub label: String,
    /// Ids of items on the preceding level this item derives from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl Item {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sources: Vec::new(),
        }
    }

    /// Builder: attach source ids.
    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }
}

/// One ordered collection of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Short name used on the command line (e.g. `"a"`).
    pub name: String,
    /// Display title; falls back to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Whether adapters should display each item's sources.
    #[serde(default)]
    pub show_sources: bool,
    pub items: Vec<Item>,
}

impl Level {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            title: None,
            show_sources: false,
            items,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_show_sources(mut self, show: bool) -> Self {
        self.show_sources = show;
        self
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// Non-fatal integrity problems found by [`Catalog::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    /// A source id that does not exist on the preceding level.
    DanglingSource {
        level: String,
        item: String,
        source: String,
    },
    /// An item on the first level declares sources, which can never resolve.
    RootSources { level: String, item: String },
}

impl fmt::Display for DataIntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingSource {
                level,
                item,
                source,
            } => write!(
                f,
                "{level}/{item}: source '{source}' does not exist on the preceding level"
            ),
            Self::RootSources { level, item } => {
                write!(f, "{level}/{item}: first-level item declares sources")
            }
        }
    }
}

/// Immutable, indexed chain of levels.
#[derive(Debug, Clone)]
pub struct Catalog {
    levels: Vec<Level>,
    /// Per level: item id -> position in `levels[i].items`.
    index: Vec<HashMap<String, usize>>,
    /// Per level: item id -> positions of items on level `i + 1` whose
    /// sources contain that id. Empty for the last level.
    children: Vec<HashMap<String, Vec<usize>>>,
}

impl Catalog {
    /// Build a catalog from ordered levels.
    ///
    /// Fails if there are no levels, a level name repeats, or an item id
    /// repeats within a level. Dangling sources are accepted; see
    /// [`Catalog::validate`].
    pub fn new(levels: Vec<Level>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut names = HashSet::new();
        let mut index = Vec::with_capacity(levels.len());
        for level in &levels {
            if !names.insert(level.name.as_str()) {
                return Err(CatalogError::DuplicateLevel(level.name.clone()));
            }
            let mut ids = HashMap::with_capacity(level.items.len());
            for (pos, item) in level.items.iter().enumerate() {
                if ids.insert(item.id.clone(), pos).is_some() {
                    return Err(CatalogError::DuplicateItem {
                        level: level.name.clone(),
                        id: item.id.clone(),
                    });
                }
            }
            index.push(ids);
        }

        let mut children: Vec<HashMap<String, Vec<usize>>> = vec![HashMap::new(); levels.len()];
        for upper in 1..levels.len() {
            for (pos, item) in levels[upper].items.iter().enumerate() {
                for source in &item.sources {
                    let entry = children[upper - 1].entry(source.clone()).or_default();
                    // A source listed twice on one item must not yield the child twice.
                    if entry.last() != Some(&pos) {
                        entry.push(pos);
                    }
                }
            }
        }

        Ok(Self {
            levels,
            index,
            children,
        })
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, level: usize) -> Option<&Level> {
        self.levels.get(level)
    }

    /// Items of `level` in catalog order.
    pub fn items(&self, level: usize) -> Option<&[Item]> {
        self.levels.get(level).map(|l| l.items.as_slice())
    }

    /// Position of the level called `name`.
    pub fn level_index(&self, name: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.name == name)
    }

    /// Find an item by id within `level`.
    pub fn find(&self, level: usize, id: &str) -> Option<&Item> {
        let pos = *self.index.get(level)?.get(id)?;
        self.levels[level].items.get(pos)
    }

    pub fn contains(&self, level: usize, id: &str) -> bool {
        self.index.get(level).is_some_and(|ids| ids.contains_key(id))
    }

    /// Immediate parents of `id` on `level`: its declared sources.
    ///
    /// Empty if the item is unknown or declares no sources.
    pub fn parents_of(&self, level: usize, id: &str) -> &[String] {
        self.find(level, id)
            .map(|item| item.sources.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate children of `id` on `level`: items on `level + 1` that list
    /// it as a source.
    pub fn children_of<'a>(
        &'a self,
        level: usize,
        id: &str,
    ) -> impl Iterator<Item = &'a Item> + use<'a> {
        let positions = self
            .children
            .get(level)
            .and_then(|map| map.get(id))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let items = self
            .levels
            .get(level + 1)
            .map(|l| l.items.as_slice())
            .unwrap_or(&[]);
        positions.iter().filter_map(move |&pos| items.get(pos))
    }

    /// Report references that cannot resolve.
    pub fn validate(&self) -> Vec<DataIntegrityWarning> {
        let mut warnings = Vec::new();
        for (i, level) in self.levels.iter().enumerate() {
            for item in &level.items {
                if i == 0 {
                    if !item.sources.is_empty() {
                        warnings.push(DataIntegrityWarning::RootSources {
                            level: level.name.clone(),
                            item: item.id.clone(),
                        });
                    }
                    continue;
                }
                for source in &item.sources {
                    if !self.contains(i - 1, source) {
                        warnings.push(DataIntegrityWarning::DanglingSource {
                            level: level.name.clone(),
                            item: item.id.clone(),
                            source: source.clone(),
                        });
                    }
                }
            }
        }
        warnings
    }
}

/// The three-level catalog of the demo application.
///
/// ```text
/// a0 a1 a2
/// b0{a0} b1{a0,a1} b2{a1,a2}
/// c0{b0} c1{b0,b1} c2{b1,b2}
/// ```
pub fn demo_levels() -> Vec<Level> {
    vec![
        Level::new(
            "a",
            vec![
                Item::new("a0", "Option a0"),
                Item::new("a1", "Option a1"),
                Item::new("a2", "Option a2"),
            ],
        ),
        Level::new(
            "b",
            vec![
                Item::new("b0", "Option b0").with_sources(["a0"]),
                Item::new("b1", "Option b1").with_sources(["a0", "a1"]),
                Item::new("b2", "Option b2").with_sources(["a1", "a2"]),
            ],
        )
        .with_show_sources(true),
        Level::new(
            "c",
            vec![
                Item::new("c0", "Option c0").with_sources(["b0"]),
                Item::new("c1", "Option c1").with_sources(["b0", "b1"]),
                Item::new("c2", "Option c2").with_sources(["b1", "b2"]),
            ],
        )
        .with_show_sources(true),
    ]
}
