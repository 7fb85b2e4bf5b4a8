//! Core data structures for the rabbit-hole page graph

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Template for pages added without an explicit address.
pub const URL_TEMPLATE: &str = "https://en.wikipedia.org/wiki/";

/// Derive the canonical address for a title: spaces become underscores,
/// embedded in the fixed article template. Pure, no side effects; an
/// explicit `url` argument to `add_page` overrides it.
pub fn default_url(title: &str) -> String {
    format!("{}{}", URL_TEMPLATE, title.replace(' ', "_"))
}

/// One explored page.
///
/// The title is the store key; it is carried on the record in memory for
/// convenience but never serialized (the snapshot keys the map by title).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(skip)]
    pub title: String,
    /// Page address. May be the empty string when the user explicitly
    /// recorded a page without one; rendering must then omit the link.
    pub url: String,
    /// Set once when the page is first added, never mutated.
    #[serde(rename = "timestamp")]
    pub visited_at: DateTime<Utc>,
    /// Child titles in insertion order, no duplicates.
    pub children: Vec<String>,
}

impl PageRecord {
    pub fn new(title: impl Into<String>, url: Option<&str>) -> Self {
        let title = title.into();
        let url = match url {
            Some(u) => u.to_string(),
            None => default_url(&title),
        };
        PageRecord {
            title,
            url,
            visited_at: Utc::now(),
            children: Vec::new(),
        }
    }

    /// Whether a clickable link should be offered for this page.
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// The full serializable state of a store, used for persistence
/// round-trips. Shape is a stable contract:
///
/// ```json
/// { "pages": { "<title>": { "url": "...", "timestamp": "...", "children": [...] } } }
/// ```
///
/// Entries keep the store's insertion order, and the written document keeps
/// it too, so a reloaded session lists pages the way they were recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pages: Vec<(String, PageRecord)>,
}

impl Snapshot {
    /// Add or replace an entry. Later entries for the same title win, so a
    /// hand-edited file with a duplicate key cannot produce two records.
    pub fn insert(&mut self, title: String, record: PageRecord) {
        match self.pages.iter_mut().find(|(t, _)| *t == title) {
            Some((_, existing)) => *existing = record,
            None => self.pages.push((title, record)),
        }
    }

    pub fn get(&self, title: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|(t, _)| t == title).map(|(_, r)| r)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut PageRecord> {
        self.pages
            .iter_mut()
            .find(|(t, _)| t == title)
            .map(|(_, r)| r)
    }

    /// Iterate entries in recorded order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageRecord)> {
        self.pages.iter().map(|(t, r)| (t.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

// Serialized by hand: a derived map type would either sort the titles or
// drop the recorded order on reload.
impl Serialize for Snapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{SerializeMap, SerializeStruct};

        struct Pages<'a>(&'a [(String, PageRecord)]);

        impl Serialize for Pages<'_> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let mut map = serializer.serialize_map(Some(self.0.len()))?;
                for (title, record) in self.0 {
                    map.serialize_entry(title, record)?;
                }
                map.end()
            }
        }

        let mut state = serializer.serialize_struct("Snapshot", 1)?;
        state.serialize_field("pages", &Pages(&self.pages))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{IgnoredAny, MapAccess, Visitor};

        struct Pages(Vec<(String, PageRecord)>);

        impl<'de> Deserialize<'de> for Pages {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct PagesVisitor;

                impl<'de> Visitor<'de> for PagesVisitor {
                    type Value = Pages;

                    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        f.write_str("a map of title to page record")
                    }

                    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
                    where
                        A: MapAccess<'de>,
                    {
                        let mut entries = Snapshot::default();
                        while let Some((title, record)) =
                            access.next_entry::<String, PageRecord>()?
                        {
                            entries.insert(title, record);
                        }
                        Ok(Pages(entries.pages))
                    }
                }

                deserializer.deserialize_map(PagesVisitor)
            }
        }

        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = Snapshot;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a snapshot with a pages map")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pages = None;
                while let Some(key) = access.next_key::<String>()? {
                    if key == "pages" {
                        pages = Some(access.next_value::<Pages>()?.0);
                    } else {
                        access.next_value::<IgnoredAny>()?;
                    }
                }
                Ok(Snapshot {
                    pages: pages.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_struct("Snapshot", &["pages"], SnapshotVisitor)
    }
}

/// A 2-D coordinate assigned by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One parent→child relation with both endpoints resolved to coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub parent: String,
    pub child: String,
    pub from: Point,
    pub to: Point,
}

/// Node positions and drawable edge segments for one forest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub positions: HashMap<String, Point>,
    pub edges: Vec<LayoutEdge>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
