//! The fonts shipped with the application.

use std::collections::HashSet;

use bytes::Bytes;
use deepscript_core::logging::targets;
use deepscript_net::services::file_name_of;
use serde::{Deserialize, Serialize};

use super::artifact::{FontArtifact, FontOrigin, TRUETYPE_MIME};

/// One entry of the built-in font catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuiltInFont {
    /// Stable identifier used to select the font.
    pub id: String,
    /// Name shown to the user.
    pub name: String,
    /// Asset path the font file is served from.
    pub path: String,
}

impl BuiltInFont {
    /// Create a catalog entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
        }
    }

    /// Last segment of the asset path.
    pub fn file_name(&self) -> &str {
        file_name_of(&self.path)
    }

    /// Wrap fetched bytes for this font.
    pub fn artifact(&self, bytes: impl Into<Bytes>) -> FontArtifact {
        FontArtifact::new(self.file_name(), TRUETYPE_MIME, bytes, FontOrigin::BuiltIn)
    }
}

/// The available built-in fonts, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontCatalog {
    fonts: Vec<BuiltInFont>,
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::new(vec![BuiltInFont::new(
            "handwriting-1",
            "Handwriting_1",
            "/fonts/hand1.ttf",
        )])
    }
}

impl FontCatalog {
    /// Create a catalog from entries.
    pub fn new(fonts: Vec<BuiltInFont>) -> Self {
        Self { fonts }
    }

    /// Look up a font by id.
    pub fn get(&self, id: &str) -> Option<&BuiltInFont> {
        self.fonts.iter().find(|font| font.id == id)
    }

    /// All entries.
    pub fn fonts(&self) -> &[BuiltInFont] {
        &self.fonts
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Drop entries that cannot be selected or fetched: a blank id or path,
    /// or an id already used by an earlier entry. Returns how many were
    /// dropped.
    pub fn prune(&mut self) -> usize {
        let before = self.fonts.len();
        let mut seen = HashSet::new();
        self.fonts.retain(|font| {
            let reason = if font.id.trim().is_empty() {
                "blank id"
            } else if font.path.trim().is_empty() {
                "blank path"
            } else if !seen.insert(font.id.clone()) {
                "duplicate id"
            } else {
                return true;
            };
            tracing::warn!(target: targets::FONT, id = %font.id, path = %font.path, reason, "catalog entry dropped");
            false
        });
        before - self.fonts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = FontCatalog::default();
        let font = catalog.get("handwriting-1").unwrap();
        assert_eq!(font.name, "Handwriting_1");
        assert_eq!(font.file_name(), "hand1.ttf");
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_prune_keeps_first_of_each_id() {
        let mut catalog = FontCatalog::new(vec![
            BuiltInFont::new("neat", "Neat", "/fonts/neat.ttf"),
            BuiltInFont::new("", "Nameless", "/fonts/x.ttf"),
            BuiltInFont::new("neat", "Neat again", "/fonts/neat2.ttf"),
            BuiltInFont::new("loose", "Loose", " "),
            BuiltInFont::new("tidy", "Tidy", "/fonts/tidy.ttf"),
        ]);

        assert_eq!(catalog.prune(), 3);
        let ids: Vec<&str> = catalog.fonts().iter().map(|font| font.id.as_str()).collect();
        assert_eq!(ids, vec!["neat", "tidy"]);
        assert_eq!(catalog.get("neat").unwrap().path, "/fonts/neat.ttf");
        assert_eq!(catalog.prune(), 0);
    }

    #[test]
    fn test_artifact_naming() {
        let font = BuiltInFont::new("x", "X", "/fonts/x.ttf");
        let artifact = font.artifact(vec![1u8]);
        assert_eq!(artifact.name(), "x.ttf");
        assert_eq!(artifact.origin(), FontOrigin::BuiltIn);
    }
}
