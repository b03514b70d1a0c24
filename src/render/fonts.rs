use std::collections::BTreeMap;
use std::path::Path;

use ab_glyph::FontArc;
use tokio::fs;

use super::RenderError;

/// Font names offered out of the box and the files they load from
pub const DEFAULT_FONT_FILES: [(&str, &str); 8] = [
    ("Courier New", "cour.ttf"),
    ("Georgia", "georgia.ttf"),
    ("Impact", "impact.ttf"),
    ("Lucida Console", "lucon.ttf"),
    ("Verdana", "verdana.ttf"),
    ("Ebrima", "ebrima.ttf"),
    ("Constantia", "constan.ttf"),
    ("Cambria", "cambria.ttc"),
];

/// Fonts available to the renderer, keyed by display name
pub struct FontCatalog {
    fonts: BTreeMap<String, FontArc>,
    default_name: String,
}

impl FontCatalog {
    /// Load every `(name, file)` entry found under `dir`.
    ///
    /// Files that are missing or unparsable are skipped with a warning so the
    /// server can still start with a partial catalog.
    pub async fn load<P: AsRef<Path>>(
        dir: P,
        entries: &[(String, String)],
        default_name: &str,
    ) -> Self {
        let mut catalog = Self::empty(default_name);

        for (name, file) in entries {
            let path = dir.as_ref().join(file);
            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Font '{}' unavailable at {}: {}", name, path.display(), e);
                    continue;
                }
            };

            match FontArc::try_from_vec(bytes) {
                Ok(font) => catalog.insert(name.clone(), font),
                Err(e) => {
                    tracing::warn!("Font '{}' at {} could not be parsed: {}", name, path.display(), e);
                }
            }
        }

        tracing::info!("Loaded {} fonts", catalog.len());
        catalog
    }

    /// Create an empty catalog (for testing)
    pub fn empty(default_name: &str) -> Self {
        Self {
            fonts: BTreeMap::new(),
            default_name: default_name.to_string(),
        }
    }

    pub fn insert(&mut self, name: String, font: FontArc) {
        self.fonts.insert(name, font);
    }

    /// Loaded font names, sorted alphabetically
    pub fn names(&self) -> Vec<&str> {
        self.fonts.keys().map(String::as_str).collect()
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Look up a font by name.
    ///
    /// Unknown or absent names fall back to the default font, then to the
    /// first font loaded.
    pub fn resolve(&self, name: Option<&str>) -> Result<&FontArc, RenderError> {
        if let Some(font) = name.and_then(|n| self.fonts.get(n)) {
            return Ok(font);
        }
        if let Some(requested) = name {
            tracing::debug!("Font '{}' not loaded, falling back", requested);
        }

        self.fonts
            .get(&self.default_name)
            .or_else(|| self.fonts.values().next())
            .ok_or(RenderError::NoFonts)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Default `(name, file)` table as owned strings
pub fn default_font_entries() -> Vec<(String, String)> {
    DEFAULT_FONT_FILES
        .iter()
        .map(|(name, file)| (name.to_string(), file.to_string()))
        .collect()
}

/// DejaVu Sans Mono, bundled for rendering tests
#[cfg(test)]
pub(crate) fn fixture_font() -> FontArc {
    static BYTES: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/DejaVuSansMono.ttf"
    ));
    FontArc::try_from_slice(BYTES).expect("bundled test font should parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let catalog = FontCatalog::empty("Courier New");
        assert!(catalog.is_empty());
        assert!(catalog.names().is_empty());
        assert!(matches!(catalog.resolve(None), Err(RenderError::NoFonts)));
        assert!(matches!(
            catalog.resolve(Some("Georgia")),
            Err(RenderError::NoFonts)
        ));
    }

    #[test]
    fn test_load_skips_missing_and_invalid_files() {
        let dir = std::env::temp_dir().join(format!("word-search-fonts-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("broken.ttf"), b"not a font").unwrap();

        let entries = vec![
            ("Broken".to_string(), "broken.ttf".to_string()),
            ("Missing".to_string(), "missing.ttf".to_string()),
        ];
        let catalog = tokio_test::block_on(FontCatalog::load(&dir, &entries, "Broken"));

        assert!(catalog.is_empty());
        assert!(!catalog.contains("Broken"));
        assert_eq!(catalog.default_name(), "Broken");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_reads_real_font() {
        let dir = std::env::temp_dir().join(format!("word-search-fonts-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");
        std::fs::copy(fixture, dir.join("mono.ttf")).unwrap();

        let entries = vec![("Mono".to_string(), "mono.ttf".to_string())];
        let catalog = tokio_test::block_on(FontCatalog::load(&dir, &entries, "Courier New"));

        assert_eq!(catalog.names(), vec!["Mono"]);
        // Default is missing, so any request falls back to the loaded font
        assert!(catalog.resolve(Some("Georgia")).is_ok());
        assert!(catalog.resolve(None).is_ok());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_default_entries_match_table() {
        let entries = default_font_entries();
        assert_eq!(entries.len(), DEFAULT_FONT_FILES.len());
        assert_eq!(entries[0], ("Courier New".to_string(), "cour.ttf".to_string()));
    }
}
