//! Texture to cleaner product lookup.

use crate::schema::CLEANER_SUFFIX;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only mapping from uppercase texture code to cleaner product id.
///
/// Cheap to clone; all clones share the same table. Textures without an
/// entry resolve to `{TEXTURE}-CLEANNER`.
#[derive(Debug, Clone, Default)]
pub struct CleanerLookup {
    entries: Arc<HashMap<String, String>>,
}

impl CleanerLookup {
    /// Create a lookup from `(texture, cleaner)` pairs.
    ///
    /// Texture keys are uppercased so they match decoded textures.
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(texture, cleaner)| (texture.as_ref().to_uppercase(), cleaner.into()))
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }

    /// Cleaner product id for an uppercase texture code.
    pub fn resolve(&self, texture: &str) -> String {
        match self.entries.get(texture) {
            Some(cleaner) => cleaner.clone(),
            None => format!("{}{}", texture, CLEANER_SUFFIX),
        }
    }

    /// Number of configured textures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_configured_texture() {
        let lookup = CleanerLookup::new([("CLEAR", "CLEAR-CLEANER-KIT")]);
        assert_eq!(lookup.resolve("CLEAR"), "CLEAR-CLEANER-KIT");
    }

    #[test]
    fn test_resolve_unmapped_texture() {
        let lookup = CleanerLookup::default();
        assert!(lookup.is_empty());
        assert_eq!(lookup.resolve("MATTE"), "MATTE-CLEANNER");
    }

    #[test]
    fn test_keys_are_uppercased() {
        let lookup = CleanerLookup::new([("privacy", "PRIVACY-CLEANNER")]);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.resolve("PRIVACY"), "PRIVACY-CLEANNER");
    }
}
