// Runtime configuration. Both values have defaults, so running with no
// environment set behaves like the plain book manager.

use std::path::PathBuf;

pub const DEFAULT_STORAGE_FILE: &str = "books_data.json";
pub const DEFAULT_EXPORT_FILE: &str = "exported_books.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// File the collection is loaded from and rewritten after each change.
    pub storage_file: PathBuf,
    /// Export target offered when the user leaves the export prompt blank.
    pub export_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_file: PathBuf::from(DEFAULT_STORAGE_FILE),
            export_file: DEFAULT_EXPORT_FILE.to_string(),
        }
    }
}

impl Config {
    /// Build a config from `BOOK_COLLECTION_FILE` and `BOOK_EXPORT_FILE`,
    /// falling back to the defaults for anything unset or blank.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();
        Config {
            storage_file: non_blank("BOOK_COLLECTION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_file),
            export_file: non_blank("BOOK_EXPORT_FILE").unwrap_or(defaults.export_file),
        }
    }
}
