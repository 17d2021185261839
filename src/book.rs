// Book record: the one data shape stored in the collection file.
// Field names match the JSON objects on disk exactly.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single book in the collection.
///
/// `year` is kept as text: the only rule applied to it is "digits only"
/// when a book is added, and the file stores it as a JSON string.
///
/// Reading is lenient so hand-edited files still load: a numeric `year`
/// becomes text and missing fields take their empty/`false` defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Book {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub read: bool,
}

/// Accepts `"1965"` or `1965`.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
    })
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Book {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
        }
    }

    /// "Read" or "Unread", as shown in listings.
    pub fn status_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }

    /// Case-insensitive title comparison used for every lookup.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Renders `<title> by <author> (<year>) - <genre> - Read|Unread`.
/// Callers prefix the 1-based position.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status_label()
        )
    }
}

/// A year is accepted when it is non-empty and made only of ASCII digits.
pub fn is_valid_year(year: &str) -> bool {
    !year.is_empty() && year.chars().all(|c| c.is_ascii_digit())
}
