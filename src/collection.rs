// Book collection: an ordered list of books owned together with the path
// of the JSON file that backs it. Every mutating operation rewrites the
// whole file before returning, so the file always matches memory as of the
// last successful change.

use crate::book::{is_valid_year, Book};
use crate::error::{CollectionError, Result};
use crate::input::resolve;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Field a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
}

/// Raw answers collected by the update prompts. Blank text fields keep the
/// current value; `read` only changes on "yes" or "no".
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub read: Option<bool>,
}

/// Counts behind the "reading progress" screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingProgress {
    pub total: usize,
    pub read: usize,
}

impl ReadingProgress {
    /// Share of books read, 0 to 100. An empty collection is 0%.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.read as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for ReadingProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total books in collection: {}", self.total)?;
        writeln!(f, "Books read: {}", self.read)?;
        write!(f, "Reading progress: {:.2}%", self.percent())
    }
}

#[derive(Debug)]
pub struct BookCollection {
    books: Vec<Book>,
    path: PathBuf,
}

impl BookCollection {
    /// Load the collection stored at `path`. A missing or malformed file
    /// gives an empty collection; the file itself is left alone until the
    /// first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let books = load(&path);
        BookCollection { books, path }
    }

    /// Collection with the given books, backed by `path`. Nothing is written.
    pub fn from_books(path: impl Into<PathBuf>, books: Vec<Book>) -> Self {
        BookCollection {
            books,
            path: path.into(),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the backing file with the current books.
    pub fn persist(&self) -> Result<()> {
        write_books(&self.path, &self.books)?;
        debug!(path = %self.path.display(), count = self.books.len(), "collection persisted");
        Ok(())
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    /// Index of the first book whose title matches, ignoring case.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.books.iter().position(|b| b.title_matches(title))
    }

    /// Append `book` and persist. Rejects a title already present (any
    /// case) and a year that is not all digits.
    pub fn add(&mut self, book: Book) -> Result<()> {
        if self.contains_title(&book.title) {
            return Err(CollectionError::Duplicate(book.title));
        }
        if !is_valid_year(&book.year) {
            return Err(CollectionError::InvalidYear(book.year));
        }
        info!(title = %book.title, "adding book");
        self.books.push(book);
        self.persist()
    }

    /// Remove the first book matching `title` and persist.
    pub fn remove(&mut self, title: &str) -> Result<Book> {
        let index = self
            .position(title)
            .ok_or_else(|| CollectionError::NotFound(title.to_string()))?;
        let removed = self.books.remove(index);
        info!(title = %removed.title, "removed book");
        self.persist()?;
        Ok(removed)
    }

    /// Books whose `field` contains `term`, ignoring case, in collection order.
    pub fn search(&self, field: SearchField, term: &str) -> Vec<&Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|book| {
                let haystack = match field {
                    SearchField::Title => &book.title,
                    SearchField::Author => &book.author,
                };
                haystack.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Apply `changes` to the first book matching `title` and persist, even
    /// when nothing changed. The new year and title are taken as given: no
    /// digit check and no uniqueness check against other books.
    pub fn update(&mut self, title: &str, changes: BookUpdate) -> Result<&Book> {
        let index = self
            .position(title)
            .ok_or_else(|| CollectionError::NotFound(title.to_string()))?;

        let book = &mut self.books[index];
        book.title = resolve(&changes.title, &book.title);
        book.author = resolve(&changes.author, &book.author);
        book.year = resolve(&changes.year, &book.year);
        book.genre = resolve(&changes.genre, &book.genre);
        if let Some(read) = changes.read {
            book.read = read;
        }
        info!(title = %book.title, "updated book");

        self.persist()?;
        Ok(&self.books[index])
    }

    /// Lines shown for "View all books": a heading and every book numbered
    /// from 1, or a single line saying the collection is empty.
    pub fn listing(&self) -> Vec<String> {
        if self.books.is_empty() {
            return vec!["Your collection is empty.".to_string()];
        }
        let mut lines = vec!["Your Book Collection:".to_string()];
        lines.extend(numbered(self.books.iter()));
        lines
    }

    /// Lines shown for a search. No matches gets its own message rather
    /// than an empty list.
    pub fn search_report(&self, field: SearchField, term: &str) -> Vec<String> {
        let found = self.search(field, term);
        if found.is_empty() {
            return vec!["No matching books found.".to_string()];
        }
        let mut lines = vec!["Matching Books:".to_string()];
        lines.extend(numbered(found));
        lines
    }

    pub fn progress(&self) -> ReadingProgress {
        ReadingProgress {
            total: self.books.len(),
            read: self.books.iter().filter(|b| b.read).count(),
        }
    }

    /// Write a copy of the in-memory books to `target`. The backing file
    /// path is not changed.
    pub fn export(&self, target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        write_books(target, &self.books)?;
        info!(path = %target.display(), count = self.books.len(), "collection exported");
        Ok(())
    }
}

/// `1. <book>`, `2. <book>`, ... in iteration order.
pub fn numbered<'a>(books: impl IntoIterator<Item = &'a Book>) -> Vec<String> {
    books
        .into_iter()
        .enumerate()
        .map(|(index, book)| format!("{}. {}", index + 1, book))
        .collect()
}

/// Read the books stored at `path`. A missing file or anything other than
/// a JSON array yields an empty list. Records are read one by one, so a
/// single record that cannot be read as a book is skipped without losing
/// the rest.
pub fn load(path: &Path) -> Vec<Book> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable collection file, starting empty");
            return Vec::new();
        }
    };
    let records: Vec<serde_json::Value> = match serde_json::from_str(&data) {
        Ok(records) => records,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "malformed collection file, starting empty");
            return Vec::new();
        }
    };
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(book) => Some(book),
            Err(e) => {
                debug!(path = %path.display(), index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect()
}

/// Write `books` as a JSON array indented with four spaces, replacing
/// whatever is at `path`.
pub fn write_books(path: &Path, books: &[Book]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    books.serialize(&mut serializer)?;
    fs::write(path, buf)?;
    Ok(())
}
