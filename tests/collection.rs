//! Integration tests for the book collection.
//!
//! Each test works against a storage file inside its own temp dir and
//! checks both the in-memory state and what was written to disk.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use book_collection::book::Book;
use book_collection::collection::{load, BookCollection, BookUpdate, ReadingProgress, SearchField};
use book_collection::error::CollectionError;

/// Opens an empty collection backed by `books_data.json` in a fresh temp dir.
fn empty_collection() -> (BookCollection, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let collection = BookCollection::open(temp_dir.path().join("books_data.json"));
    (collection, temp_dir)
}

fn stored(collection: &BookCollection) -> Vec<Book> {
    load(collection.path())
}

fn add_all(collection: &mut BookCollection) {
    for book in [
        Book::new("The Hobbit", "J.R.R. Tolkien", "1937", "Fantasy", true),
        Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", false),
        Book::new("The Lord of the Rings", "J.R.R. Tolkien", "1954", "Fantasy", false),
        Book::new("Hyperion", "Dan Simmons", "1989", "Sci-Fi", true),
    ] {
        collection.add(book).expect("Failed to add book");
    }
}

#[test]
fn duplicate_title_is_rejected_in_any_case() {
    let (mut collection, _dir) = empty_collection();
    add_all(&mut collection);

    let err = collection
        .add(Book::new("DUNE", "Someone Else", "2001", "Parody", false))
        .unwrap_err();

    assert!(matches!(err, CollectionError::Duplicate(ref t) if t == "DUNE"));
    assert!(err.is_recoverable());
    assert_eq!(collection.len(), 4);
    assert_eq!(stored(&collection).len(), 4);
}

#[test]
fn add_accepts_digit_year_and_rejects_letters() {
    let (mut collection, _dir) = empty_collection();

    let err = collection
        .add(Book::new("Neuromancer", "William Gibson", "abc", "Cyberpunk", false))
        .unwrap_err();
    assert!(matches!(err, CollectionError::InvalidYear(_)));
    assert!(collection.is_empty());

    collection
        .add(Book::new("Neuromancer", "William Gibson", "2020", "Cyberpunk", false))
        .unwrap();
    assert_eq!(collection.len(), 1);
    assert_eq!(stored(&collection), collection.books());
}

#[test]
fn remove_missing_title_changes_nothing() {
    let (mut collection, _dir) = empty_collection();
    add_all(&mut collection);
    let before = collection.books().to_vec();

    let err = collection.remove("Foundation").unwrap_err();

    assert!(matches!(err, CollectionError::NotFound(_)));
    assert_eq!(collection.books(), before.as_slice());
}

#[test]
fn remove_deletes_only_first_case_insensitive_match() {
    let (_, dir) = empty_collection();
    let path = dir.path().join("dupes.json");
    // Duplicates can only appear through updates or hand-edited files.
    let mut collection = BookCollection::from_books(
        &path,
        vec![
            Book::new("Dune", "Frank Herbert", "1965", "Sci-Fi", true),
            Book::new("Emma", "Jane Austen", "1815", "Romance", false),
            Book::new("DUNE", "Other Author", "2000", "Sci-Fi", false),
        ],
    );

    let removed = collection.remove("dune").unwrap();

    assert_eq!(removed.author, "Frank Herbert");
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.books()[1].title, "DUNE");
    assert_eq!(load(&path), collection.books());
}

#[test]
fn search_title_substring_in_collection_order() {
    let (mut collection, _dir) = empty_collection();
    add_all(&mut collection);

    let titles: Vec<&str> = collection
        .search(SearchField::Title, "THE")
        .iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(titles, vec!["The Hobbit", "The Lord of the Rings"]);

    assert!(collection.search(SearchField::Title, "zzz").is_empty());
}

#[test]
fn search_author_substring() {
    let (mut collection, _dir) = empty_collection();
    add_all(&mut collection);

    let found = collection.search(SearchField::Author, "tolkien");
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|b| b.author == "J.R.R. Tolkien"));
}

#[test]
fn update_with_blank_answers_still_writes_file() {
    let (mut collection, _dir) = empty_collection();
    add_all(&mut collection);
    let before = collection.books().to_vec();

    fs::remove_file(collection.path()).unwrap();
    collection.update("hyperion", BookUpdate::default()).unwrap();

    assert_eq!(collection.books(), before.as_slice());
    assert!(collection.path().exists());
    assert_eq!(stored(&collection), before);
}

#[test]
fn update_changes_fields_and_persists() {
    let (mut collection, _dir) = empty_collection();
    add_all(&mut collection);

    let updated = collection
        .update(
            "dune",
            BookUpdate {
                title: "Dune (Deluxe)".into(),
                year: "2019".into(),
                read: Some(true),
                ..BookUpdate::default()
            },
        )
        .unwrap()
        .clone();

    assert_eq!(
        updated,
        Book::new("Dune (Deluxe)", "Frank Herbert", "2019", "Sci-Fi", true)
    );
    assert_eq!(stored(&collection)[1], updated);
}

#[test]
fn update_missing_title_reports_not_found() {
    let (mut collection, _dir) = empty_collection();
    let err = collection
        .update("Nothing", BookUpdate::default())
        .unwrap_err();
    assert!(matches!(err, CollectionError::NotFound(ref t) if t == "Nothing"));
    assert!(!collection.path().exists());
}

#[test]
fn progress_on_empty_collection_is_zero() {
    let (collection, _dir) = empty_collection();
    let progress = collection.progress();

    assert_eq!(progress, ReadingProgress { total: 0, read: 0 });
    assert_eq!(progress.percent(), 0.0);
    assert!(progress.to_string().ends_with("Reading progress: 0.00%"));
}

#[test]
fn progress_counts_read_books() {
    let (mut collection, _dir) = empty_collection();
    add_all(&mut collection);
    let progress = collection.progress();
    assert_eq!(progress.read, 2);
    assert!(progress.to_string().ends_with("Reading progress: 50.00%"));
}

#[test]
fn export_then_reload_matches_memory() {
    let (mut collection, dir) = empty_collection();
    add_all(&mut collection);
    let target: PathBuf = dir.path().join("exported_books.json");

    collection.export(&target).unwrap();

    let reloaded = BookCollection::open(&target);
    assert_eq!(reloaded.books(), collection.books());
    assert_eq!(collection.path(), dir.path().join("books_data.json"));
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        fs::read_to_string(collection.path()).unwrap()
    );
}

#[test]
fn export_to_unwritable_path_is_fatal() {
    let (collection, dir) = empty_collection();
    let target = dir.path().join("no_such_dir").join("out.json");

    let err = collection.export(&target).unwrap_err();

    assert!(matches!(err, CollectionError::Io(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn corrupt_storage_starts_empty_and_is_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books_data.json");
    fs::write(&path, "[{\"title\": ").unwrap();

    let mut collection = BookCollection::open(&path);
    assert!(collection.is_empty());
    // Untouched until the first write.
    assert_eq!(fs::read_to_string(&path).unwrap(), "[{\"title\": ");

    collection
        .add(Book::new("Emma", "Jane Austen", "1815", "Romance", false))
        .unwrap();
    assert_eq!(load(&path).len(), 1);
}

#[test]
fn numeric_year_survives_load_and_add() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("books_data.json");
    fs::write(
        &path,
        r#"[
    {"title": "Dune", "author": "Frank Herbert", "year": "1965", "genre": "Sci-Fi", "read": true},
    {"title": "Emma", "author": "Jane Austen", "year": "1815", "genre": "Romance", "read": false},
    {"title": "Hyperion", "author": "Dan Simmons", "year": 1989, "genre": "Sci-Fi", "read": true}
]"#,
    )
    .unwrap();

    let mut collection = BookCollection::open(&path);
    assert_eq!(collection.len(), 3);

    collection
        .add(Book::new("Neuromancer", "William Gibson", "1984", "Cyberpunk", false))
        .unwrap();

    let titles: Vec<String> = load(&path).into_iter().map(|b| b.title).collect();
    assert_eq!(titles, vec!["Dune", "Emma", "Hyperion", "Neuromancer"]);
    assert_eq!(load(&path)[2].year, "1989");
}

#[test]
fn search_reports_no_matches_distinctly() {
    let (mut collection, _dir) = empty_collection();
    add_all(&mut collection);

    let found = collection.search_report(SearchField::Title, "dune");
    assert_eq!(found, vec!["Matching Books:", "1. Dune by Frank Herbert (1965) - Sci-Fi - Unread"]);

    let none = collection.search_report(SearchField::Author, "asimov");
    assert_eq!(none, vec!["No matching books found."]);
}

#[test]
fn dune_end_to_end() {
    let (mut collection, _dir) = empty_collection();
    assert!(collection.is_empty());

    collection
        .add(Book::new("Dune", "Herbert", "1965", "Sci-Fi", true))
        .unwrap();
    assert_eq!(
        collection.listing(),
        vec![
            "Your Book Collection:",
            "1. Dune by Herbert (1965) - Sci-Fi - Read",
        ]
    );

    collection.remove("dune").unwrap();
    assert_eq!(collection.listing(), vec!["Your collection is empty."]);

    let reopened = BookCollection::open(collection.path());
    assert!(reopened.is_empty());
}
