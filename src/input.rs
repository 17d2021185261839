// Pure answer handling. Prompting lives in `ui`; everything here takes the
// raw text the user typed and decides what it means.

use crate::collection::SearchField;

/// Returns `fallback` when `raw` is blank after trimming, otherwise the
/// trimmed input.
pub fn resolve(raw: &str, fallback: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Answer to "Have you read this book?" when adding: only "yes" counts.
pub fn is_yes(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("yes")
}

/// Answer to the same question when updating: "yes"/"no" set the flag,
/// anything else keeps the current value.
pub fn parse_read_answer(raw: &str) -> Option<bool> {
    let answer = raw.trim().to_lowercase();
    match answer.as_str() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}

/// Entries of the main menu, numbered 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Search,
    Update,
    List,
    Progress,
    Export,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Add,
        MenuChoice::Remove,
        MenuChoice::Search,
        MenuChoice::Update,
        MenuChoice::List,
        MenuChoice::Progress,
        MenuChoice::Export,
        MenuChoice::Exit,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Remove),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::Update),
            "5" => Some(MenuChoice::List),
            "6" => Some(MenuChoice::Progress),
            "7" => Some(MenuChoice::Export),
            "8" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add a new book",
            MenuChoice::Remove => "Remove a book",
            MenuChoice::Search => "Search for books",
            MenuChoice::Update => "Update book details",
            MenuChoice::List => "View all books",
            MenuChoice::Progress => "View reading progress",
            MenuChoice::Export => "Export book collection",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// "1" searches titles, "2" searches authors.
pub fn parse_search_field(raw: &str) -> Option<SearchField> {
    match raw.trim() {
        "1" => Some(SearchField::Title),
        "2" => Some(SearchField::Author),
        _ => None,
    }
}
