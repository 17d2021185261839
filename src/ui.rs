// UI layer: a numbered text menu. Answers come from a `Prompt`: dialoguer
// when a person is at the terminal, plain lines from stdin when input is
// piped. Each handler collects answers, calls one `BookCollection`
// operation and prints the outcome. Write failures are returned and end
// the session.

use crate::book::{is_valid_year, Book};
use crate::collection::{BookCollection, BookUpdate, ReadingProgress};
use crate::config::Config;
use crate::error::CollectionError;
use crate::input::{is_yes, parse_read_answer, parse_search_field, resolve, MenuChoice};
use anyhow::{Context, Result};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, Write};
use thiserror::Error;

/// Source of answers for the menu.
pub trait Prompt {
    /// Ask `text` and return the trimmed answer, or `None` once there is
    /// no more input.
    fn ask(&mut self, text: &str) -> Result<Option<String>>;

    /// Ask until `valid` accepts the answer, printing `error` after each
    /// rejected one.
    fn ask_until(
        &mut self,
        text: &str,
        valid: fn(&str) -> bool,
        error: &str,
    ) -> Result<Option<String>> {
        loop {
            match self.ask(text)? {
                Some(answer) if valid(&answer) => return Ok(Some(answer)),
                Some(_) => println!("{}", error),
                None => return Ok(None),
            }
        }
    }
}

/// Interactive prompts on the terminal.
#[derive(Debug, Default)]
pub struct Terminal;

impl Prompt for Terminal {
    fn ask(&mut self, text: &str) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(text)
            .allow_empty(true)
            .interact_text()?;
        Ok(Some(answer.trim().to_string()))
    }

    fn ask_until(
        &mut self,
        text: &str,
        valid: fn(&str) -> bool,
        error: &str,
    ) -> Result<Option<String>> {
        let answer: String = Input::new()
            .with_prompt(text)
            .allow_empty(true)
            .validate_with(|answer: &String| -> Result<(), String> {
                if valid(answer.trim()) {
                    Ok(())
                } else {
                    Err(error.to_string())
                }
            })
            .interact_text()?;
        Ok(Some(answer.trim().to_string()))
    }
}

/// Line-by-line answers from any reader, used when stdin is not a terminal.
/// The prompt text is still echoed to stdout.
#[derive(Debug)]
pub struct Lines<R> {
    reader: R,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Lines { reader }
    }
}

impl<R: BufRead> Prompt for Lines<R> {
    fn ask(&mut self, text: &str) -> Result<Option<String>> {
        print!("{}: ", text);
        io::stdout().flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Raised inside a handler when input runs out; the menu treats it as Exit.
#[derive(Debug, Error)]
#[error("input ended")]
struct EndOfInput;

fn ask(prompt: &mut impl Prompt, text: &str) -> Result<String> {
    prompt
        .ask(text)?
        .ok_or_else(|| anyhow::Error::new(EndOfInput))
}

fn ask_until(
    prompt: &mut impl Prompt,
    text: &str,
    valid: fn(&str) -> bool,
    error: &str,
) -> Result<String> {
    prompt
        .ask_until(text, valid, error)?
        .ok_or_else(|| anyhow::Error::new(EndOfInput))
}

fn ask_required(prompt: &mut impl Prompt, text: &str) -> Result<String> {
    ask_until(prompt, text, |answer: &str| !answer.is_empty(), "Please enter a value.")
}

/// Main interactive menu. Uses dialoguer prompts when both stdin and
/// stderr are terminals, otherwise reads answers line by line from stdin.
pub fn main_menu(mut collection: BookCollection, config: &Config) -> Result<()> {
    if io::stdin().is_terminal() && console::user_attended_stderr() {
        run_menu(&mut collection, config, &mut Terminal)
    } else {
        let stdin = io::stdin();
        run_menu(&mut collection, config, &mut Lines::new(stdin.lock()))
    }
}

/// Run the menu until the user chooses "Exit" or input ends, then persist
/// the collection one last time.
pub fn run_menu(
    collection: &mut BookCollection,
    config: &Config,
    prompt: &mut impl Prompt,
) -> Result<()> {
    if let Err(e) = menu_loop(collection, config, prompt) {
        if !e.is::<EndOfInput>() {
            return Err(e);
        }
    }
    collection
        .persist()
        .with_context(|| format!("Failed to save {}", collection.path().display()))?;
    println!("Thank you for using Book Collection Manager. Goodbye!");
    Ok(())
}

fn menu_loop(
    collection: &mut BookCollection,
    config: &Config,
    prompt: &mut impl Prompt,
) -> Result<()> {
    loop {
        print_menu();
        let raw = ask(prompt, "Please choose an option (1-8)")?;
        let Some(choice) = MenuChoice::parse(&raw) else {
            println!("Invalid choice. Please try again.\n");
            continue;
        };
        match choice {
            MenuChoice::Add => handle_add(collection, prompt)?,
            MenuChoice::Remove => handle_remove(collection, prompt)?,
            MenuChoice::Search => handle_search(collection, prompt)?,
            MenuChoice::Update => handle_update(collection, prompt)?,
            MenuChoice::List => show_all(collection),
            MenuChoice::Progress => show_progress(&collection.progress())?,
            MenuChoice::Export => handle_export(collection, config, prompt)?,
            MenuChoice::Exit => return Ok(()),
        }
    }
}

fn print_menu() {
    println!("📚 Welcome to Your Book Collection Manager! 📚");
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, choice.label());
    }
}

/// Print a recoverable error as `message`; anything else is fatal.
fn report(err: CollectionError, message: &str) -> Result<()> {
    if err.is_recoverable() {
        println!("{}\n", message);
        Ok(())
    } else {
        Err(err.into())
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
    println!();
}

fn handle_add(collection: &mut BookCollection, prompt: &mut impl Prompt) -> Result<()> {
    // Duplicate titles are caught before asking for the rest of the book.
    let title = ask_required(prompt, "Enter book title")?;
    if collection.contains_title(&title) {
        println!("This book already exists in the collection.\n");
        return Ok(());
    }

    let author = ask_required(prompt, "Enter author")?;
    let year = ask_until(
        prompt,
        "Enter publication year",
        is_valid_year,
        "Please enter a valid year.",
    )?;
    let genre = ask_required(prompt, "Enter genre")?;
    let read = is_yes(&ask(prompt, "Have you read this book? (yes/no)")?);

    let book = Book::new(title, author, year, genre, read);
    match collection.add(book) {
        Ok(()) => println!("Book added successfully!\n"),
        Err(e @ CollectionError::InvalidYear(_)) => report(e, "Please enter a valid year.")?,
        Err(e) => report(e, "This book already exists in the collection.")?,
    }
    Ok(())
}

fn handle_remove(collection: &mut BookCollection, prompt: &mut impl Prompt) -> Result<()> {
    let title = ask(prompt, "Enter the title of the book to remove")?;
    match collection.remove(&title) {
        Ok(_) => println!("Book removed successfully!\n"),
        Err(e) => report(e, "Book not found!")?,
    }
    Ok(())
}

fn handle_search(collection: &BookCollection, prompt: &mut impl Prompt) -> Result<()> {
    println!("Search by:\n1. Title\n2. Author");
    let mode = ask(prompt, "Enter your choice")?;
    let term = ask(prompt, "Enter search term")?;
    let Some(field) = parse_search_field(&mode) else {
        println!("Invalid option.\n");
        return Ok(());
    };
    print_lines(&collection.search_report(field, &term));
    Ok(())
}

fn handle_update(collection: &mut BookCollection, prompt: &mut impl Prompt) -> Result<()> {
    let title = ask(prompt, "Enter the title of the book you want to edit")?;
    let Some(index) = collection.position(&title) else {
        println!("Book not found!\n");
        return Ok(());
    };
    let current = collection.books()[index].clone();

    println!("Leave blank to keep existing value.");
    let changes = BookUpdate {
        title: ask(prompt, &format!("New title ({})", current.title))?,
        author: ask(prompt, &format!("New author ({})", current.author))?,
        year: ask(prompt, &format!("New year ({})", current.year))?,
        genre: ask(prompt, &format!("New genre ({})", current.genre))?,
        read: parse_read_answer(&ask(prompt, "Have you read this book? (yes/no)")?),
    };
    match collection.update(&current.title, changes) {
        Ok(_) => println!("Book updated successfully!\n"),
        Err(e) => report(e, "Book not found!")?,
    }
    Ok(())
}

fn show_all(collection: &BookCollection) {
    print_lines(&collection.listing());
}

fn show_progress(progress: &ReadingProgress) -> Result<()> {
    println!("{}\n", progress);
    if progress.total == 0 {
        return Ok(());
    }
    // The bar is drawn on stderr and hidden when that is not a terminal.
    let bar = ProgressBar::new(progress.total as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:30}] {pos}/{len} read")
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );
    bar.set_position(progress.read as u64);
    bar.abandon();
    Ok(())
}

fn handle_export(
    collection: &BookCollection,
    config: &Config,
    prompt: &mut impl Prompt,
) -> Result<()> {
    let raw = ask(
        prompt,
        &format!("Enter export filename (default: {})", config.export_file),
    )?;
    let target = resolve(&raw, &config.export_file);
    collection
        .export(&target)
        .with_context(|| format!("Failed to export to {}", target))?;
    println!("Books exported to {}\n", target);
    Ok(())
}
