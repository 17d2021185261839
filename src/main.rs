// Entrypoint for the CLI application.
// - Keeps `main` small: open the collection and hand it to the UI loop.
// - Logging is off by default so it never mixes with the prompts;
//   set `RUST_LOG=book_collection=debug` to see it on stderr.

use book_collection::{collection::BookCollection, config::Config, ui::main_menu};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "book_collection=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Storage and export paths come from `BOOK_COLLECTION_FILE` and
    // `BOOK_EXPORT_FILE`, see `config::Config::from_env`.
    let config = Config::from_env();

    // A missing or unreadable storage file just starts an empty collection.
    let collection = BookCollection::open(&config.storage_file);

    // Blocks until the user picks "Exit".
    main_menu(collection, &config)?;
    Ok(())
}
