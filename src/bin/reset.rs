use anyhow::Result;
use clap::Parser;
use flashcard_trainer::config::WORDS_TO_LEARN_CSV;
use flashcard_trainer::store::DeckStore;
use std::path::PathBuf;

/// Forget all progress: the next session starts from the full dataset again.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Args {
    #[arg(long, default_value = WORDS_TO_LEARN_CSV)]
    progress: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info) // Set the minimum log level
        .init();

    let args = Args::parse();
    // the master dataset is never touched here
    let store = DeckStore::new(&args.progress, PathBuf::new());
    if store.reset()? {
        println!("removed {:?}", args.progress);
    } else {
        println!("no progress at {:?}", args.progress);
    }
    Ok(())
}
