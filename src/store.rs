//! Progress persistence.
//!
//! The working set lives in a two column CSV (header + one row per word).
//! On first run there is no progress file yet and the master dataset is read
//! instead; every `save` rewrites the progress file in full.

use crate::deck::{Deck, VocabularyItem};
use crate::error::{DeckError, Result};
use log::*;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, serde::Deserialize)]
struct Row(String, String);

#[derive(Debug, Clone)]
pub struct DeckStore {
    progress_path: PathBuf,
    master_path: PathBuf,
}

impl DeckStore {
    pub fn new(progress_path: impl Into<PathBuf>, master_path: impl Into<PathBuf>) -> Self {
        Self {
            progress_path: progress_path.into(),
            master_path: master_path.into(),
        }
    }

    #[cfg(test)]
    fn progress_path(&self) -> &Path {
        &self.progress_path
    }

    #[cfg(test)]
    fn master_path(&self) -> &Path {
        &self.master_path
    }

    pub fn load(&self) -> Result<Deck> {
        let (path, file) = match File::open(&self.progress_path) {
            Ok(file) => {
                info!("resuming from {:?}", self.progress_path);
                (&self.progress_path, file)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("{:?} not found, starting from {:?}", self.progress_path, self.master_path);
                let file = File::open(&self.master_path).map_err(|source| {
                    DeckError::StorageUnavailable {
                        progress: self.progress_path.clone(),
                        master: self.master_path.clone(),
                        source,
                    }
                })?;
                (&self.master_path, file)
            }
            Err(source) => {
                return Err(DeckError::Io {
                    path: self.progress_path.clone(),
                    source,
                })
            }
        };

        let deck = read_deck(path, file)?;
        if deck.is_empty() {
            let path = path.clone();
            return Err(if path == self.progress_path {
                DeckError::AllLearned { path }
            } else {
                DeckError::Empty { path }
            });
        }
        info!("loaded {} words from {:?}", deck.len(), path);
        Ok(deck)
    }

    /// Overwrites the progress file with `deck`. The rows go to a temporary
    /// file next to it first, which is then renamed into place.
    pub fn save(&self, deck: &Deck) -> Result<()> {
        let io_err = |source| DeckError::Io {
            path: self.progress_path.clone(),
            source,
        };

        let dir = match self.progress_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(io_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        write_deck(&self.progress_path, tmp.as_file_mut(), deck)?;
        tmp.as_file_mut().flush().map_err(io_err)?;
        tmp.persist(&self.progress_path)
            .map_err(|e| io_err(e.error))?;

        info!("saved {} words to {:?}", deck.len(), self.progress_path);
        Ok(())
    }

    /// Deletes the progress file. Returns whether there was one.
    pub fn reset(&self) -> Result<bool> {
        match fs::remove_file(&self.progress_path) {
            Ok(()) => {
                info!("removed {:?}", self.progress_path);
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(DeckError::Io {
                path: self.progress_path.clone(),
                source,
            }),
        }
    }
}

fn read_deck(path: &Path, file: File) -> Result<Deck> {
    let csv_err = |source| DeckError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let malformed = |line, reason: &str| DeckError::Malformed {
        path: path.to_path_buf(),
        line,
        reason: reason.to_owned(),
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let headers = rdr.headers().map_err(csv_err)?;
    if headers.len() != 2 {
        return Err(malformed(
            1,
            &format!("expected 2 columns, found {}", headers.len()),
        ));
    }
    let fields = [headers[0].to_owned(), headers[1].to_owned()];
    if fields.iter().any(String::is_empty) {
        return Err(malformed(1, "empty column name"));
    }
    if fields[0] == fields[1] {
        return Err(malformed(1, "both columns have the same name"));
    }

    let mut items = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map_or(0, |p| p.line());
        let Row(first, second) = record.deserialize::<Row>(None).map_err(csv_err)?;
        if first.is_empty() || second.is_empty() {
            return Err(malformed(line, "missing value"));
        }
        items.push(VocabularyItem::new(first, second));
    }
    debug!("{:?}: columns {:?}, {} rows", path, fields, items.len());

    Ok(Deck::new(fields, items))
}

fn write_deck(path: &Path, file: &mut File, deck: &Deck) -> Result<()> {
    let csv_err = |source| DeckError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    wtr.write_record(deck.fields()).map_err(csv_err)?;
    for item in deck.items() {
        wtr.write_record(item.values()).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
