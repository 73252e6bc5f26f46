use crate::deck::{Deck, FieldRoles};
use crate::error::Result;
use crate::store::DeckStore;
use crate::trial::DEFAULT_REVEAL_DELAY;
use std::path::PathBuf;
use std::time::Duration;

pub const WORDS_TO_LEARN_CSV: &str = "data/words_to_learn.csv";
pub const MASTER_WORDS_CSV: &str = "data/portuguese_words.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub progress_path: PathBuf,
    pub master_path: PathBuf,
    /// column asked on the front of the card, first column if unset
    pub prompt_field: Option<String>,
    /// column shown on the back of the card, the other column if unset
    pub answer_field: Option<String>,
    /// `None` keeps the card on its front until flipped by hand
    pub reveal_delay: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            progress_path: PathBuf::from(WORDS_TO_LEARN_CSV),
            master_path: PathBuf::from(MASTER_WORDS_CSV),
            prompt_field: None,
            answer_field: None,
            reveal_delay: Some(DEFAULT_REVEAL_DELAY),
        }
    }
}

impl Settings {
    pub fn store(&self) -> DeckStore {
        DeckStore::new(&self.progress_path, &self.master_path)
    }

    pub fn roles(&self, deck: &Deck) -> Result<FieldRoles> {
        FieldRoles::resolve(
            deck.fields(),
            self.prompt_field.as_deref(),
            self.answer_field.as_deref(),
        )
    }
}
