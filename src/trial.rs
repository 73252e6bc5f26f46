//! The card in front of the learner and what happens to it.
//!
//! ```text
//! Idle --select_next--> Prompt --reveal--> Revealed
//!                         ^                   |
//!                         +-- skip / known ---+
//! ```

use crate::deck::{Deck, FieldRoles, VocabularyItem};
use crate::error::{DeckError, Result};
use crate::store::DeckStore;
use crate::timer::{RevealScheduler, RevealTicket};
use log::*;
use rand::Rng;
use std::time::Duration;

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Prompt,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Card,
    /// Nothing left to learn.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
}

/// What the display surface should show right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardFace<'a> {
    pub face: Face,
    pub language: &'a str,
    pub word: &'a str,
}

pub struct TrialController<R> {
    store: DeckStore,
    deck: Deck,
    roles: FieldRoles,
    current: Option<VocabularyItem>,
    phase: Phase,
    ticket: RevealTicket,
    scheduler: Box<dyn RevealScheduler>,
    /// `None` disables the automatic reveal.
    reveal_delay: Option<Duration>,
    rng: R,
}

impl<R: Rng> TrialController<R> {
    pub fn new(
        store: DeckStore,
        deck: Deck,
        roles: FieldRoles,
        scheduler: Box<dyn RevealScheduler>,
        reveal_delay: Option<Duration>,
        rng: R,
    ) -> Self {
        Self {
            store,
            deck,
            roles,
            current: None,
            phase: Phase::Idle,
            ticket: RevealTicket::default(),
            scheduler,
            reveal_delay,
            rng,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn remaining(&self) -> usize {
        self.deck.len()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> Option<&VocabularyItem> {
        self.current.as_ref()
    }

    pub fn ticket(&self) -> RevealTicket {
        self.ticket
    }

    pub fn prompt_language(&self) -> &str {
        &self.deck.fields()[self.roles.prompt]
    }

    pub fn answer_language(&self) -> &str {
        &self.deck.fields()[self.roles.answer]
    }

    pub fn select_next(&mut self) -> Selection {
        self.scheduler.cancel();
        self.ticket = self.ticket.next();

        if self.deck.is_empty() {
            info!("deck exhausted");
            self.current = None;
            self.phase = Phase::Idle;
            return Selection::Exhausted;
        }

        let i = self.rng.random_range(0..self.deck.len());
        let item = self.deck.items()[i].clone();
        debug!("showing {:?} ({} left)", item, self.deck.len());
        self.current = Some(item);
        self.phase = Phase::Prompt;

        if let Some(delay) = self.reveal_delay {
            self.scheduler.arm(self.ticket, delay);
        }
        Selection::Card
    }

    pub fn reveal(&mut self) {
        if self.phase == Phase::Prompt {
            debug!("revealing {:?}", self.current);
            self.phase = Phase::Revealed;
        }
    }

    /// Timer expiry. Returns whether the card was flipped; tickets of cards
    /// that are no longer shown are ignored.
    pub fn reveal_due(&mut self, ticket: RevealTicket) -> bool {
        if ticket != self.ticket || self.phase != Phase::Prompt {
            trace!("ignoring {ticket:?}, current is {:?}", self.ticket);
            return false;
        }
        self.reveal();
        true
    }

    /// The learner knew the word: drop it from the deck, persist, move on.
    pub fn mark_known(&mut self) -> Result<Selection> {
        let item = self.current.as_ref().ok_or(DeckError::NoCurrentCard)?;
        // nothing changes in memory unless the shrunk deck made it to disk
        let mut remaining = self.deck.clone();
        remaining.remove(item);
        self.store.save(&remaining)?;
        info!("learned {:?}, {} left", item, remaining.len());
        self.deck = remaining;
        Ok(self.select_next())
    }

    /// The learner did not know the word yet.
    pub fn skip(&mut self) -> Selection {
        debug!("skipping {:?}", self.current);
        self.select_next()
    }

    pub fn view(&self) -> Option<CardFace<'_>> {
        let item = self.current.as_ref()?;
        let (face, column) = match self.phase {
            Phase::Idle => return None,
            Phase::Prompt => (Face::Front, self.roles.prompt),
            Phase::Revealed => (Face::Back, self.roles.answer),
        };
        Some(CardFace {
            face,
            language: &self.deck.fields()[column],
            word: item.value(column),
        })
    }
}
