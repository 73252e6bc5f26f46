//! Vocabulary items and the working set they live in.

use crate::error::{DeckError, Result};

/// One term pair. Values are stored in the column order of the owning
/// [`Deck`]'s field names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VocabularyItem {
    values: [String; 2],
}

impl VocabularyItem {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            values: [first.into(), second.into()],
        }
    }

    pub fn value(&self, column: usize) -> &str {
        &self.values[column]
    }

    pub fn values(&self) -> &[String; 2] {
        &self.values
    }
}

/// The words not learned yet. Only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    fields: [String; 2],
    items: Vec<VocabularyItem>,
}

impl Deck {
    pub fn new(fields: [String; 2], items: Vec<VocabularyItem>) -> Self {
        Self { fields, items }
    }

    pub fn fields(&self) -> &[String; 2] {
        &self.fields
    }

    pub fn items(&self) -> &[VocabularyItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &VocabularyItem) -> bool {
        self.items.contains(item)
    }

    /// Removes the first item equal to `item`. Duplicates beyond the first
    /// stay in the deck.
    pub fn remove(&mut self, item: &VocabularyItem) -> bool {
        match self.items.iter().position(|x| x == item) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        }
    }
}

/// Which column is asked and which is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRoles {
    pub prompt: usize,
    pub answer: usize,
}

impl Default for FieldRoles {
    fn default() -> Self {
        Self {
            prompt: 0,
            answer: 1,
        }
    }
}

impl FieldRoles {
    /// Picks prompt/answer columns by name. Missing names fall back to the
    /// other column, and with no names at all the first column is the prompt.
    pub fn resolve(fields: &[String; 2], prompt: Option<&str>, answer: Option<&str>) -> Result<Self> {
        let lookup = |name: &str| {
            fields
                .iter()
                .position(|f| f == name)
                .ok_or_else(|| DeckError::UnknownField {
                    name: name.to_owned(),
                    available: fields.clone(),
                })
        };

        let roles = match (prompt, answer) {
            (None, None) => Self::default(),
            (Some(p), None) => {
                let prompt = lookup(p)?;
                Self {
                    prompt,
                    answer: 1 - prompt,
                }
            }
            (None, Some(a)) => {
                let answer = lookup(a)?;
                Self {
                    prompt: 1 - answer,
                    answer,
                }
            }
            (Some(p), Some(a)) => {
                if p == a {
                    return Err(DeckError::SameField(p.to_owned()));
                }
                Self {
                    prompt: lookup(p)?,
                    answer: lookup(a)?,
                }
            }
        };
        Ok(roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> [String; 2] {
        ["English".to_owned(), "Portuguese".to_owned()]
    }

    #[test]
    fn remove_drops_only_one_duplicate() {
        let cat = VocabularyItem::new("cat", "gato");
        let mut deck = Deck::new(
            fields(),
            vec![cat.clone(), VocabularyItem::new("dog", "cão"), cat.clone()],
        );

        assert!(deck.remove(&cat));
        assert_eq!(deck.len(), 2);
        assert!(deck.contains(&cat));
        assert_eq!(deck.items()[0], VocabularyItem::new("dog", "cão"));
    }

    #[test]
    fn remove_missing_item_is_noop() {
        let mut deck = Deck::new(fields(), vec![VocabularyItem::new("dog", "cão")]);
        assert!(!deck.remove(&VocabularyItem::new("cat", "gato")));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn roles_default_to_column_order() {
        assert_eq!(FieldRoles::resolve(&fields(), None, None).unwrap(), FieldRoles::default());
    }

    #[test]
    fn roles_follow_configured_names() {
        let roles = FieldRoles::resolve(&fields(), Some("Portuguese"), None).unwrap();
        assert_eq!(roles, FieldRoles { prompt: 1, answer: 0 });

        let roles = FieldRoles::resolve(&fields(), None, Some("Portuguese")).unwrap();
        assert_eq!(roles, FieldRoles::default());

        let roles = FieldRoles::resolve(&fields(), Some("Portuguese"), Some("English")).unwrap();
        assert_eq!(roles, FieldRoles { prompt: 1, answer: 0 });
    }

    #[test]
    fn roles_reject_unknown_and_equal_names() {
        assert!(matches!(
            FieldRoles::resolve(&fields(), Some("French"), None),
            Err(DeckError::UnknownField { name, .. }) if name == "French"
        ));
        assert!(matches!(
            FieldRoles::resolve(&fields(), Some("English"), Some("English")),
            Err(DeckError::SameField(_))
        ));
    }
}
