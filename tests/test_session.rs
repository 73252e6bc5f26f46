use anyhow::Result;
use flashcard_trainer::config::Settings;
use flashcard_trainer::deck::VocabularyItem;
use flashcard_trainer::error::DeckError;
use flashcard_trainer::timer::{OnReveal, RevealScheduler, RevealTicket, TokioRevealTimer};
use flashcard_trainer::trial::{Face, Phase, Selection, TrialController};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tempfile::{tempdir, TempDir};

const MASTER: &str = "en,pt\ncat,gato\ndog,cão\n";

/// No-op scheduler for tests that drive reveals by hand.
struct Manual;

impl RevealScheduler for Manual {
    fn arm(&mut self, _: RevealTicket, _: Duration) {}
    fn cancel(&mut self) {}
}

fn settings_in(dir: &Path) -> Settings {
    Settings {
        progress_path: dir.join("data").join("words_to_learn.csv"),
        master_path: dir.join("data").join("portuguese_words.csv"),
        ..Settings::default()
    }
}

fn first_run(master: &str) -> Result<(TempDir, Settings)> {
    let dir = tempdir()?;
    let settings = settings_in(dir.path());
    fs::create_dir_all(dir.path().join("data"))?;
    fs::write(&settings.master_path, master)?;
    Ok((dir, settings))
}

fn start(settings: &Settings, scheduler: Box<dyn RevealScheduler>) -> Result<TrialController<StdRng>> {
    let store = settings.store();
    let deck = store.load()?;
    let roles = settings.roles(&deck)?;
    Ok(TrialController::new(
        store,
        deck,
        roles,
        scheduler,
        settings.reveal_delay,
        StdRng::seed_from_u64(42),
    ))
}

#[test]
fn given_first_run_when_learning_all_words_then_progress_is_header_only() -> Result<()> {
    // Arrange
    let (_dir, settings) = first_run(MASTER)?;
    let mut trainer = start(&settings, Box::new(Manual))?;
    trainer.select_next();

    // Act
    assert_eq!(trainer.mark_known()?, Selection::Card);
    let outcome = trainer.mark_known()?;

    // Assert
    assert_eq!(outcome, Selection::Exhausted);
    assert_eq!(fs::read_to_string(&settings.progress_path)?, "en,pt\n");
    assert_eq!(fs::read_to_string(&settings.master_path)?, MASTER);
    Ok(())
}

#[test]
fn given_saved_progress_when_restarting_then_resumes_remaining_words() -> Result<()> {
    // Arrange
    let (_dir, settings) = first_run(MASTER)?;
    let mut trainer = start(&settings, Box::new(Manual))?;
    trainer.select_next();
    let learned = trainer.current().cloned().expect("a card is shown");
    trainer.mark_known()?;
    drop(trainer);

    // Act
    let resumed = start(&settings, Box::new(Manual))?;

    // Assert
    assert_eq!(resumed.remaining(), 1);
    assert!(!resumed.deck().contains(&learned));
    Ok(())
}

#[test]
fn given_everything_learned_when_restarting_then_reports_empty_until_reset() -> Result<()> {
    // Arrange
    let (_dir, settings) = first_run("en,pt\ncat,gato\n")?;
    let mut trainer = start(&settings, Box::new(Manual))?;
    trainer.select_next();
    trainer.mark_known()?;

    // Act
    let result = settings.store().load();

    // Assert
    assert!(matches!(result, Err(DeckError::AllLearned { .. })));
    assert!(settings.store().reset()?);
    assert_eq!(settings.store().load()?.len(), 1);
    Ok(())
}

#[test]
fn given_prompt_field_when_showing_card_then_front_uses_that_column() -> Result<()> {
    // Arrange
    let (_dir, mut settings) = first_run("en,pt\ncat,gato\n")?;
    settings.prompt_field = Some("pt".to_owned());
    let mut trainer = start(&settings, Box::new(Manual))?;

    // Act
    trainer.select_next();
    let front = trainer.view().map(|v| (v.face, v.language.to_owned(), v.word.to_owned()));
    trainer.reveal();
    let back = trainer.view().map(|v| (v.face, v.language.to_owned(), v.word.to_owned()));

    // Assert
    assert_eq!(front, Some((Face::Front, "pt".to_owned(), "gato".to_owned())));
    assert_eq!(back, Some((Face::Back, "en".to_owned(), "cat".to_owned())));
    Ok(())
}

#[test]
fn given_unknown_prompt_field_when_starting_then_fails() -> Result<()> {
    // Arrange
    let (_dir, mut settings) = first_run(MASTER)?;
    settings.prompt_field = Some("fr".to_owned());

    // Act
    let result = start(&settings, Box::new(Manual));

    // Assert
    let err = result.err().expect("unknown field must fail");
    assert!(matches!(
        err.downcast_ref::<DeckError>(),
        Some(DeckError::UnknownField { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn given_two_quick_selections_when_delay_elapses_then_only_second_card_reveals() -> Result<()> {
    // Arrange
    let (_dir, mut settings) = first_run(MASTER)?;
    settings.reveal_delay = Some(Duration::from_millis(50));
    let (tx, rx) = mpsc::channel();
    let on_reveal: OnReveal = Arc::new(move |ticket| {
        let _ = tx.send(ticket);
    });
    let mut trainer = start(&settings, Box::new(TokioRevealTimer::current(on_reveal)))?;

    // Act
    trainer.select_next();
    let first = trainer.ticket();
    trainer.select_next();
    let second = trainer.ticket();
    tokio::time::sleep(Duration::from_millis(300)).await;

    // Assert
    let fired: Vec<_> = rx.try_iter().collect();
    assert_eq!(fired, vec![second]);
    assert!(!trainer.reveal_due(first));
    assert!(trainer.reveal_due(second));
    assert_eq!(trainer.phase(), Phase::Revealed);
    Ok(())
}

#[test]
fn given_skip_when_deck_has_words_then_nothing_is_persisted() -> Result<()> {
    // Arrange
    let (_dir, settings) = first_run(MASTER)?;
    let mut trainer = start(&settings, Box::new(Manual))?;
    trainer.select_next();

    // Act
    for _ in 0..5 {
        trainer.skip();
    }

    // Assert
    assert_eq!(trainer.remaining(), 2);
    assert!(!settings.progress_path.exists());
    assert!(trainer
        .deck()
        .contains(trainer.current().expect("a card is shown")));
    assert_eq!(
        trainer.deck().items(),
        &[VocabularyItem::new("cat", "gato"), VocabularyItem::new("dog", "cão")]
    );
    Ok(())
}

#[test]
fn given_unwritable_progress_when_marking_known_then_state_is_unchanged() -> Result<()> {
    // Arrange
    let (_dir, settings) = first_run(MASTER)?;
    fs::create_dir(&settings.progress_path)?;
    let mut trainer = start(&settings, Box::new(Manual))?;
    trainer.select_next();
    let shown = trainer.current().cloned();

    // Act
    let result = trainer.mark_known();

    // Assert
    assert!(matches!(result, Err(DeckError::Io { .. })));
    assert_eq!(trainer.remaining(), 2);
    assert_eq!(trainer.current().cloned(), shown);
    assert_eq!(trainer.phase(), Phase::Prompt);
    assert!(settings.progress_path.is_dir());
    Ok(())
}
