use anyhow::Context;
use anyhow::Result;
use chrono::prelude::*;
use clap::Parser;
use cursive::style::{BorderStyle, Palette};
use cursive::traits::*;
use cursive::utils::markup::StyledString;
use cursive::views::Button;
use cursive::views::Dialog;
use cursive::views::LinearLayout;
use cursive::views::TextView;
use cursive::Cursive;
use cursive::CursiveExt;
use env_logger::Target;
use flashcard_trainer::config::{Settings, MASTER_WORDS_CSV, WORDS_TO_LEARN_CSV};
use flashcard_trainer::error::DeckError;
use flashcard_trainer::log_dir;
use flashcard_trainer::timer::{OnReveal, TokioRevealTimer};
use flashcard_trainer::trial::{Face, Selection, TrialController, DEFAULT_REVEAL_DELAY};
use log::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

static CARD: &str = "card";
static FACE: &str = "face";
static WORD: &str = "word";
static STATUS: &str = "status";

#[derive(Parser, Debug)]
#[command(author, version, about = "Vocabulary flashcards in the terminal")]
struct Args {
    /// words still to learn, rewritten after every known word
    #[arg(long, default_value = WORDS_TO_LEARN_CSV)]
    progress: PathBuf,

    /// full dataset, read when there is no progress yet
    #[arg(long, default_value = MASTER_WORDS_CSV)]
    master: PathBuf,

    /// column shown on the front (default: first column)
    #[arg(long)]
    prompt: Option<String>,

    /// column shown on the back (default: the other column)
    #[arg(long)]
    answer: Option<String>,

    #[arg(long, default_value_t = DEFAULT_REVEAL_DELAY.as_millis() as u64)]
    delay_ms: u64,

    /// only flip cards by hand
    #[arg(long, default_value_t = false)]
    no_auto_reveal: bool,

    #[arg(long, default_value_t = false)]
    show_path: bool,

    /// -v = debug, -vv = trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn settings(&self) -> Settings {
        Settings {
            progress_path: self.progress.clone(),
            master_path: self.master.clone(),
            prompt_field: self.prompt.clone(),
            answer_field: self.answer.clone(),
            reveal_delay: if self.no_auto_reveal {
                None
            } else {
                Some(Duration::from_millis(self.delay_ms))
            },
        }
    }
}

struct Session {
    controller: TrialController<StdRng>,
    failure: Option<DeckError>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = args.settings();

    if args.show_path {
        println!("progress file             {:?}", settings.progress_path);
        println!("master dataset            {:?}", settings.master_path);
        println!("log dir                   {:?}", log_dir()?);
        return Ok(());
    }

    let local: DateTime<Local> = Local::now();
    let log_path = log_dir()?.join(format!("log.{}", local.to_rfc3339()));
    let log_file = Box::new(
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {:?}", log_path))?,
    );
    println!("log file: {:?}", log_path);

    env_logger::Builder::from_default_env()
        .target(Target::Pipe(log_file))
        .filter_level(match args.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let store = settings.store();
    let deck = store.load()?;
    let roles = settings.roles(&deck)?;

    let mut siv = Cursive::default();

    let cb_sink = siv.cb_sink().clone();
    let on_reveal: OnReveal = Arc::new(move |ticket| {
        let _ = cb_sink.send(Box::new(move |s: &mut Cursive| {
            let flipped = s.with_user_data(|session: &mut Session| {
                session.controller.reveal_due(ticket)
            });
            if flipped == Some(true) {
                render(s);
            }
        }));
    });

    let mut controller = TrialController::new(
        store,
        deck,
        roles,
        Box::new(TokioRevealTimer::current(on_reveal)),
        settings.reveal_delay,
        StdRng::from_os_rng(),
    );
    info!(
        "asking {} -> {}, {} words",
        controller.prompt_language(),
        controller.answer_language(),
        controller.remaining()
    );
    controller.select_next();
    siv.set_user_data(Session {
        controller,
        failure: None,
    });

    // Start with a nicer theme than default
    siv.set_theme(cursive::theme::Theme {
        shadow: true,
        borders: BorderStyle::Simple,
        palette: Palette::retro().with(|palette| {
            use cursive::style::BaseColor::*;
            use cursive::style::Color::TerminalDefault;
            use cursive::style::PaletteColor::*;

            palette[Background] = TerminalDefault;
            palette[View] = TerminalDefault;
            palette[Primary] = White.dark();
            palette[TitlePrimary] = Blue.light();
            palette[Secondary] = Blue.light();
            palette[Highlight] = Blue.dark();
        }),
    });

    siv.add_fullscreen_layer(
        Dialog::around(
            LinearLayout::vertical()
                .child(TextView::new("").center().with_name(FACE))
                .child(TextView::new("").center().with_name(WORD).full_height())
                .child(TextView::new("").center().with_name(STATUS))
                .child(buttons_layout()),
        )
        .h_align(cursive::align::HAlign::Center)
        .with_name(CARD),
    );
    siv.add_global_callback('k', know);
    siv.add_global_callback('j', skip);
    siv.add_global_callback('f', flip);
    siv.add_global_callback('q', |s| s.quit());
    render(&mut siv);

    siv.run();

    let session: Session = siv
        .take_user_data()
        .context("session state lost")?;
    if let Some(e) = session.failure {
        return Err(e.into());
    }
    println!("{} words left", session.controller.remaining());
    Ok(())
}

fn buttons_layout() -> LinearLayout {
    LinearLayout::horizontal()
        .child(Button::new("Don't know", skip))
        .child(TextView::new(" ".repeat(10)))
        .child(Button::new("Flip", flip))
        .child(TextView::new(" ".repeat(10)))
        .child(Button::new("Know", know))
        .child(TextView::new(" ".repeat(30)))
        .child(Button::new("Quit", |s| {
            s.quit();
        }))
}

fn render(s: &mut Cursive) {
    let shown = s
        .with_user_data(|session: &mut Session| {
            let controller = &session.controller;
            controller.view().map(|card| {
                (
                    card.language.to_owned(),
                    card.word.to_owned(),
                    card.face,
                    controller.remaining(),
                )
            })
        })
        .flatten();
    let Some((language, word, face, remaining)) = shown else {
        return;
    };

    s.call_on_name(CARD, |view: &mut Dialog| view.set_title(language));
    s.call_on_name(FACE, |view: &mut TextView| view.set_content(face_label(face)));
    s.call_on_name(WORD, |view: &mut TextView| view.set_content(styled_word(&word, face)));
    s.call_on_name(STATUS, |view: &mut TextView| {
        view.set_content(format!("{remaining} words left"))
    });
}

fn face_label(face: Face) -> &'static str {
    match face {
        Face::Front => "[ front ]",
        Face::Back => "[ back ]",
    }
}

fn styled_word(word: &str, face: Face) -> StyledString {
    use cursive::style::BaseColor::*;
    use cursive::style::Effect::*;
    use cursive::style::Style;

    let style = match face {
        Face::Front => Style::from(White.light()).combine(Bold),
        Face::Back => Style::from(Blue.light()).combine(Bold),
    };
    StyledString::styled(word, style)
}

fn flip(s: &mut Cursive) {
    s.with_user_data(|session: &mut Session| session.controller.reveal());
    render(s);
}

fn skip(s: &mut Cursive) {
    let next = s.with_user_data(|session: &mut Session| {
        if session.controller.current().is_none() {
            return None;
        }
        Some(session.controller.skip())
    });
    match next.flatten() {
        Some(Selection::Card) => render(s),
        Some(Selection::Exhausted) => finished(s),
        None => {}
    }
}

fn know(s: &mut Cursive) {
    let next = s.with_user_data(|session: &mut Session| session.controller.mark_known());
    match next {
        Some(Ok(Selection::Card)) => render(s),
        Some(Ok(Selection::Exhausted)) => finished(s),
        Some(Err(DeckError::NoCurrentCard)) => {}
        Some(Err(e)) => {
            error!("{e}");
            s.with_user_data(|session: &mut Session| session.failure = Some(e));
            s.quit();
        }
        None => s.quit(),
    }
}

fn finished(s: &mut Cursive) {
    s.add_layer(
        Dialog::text("All words learned!")
            .title("Done")
            .button("Quit", |s| s.quit()),
    );
}
