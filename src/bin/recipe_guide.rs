//! Interactive terminal walkthrough.
//!
//! ```bash
//! cargo run --bin recipe-guide -- [config.yaml]
//! ```
//!
//! The config path may also be given through `RECIPE_GUIDE_CONFIG`. Without
//! one, the bundled dataset is used with Bengali messages.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use recipe_guide::logging;
use recipe_guide::{
    list_all, search, CookingGuide, Effect, GuideConfig, Phase, RecipeStore, RecipeSummary,
    SessionSnapshot, Ticker,
};

const CONFIG_ENV: &str = "RECIPE_GUIDE_CONFIG";

const HELP: &str = "\
commands:
  find <name>     look up a recipe
  list            list all recipes
  search <term>   search titles, descriptions and ingredients
  start           start cooking the found recipe
  back            leave the summary
  next | prev     move between steps
  yes | no        answer the finish prompt
  pause           pause or resume the step timer
  status          show the session
  reset           start over after finishing or an error
  quit";

enum Event {
    Line(String),
    Tick(u64),
    InputClosed,
}

/// Runs the tick schedules the session asks for.
struct TickRunner {
    interval: Duration,
    events: Sender<Event>,
    current: Option<Ticker>,
}

impl TickRunner {
    fn new(interval: Duration, events: Sender<Event>) -> Self {
        TickRunner {
            interval,
            events,
            current: None,
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartTicking { generation } => {
                    // Replacing the ticker drops and cancels the previous one.
                    self.current = Some(Ticker::start(
                        generation,
                        self.interval,
                        self.events.clone(),
                        Event::Tick,
                    ));
                }
                Effect::StopTicking { generation } => {
                    if self
                        .current
                        .as_ref()
                        .is_some_and(|t| t.generation() == generation)
                    {
                        self.current = None;
                    }
                }
                Effect::ConfirmFinish => println!("Finish cooking? (yes / no)"),
                Effect::Lookup { query } => {
                    log::warn!("Unresolved lookup for {:?} reached the host", query);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    let config = load_config()?;
    logging::initialize(config.log_destination, config.level_filter());

    let store = config.open_store().context("Failed to load recipe dataset")?;
    log::info!("Loaded {} recipes", store.len());

    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());

    let mut guide = CookingGuide::new(&store, config.locale);
    let mut ticks = TickRunner::new(config.tick_interval(), tx);

    println!("{HELP}");
    prompt()?;

    for event in rx {
        match event {
            Event::Line(line) => {
                let line = line.trim();
                if line.is_empty() {
                    prompt()?;
                    continue;
                }
                let (command, argument) = line.split_once(' ').unwrap_or((line, ""));
                let argument = argument.trim();

                let effects = match command {
                    "quit" | "exit" => break,
                    "help" => {
                        println!("{HELP}");
                        Vec::new()
                    }
                    "list" => {
                        print_summaries(&list_all(&store));
                        Vec::new()
                    }
                    "search" => {
                        print_summaries(&search(&store, argument));
                        Vec::new()
                    }
                    "status" => {
                        print_snapshot(&guide.snapshot());
                        Vec::new()
                    }
                    "find" => step(&mut guide, |g| g.submit_query(argument)),
                    "start" => step(&mut guide, |g| g.confirm_start()),
                    "back" => step(&mut guide, |g| g.go_back()),
                    "next" => step(&mut guide, |g| g.advance_step()),
                    "prev" => step(&mut guide, |g| g.retreat_step()),
                    "yes" => step(&mut guide, |g| g.confirm_finish()),
                    "no" => step(&mut guide, |g| g.cancel_finish()),
                    "pause" => step(&mut guide, |g| g.toggle_timer()),
                    "reset" => step(&mut guide, |g| g.reset()),
                    other => {
                        println!("Unknown command {other:?}; type help");
                        Vec::new()
                    }
                };
                ticks.apply(effects);
                prompt()?;
            }
            Event::Tick(generation) => {
                let before = guide.state().timer().map(|t| t.remaining_seconds);
                let effects = guide.tick(generation);
                let timer = guide.state().timer().copied();
                if let Some(timer) = timer.filter(|t| Some(t.remaining_seconds) != before) {
                    if timer.is_expired() {
                        println!("\nTimer done.");
                        prompt()?;
                    } else if timer.remaining_seconds % 60 == 0 {
                        println!("\n{} left", timer.format_remaining());
                        prompt()?;
                    }
                }
                ticks.apply(effects);
            }
            Event::InputClosed => break,
        }
    }

    log::info!("Exiting");
    Ok(())
}

fn load_config() -> Result<GuideConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok());

    match path {
        Some(path) => {
            let path = Utf8PathBuf::from(path);
            GuideConfig::from_path(&path)
                .with_context(|| format!("Failed to load config from {path}"))
        }
        None => Ok(GuideConfig::default()),
    }
}

fn spawn_input_reader(events: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if events.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    log::error!("Failed to read input: {e}");
                    break;
                }
            }
        }
        let _ = events.send(Event::InputClosed);
    });
}

/// Runs a session operation and prints the resulting state.
fn step<F>(guide: &mut CookingGuide<&RecipeStore>, op: F) -> Vec<Effect>
where
    F: FnOnce(&mut CookingGuide<&RecipeStore>) -> Vec<Effect>,
{
    let effects = op(guide);
    print_snapshot(&guide.snapshot());
    effects
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn print_summaries(summaries: &[RecipeSummary]) {
    if summaries.is_empty() {
        println!("No recipes.");
    }
    for summary in summaries {
        println!(
            "[{}] {} ({} min) - {}",
            summary.id,
            summary.name,
            summary.total_time_minutes,
            summary.ingredients.join(", ")
        );
    }
}

fn print_snapshot(snapshot: &SessionSnapshot) {
    match snapshot.phase {
        Phase::Idle => println!("Ready. Use find <name> to look up a recipe."),
        Phase::Searching => println!("Searching..."),
        Phase::Summary => {
            if let Some(recipe) = &snapshot.recipe {
                println!("{}", recipe.title);
                if !recipe.description.is_empty() {
                    println!("{}", recipe.description);
                }
                println!("Ingredients:");
                for ingredient in &recipe.ingredients {
                    println!("  - {ingredient}");
                }
                println!("{} steps. Type start to begin.", recipe.step_count());
            }
        }
        Phase::Cooking => {
            if let Some(step) = &snapshot.current_step {
                println!(
                    "Step {}/{} ({}%): {}",
                    snapshot.step_index + 1,
                    snapshot.step_count,
                    snapshot.progress_percent,
                    step.description
                );
            }
            if let Some(timer) = &snapshot.timer {
                let state = if timer.running { "running" } else { "paused" };
                println!("Timer {} ({state})", timer.format_remaining());
            }
        }
        Phase::Finished => println!("Done. Enjoy your meal! Type reset to start over."),
        Phase::Error => {
            if let Some(message) = &snapshot.error_message {
                println!("{message}");
            }
            println!("Type reset to try again.");
        }
    }
}
