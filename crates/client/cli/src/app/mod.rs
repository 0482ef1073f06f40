//! Glue code tying the match service, content files and the terminal together.
//!
//! The CLI owns a [`ManualClock`]: every command moves it forward by the
//! configured tick length, so match time only passes when the user acts.
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use bout_content::{ConfigLoader, StyleLoader};
use bout_core::{
    ActionType, FighterSnapshot, MatchEvent, MatchId, MatchSnapshot, MatchStatus,
    OpponentController, Winner,
};
use bout_runtime::{ManualClock, MatchService, MatchView, RuntimeError};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::CliConfig;

/// Upper bound on autoplay ticks.
const AUTOPLAY_TICK_LIMIT: usize = 10_000;

pub struct CliApp {
    config: CliConfig,
    service: MatchService,
    clock: Arc<ManualClock>,
}

enum Command {
    Act(String),
    Wait,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "w" | "wait" => Command::Wait,
            "?" | "help" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => Command::Act(other.to_string()),
        }
    }
}

impl CliApp {
    /// Loads tuning and styles, then builds an in-memory service.
    pub fn new(config: CliConfig) -> Result<Self> {
        let mut match_config = match &config.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => ConfigLoader::bundled()?,
        };
        let styles = match &config.styles_path {
            Some(path) => StyleLoader::load(path)?,
            None => StyleLoader::bundled()?,
        };
        match_config.opponent = styles
            .resolve(&config.style)
            .map_err(anyhow::Error::msg)?;

        let clock = Arc::new(ManualClock::new());
        let service =
            MatchService::in_memory(match_config, config.runtime.clone(), clock.clone())?;

        Ok(Self {
            config,
            service,
            clock,
        })
    }

    pub async fn run(self) -> Result<()> {
        tracing::info!(
            style = %self.config.style,
            autoplay = self.config.autoplay,
            tick_seconds = self.config.tick_seconds,
            "CLI client starting..."
        );

        let view = self.service.start_match()?;
        let id = view.snapshot.match_id;
        println!(
            "Match {id}: {} rounds against a {} opponent",
            view.snapshot.max_rounds, self.config.style
        );
        print_status(&view.snapshot);

        let last = if self.config.autoplay {
            self.autoplay(id).await?
        } else {
            self.interactive(id).await?
        };

        print_result(&last.snapshot);
        Ok(())
    }

    async fn interactive(&self, id: MatchId) -> Result<MatchView> {
        print_help();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut view = self.service.view(id)?;

        while !view.is_over() {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let next = match Command::parse(&line) {
                Command::Quit => break,
                Command::Help => {
                    print_help();
                    continue;
                }
                Command::Wait => {
                    self.pass_time();
                    self.service.advance(id).await
                }
                Command::Act(name) => {
                    self.pass_time();
                    self.service.submit_action(id, &name).await
                }
            };

            match next {
                Ok(next) => {
                    print_events(&next.events);
                    print_status(&next.snapshot);
                    view = next;
                }
                Err(RuntimeError::Match(err)) => println!("  {err}"),
                Err(err) => return Err(err.into()),
            }
        }

        Ok(view)
    }

    /// Both corners are driven by the opponent policy.
    async fn autoplay(&self, id: MatchId) -> Result<MatchView> {
        let mut view = self.service.view(id)?;

        for _ in 0..AUTOPLAY_TICK_LIMIT {
            if view.is_over() {
                break;
            }

            let state = self.service.state(id)?;
            let exchange_possible =
                state.status == MatchStatus::RoundActive && !state.knockdown.is_down;
            let action = exchange_possible.then(|| {
                let config = self.service.config();
                OpponentController::new(&config.opponent, &config.actions).choose(
                    &state.primary,
                    &state.opponent,
                    state.opponent.current_action,
                )
            });

            self.pass_time();
            view = match action {
                Some(action) => self.service.submit_action(id, action.as_ref()).await?,
                None => self.service.advance(id).await?,
            };
            print_events(&view.events);
            print_status(&view.snapshot);
        }

        Ok(view)
    }

    fn pass_time(&self) {
        self.clock
            .advance(Duration::from_secs_f64(self.config.tick_seconds));
    }
}

fn print_help() {
    let actions: Vec<&str> = ActionType::iter().map(|action| action.name()).collect();
    println!("Actions: {}", actions.join(", "));
    println!("Other:   wait (or empty line), help, quit");
}

fn print_events(events: &[MatchEvent]) {
    for event in events {
        println!("  {event}");
    }
}

fn print_status(snapshot: &MatchSnapshot) {
    let timer = match snapshot.match_status {
        MatchStatus::BetweenRounds => snapshot.between_rounds_timer,
        _ => snapshot.round_timer,
    };
    println!(
        "  [{}] round {}/{} {:>5.1}s | {} | {}",
        snapshot.match_status,
        snapshot.current_round,
        snapshot.max_rounds,
        timer,
        fighter_line(&snapshot.primary),
        fighter_line(&snapshot.opponent),
    );
    if snapshot.knockdown_info.is_knockdown {
        println!("  count: {:.1}", snapshot.knockdown_info.count);
    }
}

fn fighter_line(fighter: &FighterSnapshot) -> String {
    format!(
        "{} hp {}/{} st {:.0}/{:.0} kd {}",
        fighter.name,
        fighter.hp,
        fighter.max_hp,
        fighter.stamina,
        fighter.max_stamina,
        fighter.total_knockdowns,
    )
}

fn print_result(snapshot: &MatchSnapshot) {
    match (snapshot.winner, snapshot.finish) {
        (Some(Winner::Draw), Some(finish)) => println!("Result: draw ({finish})"),
        (Some(winner), Some(finish)) => println!("Result: {winner} wins ({finish})"),
        _ => println!("Match abandoned in round {}", snapshot.current_round),
    }
    for fighter in [&snapshot.primary, &snapshot.opponent] {
        let total: u32 = fighter.round_scores.iter().sum();
        println!("  {:<8} {:?} = {total}", fighter.name, fighter.round_scores);
    }
}
