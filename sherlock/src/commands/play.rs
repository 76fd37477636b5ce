use std::path::PathBuf;

use clap::ValueEnum;
use color_eyre::eyre::Result;
use colored::Colorize;
use itertools::Itertools;
use pacman_rs::{
    build_agent,
    ghosts::{DirectionalGhost, RandomGhost},
    runner::{run_game, GameRecord},
    AgentOptions, BoxedGhost, Outcome,
};

use super::{load_state, AgentArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum GhostKind {
    Directional,
    Random,
}

#[derive(clap::Args, Debug)]
pub(crate) struct Play {
    /// Layout (`.lay`) or game state (`.json`) to start every game from
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    #[clap(flatten)]
    agent: AgentArgs,

    /// Number of games to play
    #[clap(short, long, value_parser, default_value_t = 1)]
    games: usize,

    /// Seed for the ghosts, each game and ghost derives its own from this
    #[clap(short, long, value_parser, default_value_t = 0)]
    seed: u64,

    #[clap(long, value_enum, default_value_t = GhostKind::Directional)]
    ghosts: GhostKind,

    /// Rounds before a game is called a timeout
    #[clap(short, long, value_parser, default_value_t = 500)]
    max_moves: usize,

    /// Print every game record as a line of JSON instead of text
    #[clap(long, value_parser)]
    json: bool,
}

impl Play {
    pub(crate) fn run(self) -> Result<()> {
        let state = load_state(&self.layout)?;
        let base_options = self.agent.options()?;

        let mut records: Vec<GameRecord> = Vec::with_capacity(self.games);

        for game in 0..self.games {
            let game_seed = self.seed.wrapping_add(game as u64 * 1000);

            let options = AgentOptions {
                seed: base_options.seed.or(Some(game_seed)),
                ..base_options
            };
            let pacman = build_agent(&options)?;

            let ghosts: Vec<BoxedGhost> = (0..state.num_ghosts())
                .map(|ghost| {
                    let seed = game_seed.wrapping_add(ghost as u64 + 1);
                    match self.ghosts {
                        GhostKind::Directional => {
                            Box::new(DirectionalGhost::with_seed(seed)) as BoxedGhost
                        }
                        GhostKind::Random => Box::new(RandomGhost::with_seed(seed)) as BoxedGhost,
                    }
                })
                .collect();

            let record = run_game(state.clone(), pacman.as_ref(), &ghosts, self.max_moves)?;

            if self.json {
                println!("{}", serde_json::to_string(&record)?);
            } else {
                let line = format!(
                    "game {:>3}: {:<7} score {:>6} after {:>4} moves",
                    game + 1,
                    record.outcome,
                    record.score,
                    record.moves
                );
                let line = match record.outcome {
                    Outcome::Win => line.green(),
                    Outcome::Lose => line.red(),
                    _ => line.yellow(),
                };
                println!("{line}");
            }

            records.push(record);
        }

        if !self.json && !records.is_empty() {
            let wins = records
                .iter()
                .filter(|record| record.outcome == Outcome::Win)
                .count();
            let average =
                records.iter().map(|record| record.score as f64).sum::<f64>() / records.len() as f64;

            println!();
            println!("Average score: {average:.1}");
            println!("Scores: {}", records.iter().map(|record| record.score).join(", "));
            println!("Win rate: {}/{}", wins, records.len());
        }

        Ok(())
    }
}
