use std::path::PathBuf;

use color_eyre::eyre::{eyre, Result};
use colored::Colorize;
use multiagent_minimax::search::Algorithm;
use pacman_rs::{search_agent::SearchAgent, AgentKind, AgentOptions, EvaluationKind, Direction};

use super::load_state;

#[derive(clap::Args, Debug)]
pub(crate) struct Compare {
    /// Layout (`.lay`) or game state (`.json`) to compare on
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    /// Full rounds to search
    #[clap(short, long, value_parser, default_value_t = 2)]
    depth: usize,

    /// baseline or heuristicBlend
    #[clap(short, long, value_parser, default_value = "baseline")]
    evaluation: EvaluationKind,
}

impl Compare {
    pub(crate) fn run(self) -> Result<()> {
        let state = load_state(&self.layout)?;

        let mut decisions: Vec<(Algorithm, Direction, f64)> = vec![];
        for algorithm in Algorithm::ALL {
            let agent = SearchAgent::new(&AgentOptions {
                algorithm: match algorithm {
                    Algorithm::Minimax => AgentKind::Minimax,
                    Algorithm::AlphaBeta => AgentKind::AlphaBeta,
                    Algorithm::Expectimax => AgentKind::Expectimax,
                },
                depth: self.depth,
                evaluation: self.evaluation,
                seed: None,
            })?;
            let result = agent.search(&state)?;

            println!(
                "{:<12} {:>6} {:>12} nodes {:>9} evaluations {:>9} prunes {:>7}",
                algorithm.to_string(),
                result.action.to_string(),
                result.value,
                result.stats.nodes_visited,
                result.stats.evaluations,
                result.stats.prunes
            );
            decisions.push((algorithm, result.action, result.value));
        }

        let find = |wanted: Algorithm| {
            decisions
                .iter()
                .find(|(algorithm, _, _)| *algorithm == wanted)
                .map(|(_, action, value)| (*action, *value))
                .ok_or_else(|| eyre!("{wanted} didn't run"))
        };
        let minimax = find(Algorithm::Minimax)?;
        let alpha_beta = find(Algorithm::AlphaBeta)?;

        if minimax == alpha_beta {
            println!("{}", "minimax and alpha-beta agree".green());
        } else {
            println!(
                "{}",
                format!("minimax chose {minimax:?} but alpha-beta chose {alpha_beta:?}").red()
            );
        }

        Ok(())
    }
}
