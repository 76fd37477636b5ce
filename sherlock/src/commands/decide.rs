use std::path::PathBuf;

use color_eyre::eyre::Result;
use colored::Colorize;
use itertools::Itertools;
use pacman_rs::{reflex_agent::ReflexAgent, search_agent::SearchAgent, AgentKind};

use super::{load_state, AgentArgs};

#[derive(clap::Args, Debug)]
pub(crate) struct Decide {
    /// Layout (`.lay`) or game state (`.json`) to decide for
    #[clap(short, long, value_parser)]
    layout: PathBuf,

    #[clap(flatten)]
    agent: AgentArgs,
}

impl Decide {
    pub(crate) fn run(self) -> Result<()> {
        let state = load_state(&self.layout)?;
        let options = self.agent.options()?;

        println!("{state}");

        if options.algorithm == AgentKind::Reflex {
            let agent = match options.seed {
                Some(seed) => ReflexAgent::with_seed(seed),
                None => ReflexAgent::new(),
            };

            for (action, score) in agent.scores(&state) {
                println!("{action:>5}  {score}");
            }

            let best = agent.best_actions(&state);
            println!(
                "{}",
                format!("reflex picks among [{}]", best.iter().join(", ")).green()
            );

            return Ok(());
        }

        let agent = SearchAgent::new(&options)?;
        let result = agent.search(&state)?;

        println!("{}", result.to_text_tree());
        println!(
            "{}",
            format!(
                "{} at depth {} with {} chose {} ({})",
                result.algorithm,
                agent.depth(),
                agent.evaluation(),
                result.action,
                result.value
            )
            .green()
        );
        println!(
            "nodes visited: {}, evaluations: {}, prunes: {}, deepest level: {}",
            result.stats.nodes_visited,
            result.stats.evaluations,
            result.stats.prunes,
            result.stats.max_level
        );

        let tied = result.tied_actions();
        if tied.len() > 1 {
            println!(
                "{}",
                format!("tied with {}", tied.iter().skip(1).join(", ")).yellow()
            );
        }

        Ok(())
    }
}
