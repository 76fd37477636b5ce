pub mod compare;
pub mod decide;
pub mod play;

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use pacman_rs::{AgentKind, AgentOptions, EvaluationKind, GameState};
use tracing::debug;

use compare::Compare;
use decide::Decide;
use play::Play;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Show how an agent picks its move for a single board
    Decide(Decide),
    /// Play full games and report how they went
    Play(Play),
    /// Run minimax and alpha-beta side by side on the same board
    Compare(Compare),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Decide(d) => d.run()?,
            Command::Play(p) => p.run()?,
            Command::Compare(c) => c.run()?,
        }

        Ok(())
    }
}

/// Reads a board from a `.json` state file or a plain text layout
pub(crate) fn load_state(path: &Path) -> Result<GameState> {
    let contents =
        fs::read_to_string(path).wrap_err_with(|| format!("Couldn't read {}", path.display()))?;

    let state = if path.extension().map_or(false, |ext| ext == "json") {
        serde_json::from_str(&contents)
            .wrap_err_with(|| format!("{} is not a valid game state", path.display()))?
    } else {
        pacman_rs::parse_layout(&contents)
            .wrap_err_with(|| format!("{} is not a valid layout", path.display()))?
    };

    debug!(
        path = %path.display(),
        width = state.width,
        height = state.height,
        ghosts = state.ghosts.len(),
        "loaded board"
    );

    Ok(state)
}

#[derive(clap::Args, Debug)]
pub(crate) struct AgentArgs {
    /// JSON file with agent options, the flags below override it
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// minimax, alpha-beta, expectimax or reflex
    #[clap(short, long, value_parser)]
    algorithm: Option<AgentKind>,

    /// Full rounds to search
    #[clap(short, long, value_parser)]
    depth: Option<usize>,

    /// baseline, heuristicBlend or oneStepReflex
    #[clap(short, long, value_parser)]
    evaluation: Option<EvaluationKind>,

    /// Seed for the reflex agent's tie breaking
    #[clap(long, value_parser)]
    agent_seed: Option<u64>,
}

impl AgentArgs {
    pub(crate) fn options(&self) -> Result<AgentOptions> {
        let mut options: AgentOptions = match &self.config {
            Some(path) => {
                let contents = fs::read_to_string(path)
                    .wrap_err_with(|| format!("Couldn't read {}", path.display()))?;
                serde_json::from_str(&contents)
                    .wrap_err_with(|| format!("{} is not a valid agent config", path.display()))?
            }
            None => Default::default(),
        };

        if let Some(algorithm) = self.algorithm {
            options.algorithm = algorithm;
            // The reflex agent can only use one evaluation, so there's nothing to choose
            if algorithm == AgentKind::Reflex && self.evaluation.is_none() {
                options.evaluation = EvaluationKind::OneStepReflex;
            }
        }
        if let Some(depth) = self.depth {
            options.depth = depth;
        }
        if let Some(evaluation) = self.evaluation {
            options.evaluation = evaluation;
        }
        if self.agent_seed.is_some() {
            options.seed = self.agent_seed;
        }

        options.validate()?;
        debug!(?options, "agent options");
        Ok(options)
    }
}
