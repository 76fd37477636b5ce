#[macro_use]
extern crate serde_derive;

use multiagent_minimax::{search::Algorithm, AgentIndex, SearchError};
use thiserror::Error;

pub mod eval;
pub mod game;
pub mod ghosts;
pub mod layout;
pub mod options;
pub mod reflex_agent;
pub mod runner;
pub mod search_agent;

pub use game::{Direction, GameState, GhostState, Outcome, Position};
pub use layout::{parse_layout, LayoutError};
pub use options::{AgentKind, AgentOptions, ConfigError, EvaluationKind};

use crate::{reflex_agent::ReflexAgent, search_agent::SearchAgent};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("ghost {ghost} has no agent to control it")]
    MissingGhostAgent { ghost: AgentIndex },
}

pub type BoxedAgent = Box<dyn PacmanAgent + Send + Sync>;
pub type BoxedGhost = Box<dyn GhostAgent + Send + Sync>;
pub type BoxedFactory = Box<dyn AgentFactory + Send + Sync>;

/// Something that can play Pacman
///
/// [PacmanAgent::decide] is called once per turn with the current state and has to return one
/// of Pacman's legal actions in that state.
pub trait PacmanAgent {
    fn name(&self) -> String;
    fn decide(&self, state: &GameState) -> Result<Direction, AgentError>;
}

/// Something that can play one of the ghosts
pub trait GhostAgent {
    /// `agent` is the ghost's agent index, so the first ghost is agent 1
    fn decide(&self, state: &GameState, agent: AgentIndex) -> Result<Direction, AgentError>;
}

pub trait AgentFactory {
    fn name(&self) -> String;
    fn create(&self, options: &AgentOptions) -> Result<BoxedAgent, ConfigError>;
}

pub struct ReflexAgentFactory;

impl AgentFactory for ReflexAgentFactory {
    fn name(&self) -> String {
        AgentKind::Reflex.name().to_owned()
    }

    fn create(&self, options: &AgentOptions) -> Result<BoxedAgent, ConfigError> {
        options.validate()?;

        let agent = match options.seed {
            Some(seed) => ReflexAgent::with_seed(seed),
            None => ReflexAgent::new(),
        };
        Ok(Box::new(agent))
    }
}

pub struct SearchAgentFactory {
    pub algorithm: Algorithm,
}

impl AgentFactory for SearchAgentFactory {
    fn name(&self) -> String {
        self.algorithm.name().to_owned()
    }

    fn create(&self, options: &AgentOptions) -> Result<BoxedAgent, ConfigError> {
        let options = AgentOptions {
            algorithm: match self.algorithm {
                Algorithm::Minimax => AgentKind::Minimax,
                Algorithm::AlphaBeta => AgentKind::AlphaBeta,
                Algorithm::Expectimax => AgentKind::Expectimax,
            },
            ..*options
        };

        Ok(Box::new(SearchAgent::new(&options)?))
    }
}

pub fn all_factories() -> Vec<BoxedFactory> {
    let mut factories: Vec<BoxedFactory> = vec![Box::new(ReflexAgentFactory)];
    for algorithm in Algorithm::ALL {
        factories.push(Box::new(SearchAgentFactory { algorithm }));
    }

    factories
}

/// Build the agent `options` describe
///
/// Everything about the agent, including which scoring function it uses, is settled here so
/// nothing has to be looked up again while it plays.
pub fn build_agent(options: &AgentOptions) -> Result<BoxedAgent, ConfigError> {
    options.validate()?;

    let name = options.algorithm.name();
    let factory = all_factories()
        .into_iter()
        .find(|factory| factory.name() == name)
        .ok_or_else(|| ConfigError::UnknownAlgorithm(name.to_owned()))?;

    factory.create(options)
}
