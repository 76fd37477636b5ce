use std::{fmt::Display, str::FromStr};

use multiagent_minimax::{search::Algorithm, Value};
use thiserror::Error;

use crate::{
    eval::{better_evaluation, score_evaluation},
    game::GameState,
};

/// A scoring function for whole states, as handed to the search
pub type StateEvaluator = fn(&GameState) -> Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("the search depth has to be at least 1")]
    ZeroDepth,
    #[error("{algorithm} needs a state evaluation, `oneStepReflex` only scores single actions")]
    NeedsStateEvaluation { algorithm: AgentKind },
    #[error("the reflex agent only works with `oneStepReflex`, got `{evaluation}`")]
    ReflexNeedsOneStep { evaluation: EvaluationKind },
    #[error("unknown algorithm `{0}`")]
    UnknownAlgorithm(String),
    #[error("unknown evaluation function `{0}`")]
    UnknownEvaluation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentKind {
    Minimax,
    AlphaBeta,
    Expectimax,
    Reflex,
}

impl AgentKind {
    /// The search behind this kind of agent, `None` for the reflex agent
    pub fn search_algorithm(self) -> Option<Algorithm> {
        match self {
            AgentKind::Minimax => Some(Algorithm::Minimax),
            AgentKind::AlphaBeta => Some(Algorithm::AlphaBeta),
            AgentKind::Expectimax => Some(Algorithm::Expectimax),
            AgentKind::Reflex => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self.search_algorithm() {
            Some(algorithm) => algorithm.name(),
            None => "reflex",
        }
    }
}

impl Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AgentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "reflex" {
            return Ok(AgentKind::Reflex);
        }

        match s.parse::<Algorithm>() {
            Ok(Algorithm::Minimax) => Ok(AgentKind::Minimax),
            Ok(Algorithm::AlphaBeta) => Ok(AgentKind::AlphaBeta),
            Ok(Algorithm::Expectimax) => Ok(AgentKind::Expectimax),
            Err(_) => Err(ConfigError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvaluationKind {
    /// [score_evaluation]
    Baseline,
    /// [better_evaluation]
    HeuristicBlend,
    /// [crate::eval::reflex_evaluation], for the reflex agent only
    OneStepReflex,
}

impl EvaluationKind {
    pub fn name(self) -> &'static str {
        match self {
            EvaluationKind::Baseline => "baseline",
            EvaluationKind::HeuristicBlend => "heuristicBlend",
            EvaluationKind::OneStepReflex => "oneStepReflex",
        }
    }

    /// The function to hand to a search, resolved once when the agent is built
    pub fn state_evaluator(self) -> Option<StateEvaluator> {
        match self {
            EvaluationKind::Baseline => Some(score_evaluation::<GameState> as StateEvaluator),
            EvaluationKind::HeuristicBlend => Some(better_evaluation::<GameState> as StateEvaluator),
            EvaluationKind::OneStepReflex => None,
        }
    }
}

impl Display for EvaluationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EvaluationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" | "score" => Ok(EvaluationKind::Baseline),
            "heuristicBlend" | "heuristic-blend" | "better" => Ok(EvaluationKind::HeuristicBlend),
            "oneStepReflex" | "one-step-reflex" => Ok(EvaluationKind::OneStepReflex),
            other => Err(ConfigError::UnknownEvaluation(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// Everything needed to build a Pacman agent
///
/// Can be read from JSON, missing fields fall back to the defaults:
/// ```
/// use pacman_rs::options::{AgentKind, AgentOptions, EvaluationKind};
///
/// let defaults: AgentOptions = Default::default();
/// assert_eq!(defaults.algorithm, AgentKind::AlphaBeta);
/// assert_eq!(defaults.depth, 2);
/// assert_eq!(defaults.evaluation, EvaluationKind::Baseline);
/// assert_eq!(defaults.seed, None);
///
/// let options: AgentOptions =
///     serde_json::from_str(r#"{"algorithm": "expectimax", "cutoffDepth": 3}"#).unwrap();
/// assert_eq!(options.algorithm, AgentKind::Expectimax);
/// assert_eq!(options.depth, 3);
/// ```
pub struct AgentOptions {
    pub algorithm: AgentKind,
    /// Full rounds to search, ignored by the reflex agent
    #[serde(alias = "cutoffDepth")]
    pub depth: usize,
    #[serde(alias = "evaluationFunction")]
    pub evaluation: EvaluationKind,
    /// Seeds the reflex agent's tie breaking, entropy when absent
    pub seed: Option<u64>,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            algorithm: AgentKind::AlphaBeta,
            depth: 2,
            evaluation: EvaluationKind::Baseline,
            seed: None,
        }
    }
}

impl AgentOptions {
    /// Rejects combinations no agent can be built from
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.algorithm {
            AgentKind::Reflex => {
                if self.evaluation != EvaluationKind::OneStepReflex {
                    return Err(ConfigError::ReflexNeedsOneStep {
                        evaluation: self.evaluation,
                    });
                }
            }
            algorithm => {
                if self.depth == 0 {
                    return Err(ConfigError::ZeroDepth);
                }
                if self.evaluation.state_evaluator().is_none() {
                    return Err(ConfigError::NeedsStateEvaluation { algorithm });
                }
            }
        }

        Ok(())
    }

    /// Options for the reflex agent, which only ever uses [EvaluationKind::OneStepReflex]
    pub fn reflex() -> Self {
        Self {
            algorithm: AgentKind::Reflex,
            evaluation: EvaluationKind::OneStepReflex,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_uses_camel_case_names() {
        let options: AgentOptions = serde_json::from_str(
            r#"{"algorithm": "alphaBeta", "depth": 4, "evaluation": "heuristicBlend", "seed": 9}"#,
        )
        .unwrap();

        assert_eq!(
            options,
            AgentOptions {
                algorithm: AgentKind::AlphaBeta,
                depth: 4,
                evaluation: EvaluationKind::HeuristicBlend,
                seed: Some(9),
            }
        );
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn test_long_field_names() {
        let options: AgentOptions = serde_json::from_str(
            r#"{"algorithm": "reflex", "evaluationFunction": "oneStepReflex"}"#,
        )
        .unwrap();

        assert_eq!(options, AgentOptions::reflex());
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        let options = AgentOptions {
            depth: 0,
            ..Default::default()
        };

        assert_eq!(options.validate(), Err(ConfigError::ZeroDepth));
    }

    #[test]
    fn test_mismatched_evaluations_are_rejected() {
        let options = AgentOptions {
            algorithm: AgentKind::Minimax,
            evaluation: EvaluationKind::OneStepReflex,
            ..Default::default()
        };
        assert_eq!(
            options.validate(),
            Err(ConfigError::NeedsStateEvaluation {
                algorithm: AgentKind::Minimax
            })
        );

        let options = AgentOptions {
            evaluation: EvaluationKind::HeuristicBlend,
            ..AgentOptions::reflex()
        };
        assert_eq!(
            options.validate(),
            Err(ConfigError::ReflexNeedsOneStep {
                evaluation: EvaluationKind::HeuristicBlend
            })
        );
    }

    #[test]
    fn test_parsing_names() {
        assert_eq!("alpha-beta".parse(), Ok(AgentKind::AlphaBeta));
        assert_eq!("alphaBeta".parse(), Ok(AgentKind::AlphaBeta));
        assert_eq!("reflex".parse(), Ok(AgentKind::Reflex));
        assert_eq!(
            "greedy".parse::<AgentKind>(),
            Err(ConfigError::UnknownAlgorithm("greedy".to_owned()))
        );

        assert_eq!("heuristicBlend".parse(), Ok(EvaluationKind::HeuristicBlend));
        assert_eq!(
            "nope".parse::<EvaluationKind>(),
            Err(ConfigError::UnknownEvaluation("nope".to_owned()))
        );
    }

    #[test]
    fn test_state_evaluators() {
        let state = crate::layout::parse_layout(include_str!("../fixtures/corridor.lay")).unwrap();

        let baseline = EvaluationKind::Baseline.state_evaluator().unwrap();
        assert_eq!(baseline(&state), 0.0);
        assert!(EvaluationKind::OneStepReflex.state_evaluator().is_none());
    }
}
