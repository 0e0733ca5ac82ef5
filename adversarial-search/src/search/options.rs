use std::{fmt, str::FromStr};

use crate::ConfigurationError;

/// How the agents other than the maximizer are modeled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Opponents pick whatever is worst for the maximizer
    #[default]
    Minimax,
    /// Opponents pick uniformly at random, so their nodes are backed up with the average value
    Expectimax,
}

impl FromStr for Variant {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(Variant::Minimax),
            "expectimax" => Ok(Variant::Expectimax),
            _ => Err(ConfigurationError::UnknownVariant(s.to_owned())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Minimax => write!(f, "minimax"),
            Variant::Expectimax => write!(f, "expectimax"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Properties that control a [crate::MultiAgentSearch]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use adversarial_search::{SearchOptions, Variant};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.depth, 1);
/// assert_eq!(defaults.variant, Variant::Minimax);
/// ```
pub struct SearchOptions {
    /// How many full rounds of play to look ahead
    ///
    /// One round is a move for the maximizer followed by a move for every other agent. Must be
    /// at least 1.
    pub depth: usize,
    /// How the opponents are modeled
    pub variant: Variant,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: 1,
            variant: Variant::Minimax,
        }
    }
}

impl SearchOptions {
    /// Check that these options describe a search we can run
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.depth == 0 {
            return Err(ConfigurationError::ZeroDepth);
        }

        Ok(())
    }
}
