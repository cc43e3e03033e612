//! Variable identifiers: immutable map keys and graph node weights.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An exogenous or endogenous variable identifier.
///
/// A variable never carries a value itself; it is only a key into
/// assignments, domains, and the causal network.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Variable(String);

impl Variable {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    pub fn symbol(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variable {
    fn from(symbol: &str) -> Self {
        Self(symbol.to_string())
    }
}

impl From<String> for Variable {
    fn from(symbol: String) -> Self {
        Self(symbol)
    }
}
