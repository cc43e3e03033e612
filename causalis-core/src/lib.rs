//! # causalis-core
//!
//! Foundation crate for the Causalis actual-causality engine.
//! Defines variables, values, the propositional event algebra, and the
//! error surface. The engine crate depends on this.

pub mod errors;
pub mod event;
pub mod value;
pub mod variable;

use std::collections::{BTreeMap, BTreeSet};

pub use errors::{CausalError, CausalResult};
pub use event::Event;
pub use value::Value;
pub use variable::Variable;

/// A partial or total mapping from variables to values.
pub type Assignment = BTreeMap<Variable, Value>;

/// One total assignment to the exogenous variables: a possible world.
pub type Context = Assignment;

/// The finite legal values for each variable.
pub type DomainMap = BTreeMap<Variable, BTreeSet<Value>>;
