//! Propositional event algebra evaluated against a total value assignment.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Assignment, Value, Variable};

/// A closed recursive formula over primitive equality tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Verum,
    Falsum,
    /// Primitive test: does the variable carry exactly this value?
    Equals(Variable, Value),
    Not(Box<Event>),
    And(Box<Event>, Box<Event>),
    Or(Box<Event>, Box<Event>),
}

impl Event {
    pub fn equals(variable: impl Into<Variable>, value: impl Into<Value>) -> Self {
        Event::Equals(variable.into(), value.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Event) -> Self {
        Event::Not(Box::new(child))
    }

    pub fn and(left: Event, right: Event) -> Self {
        Event::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Event, right: Event) -> Self {
        Event::Or(Box::new(left), Box::new(right))
    }

    /// The literal conjunction of an assignment's equalities.
    ///
    /// An empty assignment yields `Verum`, keeping predicates over empty
    /// candidates total instead of panicking.
    pub fn conjunction(assignment: &Assignment) -> Self {
        let mut literals = assignment
            .iter()
            .map(|(variable, value)| Event::Equals(variable.clone(), value.clone()));
        match literals.next() {
            None => Event::Verum,
            Some(first) => literals.fold(first, Event::and),
        }
    }

    /// Evaluate against a total assignment. A test on a variable absent
    /// from `values` is false rather than an error; validated settings
    /// always supply total assignments.
    pub fn evaluate(&self, values: &Assignment) -> bool {
        match self {
            Event::Verum => true,
            Event::Falsum => false,
            Event::Equals(variable, value) => values.get(variable) == Some(value),
            Event::Not(child) => !child.evaluate(values),
            Event::And(left, right) => left.evaluate(values) && right.evaluate(values),
            Event::Or(left, right) => left.evaluate(values) || right.evaluate(values),
        }
    }

    /// The free-variable set of the formula.
    pub fn variables(&self) -> BTreeSet<Variable> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<Variable>) {
        match self {
            Event::Verum | Event::Falsum => {}
            Event::Equals(variable, _) => {
                out.insert(variable.clone());
            }
            Event::Not(child) => child.collect_variables(out),
            Event::And(left, right) | Event::Or(left, right) => {
                left.collect_variables(out);
                right.collect_variables(out);
            }
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Verum => f.write_str("true"),
            Event::Falsum => f.write_str("false"),
            Event::Equals(variable, value) => write!(f, "{variable}={value}"),
            Event::Not(child) => write!(f, "!({child})"),
            Event::And(left, right) => write!(f, "({left} & {right})"),
            Event::Or(left, right) => write!(f, "({left} | {right})"),
        }
    }
}
