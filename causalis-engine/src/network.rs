//! DAG of structural equations with topological fixed-point evaluation and
//! a pure copy-on-write `intervene` transform.
//!
//! Cycle rejection happens at edge insertion via DFS reachability, before
//! any mutation, so a failed `add_dependency` leaves the network untouched.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use petgraph::algo::toposort;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::Dfs;
use petgraph::Direction;

use causalis_core::{Assignment, CausalError, CausalResult, Context, Value, Variable};

/// A pure function from already-resolved values to this variable's value.
///
/// Equations are `Arc`-backed so intervened copies of a network share
/// every entry that was not rebound.
#[derive(Clone)]
pub struct StructuralEquation {
    rule: EquationRule,
    label: Option<String>,
}

#[derive(Clone)]
enum EquationRule {
    Computed(Arc<dyn Fn(&Assignment) -> Value + Send + Sync>),
    Constant(Value),
}

impl StructuralEquation {
    pub fn from_fn(f: impl Fn(&Assignment) -> Value + Send + Sync + 'static) -> Self {
        Self {
            rule: EquationRule::Computed(Arc::new(f)),
            label: None,
        }
    }

    /// Equation carrying a display label for the read-only diagram export.
    pub fn labeled(
        label: impl Into<String>,
        f: impl Fn(&Assignment) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            rule: EquationRule::Computed(Arc::new(f)),
            label: Some(label.into()),
        }
    }

    /// Constant equation: what `intervene` rebinds a variable to.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            label: Some(value.to_string()),
            rule: EquationRule::Constant(value),
        }
    }

    pub fn apply(&self, values: &Assignment) -> Value {
        match &self.rule {
            EquationRule::Computed(f) => f(values),
            EquationRule::Constant(value) => value.clone(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl fmt::Debug for StructuralEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.rule, &self.label) {
            (EquationRule::Constant(value), _) => write!(f, "StructuralEquation({value})"),
            (EquationRule::Computed(_), Some(label)) => write!(f, "StructuralEquation({label})"),
            (EquationRule::Computed(_), None) => f.write_str("StructuralEquation(<fn>)"),
        }
    }
}

/// A DAG of variables. Edges run parent to child; exogenous variables are
/// the zero-in-degree nodes (no equation, supplied by a context) and each
/// endogenous variable carries exactly one equation.
#[derive(Debug, Clone, Default)]
pub struct CausalNetwork {
    graph: StableDiGraph<Variable, ()>,
    index: HashMap<Variable, NodeIndex>,
    equations: HashMap<Variable, StructuralEquation>,
}

impl CausalNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, variable: &Variable) -> NodeIndex {
        if let Some(&idx) = self.index.get(variable) {
            return idx;
        }
        let idx = self.graph.add_node(variable.clone());
        self.index.insert(variable.clone(), idx);
        idx
    }

    fn has_path(&self, from: NodeIndex, to: NodeIndex) -> bool {
        let mut dfs = Dfs::new(&self.graph, from);
        while let Some(node) = dfs.next(&self.graph) {
            if node == to {
                return true;
            }
        }
        false
    }

    /// Bind `equation` for `variable`, adding an edge from each parent.
    ///
    /// Rejects self-dependencies and any edge whose insertion would close
    /// a cycle. Rebinding an existing variable overwrites its equation.
    pub fn add_dependency(
        &mut self,
        variable: Variable,
        parents: impl IntoIterator<Item = Variable>,
        equation: StructuralEquation,
    ) -> CausalResult<()> {
        let parents: Vec<Variable> = parents.into_iter().collect();

        // Validate before mutating anything.
        if parents.contains(&variable) {
            return Err(CausalError::CycleDetected { variable });
        }
        if let Some(&child) = self.index.get(&variable) {
            for parent in &parents {
                if let Some(&parent_idx) = self.index.get(parent) {
                    // A path child -> parent means parent -> child closes a cycle.
                    if self.has_path(child, parent_idx) {
                        return Err(CausalError::CycleDetected { variable });
                    }
                }
            }
        }

        let child = self.ensure_node(&variable);
        for parent in &parents {
            let parent_idx = self.ensure_node(parent);
            self.graph.update_edge(parent_idx, child, ());
        }
        self.equations.insert(variable, equation);
        Ok(())
    }

    /// Partition into exogenous (zero in-degree) and endogenous (nonzero
    /// in-degree) variable sets.
    pub fn signature(&self) -> (BTreeSet<Variable>, BTreeSet<Variable>) {
        let mut exogenous = BTreeSet::new();
        let mut endogenous = BTreeSet::new();
        for idx in self.graph.node_indices() {
            let variable = self.graph[idx].clone();
            if self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_none()
            {
                exogenous.insert(variable);
            } else {
                endogenous.insert(variable);
            }
        }
        (exogenous, endogenous)
    }

    /// Resolve every non-context node in topological order and return the
    /// derived values only.
    pub fn evaluate(&self, context: &Context) -> CausalResult<Assignment> {
        let order = toposort(&self.graph, None).map_err(|cycle| CausalError::CycleDetected {
            variable: self.graph[cycle.node_id()].clone(),
        })?;

        let mut values: Assignment = context.clone();
        for idx in order {
            let variable = &self.graph[idx];
            if values.contains_key(variable) {
                continue;
            }
            let equation =
                self.equations
                    .get(variable)
                    .ok_or_else(|| CausalError::MissingEquation {
                        variable: variable.clone(),
                    })?;
            let value = equation.apply(&values);
            values.insert(variable.clone(), value);
        }

        for key in context.keys() {
            values.remove(key);
        }
        Ok(values)
    }

    /// A new, structurally identical network where each intervened
    /// variable's equation is a constant returning the given value. The
    /// source network is untouched; unbound equations stay shared.
    pub fn intervene(&self, intervention: &Assignment) -> CausalNetwork {
        let mut network = self.clone();
        for (variable, value) in intervention {
            network
                .equations
                .insert(variable.clone(), StructuralEquation::constant(value.clone()));
        }
        network
    }

    /// All variables, for external renderers.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.graph.node_weights()
    }

    /// The parent-to-child edge list, for external renderers.
    pub fn dependencies(&self) -> Vec<(Variable, Variable)> {
        self.graph
            .edge_indices()
            .filter_map(|edge| self.graph.edge_endpoints(edge))
            .map(|(parent, child)| (self.graph[parent].clone(), self.graph[child].clone()))
            .collect()
    }

    /// The display label of a variable's equation, if one was declared.
    pub fn equation_label(&self, variable: &Variable) -> Option<&str> {
        self.equations.get(variable).and_then(StructuralEquation::label)
    }
}
