//! Validated causal settings and epistemic states.
//!
//! Construction is all-or-nothing: signature mismatches, cycles, and
//! domain violations surface here, before any search spends time on an
//! invalid model.

use std::collections::BTreeSet;

use causalis_core::{
    Assignment, CausalError, CausalResult, Context, DomainMap, Value, Variable,
};

use crate::network::CausalNetwork;

/// Tolerance for epistemic-state weight normalization.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// A causal network fixed to one exogenous context, with a declared finite
/// domain for every endogenous variable.
///
/// The unique fixed point is computed eagerly at construction; every
/// entailment check downstream consumes this one validated object.
#[derive(Debug, Clone)]
pub struct CausalSetting {
    network: CausalNetwork,
    context: Context,
    endogenous_domains: DomainMap,
    values: Assignment,
}

impl CausalSetting {
    pub fn new(
        network: CausalNetwork,
        context: Context,
        endogenous_domains: DomainMap,
    ) -> CausalResult<Self> {
        let (exogenous, endogenous) = network.signature();

        let context_keys: BTreeSet<Variable> = context.keys().cloned().collect();
        if exogenous != context_keys {
            return Err(CausalError::SignatureMismatch {
                expected: format_variables(&exogenous),
                actual: format_variables(&context_keys),
            });
        }

        let domain_keys: BTreeSet<Variable> = endogenous_domains.keys().cloned().collect();
        if endogenous != domain_keys {
            return Err(CausalError::SignatureMismatch {
                expected: format_variables(&endogenous),
                actual: format_variables(&domain_keys),
            });
        }

        let mut values = context.clone();
        values.extend(network.evaluate(&context)?);

        for (variable, domain) in &endogenous_domains {
            match values.get(variable) {
                Some(value) if domain.contains(value) => {}
                Some(value) => {
                    return Err(CausalError::DomainViolation {
                        variable: variable.clone(),
                        value: value.clone(),
                    })
                }
                None => {
                    return Err(CausalError::MissingEquation {
                        variable: variable.clone(),
                    })
                }
            }
        }

        Ok(Self {
            network,
            context,
            endogenous_domains,
            values,
        })
    }

    pub fn network(&self) -> &CausalNetwork {
        &self.network
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn endogenous_domains(&self) -> &DomainMap {
        &self.endogenous_domains
    }

    /// The unique fixed point: the context plus every derived endogenous
    /// value.
    pub fn values(&self) -> &Assignment {
        &self.values
    }

    /// The actual value of one variable.
    pub fn value(&self, variable: &Variable) -> Option<&Value> {
        self.values.get(variable)
    }
}

fn format_variables(set: &BTreeSet<Variable>) -> String {
    let symbols: Vec<&str> = set.iter().map(Variable::symbol).collect();
    symbols.join(", ")
}

/// One causal network shared across a finite set of possible worlds, each
/// a total exogenous context, with an optional probability weight per
/// world for blame scoring.
#[derive(Debug, Clone)]
pub struct EpistemicState {
    network: CausalNetwork,
    contexts: Vec<Context>,
    weights: Vec<f64>,
    endogenous_domains: DomainMap,
}

impl EpistemicState {
    /// State with implicit uniform weights over the given worlds.
    pub fn new(
        network: CausalNetwork,
        contexts: Vec<Context>,
        endogenous_domains: DomainMap,
    ) -> CausalResult<Self> {
        let weight = 1.0 / contexts.len().max(1) as f64;
        let weights = vec![weight; contexts.len()];
        Self::build(network, contexts, weights, endogenous_domains)
    }

    /// State with explicit per-world weights, which must sum to 1 within
    /// `WEIGHT_TOLERANCE`.
    pub fn weighted(
        network: CausalNetwork,
        worlds: Vec<(Context, f64)>,
        endogenous_domains: DomainMap,
    ) -> CausalResult<Self> {
        let total: f64 = worlds.iter().map(|(_, weight)| weight).sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(CausalError::ProbabilityNormalization { total });
        }
        let (contexts, weights) = worlds.into_iter().unzip();
        Self::build(network, contexts, weights, endogenous_domains)
    }

    fn build(
        network: CausalNetwork,
        contexts: Vec<Context>,
        weights: Vec<f64>,
        endogenous_domains: DomainMap,
    ) -> CausalResult<Self> {
        let state = Self {
            network,
            contexts,
            weights,
            endogenous_domains,
        };
        // Validate every world eagerly; an invalid context must not
        // surface mid-search.
        state.causal_settings()?;
        Ok(state)
    }

    pub fn network(&self) -> &CausalNetwork {
        &self.network
    }

    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn endogenous_domains(&self) -> &DomainMap {
        &self.endogenous_domains
    }

    /// The worlds paired with their weights.
    pub fn worlds(&self) -> impl Iterator<Item = (&Context, f64)> {
        self.contexts.iter().zip(self.weights.iter().copied())
    }

    /// One validated setting per world.
    pub fn causal_settings(&self) -> CausalResult<Vec<CausalSetting>> {
        self.contexts
            .iter()
            .map(|context| {
                CausalSetting::new(
                    self.network.clone(),
                    context.clone(),
                    self.endogenous_domains.clone(),
                )
            })
            .collect()
    }
}
