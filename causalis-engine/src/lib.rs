//! # causalis-engine
//!
//! Halpern-Pearl actual causality over finite structural causal models:
//! counterfactual entailment, actual- and sufficient-cause search,
//! responsibility and blame scoring, explanation search over epistemic
//! states, and contrastive "rather than" variants of causes and
//! explanations.
//!
//! The searches are exhaustive by definition: exponential in variable
//! count times domain size. This is a correctness-first engine for small
//! finite models, not a scalable solver. Candidate checks read only
//! immutable inputs, so the top-level enumerations run in parallel and
//! their results must be treated as sets.

pub mod actual;
pub mod contrastive;
pub mod enumerate;
pub mod explanation;
pub mod formula;
pub mod network;
pub mod responsibility;
pub mod setting;
pub mod sufficient;

// Re-export the foundation types so callers and integration tests need a
// single dependency.
pub use causalis_core::{
    Assignment, CausalError, CausalResult, Context, DomainMap, Event, Value, Variable,
};

pub use actual::{
    find_actual_causes, find_witnesses_ac2, is_actual_cause, satisfies_ac1, satisfies_ac2,
    satisfies_ac3,
};
pub use contrastive::{
    find_contrastive_counterfactual_causes, find_contrastive_explanations,
    is_contrastive_bifactual_cause, is_contrastive_counterfactual_cause,
    is_contrastive_explanation, is_partial_cause, is_partial_explanation,
    is_partial_nontrivial_explanation, is_partial_sufficient_cause, satisfies_bc1, satisfies_bc2,
    satisfies_bc3, satisfies_bc4, satisfies_cc1, satisfies_cc2, satisfies_cc3, satisfies_cc4,
    satisfies_cc5, satisfies_ce1, satisfies_ce2, satisfies_ce3, satisfies_ce4,
};
pub use explanation::{
    find_explanations, find_nontrivial_explanations, find_trivial_explanations, is_explanation,
    is_nontrivial_explanation, is_trivial_explanation, satisfies_ex1, satisfies_ex2,
    satisfies_ex3, satisfies_ex4,
};
pub use formula::CausalFormula;
pub use network::{CausalNetwork, StructuralEquation};
pub use responsibility::{
    degree_of_blame, degree_of_responsibility, degrees_of_blame, degrees_of_responsibility,
};
pub use setting::{CausalSetting, EpistemicState};
pub use sufficient::{
    find_minimal_sufficient_causes, find_sufficient_causes, is_minimal_sufficient_cause,
    is_sufficient_cause, satisfies_sc1, satisfies_sc2, satisfies_sc3, satisfies_sc4,
};
