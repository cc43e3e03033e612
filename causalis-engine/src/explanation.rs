//! Explanation search over epistemic states: the EX1-EX4 conditions.

use rayon::prelude::*;
use tracing::debug;

use causalis_core::{Assignment, CausalResult, Event};

use crate::enumerate::{all_candidates, sub_assignments};
use crate::formula::CausalFormula;
use crate::setting::EpistemicState;
use crate::sufficient::satisfies_sc2;

/// EX1: in every world where the candidate and the event jointly hold,
/// the candidate overlaps an actual cause of the event (SC2); and forcing
/// the candidate makes the event hold in every world, regardless of which
/// one is actual. Empty candidates fail by contract.
pub fn satisfies_ex1(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    if candidate.is_empty() {
        return Ok(false);
    }
    let joint = Event::and(Event::conjunction(candidate), event.clone());
    let formula = CausalFormula::new(candidate.clone(), event.clone());
    for setting in state.causal_settings()? {
        if joint.evaluate(setting.values()) && !satisfies_sc2(candidate, event, &setting)? {
            return Ok(false);
        }
        if !formula.entailed_by(&setting)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// EX2: no nonempty proper sub-assignment of the candidate satisfies EX1
/// (minimality of the explanation).
pub fn satisfies_ex2(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    for subset in sub_assignments(candidate) {
        if subset.is_empty() || subset == *candidate {
            continue;
        }
        if satisfies_ex1(&subset, event, state)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// EX3: plausibility. The candidate and the event jointly hold in at
/// least one world.
pub fn satisfies_ex3(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    let joint = Event::and(Event::conjunction(candidate), event.clone());
    for setting in state.causal_settings()? {
        if joint.evaluate(setting.values()) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// EX4: non-triviality. Some world makes the event hold without the
/// candidate's conjunction, so the candidate is not already forced
/// whenever the event occurs.
pub fn satisfies_ex4(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    let conjunction = Event::conjunction(candidate);
    for setting in state.causal_settings()? {
        if event.evaluate(setting.values()) && !conjunction.evaluate(setting.values()) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// EX1, EX2, and EX3, short-circuiting in that order.
pub fn is_explanation(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    if !satisfies_ex1(candidate, event, state)? {
        return Ok(false);
    }
    if !satisfies_ex2(candidate, event, state)? {
        return Ok(false);
    }
    satisfies_ex3(candidate, event, state)
}

/// An explanation that additionally passes EX4.
pub fn is_nontrivial_explanation(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    if !is_explanation(candidate, event, state)? {
        return Ok(false);
    }
    satisfies_ex4(candidate, event, state)
}

/// An explanation that fails EX4: the candidate already holds in every
/// world where the event does.
pub fn is_trivial_explanation(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    if !is_explanation(candidate, event, state)? {
        return Ok(false);
    }
    Ok(!satisfies_ex4(candidate, event, state)?)
}

fn search(
    event: &Event,
    state: &EpistemicState,
    predicate: impl Fn(&Assignment, &Event, &EpistemicState) -> CausalResult<bool> + Sync,
) -> CausalResult<Vec<Assignment>> {
    let candidates = all_candidates(state.endogenous_domains());
    debug!(candidates = candidates.len(), "explanation search");

    let flags: Vec<Option<Assignment>> = candidates
        .into_par_iter()
        .map(|candidate| predicate(&candidate, event, state).map(|hit| hit.then_some(candidate)))
        .collect::<CausalResult<_>>()?;
    Ok(flags.into_iter().flatten().collect())
}

/// Every explanation of `event` across the epistemic state. Treat the
/// output as a set.
pub fn find_explanations(event: &Event, state: &EpistemicState) -> CausalResult<Vec<Assignment>> {
    search(event, state, is_explanation)
}

/// Every nontrivial explanation (EX1-EX4).
pub fn find_nontrivial_explanations(
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<Vec<Assignment>> {
    search(event, state, is_nontrivial_explanation)
}

/// Every trivial explanation (EX1-EX3 but not EX4).
pub fn find_trivial_explanations(
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<Vec<Assignment>> {
    search(event, state, is_trivial_explanation)
}
