//! Actual-cause search: the Halpern-Pearl AC1-AC3 conditions, witness
//! enumeration, and exhaustive candidate search.

use std::collections::BTreeSet;

use rayon::prelude::*;
use tracing::{debug, trace};

use causalis_core::{Assignment, CausalResult, Event, Variable};

use crate::enumerate::{all_candidates, assignments_over, sub_assignments};
use crate::formula::CausalFormula;
use crate::setting::CausalSetting;

/// AC1: the candidate's literals and the event both hold in the actual
/// world. Empty candidates fail by contract.
pub fn satisfies_ac1(candidate: &Assignment, event: &Event, setting: &CausalSetting) -> bool {
    if candidate.is_empty() {
        return false;
    }
    Event::conjunction(candidate).evaluate(setting.values()) && event.evaluate(setting.values())
}

/// Enumerate every AC2 witness for `candidate`.
///
/// A witness combines an alternative candidate tuple X' (drawn from the
/// candidate variables' domains, differing from the candidate in at least
/// one coordinate) with some subset of the remaining endogenous variables
/// pinned at their actual values, such that the combined intervention
/// makes the negated event hold.
///
/// All witnesses are returned, not just the first: responsibility scoring
/// needs their cardinalities.
pub fn find_witnesses_ac2(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<Vec<Assignment>> {
    if candidate.is_empty() {
        return Ok(Vec::new());
    }

    let candidate_variables: BTreeSet<Variable> = candidate.keys().cloned().collect();
    let pinned: Assignment = setting
        .values()
        .iter()
        .filter(|(variable, _)| {
            setting.endogenous_domains().contains_key(*variable)
                && !candidate.contains_key(*variable)
        })
        .map(|(variable, value)| (variable.clone(), value.clone()))
        .collect();

    let negated_event = Event::not(event.clone());
    let mut witnesses = Vec::new();
    for x_prime in assignments_over(setting.endogenous_domains(), &candidate_variables) {
        if x_prime == *candidate {
            // X' must differ from the candidate in at least one coordinate.
            continue;
        }
        for pinned_subset in sub_assignments(&pinned) {
            let mut witness = x_prime.clone();
            witness.extend(pinned_subset);
            let formula = CausalFormula::new(witness.clone(), negated_event.clone());
            if formula.entailed_by(setting)? {
                trace!(size = witness.len(), "AC2 witness found");
                witnesses.push(witness);
            }
        }
    }
    Ok(witnesses)
}

/// AC2: at least one witness exists. Empty candidates fail by contract.
pub fn satisfies_ac2(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    Ok(!find_witnesses_ac2(candidate, event, setting)?.is_empty())
}

/// AC3: no nonempty proper sub-assignment of the candidate passes
/// AC1 and AC2 on its own (minimality of the candidate).
pub fn satisfies_ac3(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    for subset in sub_assignments(candidate) {
        if subset.is_empty() || subset == *candidate {
            continue;
        }
        if satisfies_ac1(&subset, event, setting) && satisfies_ac2(&subset, event, setting)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// AC1, then AC2, then AC3, short-circuiting in that order.
pub fn is_actual_cause(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    if !satisfies_ac1(candidate, event, setting) {
        return Ok(false);
    }
    if !satisfies_ac2(candidate, event, setting)? {
        return Ok(false);
    }
    satisfies_ac3(candidate, event, setting)
}

/// Every actual cause of `event` in `setting`.
///
/// Enumerates every nonempty partial assignment over the endogenous
/// variables; candidate checks are independent, so they run in parallel.
/// Treat the output as a set: its order is not significant.
pub fn find_actual_causes(
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<Vec<Assignment>> {
    let candidates = all_candidates(setting.endogenous_domains());
    debug!(candidates = candidates.len(), "actual-cause search");

    let flags: Vec<Option<Assignment>> = candidates
        .into_par_iter()
        .map(|candidate| {
            is_actual_cause(&candidate, event, setting).map(|hit| hit.then_some(candidate))
        })
        .collect::<CausalResult<_>>()?;
    Ok(flags.into_iter().flatten().collect())
}
