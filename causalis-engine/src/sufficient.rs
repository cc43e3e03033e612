//! Sufficient-cause search: the SC1-SC4 conditions.
//!
//! The reference top-level conjunction (Halpern 2016) is SC1-SC3 only;
//! whether SC4 minimality belongs in it is an open question, so it is an
//! explicit second predicate here rather than a silent choice.

use causalis_core::{Assignment, CausalResult, DomainMap, Event};

use crate::actual::{find_actual_causes, satisfies_ac1};
use crate::enumerate::{all_candidates, all_contexts, sub_assignments};
use crate::formula::CausalFormula;
use crate::setting::CausalSetting;

/// SC1: identical to AC1. The candidate's literals and the event hold in
/// the actual world.
pub fn satisfies_sc1(candidate: &Assignment, event: &Event, setting: &CausalSetting) -> bool {
    satisfies_ac1(candidate, event, setting)
}

/// SC2: the candidate shares at least one literal with some actual cause
/// of the event in this setting.
pub fn satisfies_sc2(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    if candidate.is_empty() {
        return Ok(false);
    }
    for cause in find_actual_causes(event, setting)? {
        if candidate
            .iter()
            .any(|(variable, value)| cause.get(variable) == Some(value))
        {
            return Ok(true);
        }
    }
    Ok(false)
}

/// SC3: forcing the candidate makes the event hold under every possible
/// exogenous context, not just the actual one.
pub fn satisfies_sc3(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
    exogenous_domains: &DomainMap,
) -> CausalResult<bool> {
    if candidate.is_empty() {
        return Ok(false);
    }
    let formula = CausalFormula::new(candidate.clone(), event.clone());
    for context in all_contexts(exogenous_domains) {
        let world = CausalSetting::new(
            setting.network().clone(),
            context,
            setting.endogenous_domains().clone(),
        )?;
        if !formula.entailed_by(&world)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// SC4: no nonempty proper sub-assignment of the candidate passes
/// SC1, SC2, and SC3 on its own.
pub fn satisfies_sc4(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
    exogenous_domains: &DomainMap,
) -> CausalResult<bool> {
    for subset in sub_assignments(candidate) {
        if subset.is_empty() || subset == *candidate {
            continue;
        }
        if satisfies_sc1(&subset, event, setting)
            && satisfies_sc2(&subset, event, setting)?
            && satisfies_sc3(&subset, event, setting, exogenous_domains)?
        {
            return Ok(false);
        }
    }
    Ok(true)
}

/// SC1, SC2, and SC3, short-circuiting in that order. Minimality is a
/// separate, explicit check: see `is_minimal_sufficient_cause`.
pub fn is_sufficient_cause(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
    exogenous_domains: &DomainMap,
) -> CausalResult<bool> {
    if !satisfies_sc1(candidate, event, setting) {
        return Ok(false);
    }
    if !satisfies_sc2(candidate, event, setting)? {
        return Ok(false);
    }
    satisfies_sc3(candidate, event, setting, exogenous_domains)
}

/// `is_sufficient_cause` plus the SC4 minimality condition.
pub fn is_minimal_sufficient_cause(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
    exogenous_domains: &DomainMap,
) -> CausalResult<bool> {
    if !is_sufficient_cause(candidate, event, setting, exogenous_domains)? {
        return Ok(false);
    }
    satisfies_sc4(candidate, event, setting, exogenous_domains)
}

/// Every sufficient cause (SC1-SC3) of `event` in `setting`. Treat the
/// output as a set.
pub fn find_sufficient_causes(
    event: &Event,
    setting: &CausalSetting,
    exogenous_domains: &DomainMap,
) -> CausalResult<Vec<Assignment>> {
    let mut out = Vec::new();
    for candidate in all_candidates(setting.endogenous_domains()) {
        if is_sufficient_cause(&candidate, event, setting, exogenous_domains)? {
            out.push(candidate);
        }
    }
    Ok(out)
}

/// Every minimal sufficient cause (SC1-SC4) of `event` in `setting`.
pub fn find_minimal_sufficient_causes(
    event: &Event,
    setting: &CausalSetting,
    exogenous_domains: &DomainMap,
) -> CausalResult<Vec<Assignment>> {
    let mut out = Vec::new();
    for candidate in all_candidates(setting.endogenous_domains()) {
        if is_minimal_sufficient_cause(&candidate, event, setting, exogenous_domains)? {
            out.push(candidate);
        }
    }
    Ok(out)
}
