//! Contrastive cause and explanation search, after Miller's "why fact
//! rather than foil" reading of the Halpern-Pearl definitions.
//!
//! A contrastive query pairs each candidate with a foil that reassigns
//! every one of its variables (the difference condition), and each event
//! with a foil event. Bifactual causes (BC1-BC4) compare two worlds;
//! counterfactual causes (CC1-CC5) and contrastive explanations (CE1-CE4)
//! stay in one world or epistemic state and reach the foil side through
//! interventions. All of them build on partial causes and partial
//! explanations: sub-assignments of the causes and explanations the plain
//! searches already find.

use std::collections::BTreeSet;

use tracing::debug;

use causalis_core::{Assignment, CausalResult, DomainMap, Event, Variable};

use crate::actual::find_actual_causes;
use crate::enumerate::{all_candidates, assignments_over};
use crate::explanation::{find_explanations, find_nontrivial_explanations};
use crate::setting::{CausalSetting, EpistemicState};
use crate::sufficient::find_sufficient_causes;

fn is_sub_assignment(part: &Assignment, whole: &Assignment) -> bool {
    part.iter()
        .all(|(variable, value)| whole.get(variable) == Some(value))
}

/// The difference condition: the foil covers every variable of the fact
/// and reassigns each one to a different value.
fn differs_everywhere(fact: &Assignment, foil: &Assignment) -> bool {
    fact.iter()
        .all(|(variable, value)| foil.get(variable).is_some_and(|alt| alt != value))
}

/// A nonempty sub-assignment of some actual cause of `event`.
pub fn is_partial_cause(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    if candidate.is_empty() {
        return Ok(false);
    }
    Ok(find_actual_causes(event, setting)?
        .iter()
        .any(|cause| is_sub_assignment(candidate, cause)))
}

/// A nonempty sub-assignment of some sufficient cause of `event`.
pub fn is_partial_sufficient_cause(
    candidate: &Assignment,
    event: &Event,
    setting: &CausalSetting,
    exogenous_domains: &DomainMap,
) -> CausalResult<bool> {
    if candidate.is_empty() {
        return Ok(false);
    }
    Ok(find_sufficient_causes(event, setting, exogenous_domains)?
        .iter()
        .any(|cause| is_sub_assignment(candidate, cause)))
}

/// A nonempty sub-assignment of some explanation of `event`.
pub fn is_partial_explanation(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    if candidate.is_empty() {
        return Ok(false);
    }
    Ok(find_explanations(event, state)?
        .iter()
        .any(|explanation| is_sub_assignment(candidate, explanation)))
}

/// A nonempty sub-assignment of some nontrivial explanation of `event`.
pub fn is_partial_nontrivial_explanation(
    candidate: &Assignment,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    if candidate.is_empty() {
        return Ok(false);
    }
    Ok(find_nontrivial_explanations(event, state)?
        .iter()
        .any(|explanation| is_sub_assignment(candidate, explanation)))
}

/// Every (fact, foil) pair over the given variables whose foil satisfies
/// the difference condition.
pub fn assignment_pairs_over(
    domains: &DomainMap,
    variables: &BTreeSet<Variable>,
) -> Vec<(Assignment, Assignment)> {
    let mut out = Vec::new();
    for fact in assignments_over(domains, variables) {
        let mut foil_domains = DomainMap::new();
        for (variable, value) in &fact {
            let mut domain = domains.get(variable).cloned().unwrap_or_default();
            domain.remove(value);
            foil_domains.insert(variable.clone(), domain);
        }
        for foil in assignments_over(&foil_domains, variables) {
            out.push((fact.clone(), foil));
        }
    }
    out
}

/// Every (fact, foil) pair over every nonempty variable subset of the
/// domain map. At most 63 variables; the subset mask is a `u64`.
pub fn all_assignment_pairs(domains: &DomainMap) -> Vec<(Assignment, Assignment)> {
    let variables: Vec<&Variable> = domains.keys().collect();
    let n = variables.len();
    assert!(n < 64, "pair enumeration supports at most 63 variables");

    let mut out = Vec::new();
    for mask in 1_u64..(1 << n) {
        let subset: BTreeSet<Variable> = variables
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, variable)| (*variable).clone())
            .collect();
        out.extend(assignment_pairs_over(domains, &subset));
    }
    out
}

/// Pairs extending `taken` by one or more of the remaining variables.
fn extension_pairs(domains: &DomainMap, taken: &Assignment) -> Vec<(Assignment, Assignment)> {
    let remaining: DomainMap = domains
        .iter()
        .filter(|(variable, _)| !taken.contains_key(*variable))
        .map(|(variable, domain)| (variable.clone(), domain.clone()))
        .collect();
    all_assignment_pairs(&remaining)
}

// ---------------------------------------------------------------------------
// Bifactual causes: fact and foil each live in their own world
// ---------------------------------------------------------------------------

/// BC1: the fact is a partial cause of the fact event in the fact world.
pub fn satisfies_bc1(
    fact: &Assignment,
    fact_event: &Event,
    fact_setting: &CausalSetting,
) -> CausalResult<bool> {
    is_partial_cause(fact, fact_event, fact_setting)
}

/// BC2: the foil is a partial cause of the foil event in the foil world.
pub fn satisfies_bc2(
    foil: &Assignment,
    foil_event: &Event,
    foil_setting: &CausalSetting,
) -> CausalResult<bool> {
    is_partial_cause(foil, foil_event, foil_setting)
}

/// BC3: the difference condition on the pair.
pub fn satisfies_bc3(fact: &Assignment, foil: &Assignment) -> bool {
    differs_everywhere(fact, foil)
}

/// BC4: no proper extension of the pair satisfies BC1-BC3 again, so the
/// contrast is maximal.
pub fn satisfies_bc4(
    fact: &Assignment,
    foil: &Assignment,
    fact_event: &Event,
    foil_event: &Event,
    fact_setting: &CausalSetting,
    foil_setting: &CausalSetting,
) -> CausalResult<bool> {
    for (fact_extension, foil_extension) in
        extension_pairs(fact_setting.endogenous_domains(), fact)
    {
        let mut wider_fact = fact.clone();
        wider_fact.extend(fact_extension);
        let mut wider_foil = foil.clone();
        wider_foil.extend(foil_extension);
        if satisfies_bc3(&wider_fact, &wider_foil)
            && satisfies_bc1(&wider_fact, fact_event, fact_setting)?
            && satisfies_bc2(&wider_foil, foil_event, foil_setting)?
        {
            return Ok(false);
        }
    }
    Ok(true)
}

/// BC3, BC1, BC2, then BC4, short-circuiting in that order. Both settings
/// must share the causal network; only their contexts differ.
pub fn is_contrastive_bifactual_cause(
    fact: &Assignment,
    foil: &Assignment,
    fact_event: &Event,
    foil_event: &Event,
    fact_setting: &CausalSetting,
    foil_setting: &CausalSetting,
) -> CausalResult<bool> {
    if !satisfies_bc3(fact, foil) {
        return Ok(false);
    }
    if !satisfies_bc1(fact, fact_event, fact_setting)? {
        return Ok(false);
    }
    if !satisfies_bc2(foil, foil_event, foil_setting)? {
        return Ok(false);
    }
    satisfies_bc4(fact, foil, fact_event, foil_event, fact_setting, foil_setting)
}

// ---------------------------------------------------------------------------
// Counterfactual causes: one world, the foil reached by intervention
// ---------------------------------------------------------------------------

/// CC1: the fact is a partial cause of the fact event.
pub fn satisfies_cc1(
    fact: &Assignment,
    fact_event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    is_partial_cause(fact, fact_event, setting)
}

/// CC2: the foil event does not actually occur.
pub fn satisfies_cc2(foil_event: &Event, setting: &CausalSetting) -> bool {
    !foil_event.evaluate(setting.values())
}

/// CC3: under some endogenous intervention, the foil becomes a partial
/// cause of the foil event.
pub fn satisfies_cc3(
    foil: &Assignment,
    foil_event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    for intervention in all_candidates(setting.endogenous_domains()) {
        let world = CausalSetting::new(
            setting.network().intervene(&intervention),
            setting.context().clone(),
            setting.endogenous_domains().clone(),
        )?;
        if is_partial_cause(foil, foil_event, &world)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// CC4: the difference condition on the pair.
pub fn satisfies_cc4(fact: &Assignment, foil: &Assignment) -> bool {
    differs_everywhere(fact, foil)
}

/// CC5: no proper extension of the pair satisfies CC1, CC3, and CC4
/// again, so the contrast is maximal.
pub fn satisfies_cc5(
    fact: &Assignment,
    foil: &Assignment,
    fact_event: &Event,
    foil_event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    for (fact_extension, foil_extension) in extension_pairs(setting.endogenous_domains(), fact) {
        let mut wider_fact = fact.clone();
        wider_fact.extend(fact_extension);
        let mut wider_foil = foil.clone();
        wider_foil.extend(foil_extension);
        if satisfies_cc4(&wider_fact, &wider_foil)
            && satisfies_cc1(&wider_fact, fact_event, setting)?
            && satisfies_cc3(&wider_foil, foil_event, setting)?
        {
            return Ok(false);
        }
    }
    Ok(true)
}

/// CC2, CC4, CC1, CC3, then CC5, short-circuiting in that order.
pub fn is_contrastive_counterfactual_cause(
    fact: &Assignment,
    foil: &Assignment,
    fact_event: &Event,
    foil_event: &Event,
    setting: &CausalSetting,
) -> CausalResult<bool> {
    if !satisfies_cc2(foil_event, setting) {
        return Ok(false);
    }
    if !satisfies_cc4(fact, foil) {
        return Ok(false);
    }
    if !satisfies_cc1(fact, fact_event, setting)? {
        return Ok(false);
    }
    if !satisfies_cc3(foil, foil_event, setting)? {
        return Ok(false);
    }
    satisfies_cc5(fact, foil, fact_event, foil_event, setting)
}

/// Every contrastive counterfactual cause pair for "fact event rather
/// than foil event". Treat the output as a set.
pub fn find_contrastive_counterfactual_causes(
    fact_event: &Event,
    foil_event: &Event,
    setting: &CausalSetting,
) -> CausalResult<Vec<(Assignment, Assignment)>> {
    let pairs = all_assignment_pairs(setting.endogenous_domains());
    debug!(pairs = pairs.len(), "contrastive counterfactual cause search");

    let mut out = Vec::new();
    for (fact, foil) in pairs {
        if is_contrastive_counterfactual_cause(&fact, &foil, fact_event, foil_event, setting)? {
            out.push((fact, foil));
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Contrastive explanations over epistemic states
// ---------------------------------------------------------------------------

/// CE1: the fact is a partial explanation of the fact event.
pub fn satisfies_ce1(
    fact: &Assignment,
    fact_event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    is_partial_explanation(fact, fact_event, state)
}

/// CE2: under some endogenous intervention (or none), the foil becomes a
/// partial explanation of the foil event.
pub fn satisfies_ce2(
    foil: &Assignment,
    foil_event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    if is_partial_explanation(foil, foil_event, state)? {
        return Ok(true);
    }
    for intervention in all_candidates(state.endogenous_domains()) {
        let intervened = intervened_state(state, &intervention)?;
        if is_partial_explanation(foil, foil_event, &intervened)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn intervened_state(state: &EpistemicState, intervention: &Assignment) -> CausalResult<EpistemicState> {
    let worlds = state
        .worlds()
        .map(|(context, weight)| (context.clone(), weight))
        .collect();
    EpistemicState::weighted(
        state.network().intervene(intervention),
        worlds,
        state.endogenous_domains().clone(),
    )
}

/// CE3: the difference condition on the pair.
pub fn satisfies_ce3(fact: &Assignment, foil: &Assignment) -> bool {
    differs_everywhere(fact, foil)
}

/// CE4: no proper extension of the pair satisfies CE1-CE3 again, so the
/// contrast is maximal.
pub fn satisfies_ce4(
    fact: &Assignment,
    foil: &Assignment,
    fact_event: &Event,
    foil_event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    for (fact_extension, foil_extension) in extension_pairs(state.endogenous_domains(), fact) {
        let mut wider_fact = fact.clone();
        wider_fact.extend(fact_extension);
        let mut wider_foil = foil.clone();
        wider_foil.extend(foil_extension);
        if satisfies_ce3(&wider_fact, &wider_foil)
            && satisfies_ce1(&wider_fact, fact_event, state)?
            && satisfies_ce2(&wider_foil, foil_event, state)?
        {
            return Ok(false);
        }
    }
    Ok(true)
}

/// CE3, CE1, CE2, then CE4, short-circuiting in that order.
pub fn is_contrastive_explanation(
    fact: &Assignment,
    foil: &Assignment,
    fact_event: &Event,
    foil_event: &Event,
    state: &EpistemicState,
) -> CausalResult<bool> {
    if !satisfies_ce3(fact, foil) {
        return Ok(false);
    }
    if !satisfies_ce1(fact, fact_event, state)? {
        return Ok(false);
    }
    if !satisfies_ce2(foil, foil_event, state)? {
        return Ok(false);
    }
    satisfies_ce4(fact, foil, fact_event, foil_event, state)
}

/// Every contrastive explanation pair for "fact event rather than foil
/// event" across the epistemic state. Treat the output as a set.
pub fn find_contrastive_explanations(
    fact_event: &Event,
    foil_event: &Event,
    state: &EpistemicState,
) -> CausalResult<Vec<(Assignment, Assignment)>> {
    let pairs = all_assignment_pairs(state.endogenous_domains());
    debug!(pairs = pairs.len(), "contrastive explanation search");

    let mut out = Vec::new();
    for (fact, foil) in pairs {
        if is_contrastive_explanation(&fact, &foil, fact_event, foil_event, state)? {
            out.push((fact, foil));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use causalis_core::Value;

    fn assignment(pairs: &[(&str, bool)]) -> Assignment {
        pairs
            .iter()
            .map(|(symbol, b)| (Variable::new(*symbol), Value::Bool(*b)))
            .collect()
    }

    fn bool_domains(symbols: &[&str]) -> DomainMap {
        symbols
            .iter()
            .map(|symbol| {
                (
                    Variable::new(*symbol),
                    [Value::Bool(false), Value::Bool(true)].into_iter().collect(),
                )
            })
            .collect()
    }

    #[test]
    fn difference_condition_requires_full_reassignment() {
        let fact = assignment(&[("A", true), ("B", true)]);
        assert!(differs_everywhere(
            &fact,
            &assignment(&[("A", false), ("B", false)])
        ));
        // One shared value breaks the condition.
        assert!(!differs_everywhere(
            &fact,
            &assignment(&[("A", false), ("B", true)])
        ));
        // A foil missing a fact variable breaks it too.
        assert!(!differs_everywhere(&fact, &assignment(&[("A", false)])));
    }

    #[test]
    fn boolean_pairs_are_full_flips() {
        let domains = bool_domains(&["A", "B"]);
        let pairs = all_assignment_pairs(&domains);
        // 2 singletons per variable plus 4 two-variable facts, one foil each.
        assert_eq!(pairs.len(), 8);
        assert!(pairs.iter().all(|(fact, foil)| differs_everywhere(fact, foil)));
    }

    #[test]
    fn extension_pairs_skip_taken_variables() {
        let domains = bool_domains(&["A", "B", "C"]);
        let taken = assignment(&[("A", true)]);
        let pairs = extension_pairs(&domains, &taken);
        assert!(pairs
            .iter()
            .all(|(fact, _)| !fact.contains_key(&Variable::new("A"))));
        assert!(!pairs.is_empty());
    }
}
