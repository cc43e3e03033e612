//! Graded responsibility over actual causes and blame over epistemic
//! states (Chockler-Halpern).

use std::collections::BTreeMap;

use tracing::debug;

use causalis_core::{Assignment, CausalResult, Event, Value, Variable};

use crate::actual::{find_actual_causes, find_witnesses_ac2};
use crate::setting::{CausalSetting, EpistemicState};

/// The degree of responsibility of `variable = value` for `event`.
///
/// `1/k`, where `k` is the minimum over all actual causes containing the
/// literal of the smallest witness cardinality proving AC2 for that
/// cause; `0` when the literal is part of no actual cause.
pub fn degree_of_responsibility(
    variable: &Variable,
    value: &Value,
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<f64> {
    let mut smallest: Option<usize> = None;
    for cause in find_actual_causes(event, setting)? {
        if cause.get(variable) != Some(value) {
            continue;
        }
        let witnesses = find_witnesses_ac2(&cause, event, setting)?;
        if let Some(k) = witnesses.iter().map(Assignment::len).min() {
            smallest = Some(smallest.map_or(k, |best| best.min(k)));
        }
    }
    Ok(smallest.map_or(0.0, |k| 1.0 / k as f64))
}

/// Tabulate `degree_of_responsibility` over every endogenous variable and
/// every value in its domain.
pub fn degrees_of_responsibility(
    event: &Event,
    setting: &CausalSetting,
) -> CausalResult<BTreeMap<Variable, BTreeMap<Value, f64>>> {
    let mut table = BTreeMap::new();
    for (variable, domain) in setting.endogenous_domains() {
        let mut row = BTreeMap::new();
        for value in domain {
            row.insert(
                value.clone(),
                degree_of_responsibility(variable, value, event, setting)?,
            );
        }
        table.insert(variable.clone(), row);
    }
    Ok(table)
}

/// The degree of blame of `variable = value` for `event` across an
/// epistemic state: the weighted sum of per-world responsibilities.
pub fn degree_of_blame(
    variable: &Variable,
    value: &Value,
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<f64> {
    debug!(worlds = state.contexts().len(), "blame scoring");
    let mut total = 0.0;
    for (context, weight) in state.worlds() {
        let setting = CausalSetting::new(
            state.network().clone(),
            context.clone(),
            state.endogenous_domains().clone(),
        )?;
        total += weight * degree_of_responsibility(variable, value, event, &setting)?;
    }
    Ok(total)
}

/// Tabulate `degree_of_blame` over every endogenous variable and every
/// value in its domain.
pub fn degrees_of_blame(
    event: &Event,
    state: &EpistemicState,
) -> CausalResult<BTreeMap<Variable, BTreeMap<Value, f64>>> {
    let mut table = BTreeMap::new();
    for (variable, domain) in state.endogenous_domains() {
        let mut row = BTreeMap::new();
        for value in domain {
            row.insert(
                value.clone(),
                degree_of_blame(variable, value, event, state)?,
            );
        }
        table.insert(variable.clone(), row);
    }
    Ok(table)
}
