//! Iterative candidate, subset, and context enumeration.
//!
//! Bitmask powersets and an explicit mixed-radix counter keep enumeration
//! depth independent of the variable count; nothing here recurses.

use std::collections::BTreeSet;

use causalis_core::{Assignment, Context, DomainMap, Value, Variable};

/// Every sub-assignment of `assignment`, including the empty one, by
/// bitmask over its entries. At most 63 entries; the mask is a `u64`.
pub fn sub_assignments(assignment: &Assignment) -> Vec<Assignment> {
    let entries: Vec<(&Variable, &Value)> = assignment.iter().collect();
    let n = entries.len();
    assert!(n < 64, "subset enumeration supports at most 63 entries");
    (0_u64..(1 << n))
        .map(|mask| {
            entries
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, (variable, value))| ((*variable).clone(), (*value).clone()))
                .collect()
        })
        .collect()
}

/// Every assignment of the given variables drawn from their domains, via a
/// mixed-radix counter. The product of zero variables is the single empty
/// assignment; a variable with an empty or missing domain yields nothing.
pub fn assignments_over(domains: &DomainMap, variables: &BTreeSet<Variable>) -> Vec<Assignment> {
    let mut axes: Vec<(&Variable, Vec<&Value>)> = Vec::with_capacity(variables.len());
    for variable in variables {
        match domains.get(variable) {
            Some(domain) if !domain.is_empty() => axes.push((variable, domain.iter().collect())),
            _ => return Vec::new(),
        }
    }

    let mut out = Vec::new();
    let mut counters = vec![0_usize; axes.len()];
    loop {
        out.push(
            axes.iter()
                .zip(&counters)
                .map(|((variable, domain), &i)| ((*variable).clone(), domain[i].clone()))
                .collect(),
        );

        let mut pos = 0;
        loop {
            if pos == axes.len() {
                return out;
            }
            counters[pos] += 1;
            if counters[pos] < axes[pos].1.len() {
                break;
            }
            counters[pos] = 0;
            pos += 1;
        }
    }
}

/// Every total exogenous context: the full product over all exogenous
/// domains.
pub fn all_contexts(exogenous_domains: &DomainMap) -> Vec<Context> {
    let variables: BTreeSet<Variable> = exogenous_domains.keys().cloned().collect();
    assignments_over(exogenous_domains, &variables)
}

/// Every nonempty partial assignment over the domain map: each nonempty
/// variable subset crossed with each value combination. At most 63
/// variables; the subset mask is a `u64`.
pub fn all_candidates(domains: &DomainMap) -> Vec<Assignment> {
    let variables: Vec<&Variable> = domains.keys().collect();
    let n = variables.len();
    assert!(n < 64, "candidate enumeration supports at most 63 variables");

    let mut out = Vec::new();
    for mask in 1_u64..(1 << n) {
        let subset: BTreeSet<Variable> = variables
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, variable)| (*variable).clone())
            .collect();
        out.extend(assignments_over(domains, &subset));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boolean_domains(symbols: &[&str]) -> DomainMap {
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
    fn sub_assignments_counts_powerset() {
        let assignment: Assignment = [
            (Variable::new("A"), Value::Bool(true)),
            (Variable::new("B"), Value::Bool(false)),
            (Variable::new("C"), Value::Bool(true)),
        ]
        .into_iter()
        .collect();
        let subs = sub_assignments(&assignment);
        assert_eq!(subs.len(), 8);
        assert!(subs.contains(&Assignment::new()));
        assert!(subs.contains(&assignment));
    }

    #[test]
    fn assignments_over_is_full_product() {
        let domains = boolean_domains(&["A", "B"]);
        let variables: BTreeSet<Variable> = domains.keys().cloned().collect();
        let assignments = assignments_over(&domains, &variables);
        assert_eq!(assignments.len(), 4);
    }

    #[test]
    fn assignments_over_no_variables_is_single_empty() {
        let domains = boolean_domains(&["A"]);
        let assignments = assignments_over(&domains, &BTreeSet::new());
        assert_eq!(assignments, vec![Assignment::new()]);
    }

    #[test]
    fn assignments_over_missing_domain_is_empty() {
        let domains = boolean_domains(&["A"]);
        let variables: BTreeSet<Variable> = [Variable::new("Z")].into_iter().collect();
        assert!(assignments_over(&domains, &variables).is_empty());
    }

    #[test]
    fn all_candidates_counts_nonempty_partial_assignments() {
        // 2 boolean variables: (2+1)*(2+1) - 1 = 8 nonempty partial assignments.
        let domains = boolean_domains(&["A", "B"]);
        let candidates = all_candidates(&domains);
        assert_eq!(candidates.len(), 8);
        assert!(candidates.iter().all(|candidate| !candidate.is_empty()));
    }

    #[test]
    #[should_panic(expected = "at most 63 entries")]
    fn sub_assignments_rejects_oversized_input() {
        let assignment: Assignment = (0..64)
            .map(|i| (Variable::new(format!("V{i}")), Value::Bool(true)))
            .collect();
        sub_assignments(&assignment);
    }

    #[test]
    fn all_contexts_covers_every_world() {
        let domains = boolean_domains(&["U1", "U2"]);
        let contexts = all_contexts(&domains);
        assert_eq!(contexts.len(), 4);
        // Every context is total over the exogenous variables.
        assert!(contexts.iter().all(|context| context.len() == 2));
    }
}
