//! Explanation search over epistemic states and blame scoring.

use std::collections::BTreeSet;

use causalis_engine::{
    degree_of_blame, degree_of_responsibility, find_explanations, find_nontrivial_explanations,
    find_trivial_explanations, is_explanation, Assignment, CausalNetwork, CausalSetting,
    DomainMap, EpistemicState, Event, StructuralEquation, Value, Variable,
};

fn var(symbol: &str) -> Variable {
    Variable::new(symbol)
}

fn bool_at(values: &Assignment, symbol: &str) -> bool {
    values[&var(symbol)].as_bool().unwrap()
}

fn copy_of(parent: &str) -> StructuralEquation {
    let parent = var(parent);
    StructuralEquation::from_fn(move |values| values[&parent].clone())
}

fn bool_domains(symbols: &[&str]) -> DomainMap {
    symbols
        .iter()
        .map(|symbol| {
            (
                var(symbol),
                [Value::Bool(false), Value::Bool(true)].into_iter().collect(),
            )
        })
        .collect()
}

fn assignment(pairs: &[(&str, bool)]) -> Assignment {
    pairs
        .iter()
        .map(|(symbol, b)| (var(symbol), Value::Bool(*b)))
        .collect()
}

fn as_set(assignments: Vec<Assignment>) -> BTreeSet<Assignment> {
    assignments.into_iter().collect()
}

/// L = U_L; MD = U_MD; FF = L | MD.
fn forest_fire_disjunctive() -> CausalNetwork {
    let mut network = CausalNetwork::new();
    network
        .add_dependency(var("L"), [var("U_L")], copy_of("U_L"))
        .unwrap();
    network
        .add_dependency(var("MD"), [var("U_MD")], copy_of("U_MD"))
        .unwrap();
    network
        .add_dependency(
            var("FF"),
            [var("L"), var("MD")],
            StructuralEquation::labeled("L | MD", |values| {
                Value::Bool(bool_at(values, "L") || bool_at(values, "MD"))
            }),
        )
        .unwrap();
    network
}

/// The three worlds in which the fire occurs.
fn fire_worlds() -> Vec<Assignment> {
    vec![
        assignment(&[("U_L", true), ("U_MD", true)]),
        assignment(&[("U_L", true), ("U_MD", false)]),
        assignment(&[("U_L", false), ("U_MD", true)]),
    ]
}

// =============================================================================
// Explanations of the forest fire
// =============================================================================
#[test]
fn forest_fire_explanations() {
    let state = EpistemicState::new(
        forest_fire_disjunctive(),
        fire_worlds(),
        bool_domains(&["L", "MD", "FF"]),
    )
    .unwrap();
    let event = Event::equals("FF", true);

    let explanations = as_set(find_explanations(&event, &state).unwrap());
    let expected = as_set(vec![
        assignment(&[("L", true)]),
        assignment(&[("MD", true)]),
        assignment(&[("FF", true)]),
    ]);
    assert_eq!(explanations, expected);
}

#[test]
fn forest_fire_triviality_split() {
    let state = EpistemicState::new(
        forest_fire_disjunctive(),
        fire_worlds(),
        bool_domains(&["L", "MD", "FF"]),
    )
    .unwrap();
    let event = Event::equals("FF", true);

    // The fire explains itself in every world: trivial.
    let trivial = as_set(find_trivial_explanations(&event, &state).unwrap());
    assert_eq!(trivial, as_set(vec![assignment(&[("FF", true)])]));

    // Lightning and the match each fail to hold in some fire world.
    let nontrivial = as_set(find_nontrivial_explanations(&event, &state).unwrap());
    let expected = as_set(vec![
        assignment(&[("L", true)]),
        assignment(&[("MD", true)]),
    ]);
    assert_eq!(nontrivial, expected);
}

#[test]
fn non_minimal_candidate_is_not_an_explanation() {
    let state = EpistemicState::new(
        forest_fire_disjunctive(),
        fire_worlds(),
        bool_domains(&["L", "MD", "FF"]),
    )
    .unwrap();
    let event = Event::equals("FF", true);

    // {L, MD} fails EX2: {L} alone already satisfies EX1.
    let pair = assignment(&[("L", true), ("MD", true)]);
    assert!(!is_explanation(&pair, &event, &state).unwrap());

    // Empty candidates are never explanations.
    assert!(!is_explanation(&Assignment::new(), &event, &state).unwrap());
}

// =============================================================================
// Blame
// =============================================================================
#[test]
fn single_world_blame_equals_responsibility() {
    let context = assignment(&[("U_L", true), ("U_MD", true)]);
    let domains = bool_domains(&["L", "MD", "FF"]);
    let event = Event::equals("FF", true);

    let state = EpistemicState::weighted(
        forest_fire_disjunctive(),
        vec![(context.clone(), 1.0)],
        domains.clone(),
    )
    .unwrap();
    let setting = CausalSetting::new(forest_fire_disjunctive(), context, domains).unwrap();

    for symbol in ["L", "MD", "FF"] {
        for value in [Value::Bool(false), Value::Bool(true)] {
            let blame = degree_of_blame(&var(symbol), &value, &event, &state).unwrap();
            let responsibility =
                degree_of_responsibility(&var(symbol), &value, &event, &setting).unwrap();
            assert_eq!(blame, responsibility, "{symbol}={value}");
        }
    }
}

#[test]
fn blame_averages_responsibility_across_worlds() {
    // In (L, MD) the lightning shares responsibility (0.5); alone against
    // a dry forest it is fully responsible (1.0).
    let worlds = vec![
        (assignment(&[("U_L", true), ("U_MD", true)]), 0.5),
        (assignment(&[("U_L", true), ("U_MD", false)]), 0.5),
    ];
    let state = EpistemicState::weighted(
        forest_fire_disjunctive(),
        worlds,
        bool_domains(&["L", "MD", "FF"]),
    )
    .unwrap();
    let event = Event::equals("FF", true);

    let blame_l = degree_of_blame(&var("L"), &Value::Bool(true), &event, &state).unwrap();
    assert!((blame_l - 0.75).abs() < 1e-12);

    let blame_ff = degree_of_blame(&var("FF"), &Value::Bool(true), &event, &state).unwrap();
    assert!((blame_ff - 1.0).abs() < 1e-12);
}

#[test]
fn uniform_state_weighs_worlds_equally() {
    let state = EpistemicState::new(
        forest_fire_disjunctive(),
        vec![
            assignment(&[("U_L", true), ("U_MD", true)]),
            assignment(&[("U_L", true), ("U_MD", false)]),
        ],
        bool_domains(&["L", "MD", "FF"]),
    )
    .unwrap();
    let event = Event::equals("FF", true);

    let blame_l = degree_of_blame(&var("L"), &Value::Bool(true), &event, &state).unwrap();
    assert!((blame_l - 0.75).abs() < 1e-12);
}
