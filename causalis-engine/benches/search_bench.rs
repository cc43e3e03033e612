//! Benchmarks for the exhaustive searches on the reference models. The
//! cost is exponential by definition; these track the constant factor.

use criterion::{criterion_group, criterion_main, Criterion};

use causalis_engine::{
    degrees_of_responsibility, find_actual_causes, Assignment, CausalNetwork, CausalSetting,
    DomainMap, Event, StructuralEquation, Value, Variable,
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

fn forest_fire_setting() -> CausalSetting {
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
            StructuralEquation::from_fn(|values| {
                Value::Bool(bool_at(values, "L") || bool_at(values, "MD"))
            }),
        )
        .unwrap();
    CausalSetting::new(
        network,
        assignment(&[("U_L", true), ("U_MD", true)]),
        bool_domains(&["L", "MD", "FF"]),
    )
    .unwrap()
}

fn rock_throwing_setting() -> CausalSetting {
    let mut network = CausalNetwork::new();
    network
        .add_dependency(var("ST"), [var("U_ST")], copy_of("U_ST"))
        .unwrap();
    network
        .add_dependency(var("BT"), [var("U_BT")], copy_of("U_BT"))
        .unwrap();
    network
        .add_dependency(var("SH"), [var("ST")], copy_of("ST"))
        .unwrap();
    network
        .add_dependency(
            var("BH"),
            [var("BT"), var("SH")],
            StructuralEquation::from_fn(|values| {
                Value::Bool(bool_at(values, "BT") && !bool_at(values, "SH"))
            }),
        )
        .unwrap();
    network
        .add_dependency(
            var("BS"),
            [var("SH"), var("BH")],
            StructuralEquation::from_fn(|values| {
                Value::Bool(bool_at(values, "SH") || bool_at(values, "BH"))
            }),
        )
        .unwrap();
    CausalSetting::new(
        network,
        assignment(&[("U_ST", true), ("U_BT", true)]),
        bool_domains(&["ST", "BT", "SH", "BH", "BS"]),
    )
    .unwrap()
}

fn bench_actual_causes(c: &mut Criterion) {
    let forest_fire = forest_fire_setting();
    let rock = rock_throwing_setting();

    c.bench_function("actual_causes/forest_fire", |b| {
        let event = Event::equals("FF", true);
        b.iter(|| find_actual_causes(&event, &forest_fire).unwrap());
    });

    c.bench_function("actual_causes/rock_throwing", |b| {
        let event = Event::equals("BS", true);
        b.iter(|| find_actual_causes(&event, &rock).unwrap());
    });
}

fn bench_responsibility(c: &mut Criterion) {
    let forest_fire = forest_fire_setting();

    c.bench_function("responsibility/forest_fire", |b| {
        let event = Event::equals("FF", true);
        b.iter(|| degrees_of_responsibility(&event, &forest_fire).unwrap());
    });
}

criterion_group!(benches, bench_actual_causes, bench_responsibility);
criterion_main!(benches);
