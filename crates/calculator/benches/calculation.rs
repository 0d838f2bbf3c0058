use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use corrugate_calculator::{
    BoxDimensions, BoxParameters, CalculationFormulas, CalculatorConfig, FluteType, LayerSpec,
    PaperLayer, PaperSpec, PlyCount, calculate,
};

fn params(plies: PlyCount) -> BoxParameters {
    let paper = plies
        .layers()
        .iter()
        .fold(PaperSpec::new(), |spec, layer| spec.with_layer(*layer, LayerSpec::gsm(150)));
    BoxParameters {
        dimensions: BoxDimensions {
            length_cm: 45.0,
            breadth_cm: 32.5,
            height_cm: 28.0,
        },
        flute: FluteType::B,
        plies,
        paper,
        paper_cost_per_kg: None,
        quantity: 2_000,
        profit_margin_pct: Some(18.0),
    }
}

fn bench_calculate(c: &mut Criterion) {
    let config = CalculatorConfig::default();
    let mut group = c.benchmark_group("calculate");
    for plies in [PlyCount::Three, PlyCount::Five, PlyCount::Seven] {
        let p = params(plies);
        group.bench_with_input(BenchmarkId::from_parameter(plies.count()), &p, |b, p| {
            b.iter(|| calculate(black_box(p), &config))
        });
    }
    group.finish();
}

fn bench_formulas(c: &mut Criterion) {
    let config = CalculatorConfig::default();
    let p = params(PlyCount::Seven);
    let result = calculate(&p, &config).expect("valid parameters");
    c.bench_function("explain_seven_ply", |b| {
        b.iter(|| CalculationFormulas::explain(black_box(&p), black_box(&result), &config))
    });
}

criterion_group!(benches, bench_calculate, bench_formulas);
criterion_main!(benches);
