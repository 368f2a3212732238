use dosgen::dos::DosAggregatorBuilder;
use dosgen::dot::{QuantumDot, QuantumDotBuilder};
use dosgen_sample::{Distance, Sample};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use utilities::{inas_in_gaas, seeded_rng, typical_dot_at};

fn build(x: Decimal, y: Decimal, seed: u64) -> QuantumDot {
    QuantumDotBuilder::new()
        .with_geometry(&typical_dot_at(x, y))
        .with_heterostructure(&inas_in_gaas())
        .with_rng(&mut seeded_rng(seed))
        .build()
}

#[test]
fn distant_dots_merge_into_one_density_of_states() {
    let first = build(dec!(100), dec!(100), 1);
    let second = build(dec!(900), dec!(900), 2);

    assert!(!first.overlaps(&second));
    assert!(first.distance(&second) > first.radius() + second.radius());

    // Identical geometry confines the same levels, whatever the solver seed
    assert_eq!(first.number_of_states(), second.number_of_states());
    for (a, b) in first.states().iter().zip(second.states()) {
        assert!((*a - *b).abs() < dec!(0.000001));
    }

    let merged = first
        .states()
        .iter()
        .chain(second.states())
        .copied()
        .collect::<Vec<_>>();
    assert_eq!(
        merged.len(),
        first.number_of_states() + second.number_of_states()
    );

    let sample = Sample::new(dec!(1000), dec!(1000)).unwrap();
    let dos = DosAggregatorBuilder::new()
        .with_sample(&sample)
        .with_bin_width(dec!(0.002))
        .build()
        .unwrap()
        .aggregate(merged.clone());

    let area = sample.area_in_square_metres();
    let counted: Decimal = dos.rows().iter().map(|bin| bin.density * area).sum();
    assert_eq!(counted, Decimal::from(merged.len()));

    let lowest = merged.iter().min().unwrap();
    assert_eq!(dos.rows()[0].lower, *lowest);
    assert!(dos.rows()[0].density > Decimal::ZERO);
}
