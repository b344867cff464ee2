//! Conversion engine benchmarks.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use paper_trade::domain::services::price_conversion::{
    Discount, OfficialQuote, PriceConversion, convert_price, discounted_unit_price,
};
use paper_trade::domain::services::quantity_conversion::{convert_quantity, convert_quantity_with};
use paper_trade::domain::services::supply_amount;
use paper_trade::domain::value_objects::{
    DiscountRateUnit, Packaging, PaperSpec, PriceUnit, QuantityUnit,
};
use rust_decimal::Decimal;
use std::hint::black_box;

fn specs() -> [(&'static str, PaperSpec); 3] {
    [
        (
            "roll",
            PaperSpec::new(
                Decimal::new(80, 0),
                Decimal::new(1_000, 0),
                Decimal::ZERO,
                Packaging::Roll {
                    pack_a: 0,
                    pack_b: 0,
                },
            ),
        ),
        (
            "ream",
            PaperSpec::new(
                Decimal::new(80, 0),
                Decimal::new(636, 0),
                Decimal::new(939, 0),
                Packaging::Ream { pack_a: 250 },
            ),
        ),
        (
            "box",
            PaperSpec::new(
                Decimal::new(100, 0),
                Decimal::new(500, 0),
                Decimal::new(700, 0),
                Packaging::Box {
                    pack_a: 2,
                    pack_b: 250,
                },
            ),
        ),
    ]
}

fn bench_quantity(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantity");
    for (name, spec) in specs() {
        group.bench_function(format!("convert/{name}"), |b| {
            b.iter(|| convert_quantity(black_box(&spec), black_box(Decimal::new(12_345, 0))));
        });
        group.bench_function(format!("from_tons/{name}"), |b| {
            b.iter(|| {
                convert_quantity_with(
                    black_box(&spec),
                    QuantityUnit::Ton,
                    black_box(Decimal::new(1_250, 3)),
                )
            });
        });
    }
    group.finish();
}

fn bench_price(c: &mut Criterion) {
    let [_, _, (_, spec)] = specs();
    let mut group = c.benchmark_group("price");

    group.bench_function("ton_to_box", |b| {
        b.iter(|| {
            convert_price(black_box(&PriceConversion {
                src_unit: PriceUnit::WonPerTon,
                dst_unit: PriceUnit::WonPerBox,
                orig_price: Decimal::new(1_150_000, 0),
                spec: &spec,
            }))
        });
    });
    group.bench_function("discounted", |b| {
        let official = OfficialQuote {
            price: Decimal::new(1_300_000, 0),
            unit: PriceUnit::WonPerTon,
        };
        let discount = Discount {
            rate: Decimal::new(125, 1),
            unit: DiscountRateUnit::Percent,
        };
        b.iter(|| {
            discounted_unit_price(
                black_box(&spec),
                black_box(official),
                black_box(discount),
                PriceUnit::WonPerBox,
            )
        });
    });
    group.bench_function("supply_amount", |b| {
        b.iter(|| {
            supply_amount(
                black_box(&spec),
                black_box(Decimal::new(40, 0)),
                black_box(Decimal::new(20_125, 0)),
                PriceUnit::WonPerBox,
            )
        });
    });
    group.finish();
}

criterion_group!(benches, bench_quantity, bench_price);
criterion_main!(benches);
