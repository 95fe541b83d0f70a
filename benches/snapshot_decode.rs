//! Benchmarks for snapshot decoding
//!
//! Measures the per-tick cost of:
//! - Bulk-loading the telemetry and scoring blocks from a byte stream
//! - Semantic getters over a decoded telemetry block
//! - Decoding every vehicle slot of a full grid

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rfstats::config::Units;
use rfstats::data::{ScoringInfo, TelemetryData, TireTemperaturePart};
use rfstats::test_utils::{ScoringBuilder, TelemetryBuilder, VehicleBuilder};
use rfstats::types::{Vector3, Wheel};
use std::hint::black_box;

fn telemetry_snapshot() -> Vec<u8> {
    Wheel::ALL
        .into_iter()
        .fold(
            TelemetryBuilder::new()
                .delta_time(0.01)
                .velocity(Vector3::new(0.5, 0.0, -62.0))
                .engine_rpm(14_500.0)
                .oil_temperature(104.0)
                .fuel(55.0),
            |builder, wheel| {
                builder
                    .wheel_rotation(wheel, -180.0)
                    .brake_temperature(wheel, 480.0)
                    .tire_temperature_k(wheel, 360.0)
            },
        )
        .build()
}

fn grid_snapshot(vehicles: usize) -> Vec<u8> {
    (0..vehicles)
        .fold(ScoringBuilder::new().session(7).current_time(600.0), |builder, i| {
            let place = u8::try_from(i + 1).unwrap_or(u8::MAX);
            builder.vehicle(
                VehicleBuilder::new(&format!("Driver {i}"))
                    .place(place)
                    .laps_completed(5)
                    .lap_distance(100.0 * i as f32)
                    .last_sectors(30.1, 61.7, 92.4),
            )
        })
        .build()
}

fn bench_telemetry_load(c: &mut Criterion) {
    let bytes = telemetry_snapshot();
    let mut telemetry = TelemetryData::new(Units::default());

    let mut group = c.benchmark_group("telemetry");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("load_from_stream", |b| {
        b.iter(|| {
            telemetry.load_from_stream(&mut black_box(bytes.as_slice())).unwrap();
        })
    });

    telemetry.load_from_stream(&mut bytes.as_slice()).unwrap();
    group.bench_function("semantic_getters", |b| {
        b.iter(|| {
            let speed = telemetry.scalar_velocity();
            let oil = telemetry.engine_oil_temperature();
            let tires: f32 = Wheel::ALL
                .into_iter()
                .map(|w| telemetry.tire_temperature(w, TireTemperaturePart::Center))
                .sum();
            black_box((speed, oil, tires))
        })
    });
    group.finish();
}

fn bench_scoring_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    for vehicles in [1usize, 20, 64] {
        let bytes = grid_snapshot(vehicles);
        let mut scoring = ScoringInfo::new(Units::default());
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("load_grid", vehicles), &bytes, |b, bytes| {
            b.iter(|| {
                scoring.load_from_stream(&mut black_box(bytes.as_slice())).unwrap();
                black_box(scoring.vehicles().iter().map(|v| v.driver_name().len()).sum::<usize>())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_telemetry_load, bench_scoring_load);
criterion_main!(benches);
