use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use foodtruck::{compute_bounds, MemoryDatabase, SearchService, Vendor, VendorRow};

/// Build a synthetic grid of vendors around central San Francisco.
fn grid_rows(count: usize) -> Vec<VendorRow> {
    (0..count)
        .map(|i| {
            let frac = i as f64 / count as f64;
            VendorRow {
                id: Some(i.to_string()),
                name: Some(format!("Truck {i}")),
                lat: Some(37.70 + frac * 0.10),
                long: Some(-122.50 + (i % 100) as f64 * 0.001),
                address: if i % 3 == 0 { None } else { Some(format!("{i} Market St")) },
                description: Some("Tacos: Burritos: Soda".to_string()),
            }
        })
        .collect()
}

fn bench_compute_bounds(c: &mut Criterion) {
    c.bench_function("compute_bounds", |b| {
        b.iter(|| {
            black_box(compute_bounds(
                black_box(37.7758),
                black_box(-122.4205),
                black_box(1600),
            ));
        });
    });
}

fn bench_map_and_serialize(c: &mut Criterion) {
    let rows = grid_rows(1000);

    c.bench_function("map_serialize_1000_rows", |b| {
        b.iter(|| {
            let vendors: Vec<Vendor> = rows.iter().cloned().map(Vendor::from).collect();
            black_box(serde_json::to_vec(&vendors).unwrap());
        });
    });
}

fn bench_expanding_search(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let service = SearchService::new(Arc::new(MemoryDatabase::new(grid_rows(10_000))));

    c.bench_function("expanding_search_10000_rows", |b| {
        b.iter(|| {
            black_box(
                rt.block_on(service.find_near(black_box(37.7758), black_box(-122.4205), 0))
                    .unwrap(),
            );
        });
    });

    // Sparse area: runs every iteration up to the cap
    c.bench_function("expanding_search_empty_area", |b| {
        b.iter(|| {
            black_box(
                rt.block_on(service.find_near(black_box(0.0), black_box(1.23), 0))
                    .unwrap(),
            );
        });
    });
}

criterion_group!(
    benches,
    bench_compute_bounds,
    bench_map_and_serialize,
    bench_expanding_search,
);
criterion_main!(benches);
