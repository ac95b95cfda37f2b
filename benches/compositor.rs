use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mapshot::compositor::{SwatchPainter, classify_cell, composite};
use mapshot::map::tile_id::{TILE_ID_A2, TILE_ID_C};
use mapshot::map::tileset::{FLAG_HIGHER, FLAG_TABLE};
use mapshot::map::{MapData, SHADOW_LAYER, TileSize, TilesetFlags};
use std::hint::black_box;

/// A map with every feature the classifier branches on, spread evenly
fn generate_test_map(size: u32) -> MapData {
    let mut map = MapData::new(size, size);
    for y in 0..size {
        for x in 0..size {
            let n = x + y * size;
            map.set(x, y, 0, TILE_ID_C + n % 64);
            if n % 7 == 0 {
                map.set(x, y, 1, TILE_ID_A2);
            }
            if n % 5 == 0 {
                map.set(x, y, 2, TILE_ID_C + 100);
            }
            map.set(x, y, SHADOW_LAYER, n % 16);
        }
    }
    map
}

fn generate_rules() -> TilesetFlags {
    let mut flags = vec![0; 8192];
    flags[TILE_ID_A2 as usize] = FLAG_TABLE;
    flags[(TILE_ID_C + 100) as usize] = FLAG_HIGHER;
    TilesetFlags::new(flags)
}

fn bench_classify(c: &mut Criterion) {
    let map = generate_test_map(64);
    let rules = generate_rules();

    c.bench_function("classify_cell_64x64", |b| {
        b.iter(|| {
            for y in 0..64 {
                for x in 0..64 {
                    black_box(classify_cell(&map, &rules, x, y));
                }
            }
        });
    });
}

fn bench_composite_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite_scaling");
    let rules = generate_rules();
    let tile_size = TileSize::default();

    for &size in &[8u32, 32, 64] {
        let map = generate_test_map(size);

        group.throughput(Throughput::Elements(u64::from(size * size)));
        for separate in [false, true] {
            let label = if separate { "separate" } else { "combined" };
            group.bench_with_input(BenchmarkId::new(label, size), &size, |b, _| {
                b.iter(|| black_box(composite(&map, tile_size, &rules, &SwatchPainter, separate)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_classify, bench_composite_scaling);
criterion_main!(benches);
