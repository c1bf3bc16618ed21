use boxcrop_core::{Aabb, ContainmentRule, LabeledBox, PointCloud};
use boxcrop_extract::{extract_boxes, MemorySink, CAR_LABEL};
use boxcrop_filters::crop_box_indices;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_sweep(n: usize, seed: u64) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(seed);
    let x: Vec<f32> = (0..n).map(|_| rng.gen_range(-70.0f32..70.0)).collect();
    let y: Vec<f32> = (0..n).map(|_| rng.gen_range(-70.0f32..70.0)).collect();
    let z: Vec<f32> = (0..n).map(|_| rng.gen_range(-3.0f32..8.0)).collect();
    PointCloud::from_xyz(x, y, z)
}

fn random_cars(n: usize, seed: u64) -> Vec<LabeledBox> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let c = [rng.gen_range(-60.0f64..60.0), rng.gen_range(-60.0f64..60.0), 0.0];
            LabeledBox::new(CAR_LABEL, c, [1.9, 4.6, 1.6])
        })
        .collect()
}

fn bench_crop_box(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_box_indices");
    let region = Aabb::from_bounds([-10.0, -10.0, -1.0], [10.0, 10.0, 2.0]);
    for size in [35_000, 350_000] {
        let cloud = random_sweep(size, 42);
        group.bench_with_input(BenchmarkId::new("boxcrop", size), &cloud, |b, cloud| {
            b.iter(|| crop_box_indices(cloud.iter_points().map(|p| p.map(f64::from)), &region))
        });
    }
    group.finish();
}

fn bench_extract_boxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_boxes_35k");
    let cloud = random_sweep(35_000, 42);
    for cars in [10, 50] {
        let boxes = random_cars(cars, 7);
        group.bench_with_input(BenchmarkId::new("boxcrop", cars), &boxes, |b, boxes| {
            b.iter(|| {
                let mut sink = MemorySink::new();
                extract_boxes(boxes, &cloud, CAR_LABEL, ContainmentRule::Symmetric, &mut sink)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_crop_box, bench_extract_boxes);
criterion_main!(benches);
