// Benchmark for LSPB trajectory generation
// Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use minivie_motion::motion::trajectory::{TrajectoryGenerator, TrajectoryRequest};

fn bench_generate(c: &mut Criterion) {
    let generator = TrajectoryGenerator::new();
    let request = TrajectoryRequest {
        start: 0.0,
        end: 90.0,
        duration: 60.0,
        speed: 5.0,
    };
    c.bench_function("generate 60s move (3001 samples)", |b| {
        b.iter(|| {
            let trajectory = generator.generate(&request).unwrap();
            assert_eq!(trajectory.len(), 3001);
        });
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
