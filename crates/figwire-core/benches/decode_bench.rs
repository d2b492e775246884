use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use figwire_core::{decode, FigureWriter};

fn synth_stream(points: usize, series: usize) -> Vec<u8> {
    let x: Vec<f64> = (0..points).map(|i| i as f64).collect();
    let y: Vec<f64> = (0..points).map(|i| (i as f64 * 0.01).sin()).collect();

    let mut fig = FigureWriter::new(6.4, 4.8, "bench");
    fig.set_x_label("t");
    fig.set_y_label("v");
    for s in 0..series {
        fig.add_option("linewidth", 2).unwrap();
        fig.add_option("alpha", 0.8).unwrap();
        fig.plot(&x, &y, &format!("series-{s}")).unwrap();
    }
    fig.to_bytes("bench.png").unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for &n in &[1_000usize, 100_000usize] {
        let bytes = synth_stream(n, 4);
        group.bench_with_input(BenchmarkId::from_parameter(format!("points{n}")), &bytes, |b, bytes| {
            b.iter(|| {
                let spec = decode(black_box(bytes.as_slice())).unwrap();
                black_box(spec);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
