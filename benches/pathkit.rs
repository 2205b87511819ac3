//! PathKit path-data benchmarks
//!
//! Run with: cargo bench -p pathkit-svg

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pathkit_svg::{FormatOptions, NormalizeOptions, PathData, Transform, TransformOptions};

fn parsing_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_parsing");

    // Small path
    let small = "M0,0 L10,0 L10,10 Z";
    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_with_input(BenchmarkId::new("parse", "small"), small, |b, d| {
        b.iter(|| PathData::parse(d))
    });

    // Medium path (100 segments)
    let medium = generate_path(100);
    group.throughput(Throughput::Bytes(medium.len() as u64));
    group.bench_with_input(BenchmarkId::new("parse", "medium"), &medium, |b, d| {
        b.iter(|| PathData::parse(d))
    });

    // Large path (1000 segments)
    let large = generate_path(1000);
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_with_input(BenchmarkId::new("parse", "large"), &large, |b, d| {
        b.iter(|| PathData::parse(d))
    });

    group.finish();
}

fn geometry_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_geometry");

    for count in [100, 1000] {
        let Ok(path) = PathData::parse(&generate_path(count)) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("absolutize", count), &path, |b, path| {
            b.iter(|| {
                let mut p = path.clone();
                p.absolutize();
                p
            })
        });

        let scale = Transform::scale(2.0, 2.0);
        group.bench_with_input(BenchmarkId::new("transform", count), &path, |b, path| {
            b.iter(|| path.transformed(&scale, TransformOptions::default()))
        });

        let skew = Transform::skew_x(20.0);
        let collapse = TransformOptions {
            collapse_hv_lineto: true,
            collapse_elliptical_arc: true,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("transform_collapse", count), &path, |b, path| {
            b.iter(|| path.transformed(&skew, collapse))
        });

        group.bench_with_input(BenchmarkId::new("normalize", count), &path, |b, path| {
            b.iter(|| {
                let mut p = path.clone();
                p.normalize(NormalizeOptions::default());
                p
            })
        });

        let options = FormatOptions::default();
        group.bench_with_input(BenchmarkId::new("render", count), &path, |b, path| {
            b.iter(|| path.render(&options))
        });
    }

    group.finish();
}

/// Generate a path mixing every command letter.
fn generate_path(segments: usize) -> String {
    let mut d = String::from("M0,0");
    for i in 0..segments {
        let x = (i * 10) as f64;
        let piece = match i % 6 {
            0 => format!(" L{},{}", x + 5.0, x),
            1 => format!(" h{}", 3.5),
            2 => format!(" V{}", x),
            3 => format!(" c1,1 2,2 {},{}", 3.0, -1.5),
            4 => format!(" Q{},{} {},{}", x, x + 2.0, x + 4.0, x),
            _ => format!(" a5,3 30 0,1 {},{}", 8.0, 2.0),
        };
        d.push_str(&piece);
        if i % 50 == 49 {
            d.push_str(" z");
        }
    }
    d
}

criterion_group!(benches, parsing_benchmarks, geometry_benchmarks);
criterion_main!(benches);
