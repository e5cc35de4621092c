use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use surface_gfx::basics::PointD;
use surface_gfx::convex_hull::convex_hull;
use surface_gfx::line::line_pixels;
use surface_gfx::resample::{resample, Image};
use surface_gfx::scanline_fill::fill_polygon;
use surface_gfx::shapes::ellipse_with_slices;
use surface_gfx::triangulate::triangulate;
use surface_gfx::{PointI, ResamplingFilter, Rgba8, Shading, Surface};

fn lcg_points(n: usize, seed: u64, scale: f64) -> Vec<PointD> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    (0..n).map(|_| PointD::new(next() * scale, next() * scale)).collect()
}

fn bench_lines(c: &mut Criterion) {
    c.bench_function("line_pixels_1000", |b| {
        b.iter(|| line_pixels(black_box(PointI::new(3, 7)), black_box(PointI::new(1003, 411))))
    });
}

fn bench_fill(c: &mut Criterion) {
    let circle = ellipse_with_slices(256.0, 256.0, 240.0, 200.0, 128);
    let mut group = c.benchmark_group("fill_polygon");
    for (name, shading) in [
        ("solid", Shading::solid(Rgba8::RED)),
        ("linear", Shading::linear(30.0, Rgba8::BLACK, Rgba8::WHITE)),
        (
            "radial",
            Shading::radial(PointD::new(256.0, 256.0), 240.0, Rgba8::WHITE, Rgba8::BLUE),
        ),
    ] {
        group.bench_function(name, |b| {
            let mut s = Surface::new(512, 512);
            b.iter(|| fill_polygon(&mut s, black_box(&circle), &shading))
        });
    }
    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let mut src = Image::new(256, 256);
    for y in 0..256 {
        for x in 0..256 {
            src.set_pixel(x, y, Rgba8::new(x as u32, y as u32, ((x + y) / 2) as u32, 255));
        }
    }
    let mut group = c.benchmark_group("resample_256");
    for filter in [
        ResamplingFilter::Box,
        ResamplingFilter::Triangle,
        ResamplingFilter::CatmullRom,
        ResamplingFilter::Lanczos3,
    ] {
        group.bench_with_input(BenchmarkId::new("down_100", filter), &filter, |b, &f| {
            b.iter(|| resample(&src, 100, 100, f))
        });
        group.bench_with_input(BenchmarkId::new("up_600", filter), &filter, |b, &f| {
            b.iter(|| resample(&src, 600, 600, f))
        });
    }
    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let cloud = lcg_points(10_000, 7, 1000.0);
    c.bench_function("convex_hull_10k", |b| b.iter(|| convex_hull(black_box(&cloud))));

    let ring = ellipse_with_slices(0.0, 0.0, 100.0, 60.0, 500);
    c.bench_function("triangulate_500", |b| {
        b.iter(|| triangulate(black_box(&ring[..ring.len() - 1])))
    });
}

criterion_group!(benches, bench_lines, bench_fill, bench_resample, bench_geometry);
criterion_main!(benches);
