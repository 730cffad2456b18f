use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use factorfft::{build_transform, options::Options, planner::Direction, Plan};
use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use utilities::gen_random_signal;
use utilities::rustfft::num_complex::Complex;
use utilities::rustfft::FftPlanner;

/// Powers of two, highly composite lengths and lengths with a large prime factor
const LENGTHS: &[usize] = &[
    64, 256, 1024, 4096, 16384, 65536, 60, 360, 2520, 5040, 83160, 97, 194, 9409,
];

fn generate_interleaved<T: Float + SampleUniform>(n: usize) -> Vec<T> {
    let mut reals = vec![T::zero(); n];
    let mut imags = vec![T::zero(); n];
    gen_random_signal(&mut reals, &mut imags);
    factorfft::utils::interleave(&reals, &imags)
}

fn generate_complex_numbers<T: Float + SampleUniform>(n: usize) -> Vec<Complex<T>> {
    generate_interleaved::<T>(n)
        .chunks_exact(2)
        .map(|z| Complex::new(z[0], z[1]))
        .collect()
}

fn benchmark_forward_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward f32");

    for &len in LENGTHS {
        group.throughput(Throughput::Elements(len as u64));

        let options = Options::guess_options(len);
        let plan: Plan<f32> = build_transform(len, Direction::Forward, &options).unwrap();
        group.bench_function(BenchmarkId::new("factorfft", len), |b| {
            b.iter_batched(
                || generate_interleaved::<f32>(len),
                |mut data| plan.process(&mut data).unwrap(),
                BatchSize::SmallInput,
            );
        });

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(len);
        group.bench_function(BenchmarkId::new("RustFFT", len), |b| {
            b.iter_batched(
                || generate_complex_numbers::<f32>(len),
                |mut signal| fft.process(&mut signal),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_forward_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward f64");

    for &len in LENGTHS {
        group.throughput(Throughput::Elements(len as u64));

        let options = Options::guess_options(len);
        let plan: Plan<f64> = build_transform(len, Direction::Forward, &options).unwrap();
        group.bench_function(BenchmarkId::new("factorfft", len), |b| {
            b.iter_batched(
                || generate_interleaved::<f64>(len),
                |mut data| plan.process(&mut data).unwrap(),
                BatchSize::SmallInput,
            );
        });

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(len);
        group.bench_function(BenchmarkId::new("RustFFT", len), |b| {
            b.iter_batched(
                || generate_complex_numbers::<f64>(len),
                |mut signal| fft.process(&mut signal),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn benchmark_unrolling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Unroll threshold");

    for &len in &[4096, 2520] {
        for limit in [0, 8, 64] {
            let options = Options::default().with_static_loop_limit(limit);
            let plan: Plan<f64> = build_transform(len, Direction::Forward, &options).unwrap();
            group.bench_function(BenchmarkId::new(format!("limit {limit}"), len), |b| {
                b.iter_batched(
                    || generate_interleaved::<f64>(len),
                    |mut data| plan.process(&mut data).unwrap(),
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn benchmark_out_of_place_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("Out of place f64");

    for &len in LENGTHS {
        group.throughput(Throughput::Elements(len as u64));
        let plan: Plan<f64> =
            build_transform(len, Direction::Forward, &Options::default()).unwrap();
        let src = generate_interleaved::<f64>(len);
        group.bench_function(BenchmarkId::new("factorfft", len), |b| {
            b.iter_batched(
                || vec![0.0; 2 * len],
                |mut dst| plan.process_out_of_place(&src, &mut dst).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_forward_f32,
    benchmark_forward_f64,
    benchmark_unrolling,
    benchmark_out_of_place_f64
);
criterion_main!(benches);
