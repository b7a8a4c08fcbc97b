use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::{Array, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use truncated_decomp::linalg_backends::LinAlgBackendProvider;
use truncated_decomp::{decompose, fit_pca, Truncate};

// Function to generate random data for the decompositions
fn generate_data(n_rows: usize, n_cols: usize) -> Array2<f64> {
    Array::random((n_rows, n_cols), Uniform::new(0., 10.))
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("SVD_decompose");
    let backend = LinAlgBackendProvider::<f64>::new();

    for &(n_rows, n_cols) in [(100, 50), (500, 100), (100, 200)].iter() {
        let data = generate_data(n_rows, n_cols);
        group.throughput(Throughput::Elements((n_rows * n_cols) as u64));
        group.bench_with_input(
            BenchmarkId::new("decompose", format!("{}x{}", n_rows, n_cols)),
            &data,
            |b, data_matrix| {
                b.iter_with_setup(
                    || data_matrix.clone(),
                    |matrix| decompose(&backend, matrix).unwrap(),
                );
            },
        );
    }
    group.finish();
}

fn bench_fit_pca(c: &mut Criterion) {
    let mut group = c.benchmark_group("PCA_fit");
    let backend = LinAlgBackendProvider::<f64>::new();

    for &(n_samples, n_features) in [(100, 50), (500, 100), (100, 200)].iter() {
        let data = generate_data(n_samples, n_features);
        group.throughput(Throughput::Elements((n_samples * n_features) as u64));
        group.bench_with_input(
            BenchmarkId::new("fit_pca", format!("{}x{}", n_samples, n_features)),
            &data,
            |b, data_matrix| {
                b.iter_with_setup(
                    || data_matrix.clone(),
                    |matrix| fit_pca(&backend, matrix).unwrap(),
                );
            },
        );
    }
    group.finish();
}

// Truncated reconstruction of a stored record, the work behind a low-rank read.
fn bench_truncated_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("SVD_truncated_reconstruct");
    let backend = LinAlgBackendProvider::<f64>::new();
    let record = decompose(&backend, generate_data(300, 120)).unwrap();

    for &rank in [1usize, 10, 120].iter() {
        group.bench_with_input(BenchmarkId::new("reconstruct", rank), &rank, |b, &rank| {
            b.iter(|| record.truncate(Some(rank)).reconstruct());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decompose, bench_fit_pca, bench_truncated_reconstruct);
criterion_main!(benches);
