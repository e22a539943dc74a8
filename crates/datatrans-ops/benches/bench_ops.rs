use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use datatrans_ops::{convolution2d, transpose, window1d, WindowParams};
use datatrans_tensor::{Tensor1, Tensor2};
use rand::Rng;

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    let mut rng = rand::rng();

    for size in [8, 128, 1024] {
        let data: Vec<f32> = (0..size * size).map(|_| rng.random::<f32>()).collect();
        let src = Tensor2::from_shape_vec([size, size], data).unwrap();

        group.bench_function(format!("f32_size_{}", size), |bencher| {
            bencher.iter(|| black_box(transpose(&src).unwrap()))
        });
    }

    group.finish();
}

fn bench_window1d(c: &mut Criterion) {
    let mut group = c.benchmark_group("window1d");
    let mut rng = rand::rng();

    let data: Vec<f32> = (0..16384).map(|_| rng.random::<f32>()).collect();
    let tensor = Tensor1::from_shape_slice([data.len()], &data).unwrap();

    for params in [
        WindowParams::new(16),
        WindowParams::new(16).with_shift(8),
        WindowParams::new(16).with_stride(4),
    ] {
        let name = format!("size_{}_shift_{}_stride_{}", params.size, params.shift, params.stride);

        group.bench_function(format!("vec_{name}"), |bencher| {
            bencher.iter(|| {
                black_box(window1d(&data, params.size, params.shift, params.stride).unwrap())
            })
        });

        group.bench_function(format!("tensor_{name}"), |bencher| {
            bencher.iter(|| {
                black_box(window1d(&tensor, params.size, params.shift, params.stride).unwrap())
            })
        });
    }

    group.finish();
}

fn bench_convolution2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolution2d");
    let mut rng = rand::rng();

    for (size, ksize) in [(64, 3), (256, 3), (256, 7)] {
        let data: Vec<f32> = (0..size * size).map(|_| rng.random::<f32>()).collect();
        let src = Tensor2::from_shape_vec([size, size], data).unwrap();
        let weights: Vec<f32> = (0..ksize * ksize).map(|_| rng.random::<f32>()).collect();
        let kernel = Tensor2::from_shape_vec([ksize, ksize], weights).unwrap();

        for stride in [1, 2] {
            group.bench_function(
                format!("f32_size_{size}_kernel_{ksize}_stride_{stride}"),
                |bencher| bencher.iter(|| black_box(convolution2d(&src, &kernel, stride).unwrap())),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_transpose, bench_window1d, bench_convolution2d);
criterion_main!(benches);
