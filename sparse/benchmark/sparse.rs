use criterion::{black_box, criterion_group, criterion_main, Criterion};

use slotted_sparse::SparseArray;

pub fn sparse(c: &mut Criterion) {
    c.bench_function("sparse emplace", |b| {
        b.iter(|| {
            let mut array = SparseArray::with_capacity(64);
            let array = black_box(&mut array);
            for i in 0..64 {
                array.emplace_at(i, i);
            }
        })
    });
    c.bench_function("sparse re-insertion", |b| {
        let mut array = SparseArray::with_capacity(8);
        b.iter(|| {
            let array = black_box(&mut array);
            let a = array.insert(()).ok();
            let b = array.insert(()).ok();
            let c = array.insert(()).ok();
            let d = array.insert(()).ok();
            let e = array.insert(()).ok();

            let (a, b, c, d, e) = black_box((a, b, c, d, e));

            for index in [b, d, a, c, e].iter().copied().flatten() {
                array.erase_at(index);
            }
        })
    });
    c.bench_function("sparse next empty index", |b| {
        let mut array = SparseArray::with_capacity(1000);

        for i in 0..999 {
            array.emplace_at(i, i);
        }

        b.iter(|| black_box(&array).next_empty_index())
    });
    c.bench_function("sparse iteration scattered", |b| {
        let mut array = SparseArray::with_capacity(1000);

        for i in (0..1000).filter(|&i| i % 2 == 1 && i % 11 != 0) {
            array.emplace_at(i, i as i32);
        }

        b.iter(|| black_box(&array).iter().sum::<i32>())
    });
    c.bench_function("sparse iteration packed", |b| {
        let mut array = SparseArray::with_capacity(545);

        for i in 0..545 {
            array.emplace_at(i, i as i32);
        }

        b.iter(|| black_box(&array).iter().sum::<i32>())
    });
    c.bench_function("sparse erase_if", |b| {
        b.iter(|| {
            let mut array = SparseArray::with_capacity(1000);
            for i in 0..1000 {
                array.emplace_at(i, i);
            }
            black_box(&mut array).erase_if(|&mut i| i % 3 == 0)
        })
    });
}

criterion_group!(benches, sparse);
criterion_main!(benches);
