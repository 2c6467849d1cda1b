use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use zipmatch::{PartiallyApplied, ZipMatch};
use zipmatch_tests::shapes::Tree;

type VecF = Vec<PartiallyApplied>;
type TreeF = Tree<PartiallyApplied>;

fn balanced(depth: u32, next: &mut i32) -> Tree<i32> {
    if depth == 0 {
        *next += 1;
        Tree::Leaf(*next)
    } else {
        let left = balanced(depth - 1, next);
        let right = balanced(depth - 1, next);
        Tree::node(left, right)
    }
}

fn bench_vec(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("vec_sum_pairs");

    for len in [1024, 1024 * 1024] {
        let left: Vec<i64> = (0..len).collect();
        let right: Vec<i64> = (0..len).rev().collect();

        group.bench_with_input(
            BenchmarkId::new("iter zip", len),
            &(&left, &right),
            |b, (left, right)| {
                b.iter(|| {
                    (left.len() == right.len()).then(|| {
                        left.iter()
                            .zip(right.iter())
                            .map(|(a, b)| a + b)
                            .collect::<Vec<_>>()
                    })
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("zip_match_with", len),
            &(&left, &right),
            |b, (left, right)| b.iter(|| VecF::zip_match_with(*left, *right, |a, b| Some(a + b))),
        );
    }
    group.finish();
}

fn bench_tree(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("derived_tree");

    for depth in [8, 12, 16] {
        let left = balanced(depth, &mut 0);
        let right = balanced(depth, &mut 1000);

        group.bench_with_input(
            BenchmarkId::new("zip_match_with", depth),
            &(&left, &right),
            |b, (left, right)| b.iter(|| TreeF::zip_match_with(*left, *right, |a, b| Some(a.wrapping_mul(*b)))),
        );

        group.bench_with_input(BenchmarkId::new("derived eq", depth), &left, |b, tree| {
            let copy = tree.clone();
            b.iter(|| *tree == copy)
        });
    }
    group.finish();
}

criterion_group!(benches, bench_vec, bench_tree);
criterion_main!(benches);
