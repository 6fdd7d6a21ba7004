use iai_callgrind::{black_box, library_benchmark, library_benchmark_group, main};
use perm_algebra::{group::symmetric_group, sequence, Permutation};
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_pair(len: usize) -> (Permutation, Permutation) {
    let mut rng = SmallRng::seed_from_u64(len as u64);
    (Permutation::random(len, &mut rng), Permutation::random(len, &mut rng))
}

fn sparse_pair(len: usize) -> (Permutation, Permutation) {
    let (p, q) = random_pair(len);
    (
        Permutation::Cycles(p.to_cycles()),
        Permutation::Cycles(q.to_cycles()),
    )
}

fn random_values(len: usize) -> Vec<u32> {
    let mut rng = SmallRng::seed_from_u64(len as u64);
    (0..len).map(|_| rng.gen_range(0..(len as u32 / 4 + 1))).collect()
}

#[library_benchmark]
#[bench::dense_1k(args = [1_000], setup = random_pair)]
#[bench::dense_100k(args = [100_000], setup = random_pair)]
#[bench::sparse_1k(args = [1_000], setup = sparse_pair)]
fn bench_compose(pair: (Permutation, Permutation)) -> Permutation {
    let (p, q) = pair;
    black_box(p.compose(&q))
}

#[library_benchmark]
#[bench::dense_30(args = [30], setup = random_pair)]
fn bench_order(pair: (Permutation, Permutation)) -> usize {
    black_box(pair.0.order())
}

#[library_benchmark]
#[bench::ties_10k(args = [10_000], setup = random_values)]
fn bench_sorting(values: Vec<u32>) -> usize {
    black_box(sequence::sorting(&values).map(|r| r.len()).unwrap_or(0))
}

#[library_benchmark]
#[bench::s8(8)]
fn bench_enumerate(n: usize) -> usize {
    black_box(symmetric_group(n).iter().count())
}

library_benchmark_group!(
    name = algebra;
    benchmarks = bench_compose, bench_order, bench_sorting, bench_enumerate
);

main!(library_benchmark_groups = algebra);
