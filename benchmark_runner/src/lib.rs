use criterion::{black_box, BenchmarkId, Criterion};
use semver_classic::Version;
use std::time::Duration;

pub const INPUTS: [&str; 5] = [
    "1.0.0",
    "1.2.3-beta",
    "10.20.30-rc+20130101133700",
    "1.0.0-alpha.1.2.3",
    "not.a.version",
];

pub fn mega_input() -> String {
    let mut input = String::from("1.2.3-rc+");
    input.extend(std::iter::repeat("build-").take(1_000));
    input
}

fn parse(input: &str) -> Version {
    Version::new(input)
}

fn compare(versions: &(Version, Version)) -> bool {
    versions.0 > versions.1
}

fn sort(versions: &[Version]) -> Vec<Version> {
    let mut versions = versions.to_vec();
    versions.sort_by(Version::cmp_precedence);
    versions
}

fn parser_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for &input in INPUTS.iter() {
        let id = BenchmarkId::new("new", input);
        group.bench_with_input(id, input, |b, input| b.iter(|| parse(black_box(input))));
    }
    let mega = mega_input();
    let id = BenchmarkId::new("new", "mega");
    group.bench_with_input(id, &mega, |b, mega| b.iter(|| parse(black_box(mega))));
    group.finish();
}

fn ordering_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering");

    let pair = (Version::new("1.2.3-rc"), Version::new("1.2.3-beta"));
    group.bench_with_input(BenchmarkId::new("gt", "rc>beta"), &pair, |b, pair| {
        b.iter(|| compare(black_box(pair)))
    });

    let versions = (0..100)
        .map(|i| Version::new(&format!("1.{}.{}-beta.{}", i % 7, i % 3, i)))
        .collect::<Vec<_>>();
    group.bench_with_input(BenchmarkId::new("sort", "100"), &versions, |b, versions| {
        b.iter(|| sort(black_box(versions)))
    });

    group.finish();
}

fn criterion(quick: bool) -> Criterion {
    let mut criterion = Criterion::default().with_plots();
    if !quick {
        criterion = criterion
            .sample_size(1_000)
            .confidence_level(0.98)
            .warm_up_time(Duration::from_secs(10))
            .measurement_time(Duration::from_secs(20))
    };
    criterion.configure_from_args()
}

pub fn main() {
    let quick = std::env::args().any(|a| &*a == "quick");
    let mut criterion = criterion(quick);
    parser_benchmarks(&mut criterion);
    ordering_benchmarks(&mut criterion);
    criterion.final_summary();
}
