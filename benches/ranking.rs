//! Performance benchmarks for quickpick
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quickpick::command::{parse_command, Command};
use quickpick::rank::{
    split_score, CharCountStrategy, Columns, FuzzyStrategy, RankOptions, RankPipeline, RankingStrategy, Score,
};
use quickpick::utils::AlphaCodec;

#[derive(Clone)]
struct Row {
    path: String,
    owner: String,
}

/// Synthetic file-like rows
fn create_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| Row {
            path: format!("src/module_{}/handler_{}.rs", i % 37, i),
            owner: format!("team-{}", i % 11),
        })
        .collect()
}

fn columns() -> Columns<Row> {
    let mut columns = Columns::new();
    columns.add_column("path", |r: &Row| r.path.clone()).unwrap();
    columns.add_column("owner", |r: &Row| r.owner.clone()).unwrap();
    columns
}

fn by_path(r: &Row) -> String {
    r.path.clone()
}

fn bench_command_parsing(c: &mut Criterion) {
    let inputs = vec![
        "simple",
        "two words",
        "handler | team",
        "mod/AB",
        "escaped \\| pipe \\/ slash",
        "a | b | c / ZZ",
    ];

    let mut group = c.benchmark_group("command_parsing");
    for input in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(input), &input, |b, &q| {
            b.iter(|| parse_command(black_box(q)))
        });
    }
    group.finish();
}

fn bench_rank_and_filter(c: &mut Criterion) {
    let columns = columns();
    let fuzzy = FuzzyStrategy::with_defaults();
    let char_count = CharCountStrategy;
    let strategies: [(&str, &dyn RankingStrategy); 2] = [("fuzzy", &fuzzy), ("char_count", &char_count)];

    let mut group = c.benchmark_group("rank_and_filter");
    for size in [1_000usize, 10_000] {
        let rows = create_rows(size);

        for (name, strategy) in strategies {
            let pipeline = RankPipeline::new(&columns, strategy, &by_path);

            for input in ["hdl", "mod12 | team3"] {
                let command = parse_command(input);
                group.bench_with_input(
                    BenchmarkId::new(format!("{}/{}", name, input), size),
                    &rows,
                    |b, rows| {
                        b.iter(|| {
                            pipeline
                                .rank_and_filter(black_box(&command), |_: &Command| Ok(rows.clone()))
                                .unwrap()
                        })
                    },
                );
            }
        }

        // Sequential scoring for comparison with the rayon path
        let pipeline = RankPipeline::new(&columns, &fuzzy, &by_path).with_options(RankOptions {
            parallel_threshold: usize::MAX,
            ..RankOptions::default()
        });
        let command = parse_command("hdl");
        group.bench_with_input(BenchmarkId::new("fuzzy/sequential", size), &rows, |b, rows| {
            b.iter(|| {
                pipeline
                    .rank_and_filter(black_box(&command), |_: &Command| Ok(rows.clone()))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_split_score(c: &mut Criterion) {
    let boundaries: Vec<usize> = (1..=8).map(|i| i * 40 - 1).collect();
    let len = 320;
    let score = Score::new(10.0, (0..len).step_by(3).collect());

    c.bench_function("split_score_8_columns", |b| {
        b.iter(|| split_score(black_box(len), black_box(&score), black_box(&boundaries)))
    });
}

fn bench_alpha_codec(c: &mut Criterion) {
    let codec = AlphaCodec::new(18_278);

    c.bench_function("alpha_encode_decode", |b| {
        b.iter(|| {
            for row in (1..18_278).step_by(97) {
                let code = codec.encode(black_box(row)).unwrap();
                black_box(codec.decode(&code));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_command_parsing,
    bench_rank_and_filter,
    bench_split_score,
    bench_alpha_codec,
);

criterion_main!(benches);
