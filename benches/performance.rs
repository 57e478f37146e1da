//! Performance benchmarks for the DAG simulator
//!
//! A run is a handful of RNG draws plus one serialization, so these mostly
//! guard against accidental regressions in the formatting and parsing paths.

use chrono::{TimeZone, Utc};
use clap::Parser;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dag_simulator::{
    cli::Cli,
    config::ConfigParser,
    models::{Config, SimulationParams, SimulationReport, SimulationResults},
    output::OutputFormatterFactory,
    types::OutputFormat,
    InsightAnalyzer, Simulator,
};
use std::hint::black_box;

fn sample_record() -> SimulationResults {
    let ts = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    Simulator::new(SimulationParams::new(1000, 5, 500, 20)).run_at(ts)
}

fn benchmark_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation");

    for users in [-500i64, 10, 500, 100_000] {
        let params = SimulationParams::new(1000, 5, users, 20);
        group.bench_with_input(BenchmarkId::new("derive_metrics", users), &params, |b, params| {
            b.iter(|| black_box(Simulator::new(*params).metrics()))
        });
    }

    group.bench_function("run", |b| {
        let simulator = Simulator::new(SimulationParams::new(1000, 5, 500, 20));
        b.iter(|| black_box(simulator.run()))
    });

    group.finish();
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("analysis");
    let record = sample_record();
    let analyzer = InsightAnalyzer::default();

    group.bench_function("analyze", |b| b.iter(|| black_box(analyzer.analyze(&record))));

    group.finish();
}

fn benchmark_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    let record = sample_record();
    let report = SimulationReport::new(record.clone())
        .with_insights(InsightAnalyzer::default().analyze(&record));

    for format in [OutputFormat::Json, OutputFormat::Text] {
        let config = Config {
            output_format: format,
            enable_color: false,
            ..Config::default()
        };
        let formatter = OutputFormatterFactory::create_formatter(&config);
        group.bench_function(format.as_str(), |b| {
            b.iter(|| black_box(formatter.format_report(&report).unwrap()))
        });
    }

    let json = serde_json::to_string(&record).unwrap();
    group.bench_function("parse_record", |b| {
        b.iter(|| black_box(SimulationResults::from_json(&json).unwrap()))
    });

    group.finish();
}

fn benchmark_config_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_parsing");

    group.bench_function("parse_cli_args", |b| {
        b.iter(|| {
            black_box(Cli::parse_from([
                "dag-sim",
                "--blocks", "1000",
                "--parallelism", "5",
                "--users", "500",
                "--tx-per-user", "20",
                "--insights",
            ]))
        })
    });

    group.bench_function("parse_from_cli", |b| {
        let cli = Cli::parse_from(["dag-sim", "--from-file", "run.json"]);
        let parser = ConfigParser::new(cli);
        b.iter(|| black_box(parser.parse_with_lookup(|_| None).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_simulation,
    benchmark_analysis,
    benchmark_formatting,
    benchmark_config_parsing
);
criterion_main!(benches);
