//! Benchmarks for ego network construction, analytics and export

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use notegraph::prelude::*;
use std::hint::black_box;

/// Ring of notes where each links to the next two, plus a hub linking everything
fn synthetic_collection(size: usize) -> NoteCollection {
    let mut notes: Vec<Note> = (0..size)
        .map(|i| {
            let content = format!(
                "---\ntitle: Note {i}\ntags: [bench]\n---\nBody of note {i} links to [[Note {}]] and [[Note {}#^b{i}]].",
                (i + 1) % size,
                (i + 2) % size,
            );
            Note::new(format!("n{i}"), format!("Note {i}"), content)
        })
        .collect();

    let hub_links: String = (0..size).map(|i| format!("[[Note {i}]] ")).collect();
    notes.push(Note::new("hub", "Hub", hub_links));
    notes.into_iter().collect()
}

fn bench_ego_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("ego_graph");
    for size in [10, 50, 100, 500] {
        let notes = synthetic_collection(size);
        let engine = NoteGraphEngine::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &notes, |b, notes| {
            b.iter(|| engine.build_ego_graph(black_box("hub"), notes));
        });
    }
    group.finish();
}

fn bench_network_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_stats");
    for size in [10, 50, 100, 500] {
        let notes = synthetic_collection(size);
        let engine = NoteGraphEngine::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &notes, |b, notes| {
            b.iter(|| engine.network_stats(black_box("hub"), notes));
        });
    }
    group.finish();
}

fn bench_analyze_network(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_network");
    for size in [10, 50, 100, 500] {
        let notes = synthetic_collection(size);
        let engine = NoteGraphEngine::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &notes, |b, notes| {
            b.iter(|| engine.analyze_network(black_box("hub"), notes, true));
        });
    }
    group.finish();
}

fn bench_backlinks(c: &mut Criterion) {
    let mut group = c.benchmark_group("backlinks");
    for size in [10, 50, 100, 500] {
        let notes = synthetic_collection(size);
        let engine = NoteGraphEngine::default();
        group.bench_with_input(BenchmarkId::from_parameter(size), &notes, |b, notes| {
            b.iter(|| engine.get_backlinks(black_box("Note 1"), notes));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_ego_graph,
    bench_network_stats,
    bench_analyze_network,
    bench_backlinks
);
criterion_main!(benches);
