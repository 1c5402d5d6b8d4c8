//! Benchmarks for import resolution and path matching.
//!
//! These benchmarks stage synthetic config trees on the in-memory
//! filesystem and measure recursive import resolution at various fan-outs
//! and depths, plus the cost of compiling and evaluating path patterns.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::Path;

use ctx_gen::filesystem::MemoryFS;
use ctx_gen::import::matcher::PathMatcher;
use ctx_gen::import::ImportResolver;
use ctx_gen::loader::FormatLoader;

/// Build a flat tree: one root importing `fan_out` leaf configs.
fn flat_tree(fan_out: usize) -> MemoryFS {
    let mut fs = MemoryFS::new();
    let mut root = String::from("import:\n");
    for i in 0..fan_out {
        root.push_str(&format!("  - path: leaf_{}.yaml\n", i));
        fs.add_file(
            format!("/project/leaf_{}.yaml", i),
            &format!(
                "documents:\n  - outputPath: leaf_{}.md\n    sources:\n      - type: text\n        content: leaf {}\n",
                i, i
            ),
        );
    }
    fs.add_file("/project/context.yaml", &root);
    fs
}

/// Build a chain: each config imports the next one down.
fn chained_tree(depth: usize) -> MemoryFS {
    let mut fs = MemoryFS::new();
    for level in 0..depth {
        let mut config = String::new();
        if level + 1 < depth {
            config.push_str(&format!("import:\n  - path: level_{}.yaml\n", level + 1));
        }
        config.push_str(&format!(
            "documents:\n  - outputPath: level_{}.md\n    sources:\n      - type: text\n        content: level {}\n",
            level, level
        ));
        fs.add_file(format!("/project/level_{}.yaml", level), &config);
    }
    fs
}

fn resolve(fs: &MemoryFS, entry: &str) {
    let loader = FormatLoader::new(fs);
    let raw = loader.load_path(Path::new(entry)).unwrap();
    let resolver = ImportResolver::new(&loader, fs);
    let merged = resolver.resolve_imports(raw, Path::new("/project")).unwrap();
    black_box(merged);
}

fn bench_flat_imports(c: &mut Criterion) {
    let mut group = c.benchmark_group("flat_imports");
    for fan_out in [1usize, 10, 50, 200] {
        let fs = flat_tree(fan_out);
        group.bench_with_input(BenchmarkId::from_parameter(fan_out), &fs, |b, fs| {
            b.iter(|| resolve(fs, "/project/context.yaml"));
        });
    }
    group.finish();
}

fn bench_chained_imports(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained_imports");
    for depth in [2usize, 8, 24] {
        let fs = chained_tree(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &fs, |b, fs| {
            b.iter(|| resolve(fs, "/project/level_0.yaml"));
        });
    }
    group.finish();
}

fn bench_wildcard_import(c: &mut Criterion) {
    let mut fs = MemoryFS::new();
    for i in 0..100 {
        fs.add_file(
            format!("/project/configs/part_{}.yaml", i),
            &format!("documents:\n  - outputPath: part_{}.md\n", i),
        );
    }
    fs.add_file("/project/context.yaml", "import:\n  - path: configs/*.yaml\n");

    c.bench_function("wildcard_import_100", |b| {
        b.iter(|| resolve(&fs, "/project/context.yaml"));
    });
}

fn bench_path_matching(c: &mut Criterion) {
    let patterns = [
        ("literal", "configs/api/v1.yaml"),
        ("single_star", "configs/*/v1.yaml"),
        ("globstar", "configs/**/*.yaml"),
        ("alternation", "configs/{api,web,cli}/*.{yaml,yml}"),
    ];
    let paths: Vec<String> = (0..100)
        .map(|i| format!("configs/api/nested_{}/v1.yaml", i))
        .collect();

    let mut group = c.benchmark_group("path_matching");
    for (name, pattern) in patterns {
        let matcher = PathMatcher::new(pattern).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                for path in &paths {
                    black_box(matcher.is_match(path));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_flat_imports,
    bench_chained_imports,
    bench_wildcard_import,
    bench_path_matching
);
criterion_main!(benches);
