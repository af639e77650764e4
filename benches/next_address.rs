use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hostcache::dns::{AddressSet, HostCache, ResolverConfig, StaticLookup};
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

/// Benchmark the request-path operations of the cache.
/// Addresses come from a static table, so no network I/O is involved.
fn benchmark_queries(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let addrs: Vec<String> = (1..=16).map(|i| format!("10.0.0.{}", i)).collect();
    let mut table = HashMap::new();
    table.insert(Cow::Borrowed("bench.local"), addrs.clone());

    let cache = HostCache::new(Arc::new(StaticLookup::new(table)), ResolverConfig::default());
    rt.block_on(async {
        cache.register("bench.local");
        cache.refresh_now("bench.local").await.unwrap();
    });

    c.bench_function("next_address", |b| {
        b.iter(|| black_box(cache.next_address(black_box("bench.local"))))
    });

    c.bench_function("addresses_string", |b| {
        b.iter(|| black_box(cache.addresses_string(black_box("bench.local"))))
    });

    c.bench_function("next_address_unknown_host", |b| {
        b.iter(|| black_box(cache.next_address(black_box("missing.local"))))
    });

    // Parsing cost paid once per refresh cycle
    c.bench_function("address_set_parse", |b| {
        b.iter(|| black_box(AddressSet::parse(black_box(&addrs))))
    });

    let mut out = Vec::with_capacity(4096);
    c.bench_function("dump", |b| {
        b.iter(|| {
            out.clear();
            cache.dump(&mut out).unwrap();
            black_box(out.len())
        })
    });
}

criterion_group!(benches, benchmark_queries);
criterion_main!(benches);
