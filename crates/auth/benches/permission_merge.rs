use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use claimforge_auth::{Permission, PermissionOverride, merge_permissions};
use claimforge_core::MembershipId;

/// Benchmark the permission-merge hot path with realistic set sizes: a
/// role baseline of a few dozen entries and a smaller override list.
fn bench_merge(c: &mut Criterion) {
    let baseline: Vec<Permission> = (0..64)
        .map(|i| Permission::new(format!("module{}.action{}", i % 8, i)))
        .collect();

    let membership_id = MembershipId::new();
    let overrides: Vec<PermissionOverride> = (0..24)
        .map(|i| PermissionOverride {
            membership_id,
            permission: Permission::new(format!("module{}.action{}", i % 8, i * 2)),
            allowed: i % 3 != 0,
        })
        .collect();

    let mut group = c.benchmark_group("permission_merge");
    group.throughput(Throughput::Elements(
        (baseline.len() + overrides.len()) as u64,
    ));
    group.bench_function("baseline64_overrides24", |b| {
        b.iter(|| merge_permissions(black_box(&baseline), black_box(&overrides)))
    });
    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
