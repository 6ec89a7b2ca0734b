use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rolebind::prelude::*;
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn users(prefix: &str, count: usize) -> Vec<Subject> {
    (0..count).map(|i| Subject::user(format!("{prefix}-{i}"))).collect()
}

/// Merge and subtract on bindings of growing size
fn bench_subject_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("subject_set");

    for size in [10usize, 100, 1_000] {
        let current = users("member", size);
        let incoming: Vec<Subject> = users("member", size / 2)
            .into_iter()
            .chain(users("new", size / 2))
            .collect();

        group.bench_with_input(BenchmarkId::new("merge", size), &size, |b, _| {
            b.iter(|| merge(black_box(&current), black_box(&incoming)))
        });
        group.bench_with_input(BenchmarkId::new("subtract", size), &size, |b, _| {
            b.iter(|| subtract(black_box(&current), black_box(&incoming)))
        });
    }

    group.finish();
}

/// Add resolution when the role already has many bindings
fn bench_add_with_suffix_allocation(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let client = (0..200)
        .fold(
            InMemoryAuthorizationClient::builder().with_cluster_role("edit"),
            |builder, i| {
                let name = if i == 0 {
                    "edit".to_string()
                } else {
                    format!("edit-{}", i - 1)
                };
                builder.with_cluster_role_binding(RoleBinding::new(
                    ObjectMeta::new(name),
                    RoleRef::cluster("edit"),
                ))
            },
        )
        .build();
    let accessor = Arc::new(ClusterRoleBindingAccessor::new(Arc::new(client)));
    let modifier = RoleModifier::builder(accessor).with_dry_run(true).build();
    let request = ModificationRequest::add("edit").with_users(["alice"]);

    c.bench_function("add_with_200_bindings", |b| {
        b.iter(|| rt.block_on(async { modifier.apply(black_box(&request)).await.unwrap() }))
    });
}

criterion_group!(benches, bench_subject_set, bench_add_with_suffix_allocation);

criterion_main!(benches);
