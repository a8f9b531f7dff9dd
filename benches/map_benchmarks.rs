use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use keyed_maps::CaseInsensitiveMap;
use keyed_maps::FixedLinkedHashMap;
use keyed_maps::MultiValueLinkedMap;
use keyed_maps::MultiValueMap;
use keyed_maps::Order;
type RandomState = hashbrown::DefaultHashBuilder;
type LinkedMap<K, V> = keyed_maps::LinkedMap<K, V, RandomState>;
type FixedMap<K, V> = FixedLinkedHashMap<K, V, RandomState>;

type HashLinkedMap<K, V> = hashlink::LinkedHashMap<K, V, RandomState>;
type LruCache<K, V> = hashlink::LruCache<K, V, RandomState>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

const SIZES: &[usize] = &[10000];

fn header_names(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            if i % 2 == 0 {
                format!("X-Header-{i}")
            } else {
                format!("x-header-{i}")
            }
        })
        .collect()
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("linked_map", size), &size, |b, &size| {
            b.iter(|| {
                let mut map: LinkedMap<usize, usize> = LinkedMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(
            BenchmarkId::new("linked_map_preallocated", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut map: LinkedMap<usize, usize> = LinkedMap::with_capacity_and_hasher(
                        size,
                        Order::Insertion,
                        RandomState::default(),
                    );
                    for i in 0..size {
                        map.insert(black_box(i), black_box(i * 2));
                    }
                    map
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = IndexMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = HashLinkedMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });
    }

    group.finish();
}

fn bench_lru_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_churn");

    for &size in SIZES {
        let capacity = size / 10;
        let keys: Vec<usize> = (0..size).map(|_| rand::random_range(0..size / 4)).collect();

        group.throughput(criterion::Throughput::Elements(keys.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("fixed_linked_hash_map", size),
            &keys,
            |b, keys| {
                b.iter(|| {
                    let mut map: FixedMap<usize, usize> =
                        FixedMap::with_hasher(capacity, RandomState::default())
                            .expect("capacity is positive");
                    for &key in keys {
                        if map.get(&key).is_none() {
                            map.insert(key, key);
                        }
                    }
                    map
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("hashlink_lru", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map: LruCache<usize, usize> =
                    LruCache::with_hasher(capacity, RandomState::default());
                for &key in keys {
                    if map.get(&key).is_none() {
                        map.insert(key, key);
                    }
                }
                map
            })
        });
    }

    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for &size in SIZES {
        let access_keys: Vec<usize> = (0..100).map(|_| rand::random_range(0..size)).collect();

        group.throughput(criterion::Throughput::Elements(access_keys.len() as u64));

        let mut linked: LinkedMap<usize, usize> = LinkedMap::default();
        let mut index = IndexMap::default();
        let mut hashlinked = HashLinkedMap::default();
        for i in 0..size {
            linked.insert(i, i * 2);
            index.insert(i, i * 2);
            hashlinked.insert(i, i * 2);
        }

        group.bench_with_input(
            BenchmarkId::new("linked_map", size),
            &access_keys,
            |b, keys| {
                b.iter(|| {
                    let mut sum = 0;
                    for key in keys {
                        if let Some(value) = linked.peek(key) {
                            sum += *value;
                        }
                    }
                    black_box(sum)
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("indexmap", size), &access_keys, |b, keys| {
            b.iter(|| {
                let mut sum = 0;
                for key in keys {
                    if let Some(value) = index.get(key) {
                        sum += *value;
                    }
                }
                black_box(sum)
            })
        });

        group.bench_with_input(
            BenchmarkId::new("hashlinked", size),
            &access_keys,
            |b, keys| {
                b.iter(|| {
                    let mut sum = 0;
                    for key in keys {
                        if let Some(value) = hashlinked.get(key) {
                            sum += *value;
                        }
                    }
                    black_box(sum)
                })
            },
        );
    }

    group.finish();
}

fn bench_case_insensitive_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("case_insensitive_insert");

    for &size in SIZES {
        let names = header_names(size);

        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("case_insensitive_map", size),
            &names,
            |b, names| {
                b.iter(|| {
                    let mut map = CaseInsensitiveMap::new();
                    for (i, name) in names.iter().enumerate() {
                        map.insert(black_box(name.clone()), i);
                    }
                    map
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("indexmap_lowercased", size),
            &names,
            |b, names| {
                b.iter(|| {
                    let mut map = IndexMap::default();
                    for (i, name) in names.iter().enumerate() {
                        map.insert(black_box(name.to_lowercase()), i);
                    }
                    map
                })
            },
        );
    }

    group.finish();
}

fn bench_multi_value_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_value_add");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(
            BenchmarkId::new("multi_value_linked_map", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut map = MultiValueLinkedMap::new();
                    for i in 0..size {
                        map.add(black_box(i % 64), black_box(i));
                    }
                    map
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("indexmap_vec", size), &size, |b, &size| {
            b.iter(|| {
                let mut map: IndexMap<usize, Vec<usize>> = IndexMap::default();
                for i in 0..size {
                    map.entry(black_box(i % 64)).or_default().push(black_box(i));
                }
                map
            })
        });
    }

    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        let mut linked: LinkedMap<usize, usize> = LinkedMap::default();
        let mut index = IndexMap::default();
        for i in 0..size {
            linked.insert(i, i * 2);
            index.insert(i, i * 2);
        }

        group.bench_function(BenchmarkId::new("linked_map", size), |b| {
            b.iter(|| black_box(linked.iter().map(|(k, v)| k + v).sum::<usize>()))
        });

        group.bench_function(BenchmarkId::new("indexmap", size), |b| {
            b.iter(|| black_box(index.iter().map(|(k, v)| k + v).sum::<usize>()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_lru_churn,
    bench_random_access,
    bench_case_insensitive_insert,
    bench_multi_value_add,
    bench_iteration,
);
criterion_main!(benches);
