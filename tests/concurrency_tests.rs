use shardedmap::ShardedMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_inserts() {
    let map = Arc::new(ShardedMap::new());
    let mut handles = vec![];

    // Spawn 10 threads, each inserting 100 items
    for thread_id in 0..10 {
        let map = Arc::clone(&map);
        let handle = thread::spawn(move || {
            for i in 0..100 {
                let key = format!("thread_{}_key_{}", thread_id, i);
                map.insert(key, i);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.len(), 1000);
    assert_eq!(map.consistent_len(), 1000);
}

#[test]
fn test_concurrent_reads() {
    let map = Arc::new(ShardedMap::new());

    for i in 0..100 {
        map.insert(format!("key_{}", i), i);
    }

    let mut handles = vec![];

    // Spawn 20 threads, each reading all items
    for _ in 0..20 {
        let map = Arc::clone(&map);
        let handle = thread::spawn(move || {
            for i in 0..100 {
                let key = format!("key_{}", i);
                let value = map.get(&key).unwrap();
                assert_eq!(*value, i);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_updates() {
    let map = Arc::new(ShardedMap::new());
    map.insert("counter".to_string(), 0);

    let mut handles = vec![];

    // Spawn 10 threads, each incrementing the counter 100 times
    for _ in 0..10 {
        let map = Arc::clone(&map);
        let handle = thread::spawn(move || {
            for _ in 0..100 {
                map.update(&"counter".to_string(), |v| *v += 1);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(*map.get(&"counter".to_string()).unwrap(), 1000);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_concurrent_overwrites_same_key() {
    let map = Arc::new(ShardedMap::new());
    let mut handles = vec![];

    for thread_id in 0..8 {
        let map = Arc::clone(&map);
        handles.push(thread::spawn(move || {
            for i in 0..500 {
                map.insert("shared", thread_id * 1000 + i);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Only one live entry however the writes interleaved.
    assert_eq!(map.len(), 1);
    let last = *map.get(&"shared").unwrap();
    assert_eq!(last % 1000, 499);
}

#[test]
fn test_concurrent_insert_remove_same_keys() {
    let map = Arc::new(ShardedMap::with_shard_count(4));
    let mut handles = vec![];

    for _ in 0..4 {
        let map = Arc::clone(&map);
        handles.push(thread::spawn(move || {
            for round in 0..200 {
                for k in 0..10u32 {
                    if round % 2 == 0 {
                        map.insert(k, round);
                    } else {
                        map.remove(&k);
                    }
                }
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    // Counters must agree with the maps once writers are done.
    assert_eq!(map.len(), map.consistent_len());
    assert_eq!(map.len(), map.keys().len());
}

#[test]
fn test_concurrent_mixed_operations() {
    let map = Arc::new(ShardedMap::new());
    let mut handles = vec![];

    // Writers
    for thread_id in 0..5 {
        let map = Arc::clone(&map);
        let handle = thread::spawn(move || {
            for i in 0..100 {
                let key = format!("key_{}_{}", thread_id, i);
                map.insert(key, i);
            }
        });
        handles.push(handle);
    }

    // Readers
    for _ in 0..5 {
        let map = Arc::clone(&map);
        let handle = thread::spawn(move || {
            for _ in 0..1000 {
                for i in 0..10 {
                    let key = format!("key_{}_{}", i % 5, i);
                    map.get(&key); // May or may not exist, that's ok
                }
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.len(), 500);
}

#[test]
fn test_whole_map_reads_during_writes() {
    let map = Arc::new(ShardedMap::with_shard_count(8));
    let done = Arc::new(AtomicBool::new(false));
    let barrier = Arc::new(Barrier::new(2));

    let writer = {
        let map = Arc::clone(&map);
        let done = Arc::clone(&done);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..5000u32 {
                map.insert(i, i);
            }
            done.store(true, Ordering::Release);
        })
    };

    barrier.wait();
    let mut last = 0;
    while !done.load(Ordering::Acquire) {
        // Inserts only: a consistent count can never go backwards and never
        // exceeds what the writer can produce.
        let n = map.consistent_len();
        assert!(n >= last);
        assert!(n <= 5000);
        last = n;

        let keys = map.keys();
        assert!(keys.len() <= 5000);
        let _ = map.len();
    }

    writer.join().unwrap();
    assert_eq!(map.len(), 5000);
    assert_eq!(map.consistent_keys().len(), 5000);
}

#[test]
fn test_clear_during_writes_leaves_counters_consistent() {
    let map = Arc::new(ShardedMap::with_shard_count(8));
    let mut handles = vec![];

    for t in 0..4u32 {
        let map = Arc::clone(&map);
        handles.push(thread::spawn(move || {
            for i in 0..1000u32 {
                map.insert(t * 10_000 + i, i);
            }
        }));
    }
    {
        let map = Arc::clone(&map);
        handles.push(thread::spawn(move || {
            for _ in 0..20 {
                map.clear();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.len(), map.keys().len());
    assert_eq!(map.len(), map.consistent_len());
}
