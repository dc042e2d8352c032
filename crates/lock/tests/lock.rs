use packlog_lock::Lock;
use std::{
    sync::{Arc, Mutex, RwLock},
    thread,
};

#[test]
fn apply_mutates() {
    let lock: Lock<Mutex<Vec<u32>>> = Lock::new(vec![]);
    lock.apply(|v| v.push(1));
    assert_eq!(lock.apply(|v| v.clone()), vec![1]);
}

#[test]
fn inspect_reads_what_apply_wrote() {
    let lock: Lock<RwLock<u64>> = Lock::new(0);
    let prev = lock.apply(|n| std::mem::replace(n, 5));
    assert_eq!(prev, 0);
    assert_eq!(lock.inspect(|n| *n), 5);
}

#[test]
fn nested_reads_are_allowed() {
    let lock: Lock<RwLock<u64>> = Lock::new(3);
    let sum = lock.inspect(|a| lock.inspect(|b| a + b));
    assert_eq!(sum, 6);
}

#[test]
fn concurrent_writers() {
    let lock: Arc<Lock<RwLock<u64>>> = Arc::new(Lock::new(0));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let lock = lock.clone();
            thread::spawn(move || {
                for _ in 0..1000 {
                    lock.apply(|n| *n += 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(lock.inspect(|n| *n), 8000);
}

#[test]
fn survives_panic_in_closure() {
    let lock: Arc<Lock<RwLock<Vec<u8>>>> = Arc::new(Lock::new(vec![1]));
    let cloned = lock.clone();
    let result = thread::spawn(move || {
        cloned.apply(|_| panic!("writer failed"));
    })
    .join();
    assert!(result.is_err());
    assert_eq!(lock.inspect(|v| v.clone()), vec![1]);
    lock.apply(|v| v.push(2));
    assert_eq!(lock.inspect(|v| v.len()), 2);
}
