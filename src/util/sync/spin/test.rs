use std::thread;

use super::Spinlock;

#[test]
fn lock_and_release() {
    let lock = Spinlock::new(17);
    assert_eq!(*lock.lock(), 17);
    {
        *lock.lock() = 42;
    }
    assert_eq!(*lock.lock(), 42);
}

#[test]
fn exclusion() {
    static COUNTER: Spinlock<usize> = Spinlock::new(0);

    static MAX: usize = 50000;
    static THREADS: usize = 4;

    let mut threads = Vec::with_capacity(THREADS);

    for _ in 0..THREADS {
        threads.push(thread::spawn(|| {
            for _ in 0..MAX {
                let mut counter = COUNTER.lock();
                let val = *counter;
                *counter += 1;
                assert_eq!(val + 1, *counter);
                *counter += 1;
                assert_eq!(val + 2, *counter);
            }
        }));
    }

    for t in threads {
        t.join().unwrap();
    }

    assert_eq!(*COUNTER.lock(), 2 * MAX * THREADS);
}
