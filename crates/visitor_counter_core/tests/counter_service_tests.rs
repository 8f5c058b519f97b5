use std::sync::Arc;
use std::thread;

use visitor_counter_core::contract::COUNTER_ID;
use visitor_counter_core::memory_store::InMemoryCounterStore;
use visitor_counter_core::service::CounterService;

#[test]
fn sequential_increments_from_absent_counter_reach_n() {
    let service = CounterService::new(InMemoryCounterStore::new());

    for expected in 1..=25u64 {
        assert_eq!(service.increment(), Ok(expected));
    }
    assert_eq!(service.store().value(COUNTER_ID), Some(25));
}

#[test]
fn concurrent_increments_on_existing_counter_are_not_lost() {
    let store = Arc::new(InMemoryCounterStore::with_value(COUNTER_ID, 100));
    let threads = 8;
    let per_thread = 50;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let service = CounterService::new(Arc::clone(&store));
            thread::spawn(move || {
                let mut seen = Vec::with_capacity(per_thread);
                for _ in 0..per_thread {
                    seen.push(service.increment().expect("increment should succeed"));
                }
                seen
            })
        })
        .collect();

    let mut observed: Vec<u64> = handles
        .into_iter()
        .flat_map(|handle| handle.join().expect("worker thread panicked"))
        .collect();
    observed.sort_unstable();

    let total = (threads * per_thread) as u64;
    assert_eq!(store.value(COUNTER_ID), Some(100 + total));
    assert_eq!(observed, (101..=100 + total).collect::<Vec<_>>());
}
