// WorkspacePool: bounded checkout, re-zeroing on return.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use mam::engine::Lznt1Engine;
use mam::workspace::WorkspacePool;
use mam::{FormatCode, MamError};

#[test]
fn returned_workspace_is_zeroed() {
    let engine = Lznt1Engine::new();
    let pool = WorkspacePool::new(&engine, 1);
    {
        let mut ws = pool.checkout(FormatCode::LZNT1).unwrap();
        ws.as_mut_slice().fill(0x5A);
    }
    let ws = pool.checkout(FormatCode::LZNT1).unwrap();
    assert!(ws.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn in_flight_never_exceeds_capacity() {
    let engine = Lznt1Engine::new();
    let pool = WorkspacePool::new(&engine, 2);
    let in_flight = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..6 {
            s.spawn(|| {
                let _ws = pool.checkout(FormatCode::LZNT1).unwrap();
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(20));
                in_flight.fetch_sub(1, Ordering::SeqCst);
            });
        }
    });
    assert!(peak.load(Ordering::SeqCst) <= 2);
}

#[test]
fn zero_count_means_per_cpu() {
    let engine = Lznt1Engine::new();
    assert!(WorkspacePool::new(&engine, 0).capacity() >= 1);
    assert!(WorkspacePool::with_default_size(&engine).capacity() >= 1);
}

#[test]
fn sizing_failure_is_not_cached() {
    let engine = Lznt1Engine::new();
    let pool = WorkspacePool::new(&engine, 1);
    assert!(matches!(
        pool.checkout(FormatCode::XPRESS),
        Err(MamError::EngineStatus { .. })
    ));
    assert!(matches!(
        pool.checkout(FormatCode::XPRESS),
        Err(MamError::EngineStatus { .. })
    ));
    assert!(pool.checkout(FormatCode::LZNT1).is_ok());
}
