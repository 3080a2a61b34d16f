use super::*;
use std::sync::Mutex;

fn recording_callback() -> (ToggleCallback, Arc<Mutex<Vec<bool>>>) {
    let calls: Arc<Mutex<Vec<bool>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    let callback: ToggleCallback = Arc::new(move |open: bool| sink.lock().unwrap().push(open));
    (callback, calls)
}

// =============================================================
// Internal mode
// =============================================================

#[test]
fn internal_mode_without_callback() {
    let vis = VisibilityManager::new(true, None);
    assert!(!vis.is_controlled());
    assert!(vis.is_open());
}

#[test]
fn internal_toggle_flips_flag() {
    let mut vis = VisibilityManager::new(false, None);
    assert!(vis.toggle().dispatch());
    assert!(vis.is_open());
    assert!(!vis.toggle().dispatch());
    assert!(!vis.is_open());
}

#[test]
fn internal_double_toggle_restores_state() {
    for initial in [true, false] {
        let mut vis = VisibilityManager::new(initial, None);
        let _ = vis.toggle().dispatch();
        let _ = vis.toggle().dispatch();
        assert_eq!(vis.is_open(), initial);
    }
}

#[test]
fn internal_ignores_sync() {
    let mut vis = VisibilityManager::new(false, None);
    vis.sync(true);
    assert!(!vis.is_open());
}

// =============================================================
// Controlled mode
// =============================================================

#[test]
fn controlled_toggle_calls_back_without_mutating() {
    let (callback, calls) = recording_callback();
    let mut vis = VisibilityManager::new(false, Some(callback));
    assert!(vis.is_controlled());

    assert!(vis.toggle().dispatch());
    assert_eq!(*calls.lock().unwrap(), [true]);
    assert!(!vis.is_open());
}

#[test]
fn controlled_state_follows_host_flag() {
    let (callback, calls) = recording_callback();
    let mut vis = VisibilityManager::new(false, Some(callback));

    let _ = vis.toggle().dispatch();
    vis.sync(true);
    assert!(vis.is_open());

    let _ = vis.toggle().dispatch();
    vis.sync(false);
    assert!(!vis.is_open());
    assert_eq!(*calls.lock().unwrap(), [true, false]);
}

#[test]
fn controlled_host_may_refuse_request() {
    let (callback, calls) = recording_callback();
    let mut vis = VisibilityManager::new(false, Some(callback));

    let _ = vis.toggle().dispatch();
    let _ = vis.toggle().dispatch();
    assert!(!vis.is_open());
    assert_eq!(*calls.lock().unwrap(), [true, true]);
}

#[test]
fn delegated_request_is_inert_until_dispatched() {
    let (callback, calls) = recording_callback();
    let mut vis = VisibilityManager::new(true, Some(callback));
    let request = vis.toggle();
    assert!(calls.lock().unwrap().is_empty());
    assert!(!request.dispatch());
    assert_eq!(*calls.lock().unwrap(), [false]);
}

#[test]
fn debug_hides_callback() {
    let (callback, _) = recording_callback();
    let vis = VisibilityManager::new(true, Some(callback));
    assert_eq!(format!("{vis:?}"), "Controlled { open: true, .. }");
}
