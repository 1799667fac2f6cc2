mod common;

use std::time::Duration;

use serde_json::json;
use tabsheet::prelude::*;
use tokio::time::{sleep, timeout};

use common::{Call, Recorder, data, mount};

fn adaptive_sheet(recorder: &Recorder) -> TabularSheet {
    let props = SheetProps::new(data(json!({ "r1": { "amount": 1 } })));
    TabularSheet::new(recorder.factory(), props)
}

fn resizes(recorder: &Recorder) -> Vec<Call> {
    recorder
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::ChangeSize(..) | Call::Render(false)))
        .collect()
}

// ============================================================================
// Debounced resize
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_resize_burst_applies_once_with_latest_box() {
    let recorder = Recorder::new();
    let mut sheet = adaptive_sheet(&recorder);
    let (surface, window) = mount(&mut sheet);
    assert_eq!(window.listener_count(), 1);

    window.fire(1);
    sleep(Duration::from_millis(50)).await;
    surface.resize(1024.0, 700.0);
    window.fire(2);

    let sample = sheet.next_resize().await.unwrap();
    assert_eq!(sample.timestamp, 2);
    sheet.apply_resize(sample);

    assert_eq!(
        resizes(&recorder),
        vec![Call::ChangeSize(1024.0, 700.0), Call::Render(false)]
    );
    assert!(timeout(Duration::from_secs(1), sheet.next_resize()).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_separated_resizes_each_apply() {
    let recorder = Recorder::new();
    let mut sheet = adaptive_sheet(&recorder);
    let (surface, window) = mount(&mut sheet);

    window.fire(1);
    let first = sheet.next_resize().await.unwrap();
    sheet.apply_resize(first);

    surface.resize(400.0, 300.0);
    window.fire(2);
    let second = sheet.next_resize().await.unwrap();
    sheet.apply_resize(second);

    assert_eq!(
        resizes(&recorder),
        vec![
            Call::ChangeSize(800.0, 600.0),
            Call::Render(false),
            Call::ChangeSize(400.0, 300.0),
            Call::Render(false),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_resize_window_follows_config() {
    let recorder = Recorder::new();
    let mut sheet = adaptive_sheet(&recorder)
        .with_config(SheetConfig::new().with_resize_debounce(Duration::from_millis(500)));
    let (_surface, window) = mount(&mut sheet);

    window.fire(1);
    assert!(timeout(Duration::from_millis(400), sheet.next_resize()).await.is_err());
    assert!(sheet.next_resize().await.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_detached_container_drops_resize() {
    let recorder = Recorder::new();
    let mut sheet = adaptive_sheet(&recorder);
    let (surface, window) = mount(&mut sheet);

    window.fire(1);
    surface.detach();
    let sample = sheet.next_resize().await.unwrap();
    sheet.apply_resize(sample);

    assert!(resizes(&recorder).is_empty());
}

// ============================================================================
// Listener lifecycle
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_unmount_removes_listener() {
    let recorder = Recorder::new();
    let mut sheet = adaptive_sheet(&recorder);
    let (_surface, window) = mount(&mut sheet);

    sheet.unmount();
    assert_eq!(window.listener_count(), 0);
    assert!(sheet.next_resize().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_pending_resize_never_applies_after_unmount() {
    let recorder = Recorder::new();
    let mut sheet = adaptive_sheet(&recorder);
    let (_surface, window) = mount(&mut sheet);

    window.fire(1);
    sheet.unmount();
    sleep(Duration::from_millis(500)).await;

    sheet.apply_resize(ResizeSample::new(1));
    assert!(resizes(&recorder).is_empty());
    assert_eq!(recorder.destroyed(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_non_adaptive_sheet_never_listens() {
    let recorder = Recorder::new();
    let props = SheetProps::new(data(json!({}))).adaptive(false);
    let mut sheet = TabularSheet::new(recorder.factory(), props);
    let (_surface, window) = mount(&mut sheet);

    assert_eq!(window.listener_count(), 0);
    assert!(sheet.next_resize().await.is_none());

    sheet.apply_resize(ResizeSample::new(1));
    assert!(resizes(&recorder).is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_adaptive_toggle_applies_at_next_mount() {
    let recorder = Recorder::new();
    let props = SheetProps::new(data(json!({}))).adaptive(false);
    let mut sheet = TabularSheet::new(recorder.factory(), props.clone());
    let (_surface, window) = mount(&mut sheet);

    sheet.set_props(props.adaptive(true)).unwrap();
    assert_eq!(window.listener_count(), 0);

    sheet.unmount();
    let (_surface, window) = mount(&mut sheet);
    assert_eq!(window.listener_count(), 1);
}
