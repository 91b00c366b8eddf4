//! Stream controller behaviour against an in-memory engine.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeEngine, UNREACHABLE, settings};
use webcamstreamer::controller::{Notification, Resolution, StreamController};
use webcamstreamer::stream::{ENCODER_DEVICE, NETWORK_MODE};

const NAME: &str = "WebcamStreamer";

#[test]
fn start_launches_container_when_absent() {
    let controller = StreamController::new(FakeEngine::new());

    let note = controller.start(&settings());
    assert!(note.status);
    assert!(note.streaming);
    assert!(note.error.is_none());
    assert_eq!(note.success.as_deref(), Some("Stream started"));

    let engine = controller.engine();
    assert_eq!(engine.run_count(), 1);
    let spec = engine.state().run_calls[0].clone();
    assert_eq!(spec.name, NAME);
    assert_eq!(spec.image, "adilinden/rpi-ffmpeg:latest");
    assert_eq!(
        spec.command,
        ["in=http://cam", "out=rtmp://x", "fps=5", "gop=10", "vf=null"]
    );
    assert!(spec.detach);
    assert!(spec.auto_remove);
    assert_eq!(spec.network_mode, NETWORK_MODE);
    assert_eq!(spec.devices, [ENCODER_DEVICE]);

    assert_eq!(
        controller.snapshot().container.map(|c| c.name),
        Some(NAME.to_string())
    );
}

#[test]
fn start_when_running_is_a_no_op() {
    let engine = FakeEngine::new();
    engine.add_container(NAME);
    let controller = StreamController::new(engine);

    let note = controller.start(&settings());
    assert_eq!(note, Notification::streaming(true));
    assert_eq!(controller.engine().run_count(), 0);
}

#[test]
fn start_with_unreachable_engine_reports_error() {
    let controller = StreamController::new(FakeEngine::unreachable());

    let note = controller.start(&settings());
    assert!(note.status);
    assert!(!note.streaming);
    assert_eq!(
        note.error.as_deref(),
        Some(format!("docker daemon is unreachable: {UNREACHABLE}").as_str())
    );

    let snapshot = controller.snapshot();
    assert!(snapshot.container.is_none());
    assert!(snapshot.engine.is_none());
    assert_eq!(controller.engine().run_count(), 0);
}

#[test]
fn run_failure_leaves_no_handle() {
    let engine = FakeEngine::new();
    engine.state().fail_run = Some("pull access denied for adilinden/rpi-ffmpeg".into());
    let controller = StreamController::new(engine);

    let note = controller.start(&settings());
    assert!(!note.streaming);
    assert_eq!(
        note.error.as_deref(),
        Some("pull access denied for adilinden/rpi-ffmpeg")
    );
    assert!(controller.snapshot().container.is_none());
}

#[test]
fn malformed_template_fails_before_the_engine_is_asked() {
    let controller = StreamController::new(FakeEngine::new());
    let mut settings = settings();
    settings.cmd = "ffmpeg -i {webcam_url} {stream_key} {stream_url}".into();

    let note = controller.start(&settings);
    assert!(!note.streaming);
    assert_eq!(
        note.error.as_deref(),
        Some("unknown placeholder {stream_key} in command template")
    );
    assert_eq!(controller.engine().run_count(), 0);
}

#[test]
fn orientation_settings_reach_the_container_command() {
    let controller = StreamController::new(FakeEngine::new());
    let mut settings = settings();
    settings.webcam.flip_h = true;
    settings.webcam.rotate_90 = true;

    controller.start(&settings);
    let spec = controller.engine().state().run_calls[0].clone();
    assert_eq!(spec.command[4], "vf=hflip,transpose=cclock");
}

#[test]
fn stop_then_check_reports_not_streaming() {
    let engine = FakeEngine::new();
    engine.add_container(NAME);
    let controller = StreamController::new(engine);

    let stopped = controller.stop(&settings());
    assert!(!stopped.streaming);
    assert!(stopped.error.is_none());
    assert_eq!(stopped.success.as_deref(), Some("Stream stopped"));
    assert!(controller.snapshot().container.is_none());

    assert_eq!(controller.check(&settings()), Notification::streaming(false));
}

#[test]
fn stop_failure_keeps_the_resolved_handle() {
    let engine = FakeEngine::new();
    engine.add_container(NAME);
    engine.state().fail_stop = Some("container did not stop in time".into());
    let controller = StreamController::new(engine);

    let note = controller.stop(&settings());
    assert!(!note.streaming);
    assert_eq!(note.error.as_deref(), Some("container did not stop in time"));
    assert!(controller.snapshot().container.is_some());

    // A second attempt repeats the same stop call.
    controller.stop(&settings());
    assert_eq!(controller.engine().stop_count(), 2);
    assert!(controller.engine().has_container(NAME));
}

#[test]
fn stop_when_absent_reports_not_streaming() {
    let controller = StreamController::new(FakeEngine::new());

    let note = controller.stop(&settings());
    assert_eq!(note, Notification::streaming(false));
    assert_eq!(controller.engine().stop_count(), 0);
}

#[test]
fn stop_with_unreachable_engine_surfaces_the_error() {
    let controller = StreamController::new(FakeEngine::unreachable());

    let note = controller.stop(&settings());
    assert!(!note.streaming);
    assert!(note.error.is_some());
}

#[test]
fn check_does_not_touch_the_daemon() {
    let engine = FakeEngine::new();
    engine.add_container(NAME);
    let controller = StreamController::new(engine);

    let first = controller.check(&settings());
    let second = controller.check(&settings());
    assert_eq!(first, Notification::streaming(true));
    assert_eq!(first, second);

    let engine = controller.engine();
    assert_eq!(engine.run_count(), 0);
    assert_eq!(engine.stop_count(), 0);
    assert!(engine.has_container(NAME));
}

#[test]
fn container_that_exited_is_detected_on_next_lookup() {
    let controller = StreamController::new(FakeEngine::new());
    controller.start(&settings());
    assert!(controller.snapshot().container.is_some());

    controller.engine().remove_container(NAME);

    assert_eq!(controller.check(&settings()), Notification::streaming(false));
    assert!(controller.snapshot().container.is_none());

    // Starting again launches a fresh container.
    assert!(controller.start(&settings()).streaming);
    assert_eq!(controller.engine().run_count(), 2);
}

#[test]
fn resolution_distinguishes_absent_from_unreachable() {
    let controller = StreamController::new(FakeEngine::new());
    assert_eq!(controller.resolve_container(&settings()), Resolution::Absent);

    controller.engine().set_reachable(false);
    assert!(matches!(
        controller.resolve_container(&settings()),
        Resolution::Unreachable(_)
    ));

    // Both leave the same in-memory state behind.
    let snapshot = controller.snapshot();
    assert!(snapshot.engine.is_none());
    assert!(snapshot.container.is_none());
}

#[test]
fn engine_handle_is_recreated_after_the_daemon_returns() {
    let engine = FakeEngine::unreachable();
    engine.add_container(NAME);
    let controller = StreamController::new(engine);

    assert!(controller.check(&settings()).is_error());
    assert!(controller.snapshot().engine.is_none());

    controller.engine().set_reachable(true);
    assert_eq!(controller.check(&settings()), Notification::streaming(true));
    assert_eq!(
        controller.snapshot().engine.map(|e| e.server_version),
        Some("27.0.3".to_string())
    );
}

#[test]
fn startup_resolves_the_image_for_diagnostics() {
    let engine = FakeEngine::new();
    engine
        .state()
        .images
        .push("adilinden/rpi-ffmpeg:latest".into());
    let controller = StreamController::new(engine);

    let note = controller.startup(&settings());
    assert_eq!(note, Notification::streaming(false));
    assert_eq!(
        controller.snapshot().image.map(|i| i.name),
        Some("adilinden/rpi-ffmpeg:latest".to_string())
    );
}

#[test]
fn exited_container_that_was_not_removed_counts_as_present() {
    let engine = FakeEngine::new();
    engine.add_stopped_container(NAME);
    let controller = StreamController::new(engine);

    match controller.resolve_container(&settings()) {
        Resolution::Present(container) => assert!(!container.running),
        other => panic!("expected present container, got {other:?}"),
    }
    assert_eq!(controller.check(&settings()), Notification::streaming(true));
    assert_eq!(controller.start(&settings()), Notification::streaming(true));
    assert_eq!(controller.engine().run_count(), 0);

    // Stopping clears the name so the next start can launch.
    assert!(controller.stop(&settings()).error.is_none());
    assert!(controller.start(&settings()).streaming);
    assert_eq!(controller.engine().run_count(), 1);
}

#[test]
fn missing_image_keeps_the_engine_handle() {
    let controller = StreamController::new(FakeEngine::new());

    assert!(controller.resolve_image(&settings()).is_none());
    let snapshot = controller.snapshot();
    assert!(snapshot.image.is_none());
    assert!(snapshot.engine.is_some());
    assert!(snapshot.last_error.is_none());
}

#[test]
fn missing_image_does_not_block_start() {
    let controller = StreamController::new(FakeEngine::new());

    controller.startup(&settings());
    assert!(controller.snapshot().image.is_none());
    assert!(controller.start(&settings()).streaming);
}

#[test]
fn stop_always_ends_absent_or_reports_error() {
    let controller = StreamController::new(FakeEngine::new());
    let s = settings();

    for _ in 0..3 {
        controller.start(&s);
        controller.check(&s);
        let note = controller.stop(&s);
        assert!(note.error.is_none());
        assert_eq!(controller.resolve_container(&s), Resolution::Absent);
        controller.stop(&s);
        assert_eq!(controller.resolve_container(&s), Resolution::Absent);
    }
    assert_eq!(controller.engine().run_count(), 3);
    assert_eq!(controller.engine().stop_count(), 3);
}

#[test]
fn concurrent_starts_launch_a_single_container() {
    let engine = FakeEngine::new();
    engine.state().run_delay = Some(Duration::from_millis(50));
    let controller = Arc::new(StreamController::new(engine));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let controller = Arc::clone(&controller);
            std::thread::spawn(move || controller.start(&settings()))
        })
        .collect();

    for handle in handles {
        let note = handle.join().unwrap();
        assert!(note.streaming);
        assert!(note.error.is_none());
    }
    assert_eq!(controller.engine().run_count(), 1);
}
