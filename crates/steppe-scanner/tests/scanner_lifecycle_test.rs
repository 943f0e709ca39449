//! Camera session lifecycle driven through the headless page harness.

use steppe_core::{BindingRole, PageSettings, StatusKind, StatusMessage, SyntheticEvent};
use steppe_scanner::{messages, ScannerController, ScannerState};
use steppe_testing::{init_test_logging, FakeDom, FakeEngine, PageTestRule, StopMode};

fn mount(rule: &PageTestRule) -> ScannerController<FakeDom, FakeEngine> {
    init_test_logging();
    let engine = rule.engine.clone();
    ScannerController::mount(
        rule.dom.clone(),
        rule.bindings(),
        &PageSettings::default(),
        rule.spawner.clone(),
        move |_| Some(engine),
    )
    .expect("bindings resolve")
    .controller()
    .expect("engine is available")
}

/// Start and let the camera come up.
fn start_scanning(rule: &PageTestRule, scanner: &ScannerController<FakeDom, FakeEngine>) {
    scanner.start();
    rule.pump_until_idle();
    rule.engine.resolve_start();
    rule.pump_until_idle();
    assert_eq!(scanner.state(), ScannerState::Scanning);
}

#[test]
fn test_mount_shows_idle_ui() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    assert_eq!(scanner.state(), ScannerState::Idle);
    assert!(rule.shows_idle_ui());
    assert!(!rule.dom.is_disabled(rule.node(BindingRole::StartControl)));
}

#[test]
fn test_start_requests_environment_camera() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    scanner.start();

    assert_eq!(scanner.state(), ScannerState::Requesting);
    assert_eq!(rule.engine.start_calls(), 1);
    assert!(rule.engine.has_pending_start());
    let (camera, params) = rule.engine.last_start().expect("start recorded");
    assert_eq!(camera.facing_mode, "environment");
    assert_eq!(params.fps, 10);
    assert_eq!(params.qrbox.width, 250);
    assert_eq!(rule.status(), messages::requesting_camera());
    assert!(rule.shows_scanning_ui());
    let shell = rule.shell().expect("shell present");
    assert!(rule.dom.has_class(shell, "is-scanning"));
}

#[test]
fn test_start_resolving_enters_scanning() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    start_scanning(&rule, &scanner);

    assert!(!rule.engine.has_pending_start());
    assert_eq!(rule.status(), messages::point_camera());
    assert!(rule.shows_scanning_ui());
}

#[test]
fn test_start_is_ignored_unless_idle() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    scanner.start();
    scanner.start();
    assert_eq!(rule.engine.start_calls(), 1);

    rule.engine.resolve_start();
    rule.pump_until_idle();
    scanner.start();
    assert_eq!(rule.engine.start_calls(), 1);
    assert_eq!(scanner.state(), ScannerState::Scanning);
}

#[test]
fn test_start_rejection_returns_to_idle_with_reason() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    scanner.start();
    rule.engine.reject_start("NotAllowedError");
    rule.pump_until_idle();

    assert_eq!(scanner.state(), ScannerState::Idle);
    let status = rule.status();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("NotAllowedError"));
    assert!(rule.shows_idle_ui());
    assert!(!rule.dom.is_disabled(rule.node(BindingRole::StartControl)));

    // The controller is reusable after a failure.
    scanner.start();
    assert_eq!(rule.engine.start_calls(), 2);
}

#[test]
fn test_decoded_code_is_trimmed_and_applied() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    start_scanning(&rule, &scanner);

    rule.engine.emit_decode(" 123-ABC \n");
    rule.pump_until_idle();

    let input = rule.node(BindingRole::Input);
    assert_eq!(rule.dom.value(input), "123-ABC");
    assert_eq!(rule.status(), StatusMessage::ok("QR найден: 123-ABC"));
    assert_eq!(rule.dom.event_count(input, SyntheticEvent::Input), 1);
    assert_eq!(rule.dom.event_count(input, SyntheticEvent::Change), 1);
    assert_eq!(
        rule.dom.events(input),
        vec![SyntheticEvent::Input, SyntheticEvent::Change]
    );
    assert_eq!(rule.dom.focused(), Some(input));
    assert_eq!(rule.engine.stop_calls(), 1);
    assert_eq!(scanner.state(), ScannerState::Idle);
    assert!(rule.shows_idle_ui());
}

#[test]
fn test_blank_decode_still_stops_camera() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    start_scanning(&rule, &scanner);

    rule.engine.emit_decode("  \n");
    rule.pump_until_idle();

    let input = rule.node(BindingRole::Input);
    assert_eq!(rule.dom.value(input), "");
    assert!(rule.dom.events(input).is_empty());
    assert_eq!(rule.engine.stop_calls(), 1);
    assert_eq!(scanner.state(), ScannerState::Idle);
    assert!(rule.shows_idle_ui());
    assert_eq!(rule.status(), messages::camera_stopped());
}

#[test]
fn test_second_decode_during_stop_is_ignored() {
    let rule = PageTestRule::new();
    rule.engine.set_stop_mode(StopMode::Hold);
    let scanner = mount(&rule);
    start_scanning(&rule, &scanner);

    rule.engine.emit_decode("FIRST");
    assert_eq!(scanner.state(), ScannerState::Stopping);
    rule.engine.emit_decode("SECOND");

    rule.engine.resolve_stop();
    rule.pump_until_idle();

    let input = rule.node(BindingRole::Input);
    assert_eq!(rule.dom.value(input), "FIRST");
    assert_eq!(rule.engine.stop_calls(), 1);
}

#[test]
fn test_decode_misses_are_silent() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    start_scanning(&rule, &scanner);

    for _ in 0..30 {
        rule.engine.emit_miss("No MultiFormat Readers were able to detect the code.");
    }
    rule.pump_until_idle();

    assert_eq!(scanner.state(), ScannerState::Scanning);
    assert_eq!(rule.status(), messages::point_camera());
}

#[test]
fn test_user_stop_reports_camera_stopped() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    start_scanning(&rule, &scanner);

    scanner.stop();
    assert_eq!(scanner.state(), ScannerState::Stopping);
    rule.pump_until_idle();

    assert_eq!(scanner.state(), ScannerState::Idle);
    assert_eq!(rule.status(), messages::camera_stopped());
    assert!(rule.shows_idle_ui());
    let shell = rule.shell().expect("shell present");
    assert!(!rule.dom.has_class(shell, "is-scanning"));
}

#[test]
fn test_stop_twice_is_harmless() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    scanner.stop();
    scanner.stop();
    rule.pump_until_idle();
    assert_eq!(scanner.state(), ScannerState::Idle);
    assert_eq!(rule.engine.stop_calls(), 0);
    assert!(rule.shows_idle_ui());

    start_scanning(&rule, &scanner);
    scanner.stop();
    scanner.stop();
    rule.pump_until_idle();
    assert_eq!(scanner.state(), ScannerState::Idle);
    assert_eq!(rule.engine.stop_calls(), 1);
}

#[test]
fn test_stop_failure_forces_idle_silently() {
    let rule = PageTestRule::new();
    rule.engine
        .set_stop_mode(StopMode::Fail("camera already closed".into()));
    let scanner = mount(&rule);
    start_scanning(&rule, &scanner);

    scanner.stop();
    rule.pump_until_idle();

    assert_eq!(scanner.state(), ScannerState::Idle);
    assert!(rule.shows_idle_ui());
    assert_eq!(rule.status(), messages::point_camera());
}

#[test]
fn test_stop_while_requesting_stops_once_started() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    scanner.start();
    scanner.stop();
    assert_eq!(rule.engine.stop_calls(), 0);
    assert_eq!(scanner.state(), ScannerState::Requesting);

    rule.engine.resolve_start();
    rule.pump_until_idle();

    assert_eq!(rule.engine.stop_calls(), 1);
    assert_eq!(scanner.state(), ScannerState::Idle);
    assert_eq!(rule.status(), messages::camera_stopped());
}

#[test]
fn test_stop_while_requesting_is_dropped_on_rejection() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    scanner.start();
    scanner.stop();
    rule.engine.reject_start("NotReadableError");
    rule.pump_until_idle();
    assert_eq!(scanner.state(), ScannerState::Idle);

    start_scanning(&rule, &scanner);
    assert_eq!(rule.engine.stop_calls(), 0);
}

#[test]
fn test_dropping_controller_detaches_decode_callback() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    start_scanning(&rule, &scanner);
    drop(scanner);

    rule.engine.emit_decode("LATE");
    rule.pump_until_idle();

    assert_eq!(rule.dom.value(rule.node(BindingRole::Input)), "");
}
