//! Decoding user-supplied images.

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

/// Simulates the picker holding a file, as the browser does after selection.
fn pick(rule: &PageTestRule, scanner: &ScannerController<FakeDom, FakeEngine>, name: &str) {
    rule.dom
        .update(rule.node(BindingRole::ImageInput), |node| {
            node.value = format!("C:\\fakepath\\{name}")
        });
    scanner.select_file(Some(name.to_string()));
}

#[test]
fn test_empty_selection_does_nothing() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    let before = rule.dom.mutations();

    scanner.select_file(None);
    rule.pump_until_idle();

    assert!(rule.engine.scanned_files().is_empty());
    assert_eq!(rule.dom.mutations(), before);
}

#[test]
fn test_image_decode_applies_code_and_clears_picker() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    pick(&rule, &scanner, "label.png");
    assert_eq!(rule.status(), messages::decoding_image());
    rule.pump_until_idle();
    assert_eq!(
        rule.engine.scanned_files(),
        vec![("label.png".to_string(), true)]
    );

    rule.engine.resolve_scan("INV-0042\n");
    rule.pump_until_idle();

    let input = rule.node(BindingRole::Input);
    assert_eq!(rule.dom.value(input), "INV-0042");
    assert_eq!(rule.dom.event_count(input, SyntheticEvent::Input), 1);
    assert_eq!(rule.dom.event_count(input, SyntheticEvent::Change), 1);
    assert_eq!(rule.status(), StatusMessage::ok("QR найден: INV-0042"));
    assert_eq!(rule.dom.value(rule.node(BindingRole::ImageInput)), "");
    assert_eq!(scanner.state(), ScannerState::Idle);
    assert_eq!(rule.engine.stop_calls(), 0);
}

#[test]
fn test_image_decode_failure_reports_and_clears_picker() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    pick(&rule, &scanner, "blurry.jpg");
    rule.engine.reject_scan("No QR code found");
    rule.pump_until_idle();

    let status = rule.status();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("No QR code found"));
    assert_eq!(rule.dom.value(rule.node(BindingRole::ImageInput)), "");
    assert_eq!(rule.dom.value(rule.node(BindingRole::Input)), "");
    assert_eq!(scanner.state(), ScannerState::Idle);
}

#[test]
fn test_blank_image_result_counts_as_failure() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    pick(&rule, &scanner, "white.png");
    rule.engine.resolve_scan("   ");
    rule.pump_until_idle();

    assert_eq!(rule.status(), messages::image_not_decoded(messages::EMPTY_RESULT));
    assert_eq!(rule.dom.value(rule.node(BindingRole::ImageInput)), "");
}

#[test]
fn test_same_file_can_be_picked_again() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    pick(&rule, &scanner, "label.png");
    rule.engine.reject_scan("No QR code found");
    rule.pump_until_idle();
    pick(&rule, &scanner, "label.png");
    rule.engine.resolve_scan("INV-7");
    rule.pump_until_idle();

    assert_eq!(rule.engine.scanned_files().len(), 2);
    assert_eq!(rule.dom.value(rule.node(BindingRole::Input)), "INV-7");
}

#[test]
fn test_image_while_scanning_stops_camera_first() {
    let rule = PageTestRule::new();
    rule.engine.set_stop_mode(StopMode::Hold);
    let scanner = mount(&rule);
    scanner.start();
    rule.engine.resolve_start();
    rule.pump_until_idle();

    pick(&rule, &scanner, "label.png");
    assert_eq!(scanner.state(), ScannerState::Stopping);
    assert_eq!(rule.engine.stop_calls(), 1);
    rule.pump_until_idle();
    assert!(rule.engine.scanned_files().is_empty());

    rule.engine.resolve_stop();
    rule.pump_until_idle();
    assert_eq!(scanner.state(), ScannerState::Idle);
    assert_eq!(rule.engine.scanned_files().len(), 1);
    // A file-driven stop does not announce the camera stop.
    assert_eq!(rule.status(), messages::decoding_image());

    rule.engine.resolve_scan("INV-9");
    rule.pump_until_idle();
    assert_eq!(rule.dom.value(rule.node(BindingRole::Input)), "INV-9");
    assert!(rule.shows_idle_ui());
}

#[test]
fn test_image_while_requesting_waits_for_camera() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    scanner.start();

    pick(&rule, &scanner, "first.png");
    pick(&rule, &scanner, "second.png");
    rule.pump_until_idle();
    assert!(rule.engine.scanned_files().is_empty());

    rule.engine.resolve_start();
    rule.pump_until_idle();

    assert_eq!(rule.engine.stop_calls(), 1);
    assert_eq!(
        rule.engine.scanned_files(),
        vec![("second.png".to_string(), true)]
    );
    assert_eq!(scanner.state(), ScannerState::Idle);
}

#[test]
fn test_image_while_requesting_runs_after_rejection() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    scanner.start();

    pick(&rule, &scanner, "label.png");
    rule.engine.reject_start("NotAllowedError");
    rule.pump_until_idle();

    assert_eq!(rule.engine.stop_calls(), 0);
    assert_eq!(rule.engine.scanned_files().len(), 1);
    rule.engine.resolve_scan("INV-1");
    rule.pump_until_idle();
    assert_eq!(rule.status(), StatusMessage::ok("QR найден: INV-1"));
}

#[test]
fn test_image_after_stop_failure_still_decodes() {
    let rule = PageTestRule::new();
    rule.engine.set_stop_mode(StopMode::Fail("track ended".into()));
    let scanner = mount(&rule);
    scanner.start();
    rule.engine.resolve_start();
    rule.pump_until_idle();

    pick(&rule, &scanner, "label.png");
    rule.pump_until_idle();

    assert_eq!(scanner.state(), ScannerState::Idle);
    assert_eq!(rule.engine.scanned_files().len(), 1);
}

#[test]
fn test_start_waits_for_running_image_decode() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);
    let start = rule.node(BindingRole::StartControl);

    pick(&rule, &scanner, "label.png");
    assert!(rule.dom.is_disabled(start));
    scanner.start();
    rule.pump_until_idle();
    assert_eq!(rule.engine.start_calls(), 0);
    assert_eq!(scanner.state(), ScannerState::Idle);

    rule.engine.resolve_scan("INV-5");
    rule.pump_until_idle();
    assert!(!rule.dom.is_disabled(start));
    assert_eq!(rule.dom.value(rule.node(BindingRole::Input)), "INV-5");

    scanner.start();
    assert_eq!(rule.engine.start_calls(), 1);
}

#[test]
fn test_stop_during_image_decode_keeps_start_disabled() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    pick(&rule, &scanner, "label.png");
    scanner.stop();

    assert!(rule.shows_idle_ui());
    assert!(rule.dom.is_disabled(rule.node(BindingRole::StartControl)));
}

#[test]
fn test_images_picked_during_decode_keep_only_latest() {
    let rule = PageTestRule::new();
    let scanner = mount(&rule);

    pick(&rule, &scanner, "first.png");
    pick(&rule, &scanner, "second.png");
    pick(&rule, &scanner, "third.png");
    rule.pump_until_idle();
    assert_eq!(rule.engine.scanned_files().len(), 1);

    rule.engine.reject_scan("No QR code found");
    rule.pump_until_idle();
    assert_eq!(
        rule.engine.scanned_files(),
        vec![
            ("first.png".to_string(), true),
            ("third.png".to_string(), true),
        ]
    );

    rule.engine.resolve_scan("INV-3");
    rule.pump_until_idle();
    assert_eq!(rule.dom.value(rule.node(BindingRole::Input)), "INV-3");
    assert!(!rule.dom.is_disabled(rule.node(BindingRole::StartControl)));
}
