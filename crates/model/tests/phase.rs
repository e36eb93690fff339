//! Tests for the call lifecycle.

use genway_model::{Phase, adapter::Tracker};

#[test]
fn happy_path() {
    let mut tracker = Tracker::new("test");
    assert_eq!(tracker.phase(), Phase::Idle);
    assert!(tracker.advance(Phase::Requesting));
    assert!(tracker.advance(Phase::Streaming));
    assert!(tracker.advance(Phase::Streaming));
    assert!(tracker.advance(Phase::Completed));
    assert!(tracker.phase().is_terminal());
}

#[test]
fn empty_response_completes_from_requesting() {
    assert!(Phase::Requesting.can_advance(Phase::Completed));
    assert!(Phase::Requesting.can_advance(Phase::Failed));
}

#[test]
fn terminal_phase_is_never_left() {
    let mut tracker = Tracker::new("test");
    tracker.advance(Phase::Requesting);
    tracker.advance(Phase::Failed);

    assert!(!tracker.advance(Phase::Streaming));
    assert!(!tracker.advance(Phase::Completed));
    assert_eq!(tracker.phase(), Phase::Failed);
}

#[test]
fn cannot_skip_requesting() {
    assert!(!Phase::Idle.can_advance(Phase::Streaming));
    assert!(!Phase::Idle.can_advance(Phase::Completed));
    assert!(!Phase::Streaming.can_advance(Phase::Requesting));
}

#[test]
fn display() {
    assert_eq!(Phase::Requesting.to_string(), "requesting");
    assert_eq!(Phase::Completed.to_string(), "completed");
}
