// ABOUTME: Integration tests for stream append ordering, retry, and the
// countdown timer

use mechta::wizard::{EntryStatus, StreamState, TimerTick};
use pretty_assertions::assert_eq;

fn active_stream() -> StreamState {
    let mut stream = StreamState::new();
    stream.started(600);
    stream
}

fn submit(stream: &mut StreamState, text: &str) -> u64 {
    stream.input = text.to_string();
    stream.submit_line().unwrap()
}

#[test]
fn test_appends_drain_in_submission_order() {
    let mut stream = active_stream();
    let first = submit(&mut stream, "run a marathon");
    let second = submit(&mut stream, "write a book");
    let third = submit(&mut stream, "move to the coast");

    let sent: Vec<u64> = std::iter::from_fn(|| stream.next_queued().map(|(id, _)| id)).collect();
    assert_eq!(sent, vec![first, second, third]);
}

#[test]
fn test_failed_append_can_be_retried() {
    let mut stream = active_stream();
    let id = submit(&mut stream, "learn to dive");
    let (queued_id, _) = stream.next_queued().unwrap();
    assert_eq!(queued_id, id);

    stream.append_failed(id);
    assert_eq!(stream.failed_count(), 1);
    assert_eq!(stream.entries[0].status, EntryStatus::Failed);

    // Retry re-queues the entry and clears the failed mark
    assert_eq!(stream.retry_failed(), Some(id));
    assert_eq!(stream.failed_count(), 0);
    let (requeued, text) = stream.next_queued().unwrap();
    assert_eq!(requeued, id);
    assert_eq!(text, "learn to dive");

    stream.append_confirmed(id);
    assert_eq!(stream.entries[0].status, EntryStatus::Confirmed);
}

#[test]
fn test_blank_input_is_not_submitted() {
    let mut stream = active_stream();
    stream.input = "   \t ".to_string();
    assert!(stream.submit_line().is_none());
    assert!(!stream.has_queued());
}

#[test]
fn test_timer_expires_exactly_once() {
    let mut stream = StreamState::new();
    stream.started(3);

    assert_eq!(stream.tick_second(), TimerTick::Running(2));
    assert_eq!(stream.tick_second(), TimerTick::Running(1));
    assert_eq!(stream.tick_second(), TimerTick::Expired);
    // Further ticks never re-fire expiry
    assert_eq!(stream.tick_second(), TimerTick::Idle);
}

#[test]
fn test_finish_request_is_claimed_once() {
    let mut stream = active_stream();
    assert!(stream.request_finish());
    assert!(!stream.request_finish());

    // A failed finish re-arms the control
    stream.finish_failed();
    assert!(stream.request_finish());
}

#[test]
fn test_server_completion_clears_the_queue() {
    let mut stream = active_stream();
    submit(&mut stream, "a");
    submit(&mut stream, "b");

    stream.server_completed();
    assert!(!stream.has_queued());
    assert!(!stream.timer.is_running());
}
