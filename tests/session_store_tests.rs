// Tests for session navigation and recording bookkeeping.
//
// The store is the single source of truth for progress: the cursor is
// clamped to the prompt list, and a prompt counts as recorded exactly when
// its identity appears in the recordings map.

use chrono::Duration;
use recite::{Recording, SessionStore, TranscriptState, Transcription};
use std::path::Path;

fn store_with(texts: &[&str]) -> SessionStore {
    SessionStore::new(texts.iter().map(|t| t.to_string()).collect())
}

fn recording_for(text: &str, position: usize) -> Recording {
    Recording::new(text.to_string(), position, Path::new("/tmp/recite-test"))
}

fn transcription(text: &str) -> Transcription {
    Transcription {
        text: text.to_string(),
        language: Some("en".to_string()),
        confidence: Some(0.9),
        segments: Vec::new(),
    }
}

#[test]
fn cursor_is_clamped_at_both_ends() {
    let mut store = store_with(&["a", "b", "c"]);

    // Stepping back at the start is a no-op
    store.advance(-1);
    assert_eq!(store.cursor(), 0);

    store.advance(1);
    store.advance(1);
    assert_eq!(store.cursor(), 2);

    // Stepping forward at the end is a no-op
    store.advance(1);
    assert_eq!(store.cursor(), 2);
}

#[test]
fn repeated_navigation_never_leaves_bounds() {
    let mut store = store_with(&["a", "b", "c"]);

    for _ in 0..10 {
        store.advance(1);
        assert!(store.cursor() <= 2);
    }
    assert_eq!(store.cursor(), 2);

    for _ in 0..20 {
        store.advance(-1);
    }
    assert_eq!(store.cursor(), 0);
}

#[test]
fn advance_on_empty_store_is_noop() {
    let mut store = SessionStore::new(Vec::new());

    store.advance(1);
    store.advance(-1);

    assert_eq!(store.cursor(), 0);
    assert!(store.current_prompt().is_none());
    assert_eq!(store.progress_fraction(), 0.0);
}

#[test]
fn current_prompt_follows_cursor() {
    let mut store = store_with(&["first", "second"]);

    assert_eq!(store.current_prompt().unwrap().text, "first");
    store.advance(1);

    let prompt = store.current_prompt().unwrap();
    assert_eq!(prompt.text, "second");
    assert_eq!(prompt.position, 1);
}

#[test]
fn registering_same_prompt_twice_keeps_one_entry() {
    let mut store = store_with(&["hello"]);

    let first = recording_for("hello", 0);
    let mut second = recording_for("hello", 0);
    second.captured_at = first.captured_at + Duration::seconds(1);
    assert_eq!(first.identity, second.identity);

    store.register(first);
    store.register(second.clone());

    assert_eq!(store.recorded_count(), 1);
    let kept = store.recording(&second.identity).unwrap();
    assert_eq!(kept.captured_at, second.captured_at);
}

#[test]
fn unrecorded_prompts_preserve_original_order() {
    let mut store = store_with(&["a", "b", "c", "d"]);

    store.register(recording_for("a", 0));
    store.register(recording_for("c", 2));

    let pending: Vec<&str> = store
        .unrecorded_prompts()
        .iter()
        .map(|p| p.text.as_str())
        .collect();
    assert_eq!(pending, vec!["b", "d"]);
}

#[test]
fn progress_counts_current_prompt() {
    let mut store = store_with(&["a", "b", "c"]);

    assert!((store.progress_fraction() - 1.0 / 3.0).abs() < 1e-9);
    store.advance(1);
    assert!((store.progress_fraction() - 2.0 / 3.0).abs() < 1e-9);
    store.advance(1);
    assert!((store.progress_fraction() - 1.0).abs() < 1e-9);
}

#[test]
fn transcript_write_back_requires_matching_capture_time() {
    let mut store = store_with(&["hello"]);
    let recording = recording_for("hello", 0);
    let identity = recording.identity.clone();
    let captured_at = recording.captured_at;
    store.register(recording);

    // A result from a superseded attempt must be discarded
    let stale = store.apply_transcript(
        &identity,
        captured_at - Duration::seconds(5),
        TranscriptState::Ready(transcription("old take")),
    );
    assert!(!stale);
    assert!(store.recording(&identity).unwrap().transcript.is_pending());

    let applied = store.apply_transcript(
        &identity,
        captured_at,
        TranscriptState::Ready(transcription("hello")),
    );
    assert!(applied);
    assert_eq!(
        store.recording(&identity).unwrap().transcript,
        TranscriptState::Ready(transcription("hello"))
    );
}

#[test]
fn transcript_for_unknown_identity_is_discarded() {
    let mut store = store_with(&["hello"]);
    let recording = recording_for("hello", 0);

    let applied = store.apply_transcript(
        "0123456789abcdef0123456789abcdef",
        recording.captured_at,
        TranscriptState::Failed,
    );

    assert!(!applied);
    assert_eq!(store.recorded_count(), 0);
}
