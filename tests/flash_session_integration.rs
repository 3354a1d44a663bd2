//! Integration tests for the flash session flow.
//!
//! These tests wire the full pipeline with in-memory adapters:
//! 1. IngestMessageHandler filters and records fragments
//! 2. SessionStore debounces per user and fires on the idle timeout
//! 3. TimeoutDispatcher merges the session and creates one note
//! 4. FlushSessionsHandler commits whatever is still live at shutdown
//!
//! The tokio clock is paused so timeouts are deterministic.

use std::sync::Arc;
use std::time::Duration;

use flashnote::adapters::{InMemoryNoteStore, MarkdownLinkRenderer};
use flashnote::application::{
    CancelFlashCommand, CancelFlashHandler, CommitSettings, FlushSessionsHandler,
    IngestMessageCommand, IngestMessageHandler, IngestOutcome, SessionStore, TimeoutDispatcher,
};
use flashnote::domain::flash::{FlashFilter, Fragment};
use flashnote::domain::foundation::UserId;

// =============================================================================
// Test Infrastructure
// =============================================================================

const IDLE: Duration = Duration::from_secs(3);

struct Pipeline {
    store: SessionStore,
    notes: Arc<InMemoryNoteStore>,
    ingest: IngestMessageHandler,
    cancel: CancelFlashHandler,
    flush: FlushSessionsHandler,
}

async fn pipeline(settings: CommitSettings) -> Pipeline {
    let notes = Arc::new(InMemoryNoteStore::new());
    let dispatcher = Arc::new(TimeoutDispatcher::new(
        Arc::new(MarkdownLinkRenderer::new()),
        notes.clone(),
        settings,
    ));
    let store = SessionStore::new(IDLE);
    store.add_observer(dispatcher.clone()).await;

    Pipeline {
        ingest: IngestMessageHandler::new(store.clone(), FlashFilter::default()),
        cancel: CancelFlashHandler::new(store.clone()),
        flush: FlushSessionsHandler::new(store.clone(), dispatcher),
        store,
        notes,
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

fn text(id: &str, content: &str) -> IngestMessageCommand {
    IngestMessageCommand {
        user_id: user(id),
        fragment: Fragment::text(content),
    }
}

// =============================================================================
// Timeout Flow
// =============================================================================

#[tokio::test(start_paused = true)]
async fn burst_of_messages_becomes_one_note_after_quiet_period() {
    let p = pipeline(CommitSettings {
        default_tag: Some("flash".to_string()),
        max_content_length: 0,
    })
    .await;

    p.ingest.handle(text("alice", "first idea #work")).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    p.ingest.handle(text("alice", "second thought #later")).await;

    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert_eq!(p.notes.note_count().await, 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let notes = p.notes.notes().await;
    assert_eq!(notes.len(), 1);
    assert_eq!(
        notes[0].content,
        "first idea #work\nsecond thought #later\n\n#flash"
    );
    assert_eq!(notes[0].tags, vec!["flash", "later", "work"]);
    assert!(p.store.is_empty().await);

    tokio::time::sleep(IDLE * 2).await;
    assert_eq!(p.notes.note_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn users_are_committed_independently() {
    let p = pipeline(CommitSettings::default()).await;

    p.ingest.handle(text("alice", "alice writes")).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    p.ingest.handle(text("bob", "bob writes too")).await;

    tokio::time::sleep(Duration::from_millis(1500)).await;
    let notes = p.notes.notes().await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "alice writes");
    assert!(p.store.contains(&user("bob")).await);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(p.notes.note_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn filtered_messages_neither_start_nor_extend_sessions() {
    let p = pipeline(CommitSettings::default()).await;

    assert!(matches!(
        p.ingest.handle(text("alice", "hey")).await,
        IngestOutcome::Ignored(_)
    ));
    assert!(p.store.is_empty().await);

    p.ingest.handle(text("alice", "a proper note")).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    p.ingest.handle(text("alice", "/t translate me")).await;

    // The ignored message must not have pushed the deadline out.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let notes = p.notes.notes().await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "a proper note");
}

#[tokio::test(start_paused = true)]
async fn attachments_are_rendered_inline() {
    let p = pipeline(CommitSettings::default()).await;

    p.ingest.handle(text("alice", "look at this")).await;
    p.ingest
        .handle(IngestMessageCommand {
            user_id: user("alice"),
            fragment: Fragment::image("https://cdn.example.com/cat.png", "cat.png"),
        })
        .await;
    p.ingest
        .handle(IngestMessageCommand {
            user_id: user("alice"),
            fragment: Fragment::file("notes.txt", None),
        })
        .await;

    tokio::time::sleep(IDLE + Duration::from_millis(10)).await;
    let notes = p.notes.notes().await;
    assert_eq!(notes.len(), 1);
    assert_eq!(
        notes[0].content,
        "look at this\n![cat.png](https://cdn.example.com/cat.png)\n[file unavailable]"
    );
}

#[tokio::test(start_paused = true)]
async fn note_store_failure_drops_session_without_retry() {
    let p = pipeline(CommitSettings::default()).await;
    p.notes.set_failing(true);

    p.ingest.handle(text("alice", "this will be lost")).await;
    tokio::time::sleep(IDLE + Duration::from_millis(10)).await;

    assert!(p.store.is_empty().await);
    p.notes.set_failing(false);
    tokio::time::sleep(IDLE * 2).await;
    assert_eq!(p.notes.note_count().await, 0);
}

// =============================================================================
// Cancel and Flush
// =============================================================================

#[tokio::test(start_paused = true)]
async fn cancelled_session_is_never_saved() {
    let p = pipeline(CommitSettings::default()).await;

    p.ingest.handle(text("alice", "never mind this")).await;
    p.cancel
        .handle(CancelFlashCommand {
            user_id: user("alice"),
        })
        .await
        .unwrap();

    tokio::time::sleep(IDLE * 2).await;
    assert_eq!(p.notes.note_count().await, 0);

    let err = p
        .cancel
        .handle(CancelFlashCommand {
            user_id: user("alice"),
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test(start_paused = true)]
async fn flush_commits_live_sessions_and_disarms_timers() {
    let p = pipeline(CommitSettings::default()).await;

    p.ingest.handle(text("alice", "pending from alice")).await;
    p.ingest.handle(text("bob", "pending from bob")).await;

    let report = p.flush.handle().await;
    assert_eq!(report.committed.len(), 2);
    assert!(report.failed.is_empty());
    assert!(p.store.is_empty().await);

    tokio::time::sleep(IDLE * 2).await;
    assert_eq!(p.notes.note_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn truncation_applies_to_committed_note() {
    let p = pipeline(CommitSettings {
        default_tag: None,
        max_content_length: 10,
    })
    .await;

    p.ingest.handle(text("alice", "abcdefghijklmnop")).await;
    let report = p.flush.handle().await;

    assert_eq!(report.committed[0].content, "abcdefghij...");
    assert_eq!(p.notes.notes().await[0].content, "abcdefghij...");
}
