// Session lifecycle tests: empty → indexing → indexed, failure paths,
// and question gating.

use docqa_node::{IndexState, SessionError};

use super::mocks::{manager, MockParser, ScriptedGenerator};

#[tokio::test]
async fn test_question_rejected_before_indexing() {
    let mut mgr = manager(
        MockParser::with_pages(vec![(1, "Content.")]),
        ScriptedGenerator::answering("unused"),
    );

    let id = mgr.create_session();
    let result = mgr.ask(&id, "Too early?").await;

    assert!(matches!(result, Err(SessionError::NotIndexed(_))));
    assert!(mgr.history(&id).unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_parse_returns_session_to_empty() {
    let mut mgr = manager(MockParser::failing(), ScriptedGenerator::answering("unused"));

    let id = mgr.create_session();
    let result = mgr.index_document(&id, "/tmp/bad.pdf".as_ref()).await;

    assert!(matches!(result, Err(SessionError::Ingestion(_))));
    assert_eq!(mgr.state(&id).unwrap(), IndexState::Empty);
    assert_eq!(mgr.store().count(&id), 0);

    // No confirmation turn, and questions are still rejected
    assert!(mgr.history(&id).unwrap().is_empty());
    assert!(matches!(
        mgr.ask(&id, "Still too early?").await,
        Err(SessionError::NotIndexed(_))
    ));
}

#[tokio::test]
async fn test_unknown_session_rejected() {
    let mut mgr = manager(
        MockParser::with_pages(vec![(1, "Content.")]),
        ScriptedGenerator::answering("unused"),
    );

    assert!(matches!(
        mgr.ask("no-such-session", "hello").await,
        Err(SessionError::UnknownSession(_))
    ));
    assert!(matches!(
        mgr.index_document("no-such-session", "/tmp/doc.pdf".as_ref())
            .await,
        Err(SessionError::UnknownSession(_))
    ));
    assert!(matches!(
        mgr.clear("no-such-session"),
        Err(SessionError::UnknownSession(_))
    ));
}

#[tokio::test]
async fn test_reupload_replaces_previous_document() {
    let mut mgr = manager(
        MockParser::with_pages(vec![(1, "Version one."), (2, "More text.")]),
        ScriptedGenerator::answering("unused"),
    );

    let id = mgr.create_session();
    mgr.index_document(&id, "/tmp/v1.pdf".as_ref()).await.unwrap();
    assert_eq!(mgr.store().count(&id), 2);

    // Indexed sessions accept a new upload; the chunk set is replaced,
    // not appended to.
    mgr.index_document(&id, "/tmp/v2.pdf".as_ref()).await.unwrap();
    assert_eq!(mgr.store().count(&id), 2);
    assert_eq!(mgr.state(&id).unwrap(), IndexState::Indexed);
}

#[tokio::test]
async fn test_session_ids_are_unique() {
    let mut mgr = manager(
        MockParser::with_pages(vec![(1, "Content.")]),
        ScriptedGenerator::answering("unused"),
    );

    let a = mgr.create_session();
    let b = mgr.create_session();
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_clear_on_empty_session_is_allowed() {
    let mut mgr = manager(
        MockParser::with_pages(vec![(1, "Content.")]),
        ScriptedGenerator::answering("unused"),
    );

    let id = mgr.create_session();
    mgr.clear(&id).unwrap();
    assert_eq!(mgr.state(&id).unwrap(), IndexState::Empty);
}
