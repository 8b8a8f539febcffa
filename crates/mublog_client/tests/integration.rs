//! Integration tests driving the engines end to end against a scripted
//! transport and a real on-disk store.

use mublog_client::{
    ClientConfig, ClientError, EditDocument, HttpResponse, MediaEngine, MockClient, PostAction,
    PublishEngine, PublishOutcome, SyncEngine,
};
use mublog_store::Database;

fn page_body(entries: &[(&str, &str)]) -> String {
    let items: Vec<serde_json::Value> = entries
        .iter()
        .map(|(uid, url)| {
            serde_json::json!({
                "properties": {
                    "uid": [uid],
                    "url": [url],
                    "published": ["2024-03-01T12:00:00Z"],
                    "content": [{"html": format!("<p>{uid}</p>")}],
                    "category": ["tech"]
                }
            })
        })
        .collect();
    serde_json::json!({ "items": items }).to_string()
}

fn empty_page() -> String {
    r#"{"items": []}"#.to_string()
}

fn config() -> ClientConfig {
    ClientConfig::new("https://mb.example.com", "token").with_page_size(2)
}

#[test]
fn full_walk_into_an_on_disk_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::open_at(&dir.path().join("cache.db")).unwrap();

    let client = MockClient::new();
    client.push_response(HttpResponse::new(
        200,
        page_body(&[("a", "https://x/a"), ("b", "https://x/b")]),
    ));
    client.push_response(HttpResponse::new(
        200,
        page_body(&[("c", "https://x/c"), ("d", "https://x/d")]),
    ));
    client.push_response(HttpResponse::new(200, page_body(&[("e", "https://x/e")])));
    client.push_response(HttpResponse::new(200, empty_page()));

    let cfg = config();
    let outcome = SyncEngine::new(&cfg, &client).sync(&mut db).unwrap();

    assert_eq!(outcome.pages_fetched, 4);
    assert_eq!(outcome.records_written, 5);
    assert_eq!(client.requests().len(), 4);

    // Survives a reopen: the walk committed.
    drop(db);
    let db = Database::open_at(&dir.path().join("cache.db")).unwrap();
    assert_eq!(db.list_posts().unwrap().len(), 5);
}

#[test]
fn re_syncing_the_same_history_is_idempotent() {
    let mut db = Database::open_in_memory().unwrap();
    let cfg = config();

    for _ in 0..2 {
        let client = MockClient::new();
        client.push_response(HttpResponse::new(
            200,
            page_body(&[("a", "https://x/a"), ("b", "https://x/b")]),
        ));
        client.push_response(HttpResponse::new(200, empty_page()));

        SyncEngine::new(&cfg, &client).sync(&mut db).unwrap();
    }

    let posts = db.list_posts().unwrap();
    assert_eq!(posts.len(), 2);
}

#[test]
fn mid_walk_data_error_rolls_back_the_whole_run() {
    let mut db = Database::open_in_memory().unwrap();
    let cfg = config();

    // Seed a row so rollback is observable against pre-existing state.
    let client = MockClient::new();
    client.push_response(HttpResponse::new(
        200,
        page_body(&[("seed", "https://x/seed")]),
    ));
    client.push_response(HttpResponse::new(200, empty_page()));
    SyncEngine::new(&cfg, &client).sync(&mut db).unwrap();

    // First page is fine, second page is garbage.
    let client = MockClient::new();
    client.push_response(HttpResponse::new(
        200,
        page_body(&[("a", "https://x/a"), ("b", "https://x/b")]),
    ));
    client.push_response(HttpResponse::new(200, "{not json".to_string()));

    let err = SyncEngine::new(&cfg, &client).sync(&mut db).unwrap_err();
    assert_eq!(err.kind(), "data");

    // Nothing from the failed run landed; the seed row is untouched.
    let posts = db.list_posts().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "seed");
}

#[test]
fn compose_create_submit_resync_round_trip() {
    let mut db = Database::open_in_memory().unwrap();
    let cfg = config();

    let doc = EditDocument::parse("title: Hello\ncategories: tech, life\n---\nWorld").unwrap();
    let session = doc.into_session(PostAction::Create);

    let client = MockClient::new();
    // Publish accepted, then the follow-up walk returns the new post.
    client.push_response(HttpResponse::new(201, ""));
    client.push_response(HttpResponse::new(
        200,
        page_body(&[("srv-9", "https://x/hello")]),
    ));
    client.push_response(HttpResponse::new(200, empty_page()));

    let outcome = PublishEngine::new(&cfg, &client)
        .submit(session, &mut db)
        .unwrap();
    match outcome {
        PublishOutcome::Created { sync } => assert_eq!(sync.records_written, 1),
        other => panic!("unexpected outcome: {other:?}"),
    }

    // The create payload went out in h-entry shape.
    let requests = client.requests();
    let payload = requests[0].body.as_ref().unwrap();
    assert_eq!(payload["type"], serde_json::json!(["h-entry"]));
    assert_eq!(payload["properties"]["name"], serde_json::json!(["Hello"]));
    assert_eq!(
        payload["properties"]["category"],
        serde_json::json!(["tech", "life"])
    );

    // The cache row carries the server-assigned identity, not a local one.
    let row = db.get_post("srv-9").unwrap().unwrap();
    assert_eq!(row.url, "https://x/hello");
}

#[test]
fn compose_update_applies_optimistically_without_refetch() {
    let mut db = Database::open_in_memory().unwrap();
    let cfg = config();

    // Cache the post being edited.
    let client = MockClient::new();
    client.push_response(HttpResponse::new(200, page_body(&[("p1", "https://x/1")])));
    client.push_response(HttpResponse::new(200, empty_page()));
    SyncEngine::new(&cfg, &client).sync(&mut db).unwrap();
    let before = db.get_post("p1").unwrap().unwrap();

    let doc = EditDocument::parse("title: Revised\n---\nnew body").unwrap();
    let session = doc.into_session(PostAction::Update {
        post_id: "p1".into(),
        post_url: "https://x/1".into(),
    });

    let client = MockClient::new();
    client.push_response(HttpResponse::new(200, ""));

    let outcome = PublishEngine::new(&cfg, &client)
        .submit(session, &mut db)
        .unwrap();
    assert!(matches!(outcome, PublishOutcome::Updated { ref post_id } if post_id == "p1"));

    // Exactly one request: no re-fetch after an update.
    assert_eq!(client.requests().len(), 1);

    let after = db.get_post("p1").unwrap().unwrap();
    assert_eq!(after.title, "Revised");
    assert_eq!(after.content_html, "new body");
    assert_eq!(after.url, before.url);
    assert_eq!(after.date_published, before.date_published);
}

#[test]
fn malformed_compose_document_never_reaches_the_network() {
    let err = EditDocument::parse("title: Hello\nno separator").unwrap_err();
    assert_eq!(err.kind(), "precondition");
}

#[test]
fn media_upload_feeds_markup_back_into_a_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("img.png");
    std::fs::write(&path, b"png bytes").unwrap();

    let cfg = config();
    let client = MockClient::new();
    client.push_response(HttpResponse::new(201, "").with_header("Location", "https://x/img.png"));

    let url = MediaEngine::new(&cfg, &client).upload(&path).unwrap();
    let markup = mublog_client::image_markup(&url, "a sunset");
    assert_eq!(markup, "![a sunset](https://x/img.png)");
}

#[test]
fn publish_failure_surfaces_the_body_verbatim() {
    let mut db = Database::open_in_memory().unwrap();
    let cfg = config();

    let doc = EditDocument::parse("---\nbody").unwrap();
    let client = MockClient::new();
    client.push_response(HttpResponse::new(403, "insufficient_scope"));

    let err = PublishEngine::new(&cfg, &client)
        .submit(doc.into_session(PostAction::Create), &mut db)
        .unwrap_err();
    match err {
        ClientError::Protocol { status, body } => {
            assert_eq!(status, 403);
            assert_eq!(body, "insufficient_scope");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(db.list_posts().unwrap().is_empty());
}
