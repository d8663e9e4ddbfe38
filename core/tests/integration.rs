//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port, then drives the
//! session over real HTTP so every classification the client knows
//! (success, not-found, forbidden, application error, timeout, non-JSON
//! body) is produced by an actual response rather than a hand-built one.
//! The dry-run tests point at an unroutable address: if dry-run ever
//! touched the network they would fail with a transport error.

use cb_client::{normalize, ApiError, Config, Options, Payload, Raising, Session, Tupled};
use serde_json::json;

const KEY: &str = "id";
const SECRET: &str = "token";

/// Boot the mock server on a random port and return a config pointing at it.
fn start_server() -> Config {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, KEY, SECRET).await
        })
        .unwrap();
    });

    Config::new(format!("http://{addr}"))
}

fn tupled(config: &Config) -> Session<Tupled> {
    Session::new(config.clone(), KEY, SECRET)
}

fn raising(config: &Config) -> Session<Raising> {
    Session::new(config.clone(), KEY, SECRET)
}

#[test]
fn content_lifecycle() {
    let config = start_server();
    let session = tupled(&config);

    // Step 1: create a content in a fresh section.
    let (ok, payload) = session.create_section_content(
        "my-section",
        json!({"title": "My Content", "body": "text"}),
        Options::new().context(["sections", "html"]),
    );
    assert!(ok, "create failed: {payload:?}");
    let slug = payload
        .get("content")
        .and_then(|content| content.get("slug"))
        .and_then(Payload::as_str)
        .unwrap();
    assert_eq!(slug, "my-content");

    // Step 2: fetch it back through the flat contents endpoint.
    let (ok, payload) = session.content("my-content", Options::new().context(["sections"]));
    assert!(ok, "lookup failed: {payload:?}");
    assert_eq!(
        payload
            .get("content")
            .and_then(|content| content.get("title"))
            .and_then(Payload::as_str),
        Some("My Content")
    );

    // Step 3: and through its section.
    let (ok, _) = session.section_content("my-section", "my-content", Options::new());
    assert!(ok);

    // Step 4: the blank creation template.
    let (ok, payload) = session.new_section_content("my-section", Options::new());
    assert!(ok);
    assert_eq!(
        payload.get("content"),
        Some(&normalize(json!({"title": "", "body": ""})))
    );

    // Step 5: list endpoints see it.
    let (ok, payload) = session.contents(Options::new());
    assert!(ok);
    assert_eq!(payload.get("result").and_then(Payload::as_array).unwrap().len(), 1);

    let (ok, payload) = session.home_contents(Options::new().context(["sections"]));
    assert!(ok);
    assert_eq!(payload.get("sections"), Some(&normalize(json!(["my-section"]))));
}

#[test]
fn pagination_splits_section_listings() {
    let config = start_server();
    let session = tupled(&config);

    for title in ["First Post", "Second Post", "Third Post"] {
        let (ok, payload) = session.create_section_content(
            "news",
            json!({"title": title, "body": "text"}),
            Options::new(),
        );
        assert!(ok, "create failed: {payload:?}");
    }

    let (ok, payload) = session.section_contents("news", Options::new().page(1));
    assert!(ok);
    let first_page = payload.get("result").and_then(Payload::as_array).unwrap().len();

    let (ok, payload) = session.section_contents("news", Options::new().page(2));
    assert!(ok);
    let second_page = payload.get("result").and_then(Payload::as_array).unwrap().len();

    assert_eq!(first_page, mock_server::PAGE_SIZE);
    assert_eq!(second_page, 1);
}

#[test]
fn tuple_mode_folds_not_found() {
    let config = start_server();
    let (ok, payload) = tupled(&config).content("missing", Options::new().context(["sections"]));
    assert!(!ok);
    assert_eq!(payload, normalize(json!({"message": "no content with this slug"})));
}

#[test]
fn tuple_mode_folds_forbidden() {
    let config = start_server();
    let session: Session<Tupled> = Session::new(config, KEY, "wrong");
    let (ok, payload) = session.contents(Options::new());
    assert!(!ok);
    assert_eq!(
        payload,
        normalize(json!({"message": "no channel matching your credentials"}))
    );
}

#[test]
fn tuple_mode_folds_application_errors() {
    let config = start_server();
    // Bypass the endpoint wrapper to send a body without the content envelope.
    let (ok, payload) = tupled(&config).api_post(
        "/api/sections/news/contents",
        json!({"no": "envelope"}),
        Options::new(),
    );
    assert!(!ok);
    assert_eq!(payload, normalize(json!({"message": "an error occurred"})));
}

#[test]
fn tuple_mode_folds_timeouts() {
    let config = start_server();
    let (ok, payload) = tupled(&config).api_get("/api/slow", Options::new());
    assert!(!ok);
    assert_eq!(payload, normalize(json!({"message": "Timeout"})));
}

#[test]
fn raising_mode_returns_the_payload_directly() {
    let config = start_server();
    let created = raising(&config).create_section_content(
        "my-section",
        json!({"title": "My Content", "body": "text"}),
        Options::new(),
    );
    assert!(created.is_ok());

    let payload = raising(&config)
        .content("my-content", Options::new().context(["sections"]))
        .unwrap();
    assert_eq!(
        payload
            .get("content")
            .and_then(|content| content.get("slug"))
            .and_then(Payload::as_str),
        Some("my-content")
    );
}

#[test]
fn raising_mode_raises_typed_failures() {
    let config = start_server();

    let err = raising(&config)
        .content("missing", Options::new())
        .unwrap_err();
    match err {
        ApiError::NotFound(payload) => assert_eq!(
            payload,
            normalize(json!({"message": "no content with this slug"}))
        ),
        other => panic!("expected NotFound, got {other:?}"),
    }

    let session: Session<Raising> = Session::new(config.clone(), KEY, "wrong");
    assert!(matches!(
        session.contents(Options::new()).unwrap_err(),
        ApiError::Forbidden(_)
    ));

    let err = raising(&config)
        .api_post("/api/sections/news/contents", json!({"no": "envelope"}), Options::new())
        .unwrap_err();
    assert!(matches!(err, ApiError::Application(_)));
}

#[test]
fn raising_mode_reports_non_json_bodies_as_parsing_failures() {
    let config = start_server();
    let err = raising(&config).api_get("/api/plain", Options::new()).unwrap_err();
    assert!(matches!(err, ApiError::Parsing(_)));
}

#[test]
fn dry_run_performs_no_network_io() {
    // Nothing listens here; a dispatched request would fail as a transport
    // error, so a success-shaped curl string proves no I/O happened.
    let config = Config::new("http://127.0.0.1:1");
    let session: Session<Tupled> = Session::new(config.clone(), KEY, SECRET);

    let (ok, payload) = session.content(
        "my-content",
        Options::new().context(["sections"]).page(3).only_curl(),
    );
    assert!(ok);
    let cmd = payload.as_str().unwrap();
    assert!(cmd.starts_with("curl -X GET"), "{cmd}");
    assert!(cmd.contains("'http://127.0.0.1:1/api/contents/my-content?context=sections&page=3'"), "{cmd}");
    assert!(cmd.contains("-H 'CB-KEY:id' -H 'CB-SECRET:token'"), "{cmd}");

    let (ok, payload) = session.create_section_content(
        "my-section",
        json!({"some": "data"}),
        Options::new().only_curl(),
    );
    assert!(ok);
    assert!(payload.as_str().unwrap().starts_with("curl -X POST"), "{}", payload.as_str().unwrap());

    // Raising mode returns the command directly, never an error.
    let session: Session<Raising> = Session::new(config, KEY, SECRET);
    let payload = session.contents(Options::new().only_curl()).unwrap();
    assert!(payload.as_str().unwrap().starts_with("curl -X GET"));
}
