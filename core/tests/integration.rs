//! Exercise the client against the live mock server over real HTTP.
//!
//! # Design
//! Starts the mock server on a random port in a background tokio runtime,
//! then drives it through `UreqTransport` from the test thread, the same
//! blocking way a caller would.

use std::net::SocketAddr;
use std::time::Duration;

use fluff_http::parser::{Json, BYTES, JSON_ARRAY, JSON_OBJECT, STRING};
use fluff_http::{
    Body, Client, ClientConfig, Head, HttpError, MimeType, StatusCategory, UrlPath, ACCEPT,
    CONTENT_TYPE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Item {
    id: String,
    name: String,
    quantity: u32,
}

#[derive(Serialize, Deserialize)]
struct NewItem {
    name: String,
    quantity: u32,
}

fn start_server() -> SocketAddr {
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
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn setup() -> (Client, UrlPath) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let addr = start_server();
    let client = Client::ureq(ClientConfig::default().with_user_agent("fluff-http-tests"));
    let base = UrlPath::parse(&format!("http://{addr}")).unwrap();
    (client, base)
}

#[test]
fn item_lifecycle() {
    let (client, base) = setup();
    let items = base.derive("items");

    // Step 1: list: should be empty.
    let response = client.get(&items).send().unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.head().value(&CONTENT_TYPE).unwrap(), Some(MimeType::ApplicationJson));
    assert!(response.body().get(&JSON_ARRAY).unwrap().is_empty());

    // Step 2: create with a typed JSON body.
    let new_item = NewItem {
        name: "bolt".to_string(),
        quantity: 4,
    };
    let body = Body::of(&Json::new(), new_item).unwrap();
    let head = Head::builder()
        .add_header(&CONTENT_TYPE, [MimeType::ApplicationJson])
        .build();
    let response = client.post(&items).with_head(head).with_body(body).send().unwrap();
    assert_eq!(response.status(), 201);
    let created: Item = response.body().get(&Json::new()).unwrap();
    assert_eq!(created.name, "bolt");
    assert_eq!(created.quantity, 4);

    // Step 3: fetch it back by id.
    let response = client.get(&items.derive(&created.id)).send().unwrap();
    let fetched = response.body().get(&JSON_OBJECT).unwrap();
    assert_eq!(fetched["name"], "bolt");

    // Step 4: delete, then the id is gone.
    let response = client.delete(&items.derive(&created.id)).send().unwrap();
    assert_eq!(response.status(), 204);
    assert!(response.body().get(&BYTES).unwrap().is_empty());

    let response = client.get(&items.derive(&created.id)).send().unwrap();
    assert_eq!(response.status(), 404);
    assert_eq!(response.status().category(), StatusCategory::ClientError);
}

#[test]
fn echo_streams_a_built_body() {
    let (client, base) = setup();

    let mut builder = Body::builder();
    builder.append_str("line one\n").append(b"line two");
    let head = Head::builder()
        .add_header(&CONTENT_TYPE, [MimeType::TextPlain])
        .build();
    let response = client
        .put(&base.derive("echo"))
        .with_head(head)
        .with_body(builder.build())
        .send()
        .unwrap();

    assert_eq!(response.head().get("X-Echo-Method"), Some("PUT"));
    assert_eq!(response.head().value(&CONTENT_TYPE).unwrap(), Some(MimeType::TextPlain));
    assert_eq!(response.body().get(&STRING).unwrap(), "line one\nline two");
}

#[test]
fn headers_reach_the_server() {
    let (client, base) = setup();

    let head = Head::builder()
        .add_header(&ACCEPT, [MimeType::ApplicationJson])
        .add("X-Tag", ["a", "b"])
        .build();
    let response = client.get(&base.derive("headers")).with_head(head).send().unwrap();
    let seen = response.body().get(&JSON_OBJECT).unwrap();

    assert_eq!(seen["accept"], serde_json::json!(["application/json"]));
    assert_eq!(seen["x-tag"], serde_json::json!(["a", "b"]));
    assert_eq!(seen["user-agent"], serde_json::json!(["fluff-http-tests"]));
}

#[test]
fn redirects_resolve_to_final_uri() {
    let (client, base) = setup();

    let response = client.get(&base.derive("redirect")).send().unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.uri(), base.derive("items").path());
    assert_eq!(response.request().uri(), base.derive("redirect").path());
}

#[test]
fn timeout_surfaces_as_transport_error() {
    let (client, base) = setup();

    let err = client
        .get(&base.derive("slow"))
        .with_timeout(Some(Duration::from_millis(300)))
        .send()
        .unwrap_err();
    assert!(matches!(err, HttpError::Transport(_)), "unexpected error: {err:?}");
}

#[test]
fn unreachable_server_surfaces_as_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::ureq(ClientConfig::default());
    let err = client.get(format!("http://{addr}/items")).send().unwrap_err();
    assert!(matches!(err, HttpError::Transport(_)));
}
