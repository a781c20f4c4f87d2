use std::io::{Cursor, Write};
use std::net::TcpListener;

use httpmock::Method::{GET, POST, PUT};
use httpmock::MockServer;
use reqwest::Url;
use serde_json::json;
use tempfile::NamedTempFile;

use crate::body::RequestBody;
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::HttpClient;
use crate::model::{Method, Request};
use crate::{ClientConfig, Error};

fn client() -> ReqwestHttpClient {
    ReqwestHttpClient::create(ClientConfig::default()).unwrap()
}

fn request(method: Method, url: String, body: RequestBody) -> Request {
    Request {
        method,
        url: Url::parse(&url).unwrap(),
        headers: vec![],
        body,
    }
}

#[test]
fn execute() {
    let body = "{\"result\": \"content\"}";

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/defaults")
            .body(body)
            .header("X-Custom-Header", "test_validate_verify")
            .header("Content-Type", "application/json");
        then.status(200);
    });

    let mut request = request(Method::Post, server.url("/defaults"), RequestBody::text(body));
    request.headers = vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        (
            "X-Custom-Header".to_string(),
            "test_validate_verify".to_string(),
        ),
    ];
    let res = client().execute(request).unwrap();

    mock.assert();
    assert_eq!(res.status, 200);
}

#[test]
fn collects_status_headers_and_raw_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(500)
            .header("x-trace", "abc")
            .body("upstream failed");
    });

    let res = client()
        .execute(request(Method::Get, server.url("/broken"), RequestBody::Empty))
        .unwrap();

    assert_eq!(res.status, 500);
    assert_eq!(res.headers.first("X-Trace"), Some("abc"));
    assert_eq!(res.body, b"upstream failed".to_vec());
}

#[test]
fn json_body_sets_content_type() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/items")
            .header("content-type", "application/json")
            .json_body(json!({"name": "widget", "count": 3}));
        then.status(201);
    });

    let res = client()
        .execute(request(
            Method::Post,
            server.url("/items"),
            RequestBody::Json(json!({"name": "widget", "count": 3})),
        ))
        .unwrap();

    mock.assert();
    assert_eq!(res.status, 201);
}

#[test]
fn json_body_keeps_caller_content_type() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/items")
            .header("content-type", "application/vnd.api+json");
        then.status(201);
    });

    let mut request = request(
        Method::Post,
        server.url("/items"),
        RequestBody::Json(json!({"name": "widget"})),
    );
    request.headers = vec![(
        "Content-Type".to_string(),
        "application/vnd.api+json".to_string(),
    )];
    client().execute(request).unwrap();

    mock.assert();
}

#[test]
fn byte_bodies_send_their_octets() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(PUT).path("/blob").body("hello world");
        then.status(204);
    });

    let bodies = vec![
        RequestBody::bytes(b"hello world".to_vec()),
        RequestBody::ByteRange {
            bytes: b">>hello world<<".to_vec(),
            offset: 2,
            len: 11,
        },
        RequestBody::ByteChunks(vec![b"hello".to_vec(), b" ".to_vec(), b"world".to_vec()]),
        RequestBody::stream(Cursor::new(b"hello world".to_vec())),
    ];
    let client = client();
    for body in bodies {
        let res = client
            .execute(request(Method::Put, server.url("/blob"), body))
            .unwrap();
        assert_eq!(res.status, 204);
    }

    mock.assert_hits(4);
}

#[test]
fn file_body_sends_file_contents() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "from disk").unwrap();

    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/upload").body("from disk");
        then.status(200);
    });

    client()
        .execute(request(
            Method::Post,
            server.url("/upload"),
            RequestBody::file(file.path()),
        ))
        .unwrap();

    mock.assert();
}

#[test]
fn missing_file_body_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.bin");

    let err = client()
        .execute(request(
            Method::Post,
            "http://127.0.0.1:9/upload".to_string(),
            RequestBody::file(&missing),
        ))
        .unwrap_err();

    match err {
        Error::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("expected Error::Io, got {:?}", other),
    }
}

#[test]
fn refused_connection_is_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let err = client()
        .execute(request(
            Method::Get,
            format!("http://127.0.0.1:{}/", port),
            RequestBody::Empty,
        ))
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}
