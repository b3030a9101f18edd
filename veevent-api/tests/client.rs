use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

use serde_json::json;
use veevent_api::ApiErrorKind;
use veevent_api::categories::{Category, UpdateCategory};
use veevent_api::client::ApiClient;
use veevent_api::client::categories::RetrieveCategory;
use veevent_api::client::error::RequestError;
use veevent_api::client::invitations::RetrieveParticipant;
use veevent_api::client::links::UpdateResource;
use veevent_api::client::users::RetrieveMe;
use veevent_api::invitations::Invitation;
use veevent_api::Links;

// =============================================================================
// Test server
// =============================================================================

#[derive(Debug)]
struct Recorded {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// answers one connection per canned response, in order, then stops
struct TestServer {
    base_url: String,
    handle: JoinHandle<Vec<Recorded>>,
}

impl TestServer {
    fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api/v1/", addr);

        let handle = std::thread::spawn(move || {
            let mut recorded = Vec::new();

            for (status, body) in responses {
                let (stream, _) = listener.accept().expect("failed to accept connection");
                let mut reader = BufReader::new(&stream);

                recorded.push(read_request(&mut reader));

                let response = format!(
                    "HTTP/1.1 {} {}\r\ncontent-type: application/hal+json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    reason(status),
                    body.len(),
                    body
                );

                (&stream).write_all(response.as_bytes()).unwrap();
                (&stream).flush().unwrap();
            }

            recorded
        });

        TestServer { base_url, handle }
    }

    fn client(&self, token: Option<&str>) -> ApiClient {
        let mut builder = ApiClient::builder();
        builder.base_url(self.base_url.clone())
            .token(token.map(str::to_owned));

        builder.build().unwrap()
    }

    fn finish(self) -> Vec<Recorded> {
        self.handle.join().expect("test server panicked")
    }
}

fn read_request<R>(reader: &mut R) -> Recorded
where
    R: BufRead
{
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut headers = Vec::new();

    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();

        let line = line.trim_end();

        if line.is_empty() {
            break;
        }

        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_owned(), value.trim().to_owned()));
        }
    }

    let length = headers.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).unwrap();

    Recorded {
        request_line: request_line.trim_end().to_owned(),
        headers,
        body: String::from_utf8(body).unwrap(),
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        409 => "Conflict",
        _ => "Unknown",
    }
}

// =============================================================================
// Wrapper tests
// =============================================================================

#[test]
fn retrieve_me_normalizes_socials_and_sends_token() {
    let server = TestServer::start(vec![
        (200, json!({
            "id": 7,
            "firstName": "Ana",
            "lastName": "Lopez",
            "role": "Admin",
            "socials": "[\"twitter\",\"insta\"]"
        }).to_string()),
    ]);

    let user = RetrieveMe::new().send(&server.client(Some("abc.def"))).unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(user.socials, vec![String::from("twitter"), String::from("insta")]);

    let recorded = server.finish();

    assert_eq!(recorded[0].request_line, "GET /api/v1/users/me HTTP/1.1");
    assert_eq!(recorded[0].header("authorization"), Some("Bearer abc.def"));
}

#[test]
fn no_token_no_authorization_header() {
    let server = TestServer::start(vec![
        (200, json!({"id": 1, "role": "admin"}).to_string()),
    ]);

    RetrieveMe::new().send(&server.client(None)).unwrap();

    let recorded = server.finish();

    assert_eq!(recorded[0].header("authorization"), None);
}

#[test]
fn missing_category_is_none() {
    let server = TestServer::start(vec![
        (404, String::from("{\"message\":\"not found\"}")),
    ]);

    let found = RetrieveCategory::key("music").send(&server.client(Some("tok"))).unwrap();

    assert!(found.is_none());

    let recorded = server.finish();

    assert_eq!(recorded[0].request_line, "GET /api/v1/categories/music HTTP/1.1");
}

#[test]
fn category_key_stays_in_collection() {
    let server = TestServer::start(vec![
        (404, String::new()),
    ]);

    let found = RetrieveCategory::key("../users/1").send(&server.client(Some("tok"))).unwrap();

    assert!(found.is_none());

    let recorded = server.finish();

    assert_eq!(recorded[0].request_line, "GET /api/v1/categories/..%2Fusers%2F1 HTTP/1.1");
}

#[test]
fn conflicting_patch_reports_dependency() {
    let server = TestServer::start(vec![
        (409, String::from("could not execute statement; constraint [fk_event_category]")),
    ]);

    let links = Links::new()
        .with("self", format!("{}categories/music", server.base_url));
    let body = UpdateCategory {
        name: Some(String::from("Musique")),
        ..UpdateCategory::default()
    };

    let result = UpdateResource::from_links(&links, body)
        .unwrap()
        .send::<Category>(&server.client(Some("tok")));

    let err = match result {
        Err(RequestError::Api(err)) => err,
        other => panic!("expected an api error, got {:?}", other.map(|c| c.key)),
    };

    assert_eq!(*err.kind(), ApiErrorKind::Conflict);

    let msg = err.to_string();
    assert!(msg.contains("conflict"), "{}", msg);
    assert!(!msg.contains("fk_event_category"), "{}", msg);

    let recorded = server.finish();

    assert_eq!(recorded[0].request_line, "PATCH /api/v1/categories/music HTTP/1.1");
    assert_eq!(recorded[0].header("authorization"), Some("Bearer tok"));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&recorded[0].body).unwrap(),
        json!({"name": "Musique"})
    );
}

#[test]
fn foreign_link_does_not_receive_token() {
    let api = TestServer::start(Vec::new());
    let elsewhere = TestServer::start(vec![
        (200, json!({"id": 30, "role": "user", "pseudo": "guest"}).to_string()),
    ]);

    let invitation: Invitation = serde_json::from_value(json!({
        "id": 3,
        "status": "SENT",
        "_links": {
            "participant": {"href": format!("{}users/30", elsewhere.base_url)}
        }
    })).unwrap();

    let user = RetrieveParticipant::of(&invitation)
        .unwrap()
        .send(&api.client(Some("tok")))
        .unwrap();

    assert_eq!(user.id, 30);

    let recorded = elsewhere.finish();

    assert_eq!(recorded[0].request_line, "GET /api/v1/users/30 HTTP/1.1");
    assert_eq!(recorded[0].header("authorization"), None);
    assert!(api.finish().is_empty());
}
