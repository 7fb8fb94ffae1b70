//! `GithubClient` against a canned local HTTP server.
//!
//! Each accepted connection is answered with the next scripted response and
//! the raw request is kept for assertions.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cascade_config::SyncSettings;
use cascade_core::entities::{ParentLink, ProjectRef};
use cascade_github::{GatewayError, GithubClient, ProjectGateway, RetryPolicy};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct Scripted {
    url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

async fn serve(responses: Vec<(u16, &'static str)>) -> Scripted {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    tokio::spawn(async move {
        for (status, body) in responses {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let request = read_request(&mut socket).await;
            seen.lock().unwrap().push(request);
            let reply = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    Scripted {
        url: format!("http://{addr}/graphql"),
        requests,
    }
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn client(url: &str) -> GithubClient {
    let settings = SyncSettings {
        token: "ghp_local".into(),
        api_url: url.to_string(),
        timeout: Duration::from_secs(5),
        max_attempts: 3,
        page_size: 2,
        project: ProjectRef::new("acme", 7),
        field_names: vec!["Initiative".into()],
        ancestor_type: "Initiative".into(),
        dry_run: false,
    };
    GithubClient::from_settings(&settings)
        .unwrap()
        .with_retry(RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        })
}

#[tokio::test]
async fn parent_lookup_sends_token_and_parses() {
    let server = serve(vec![(
        200,
        r#"{"data":{"node":{"parent":{"id":"I_init","issueType":{"name":"Initiative"}}}}}"#,
    )])
    .await;

    let link = client(&server.url).record_parent("I_task").await.unwrap();
    assert_eq!(link, ParentLink::to("I_init", Some("Initiative")));

    let requests = server.requests.lock().unwrap();
    let request = requests[0].to_ascii_lowercase();
    assert!(request.starts_with("post /graphql"));
    assert!(request.contains("authorization: bearer ghp_local"));
    assert!(request.contains("graphql-features: sub_issues,issue_types"));
    assert!(requests[0].contains(r#""id":"I_task""#));
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = serve(vec![
        (503, r#"{"message":"unavailable"}"#),
        (200, r#"{"data":{"node":{"parent":null}}}"#),
    ])
    .await;

    let link = client(&server.url).record_parent("I_task").await.unwrap();
    assert_eq!(link, ParentLink::root());
    assert_eq!(server.requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn bad_credentials_fail_without_retry() {
    let server = serve(vec![(401, r#"{"message":"Bad credentials"}"#)]).await;

    let err = client(&server.url)
        .project_schema(&ProjectRef::new("acme", 7))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Api { status: 401, .. }));
    assert_eq!(server.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn items_are_collected_across_pages() {
    let server = serve(vec![
        (
            200,
            r#"{"data":{"organization":{"projectV2":{"items":{"pageInfo":{"hasNextPage":true,"endCursor":"c1"},"nodes":[{"id":"PVTI_1","content":{"id":"I_1"},"fieldValues":{"nodes":[]}},{"id":"PVTI_2","content":{},"fieldValues":{"nodes":[]}}]}}}}}"#,
        ),
        (
            200,
            r#"{"data":{"organization":{"projectV2":{"items":{"pageInfo":{"hasNextPage":false,"endCursor":"c2"},"nodes":[{"id":"PVTI_3","content":{"id":"I_3"},"fieldValues":{"nodes":[{"optionId":"o1","field":{"name":"Initiative"}}]}}]}}}}}"#,
        ),
    ])
    .await;

    let items = client(&server.url)
        .list_all_items(&ProjectRef::new("acme", 7))
        .await
        .unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["PVTI_1", "PVTI_2", "PVTI_3"]);
    assert_eq!(items[2].selected_option("Initiative"), Some("o1"));

    let requests = server.requests.lock().unwrap();
    assert!(requests[1].contains(r#""after":"c1""#));
    assert!(requests[0].contains(r#""first":2"#));
}

#[tokio::test]
async fn rejected_mutation_is_a_graphql_error() {
    let server = serve(vec![(
        200,
        r#"{"data":{"updateProjectV2ItemFieldValue":null},"errors":[{"message":"The single select option Id does not belong to the field"}]}"#,
    )])
    .await;

    let err = client(&server.url)
        .set_item_field_option("PVT_1", "PVTI_1", "F_1", "bogus")
        .await
        .unwrap_err();
    assert!(err.is_rejection());
}
