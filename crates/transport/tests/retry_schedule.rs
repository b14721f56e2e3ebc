use std::time::Instant;

use scam_honeypot_core::Dossier;
use scam_honeypot_transport::CallbackDispatcher;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_dossier() -> Dossier {
    Dossier {
        session_id: "sess-1".into(),
        scam_detected: true,
        total_messages_exchanged: 6,
        extracted_intelligence: Default::default(),
        agent_notes: "notes".into(),
    }
}

#[tokio::test]
async fn succeeds_after_two_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/callback"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/callback"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = CallbackDispatcher::new(Some(format!("{}/callback", server.uri())));
    let start = Instant::now();
    let sent = dispatcher.dispatch(&sample_dossier()).await.unwrap();
    let elapsed = start.elapsed();

    assert!(sent);
    assert!(elapsed >= std::time::Duration::from_millis(1500));
}

#[tokio::test]
async fn fails_after_exhausting_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/callback"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dispatcher = CallbackDispatcher::new(Some(format!("{}/callback", server.uri())));
    let sent = dispatcher.dispatch(&sample_dossier()).await.unwrap();
    assert!(!sent);
}

#[tokio::test]
async fn does_not_retry_on_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/callback"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let dispatcher = CallbackDispatcher::new(Some(format!("{}/callback", server.uri())));
    let sent = dispatcher.dispatch(&sample_dossier()).await.unwrap();
    assert!(!sent);
}
