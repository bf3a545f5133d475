mod harness;

use harness::config::ConfigBuilder;
use harness::mock_upstream::{MOCK_AUDIO, MockOptions, MockUpstream};
use harness::server::TestServer;
use serde_json::json;

#[tokio::test]
async fn google_tts_returns_mp3_audio() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_google_tts("google", &mock.google_tts_url())
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/tts"))
        .json(&json!({ "text": "Bienvenido a PerúGo", "voice": "es-US-Neural2-B" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "audio/mpeg");
    assert_eq!(resp.bytes().await.unwrap().as_ref(), MOCK_AUDIO);

    let request = &mock.tts_requests()[0];
    assert_eq!(request["input"]["text"], "Bienvenido a PerúGo");
    assert_eq!(request["voice"]["name"], "es-US-Neural2-B");
    assert_eq!(request["audioConfig"]["audioEncoding"], "MP3");
}

#[tokio::test]
async fn minimax_polls_until_the_task_succeeds() {
    let mock = MockUpstream::start_with(MockOptions {
        minimax_pending_polls: 2,
        ..MockOptions::default()
    })
    .await
    .unwrap();
    let config = ConfigBuilder::new()
        .with_minimax("minimax", &mock.minimax_url(), 10)
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/tts"))
        .json(&json!({ "text": "Hola" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "audio/mpeg");
    assert_eq!(resp.bytes().await.unwrap().as_ref(), MOCK_AUDIO);

    assert_eq!(mock.minimax_polls(), 3);
    assert_eq!(mock.minimax_downloads(), 1);

    let request = &mock.tts_requests()[0];
    assert_eq!(request["voice_setting"]["voice_id"], "female-shaonv");
    assert_eq!(request["text"], "Hola");
}

#[tokio::test]
async fn minimax_gives_up_after_poll_budget() {
    let mock = MockUpstream::start_with(MockOptions {
        minimax_pending_polls: u32::MAX,
        ..MockOptions::default()
    })
    .await
    .unwrap();
    let config = ConfigBuilder::new()
        .with_minimax("minimax", &mock.minimax_url(), 3)
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/tts"))
        .json(&json!({ "text": "Hola" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 504);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["type"], "timeout_error");

    assert_eq!(mock.minimax_polls(), 3);
    assert_eq!(mock.minimax_downloads(), 0);
}

#[tokio::test]
async fn minimax_failed_task_is_a_bad_gateway() {
    let mock = MockUpstream::start_with(MockOptions {
        minimax_final_status: "Failed",
        ..MockOptions::default()
    })
    .await
    .unwrap();
    let config = ConfigBuilder::new()
        .with_minimax("minimax", &mock.minimax_url(), 5)
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/tts"))
        .json(&json!({ "text": "Hola" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
    assert_eq!(mock.minimax_polls(), 1);
}

#[tokio::test]
async fn request_can_pick_a_provider() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_google_tts("google", &mock.google_tts_url())
        .with_minimax("minimax", &mock.minimax_url(), 5)
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/tts"))
        .json(&json!({ "text": "Hola", "provider": "minimax" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(mock.minimax_downloads(), 1);
}

#[tokio::test]
async fn tts_without_provider_is_not_found() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_groq("groq", &mock.groq_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/tts"))
        .json(&json!({ "text": "Hola" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["type"], "not_found_error");
}
