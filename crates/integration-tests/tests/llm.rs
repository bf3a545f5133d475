mod harness;

use harness::config::ConfigBuilder;
use harness::mock_upstream::{MockOptions, MockUpstream};
use harness::server::TestServer;
use serde_json::json;

#[tokio::test]
async fn process_returns_trimmed_reply() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_groq("groq", &mock.groq_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/process"))
        .json(&json!({ "text": "¿Qué visito en Cusco?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["text_response"]["reply"], "Cusco es ideal en temporada seca.");
}

#[tokio::test]
async fn process_sends_system_prompt_and_model() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_groq("groq", &mock.groq_url()).build();
    let server = TestServer::start(config).await.unwrap();

    server
        .client()
        .post(server.url("/process"))
        .json(&json!({ "text": "Hola" }))
        .send()
        .await
        .unwrap();

    let requests = mock.llm_requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request["model"], "llama-3.3-70b-versatile");
    assert_eq!(request["temperature"], 0.5);
    assert_eq!(request["messages"][0]["role"], "system");
    assert_eq!(request["messages"][1], json!({ "role": "user", "content": "Hola" }));
}

#[tokio::test]
async fn blank_text_is_rejected() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_groq("groq", &mock.groq_url()).build();
    let server = TestServer::start(config).await.unwrap();

    for body in [json!({ "text": "   " }), json!({})] {
        let resp = server.client().post(server.url("/process")).json(&body).send().await.unwrap();

        assert_eq!(resp.status(), 400);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["error"]["type"], "invalid_request_error");
    }

    assert!(mock.llm_requests().is_empty());
}

#[tokio::test]
async fn upstream_failure_is_a_bad_gateway() {
    let mock = MockUpstream::start_with(MockOptions {
        llm_failure: Some(500),
        ..MockOptions::default()
    })
    .await
    .unwrap();
    let config = ConfigBuilder::new().with_groq("groq", &mock.groq_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/process"))
        .json(&json!({ "text": "Hola" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"]["code"], 502);
}

#[tokio::test]
async fn unknown_provider_is_not_found() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new().with_groq("groq", &mock.groq_url()).build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/process"))
        .json(&json!({ "text": "Hola", "provider": "openai" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}
