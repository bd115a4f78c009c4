use crate::common::{quiz_request, sample_questions, spawn_app, spawn_app_with_key, spawn_gateway, tool_call_reply};
use serde_json::json;

mod common;

async fn post_quiz(app: &common::TestApp, body: &serde_json::Value) -> reqwest::Response {
    app.api_client
        .post(&format!("{}/generate-mcqs", &app.address))
        .json(body)
        .send()
        .await
        .expect("Failed to execute request.")
}

#[tokio::test]
async fn generate_returns_questions_from_tool_call() {
    let gateway = spawn_gateway(200, tool_call_reply("create_mcqs", sample_questions(5))).await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(200, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert_eq!(questions[2]["question"], "Question 3?");
    assert_eq!(questions[2]["correctAnswer"], 2);
    assert_eq!(questions[2]["options"].as_array().unwrap().len(), 4);
    assert_eq!(questions[2]["explanation"], "Explanation 3");
    assert_eq!(gateway.request_count(), 1);
}

#[tokio::test]
async fn upstream_request_forces_the_tool_call() {
    let gateway = spawn_gateway(200, tool_call_reply("create_mcqs", sample_questions(10))).await;
    let app = spawn_app(&gateway.address).await;

    let body = json!({ "topic": "Machine Learning", "count": 10, "difficulty": "hard" });
    let response = post_quiz(&app, &body).await;
    assert_eq!(200, response.status().as_u16());

    let captured = gateway.last_request().unwrap();
    assert_eq!(captured.authorization.as_deref(), Some("Bearer test-key"));
    assert_eq!(captured.body["model"], "test-model");
    assert_eq!(captured.body["tool_choice"]["function"]["name"], "create_mcqs");
    assert_eq!(captured.body["tools"][0]["function"]["name"], "create_mcqs");

    let system = captured.body["messages"][0]["content"].as_str().unwrap();
    assert!(system.contains("Generate exactly 10 multiple choice questions about \"Machine Learning\""));
    assert!(system.contains("at hard difficulty level"));
    assert_eq!(captured.body["messages"][1]["content"], "Generate 10 MCQs about Machine Learning.");
}

#[tokio::test]
async fn rate_limit_is_passed_through() {
    let gateway = spawn_gateway(429, r#"{"error":"slow down"}"#).await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(429, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Rate limit exceeded. Please try again in a moment.");
}

#[tokio::test]
async fn payment_required_is_passed_through() {
    let gateway = spawn_gateway(402, "{}").await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(402, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Payment required. Please add credits to continue.");
}

#[tokio::test]
async fn other_upstream_failures_become_500() {
    let gateway = spawn_gateway(503, "upstream exploded").await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(500, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Failed to generate questions");
}

#[tokio::test]
async fn wrong_tool_name_is_invalid_response() {
    let gateway = spawn_gateway(200, tool_call_reply("something_else", sample_questions(5))).await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(500, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Invalid response from AI");
}

#[tokio::test]
async fn plain_text_completion_is_invalid_response() {
    let body = json!({
        "choices": [{ "message": { "role": "assistant", "content": "Here are your questions!" } }]
    });
    let gateway = spawn_gateway(200, body.to_string()).await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(500, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "Invalid response from AI");
}

#[tokio::test]
async fn question_with_three_options_is_rejected() {
    let questions = json!([{
        "question": "Pick one",
        "options": ["a", "b", "c"],
        "correctAnswer": 1,
        "explanation": "b"
    }]);
    let gateway = spawn_gateway(200, tool_call_reply("create_mcqs", questions)).await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(500, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Invalid question payload"));
}

#[tokio::test]
async fn answer_index_sent_as_float_is_accepted() {
    let questions = json!([{
        "question": "Which planet is known as the Red Planet?",
        "options": ["Venus", "Mars", "Jupiter", "Mercury"],
        "correctAnswer": 1.0,
        "explanation": "Iron oxide gives Mars its colour."
    }]);
    let gateway = spawn_gateway(200, tool_call_reply("create_mcqs", questions)).await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(200, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["questions"][0]["correctAnswer"], 1);
    assert_eq!(json["questions"][0]["options"][1], "Mars");
}

#[tokio::test]
async fn fractional_answer_index_is_rejected() {
    let questions = json!([{
        "question": "Pick one",
        "options": ["a", "b", "c", "d"],
        "correctAnswer": 1.5,
        "explanation": "b"
    }]);
    let gateway = spawn_gateway(200, tool_call_reply("create_mcqs", questions)).await;
    let app = spawn_app(&gateway.address).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(500, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Invalid question payload"));
}

#[tokio::test]
async fn missing_api_key_fails_without_calling_gateway() {
    let gateway = spawn_gateway(200, tool_call_reply("create_mcqs", sample_questions(5))).await;
    let app = spawn_app_with_key(&gateway.address, None).await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(500, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert_eq!(json["error"], "AI_GATEWAY_API_KEY is not configured");
    assert_eq!(gateway.request_count(), 0);
}

#[tokio::test]
async fn unreachable_gateway_is_a_generic_failure() {
    let app = spawn_app("http://127.0.0.1:9").await;

    let response = post_quiz(&app, &quiz_request()).await;

    assert_eq!(500, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Failed to reach AI gateway"));
}

#[tokio::test]
async fn malformed_request_body_is_a_json_error() {
    let gateway = spawn_gateway(200, tool_call_reply("create_mcqs", sample_questions(5))).await;
    let app = spawn_app(&gateway.address).await;

    let body = json!({ "topic": "Rust", "count": 5, "difficulty": "impossible" });
    let response = post_quiz(&app, &body).await;

    assert_eq!(500, response.status().as_u16());
    let json: serde_json::Value = response.json().await.unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request"));
    assert_eq!(gateway.request_count(), 0);
}

#[tokio::test]
async fn cors_preflight_and_headers() {
    let gateway = spawn_gateway(200, tool_call_reply("create_mcqs", sample_questions(5))).await;
    let app = spawn_app(&gateway.address).await;

    let preflight = app.api_client
        .request(reqwest::Method::OPTIONS, &format!("{}/generate-mcqs", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, preflight.status().as_u16());
    assert_eq!(preflight.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        preflight.headers()["access-control-allow-headers"],
        "authorization, x-client-info, apikey, content-type"
    );

    let response = post_quiz(&app, &quiz_request()).await;
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
