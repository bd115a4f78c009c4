#![allow(dead_code)]

use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use quizmaster::config::{AiSettings, Settings};
use quizmaster::run;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

pub async fn spawn_app(gateway_url: &str) -> TestApp {
    spawn_app_with_key(gateway_url, Some("test-key")).await
}

pub async fn spawn_app_with_key(gateway_url: &str, api_key: Option<&str>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let settings = Settings {
        bind_address: address.clone(),
        ai: AiSettings {
            api_key: api_key.map(str::to_string),
            base_url: gateway_url.to_string(),
            model: "test-model".to_string(),
        },
    };

    let server = run(listener, settings).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        api_client: reqwest::Client::new(),
    }
}

/// A request received by the fake gateway.
#[derive(Debug, Clone)]
pub struct Captured {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct Reply {
    status: u16,
    body: String,
}

pub struct FakeGateway {
    pub address: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl FakeGateway {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<Captured> {
        self.requests.lock().unwrap().last().cloned()
    }
}

async fn record_and_reply(
    req: HttpRequest,
    body: web::Json<Value>,
    reply: web::Data<Reply>,
    requests: web::Data<Mutex<Vec<Captured>>>,
) -> HttpResponse {
    let authorization = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    requests.lock().unwrap().push(Captured {
        authorization,
        body: body.into_inner(),
    });

    HttpResponse::build(StatusCode::from_u16(reply.status).unwrap())
        .content_type("application/json")
        .body(reply.body.clone())
}

/// Spawns a chat-completion gateway that answers every request with `status` and `body`.
pub async fn spawn_gateway(status: u16, body: impl Into<String>) -> FakeGateway {
    spawn_stub("/chat/completions", status, body).await
}

/// Serves a canned JSON reply for POSTs to `path`, recording each request.
pub async fn spawn_stub(path: &'static str, status: u16, body: impl Into<String>) -> FakeGateway {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let requests = Arc::new(Mutex::new(Vec::new()));
    let reply = web::Data::new(Reply {
        status,
        body: body.into(),
    });
    let captured = web::Data::from(requests.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(reply.clone())
            .app_data(captured.clone())
            .route(path, web::post().to(record_and_reply))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();
    let _ = tokio::spawn(server);

    FakeGateway {
        address: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

pub fn sample_questions(count: usize) -> Value {
    let questions: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("Question {}?", i + 1),
                "options": ["Alpha", "Beta", "Gamma", "Delta"],
                "correctAnswer": i % 4,
                "explanation": format!("Explanation {}", i + 1)
            })
        })
        .collect();
    Value::Array(questions)
}

/// A chat completion whose first tool call carries `questions`.
pub fn tool_call_reply(name: &str, questions: Value) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {
                        "name": name,
                        "arguments": json!({ "questions": questions }).to_string()
                    }
                }]
            }
        }]
    })
    .to_string()
}

pub fn quiz_request() -> Value {
    json!({
        "topic": "Space Exploration",
        "count": 5,
        "difficulty": "medium"
    })
}
