use actix_web::cookie::Cookie;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::json;
use std::collections::HashSet;
use std::net::TcpListener;
use std::sync::Mutex;
use warbler_client::config::{like_button_id, MESSAGES_CONTAINER_ID, NEW_MESSAGE_SAVE_BUTTON_ID, NEW_MESSAGE_TEXT_ID};
use warbler_client::models::models::LikeState;
use warbler_client::{ClientError, HttpApi, MemoryPage, MessageController, MessagesApi, Outcome, UiEvent};

const SESSION_COOKIE: &str = "session";
const SESSION_VALUE: &str = "testuser";
const CSRF_TOKEN: &str = "csrf-abc";

/// In-process stand-in for the Flask server.
#[derive(Default)]
struct Backend {
    requests: Vec<String>,
    liked: HashSet<i64>,
    next_id: i64,
}

type State = web::Data<Mutex<Backend>>;

fn logged_in(req: &HttpRequest) -> bool {
    req.cookie(SESSION_COOKIE)
        .map(|c| c.value() == SESSION_VALUE)
        .unwrap_or(false)
}

fn bounce_home() -> HttpResponse {
    HttpResponse::Found().insert_header(("Location", "/")).finish()
}

async fn login_form() -> HttpResponse {
    HttpResponse::Ok().content_type("text/html").body(format!(
        r#"<form method="POST"><input id="csrf_token" name="csrf_token" type="hidden" value="{}"></form>"#,
        CSRF_TOKEN
    ))
}

async fn login(form: web::Form<std::collections::HashMap<String, String>>) -> HttpResponse {
    let ok = form.get("username").map(String::as_str) == Some("testuser")
        && form.get("password").map(String::as_str) == Some("hunter22")
        && form.get("csrf_token").map(String::as_str) == Some(CSRF_TOKEN);

    if ok {
        HttpResponse::Found()
            .insert_header(("Location", "/"))
            .cookie(Cookie::build(SESSION_COOKIE, SESSION_VALUE).path("/").finish())
            .finish()
    } else {
        HttpResponse::Ok().content_type("text/html").body("Invalid credentials.")
    }
}

async fn add_like(req: HttpRequest, path: web::Path<i64>, state: State) -> HttpResponse {
    let message_id = path.into_inner();
    let mut backend = state.lock().unwrap();
    backend.requests.push(format!("POST /users/add_like/{}", message_id));

    if !logged_in(&req) {
        return bounce_home();
    }
    match message_id {
        404 => return HttpResponse::NotFound().body("Not Found"),
        700 => return HttpResponse::Ok().finish(),
        701 => return HttpResponse::Ok().body(" \n"),
        702 => return HttpResponse::Ok().json(json!({ "liked": "maybe" })),
        _ => {}
    }

    let liked = if backend.liked.remove(&message_id) {
        false
    } else {
        backend.liked.insert(message_id);
        true
    };
    HttpResponse::Ok().json(json!({ "liked": liked }))
}

async fn new_message(req: HttpRequest, body: web::Json<serde_json::Value>, state: State) -> HttpResponse {
    let mut backend = state.lock().unwrap();
    backend.requests.push(format!("POST /messages/new {}", body.0));

    if !logged_in(&req) {
        return bounce_home();
    }

    if body["text"] == "garbled" {
        return HttpResponse::Created().json(json!({ "id": 99 }));
    }

    backend.next_id += 1;
    let timestamp = chrono::Utc::now().format("%d %B %Y").to_string();
    HttpResponse::Created().json(json!({
        "message": {
            "id": backend.next_id,
            "text": body["text"],
            "timestamp": timestamp,
            "user_id": 1,
            "username": SESSION_VALUE,
            "image_url": "/static/images/default-pic.png",
        }
    }))
}

fn spawn_backend() -> (String, State) {
    let state: State = web::Data::new(Mutex::new(Backend::default()));
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let data = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/login", web::get().to(login_form))
            .route("/login", web::post().to(login))
            .route("/users/add_like/{id}", web::post().to(add_like))
            .route("/messages/new", web::post().to(new_message))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();

    tokio::spawn(server);
    (format!("http://127.0.0.1:{}", port), state)
}

async fn logged_in_api(base_url: &str) -> HttpApi {
    let api = HttpApi::new(base_url).unwrap();
    api.login("testuser", "hunter22").await.expect("Failed to login");
    api
}

#[tokio::test]
async fn test_like_round_trip_against_server() {
    let (base_url, state) = spawn_backend();
    let api = logged_in_api(&base_url).await;

    let page = MemoryPage::timeline("/").with_like_button(42, false);
    let mut controller = MessageController::mount(api, page);

    let first = controller.dispatch(&UiEvent::click(like_button_id(42))).await.unwrap();
    assert_eq!(first, Outcome::Liked { message_id: 42, state: LikeState::Liked });

    let second = controller.dispatch(&UiEvent::click(like_button_id(42))).await.unwrap();
    assert_eq!(second, Outcome::Liked { message_id: 42, state: LikeState::NotLiked });

    let requests = state.lock().unwrap().requests.clone();
    assert_eq!(requests, vec!["POST /users/add_like/42", "POST /users/add_like/42"]);
}

#[tokio::test]
async fn test_post_round_trip_renders_sent_text() {
    let (base_url, state) = spawn_backend();
    let api = logged_in_api(&base_url).await;

    let mut page = MemoryPage::timeline("/");
    page.set_input_value(NEW_MESSAGE_TEXT_ID, "hello world");
    let mut controller = MessageController::mount(api, page);

    let outcome = controller
        .dispatch(&UiEvent::click(NEW_MESSAGE_SAVE_BUTTON_ID))
        .await
        .unwrap();

    match outcome {
        Outcome::Posted { message, inserted } => {
            assert!(inserted);
            assert_eq!(message.text, "hello world");
            assert_eq!(message.id, 1);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let items = controller.page().items(MESSAGES_CONTAINER_ID);
    assert_eq!(items.len(), 1);
    assert!(items[0].contains("<p>hello world</p>"));
    assert!(items[0].contains(r#"<a href="/messages/1" class="message-link"></a>"#));

    let requests = state.lock().unwrap().requests.clone();
    assert_eq!(requests, vec![r#"POST /messages/new {"text":"hello world"}"#]);
}

#[tokio::test]
async fn test_anonymous_calls_are_unauthorized() {
    let (base_url, _state) = spawn_backend();
    let api = HttpApi::new(&base_url).unwrap();

    let like = api.add_like(1).await;
    assert!(matches!(like, Err(ClientError::Unauthorized)));

    let post = api.create_message("hi").await;
    assert!(matches!(post, Err(ClientError::Unauthorized)));
}

#[tokio::test]
async fn test_bad_credentials_are_rejected() {
    let (base_url, _state) = spawn_backend();
    let api = HttpApi::new(&base_url).unwrap();

    let result = api.login("testuser", "wrong-password").await;
    assert!(matches!(result, Err(ClientError::InvalidInput(_))));
}

#[tokio::test]
async fn test_missing_message_flashes_and_keeps_state() {
    let (base_url, _state) = spawn_backend();
    let api = logged_in_api(&base_url).await;

    let page = MemoryPage::timeline("/").with_like_button(404, true);
    let mut controller = MessageController::mount(api, page);

    let result = controller.dispatch(&UiEvent::click(like_button_id(404))).await;
    assert!(matches!(result, Err(ClientError::NotFound(_))));

    let classes = controller.page().classes(&like_button_id(404));
    assert!(classes.contains(&"btn-primary".to_string()));
    assert!(!classes.contains(&"btn-secondary".to_string()));
    assert_eq!(controller.page().flashes().len(), 1);
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let api = HttpApi::new(&format!("http://127.0.0.1:{}", port)).unwrap();
    let result = api.add_like(1).await;
    assert!(matches!(result, Err(ClientError::Transport(_))));
}

#[tokio::test]
async fn test_empty_like_body_flips_locally() {
    let (base_url, _state) = spawn_backend();
    let api = logged_in_api(&base_url).await;

    let page = MemoryPage::timeline("/")
        .with_like_button(700, false)
        .with_like_button(701, true);
    let mut controller = MessageController::mount(api, page);

    let empty = controller.dispatch(&UiEvent::click(like_button_id(700))).await.unwrap();
    assert_eq!(empty, Outcome::Liked { message_id: 700, state: LikeState::Liked });
    let classes = controller.page().classes(&like_button_id(700));
    assert!(classes.contains(&"btn-primary".to_string()));
    assert!(!classes.contains(&"btn-secondary".to_string()));

    let blank = controller.dispatch(&UiEvent::click(like_button_id(701))).await.unwrap();
    assert_eq!(blank, Outcome::Liked { message_id: 701, state: LikeState::NotLiked });
    let classes = controller.page().classes(&like_button_id(701));
    assert!(classes.contains(&"btn-secondary".to_string()));
    assert!(!classes.contains(&"btn-primary".to_string()));
}

#[tokio::test]
async fn test_malformed_like_body_is_a_decode_error() {
    let (base_url, _state) = spawn_backend();
    let api = logged_in_api(&base_url).await;

    let direct = api.add_like(702).await;
    assert!(matches!(direct, Err(ClientError::Decode(_))));

    let page = MemoryPage::timeline("/").with_like_button(702, false);
    let mut controller = MessageController::mount(api, page);

    let result = controller.dispatch(&UiEvent::click(like_button_id(702))).await;
    assert!(matches!(result, Err(ClientError::Decode(_))));

    let classes = controller.page().classes(&like_button_id(702));
    assert!(classes.contains(&"btn-secondary".to_string()));
    assert!(!classes.contains(&"btn-primary".to_string()));
    assert_eq!(controller.page().flashes().len(), 1);
}

#[tokio::test]
async fn test_malformed_new_message_body_is_a_decode_error() {
    let (base_url, _state) = spawn_backend();
    let api = logged_in_api(&base_url).await;

    let mut page = MemoryPage::timeline("/");
    page.set_input_value(NEW_MESSAGE_TEXT_ID, "garbled");
    let mut controller = MessageController::mount(api, page);

    let result = controller.dispatch(&UiEvent::click(NEW_MESSAGE_SAVE_BUTTON_ID)).await;

    assert!(matches!(result, Err(ClientError::Decode(_))));
    assert!(controller.page().items(MESSAGES_CONTAINER_ID).is_empty());
    assert!(!controller.page().is_disabled(NEW_MESSAGE_SAVE_BUTTON_ID));
}
