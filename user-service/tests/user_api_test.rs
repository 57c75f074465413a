mod common;

use common::TestApp;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde_json::json;
use user_service::dtos::UserResponse;

#[tokio::test]
async fn create_then_fetch_then_delete() {
    let mut app = TestApp::spawn().await;
    let client = Client::new();

    let response = app
        .create_user(json!({ "name": "Ana", "gender": "F", "age": 30 }))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: UserResponse = response.json().await.expect("Failed to parse JSON");
    assert!(!created.id.is_empty());
    assert_eq!(created.name, "Ana");
    assert_eq!(created.gender, "F");
    assert_eq!(created.age, 30);

    let response = client
        .get(app.user_url(&created.id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: UserResponse = response.json().await.expect("Failed to parse JSON");
    assert_eq!(fetched, created);

    let response = client
        .delete(app.user_url(&created.id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let confirmation = response.text().await.expect("Failed to read body");
    assert!(confirmation.contains(&created.id));

    let response = client
        .get(app.user_url(&created.id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().is_empty());

    app.stop().await;
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let mut app = TestApp::spawn().await;
    let client = Client::new();

    let created: UserResponse = app
        .create_user(json!({ "name": "Bo", "gender": "M", "age": 41 }))
        .await
        .json()
        .await
        .unwrap();

    let first = client.delete(app.user_url(&created.id)).send().await.unwrap();
    let second = client.delete(app.user_url(&created.id)).send().await.unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    app.stop().await;
}

#[tokio::test]
async fn never_created_and_malformed_ids_are_not_found() {
    let mut app = TestApp::spawn().await;
    let client = Client::new();

    for id in ["65a1b2c3d4e5f60718293a4b", "abc", "65a1b2c3d4e5f60718293a4"] {
        let get = client.get(app.user_url(id)).send().await.unwrap();
        assert_eq!(get.status(), StatusCode::NOT_FOUND, "GET {id}");

        let delete = client.delete(app.user_url(id)).send().await.unwrap();
        assert_eq!(delete.status(), StatusCode::NOT_FOUND, "DELETE {id}");
    }

    app.stop().await;
}

#[tokio::test]
async fn malformed_payloads_are_rejected() {
    let mut app = TestApp::spawn().await;

    for body in [
        json!({ "name": "Ana", "gender": "F" }),
        json!({ "name": "Ana", "gender": "F", "age": "30" }),
        json!({ "gender": "F", "age": 30 }),
        json!("Ana"),
        json!(["Ana", "F", 30]),
    ] {
        let response = app.create_user(body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert!(response.text().await.unwrap().is_empty());
    }

    app.stop().await;
}

#[tokio::test]
async fn body_is_parsed_without_content_type() {
    let mut app = TestApp::spawn().await;

    let response = Client::new()
        .post(format!("{}/user", app.address))
        .body(r#"{"name":"Ana","gender":"F","age":30}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    app.stop().await;
}

#[tokio::test]
async fn concurrent_creates_get_unique_ids() {
    let mut app = TestApp::spawn().await;

    let requests = (0..20).map(|age| {
        let app = &app;
        async move {
            app.create_user(json!({ "name": "Ana", "gender": "F", "age": age }))
                .await
                .json::<UserResponse>()
                .await
                .unwrap()
        }
    });
    let created = join_all(requests).await;

    let mut ids: Vec<_> = created.iter().map(|u| u.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);

    app.stop().await;
}
