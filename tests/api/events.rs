use std::time::Duration;

use serde_json::json;

use super::helpers::{TestApp, accept_all_emails, spawn_app};

fn published_post() -> serde_json::Value {
    json!({
        "type": "post",
        "title": "Rooted in Truth",
        "url": "https://lightandtruth.com.ng/post/rooted-in-truth"
    })
}

async fn wait_for_emails(app: &TestApp, expected: usize) -> Vec<serde_json::Value> {
    for _ in 0..50 {
        let emails = app.sent_emails().await;
        if emails.len() >= expected {
            return emails;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    app.sent_emails().await
}

#[tokio::test]
async fn content_published_event_is_accepted_and_sent_in_the_background() {
    let app = spawn_app().await;
    app.add_active_subscribers(2).await;
    accept_all_emails(&app, 2).await;

    let response = app.post_event(&published_post()).await;

    assert_eq!(response.status().as_u16(), 202);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Notification scheduled");

    let emails = wait_for_emails(&app, 2).await;
    assert_eq!(emails.len(), 2);
    assert!(emails.iter().all(|e| e["subject"] == "New Blog Post: Rooted in Truth"));
}

#[tokio::test]
async fn incomplete_event_is_rejected() {
    let app = spawn_app().await;
    app.add_active_subscribers(1).await;
    accept_all_emails(&app, 0).await;

    let response = app.post_event(&json!({ "type": "post" })).await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing fields");
}

#[tokio::test]
async fn background_failures_never_reach_the_caller() {
    let app = spawn_app().await;
    app.store.set_unavailable(true);
    accept_all_emails(&app, 0).await;

    let response = app.post_event(&published_post()).await;

    assert_eq!(response.status().as_u16(), 202);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(app.sent_emails().await.is_empty());
}
