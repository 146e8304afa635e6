use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, method, path},
};

use super::helpers::{accept_all_emails, spawn_app};

#[tokio::test]
async fn newsletter_is_sent_to_the_listed_subscribers() {
    let app = spawn_app().await;
    accept_all_emails(&app, 2).await;

    let response = app
        .post_newsletter(&json!({
            "subject": "March newsletter",
            "content": "Grace and peace.\nSee you on Sunday.",
            "subscribers": ["one@example.com", "two@example.com"]
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": true, "sent": 2, "failed": 0, "total": 2 })
    );

    let emails = app.sent_emails().await;
    assert!(emails.iter().all(|e| e["subject"] == "March newsletter"));
    let html = emails[0]["html"].as_str().unwrap();
    assert!(html.contains("Grace and peace.<br>See you on Sunday."));
}

#[tokio::test]
async fn incomplete_newsletters_are_rejected() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            json!({ "subject": "s", "content": "c", "subscribers": [] }),
            "an empty subscriber list",
        ),
        (json!({ "subject": "s", "content": "c" }), "no subscriber list"),
        (
            json!({ "content": "c", "subscribers": ["one@example.com"] }),
            "no subject",
        ),
        (
            json!({ "subject": "s", "content": "", "subscribers": ["one@example.com"] }),
            "empty content",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_newsletter(&body).await;

        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 Bad Request when the payload had {description}."
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Missing required fields");
    }
}

#[tokio::test]
async fn invalid_addresses_count_as_failures() {
    let app = spawn_app().await;
    accept_all_emails(&app, 1).await;

    let response = app
        .post_newsletter(&json!({
            "subject": "s",
            "content": "c",
            "subscribers": ["one@example.com", "not-an-address"]
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": true, "sent": 1, "failed": 1, "total": 2 })
    );
}

#[tokio::test]
async fn provider_outage_is_reported_in_the_counts() {
    let app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_newsletter(&json!({
            "subject": "s",
            "content": "c",
            "subscribers": ["a@example.com", "b@example.com", "c@example.com"]
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "success": true, "sent": 0, "failed": 3, "total": 3 })
    );
}
