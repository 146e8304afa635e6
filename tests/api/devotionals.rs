use chrono::Days;
use serde_json::json;

use super::helpers::{accept_all_emails, reject_emails_to, spawn_app, today};

#[tokio::test]
async fn todays_devotional_is_sent_to_every_active_subscriber() {
    let app = spawn_app().await;
    app.add_active_subscribers(3).await;
    app.store.add_subscriber("left@example.com", false).await;
    let devotional = app.add_devotional(today(), true).await;
    accept_all_emails(&app, 3).await;

    let response = app.post_devotional(&json!({ "send_to_all": true })).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Daily devotional emails sent");
    assert_eq!(body["successful"], 3);
    assert_eq!(body["failed"], 0);
    assert_eq!(body["total"], 3);
    assert_eq!(body["devotional_title"], devotional.title.as_str());
    assert_eq!(body["date"], today().format("%Y-%m-%d").to_string());

    let recipients: Vec<String> = app
        .sent_emails()
        .await
        .iter()
        .map(|email| email["to"][0].as_str().unwrap().to_string())
        .collect();
    assert!(!recipients.contains(&"left@example.com".to_string()));
}

#[tokio::test]
async fn send_to_all_false_still_reaches_every_active_subscriber() {
    let app = spawn_app().await;
    app.add_active_subscribers(2).await;
    app.add_devotional(today(), true).await;
    accept_all_emails(&app, 2).await;

    let response = app.post_devotional(&json!({ "send_to_all": false })).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["successful"], 2);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn devotional_email_carries_the_full_reading() {
    let app = spawn_app().await;
    app.add_active_subscribers(1).await;
    let devotional = app.add_devotional(today(), true).await;
    accept_all_emails(&app, 1).await;

    app.post_devotional(&json!({})).await;

    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 1);
    assert_eq!(
        emails[0]["subject"],
        format!("Daily Devotional: {}", devotional.title)
    );
    assert_eq!(emails[0]["reply_to"], "no-reply@lightandtruth.com.ng");
    let html = emails[0]["html"].as_str().unwrap();
    assert!(html.contains("Your eye is the lamp of your body."));
    assert!(html.contains("whole body also is full of light."));
    assert!(html.contains("Luke 11:34"));
    assert!(html.contains(&devotional.display_date()));
    assert!(html.contains("Unsubscribe"));
}

#[tokio::test]
async fn a_specific_devotional_can_be_sent_by_id() {
    let app = spawn_app().await;
    app.add_active_subscribers(2).await;
    let last_week = today().checked_sub_days(Days::new(7)).unwrap();
    let devotional = app.add_devotional(last_week, true).await;
    accept_all_emails(&app, 2).await;

    let response = app
        .post_devotional(&json!({ "devotional_id": devotional.id.to_string() }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["successful"], 2);
    assert_eq!(body["date"], last_week.format("%Y-%m-%d").to_string());
}

#[tokio::test]
async fn no_devotional_for_today_is_a_successful_no_op() {
    let app = spawn_app().await;
    app.add_active_subscribers(2).await;
    let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
    app.add_devotional(yesterday, true).await;
    app.add_devotional(today(), false).await;
    accept_all_emails(&app, 0).await;

    let response = app.post_devotional(&json!({})).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "No devotional available for today" }));
}

#[tokio::test]
async fn an_empty_body_looks_up_todays_devotional() {
    let app = spawn_app().await;
    accept_all_emails(&app, 0).await;

    let response = app
        .api_client
        .post(format!("{}/send-daily-devotional", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "No devotional available for today");
}

#[tokio::test]
async fn requesting_a_missing_or_unpublished_devotional_fails() {
    let app = spawn_app().await;
    app.add_active_subscribers(2).await;
    let draft = app.add_devotional(today(), false).await;
    accept_all_emails(&app, 0).await;

    let test_cases = vec![
        (draft.id.to_string(), "an unpublished devotional"),
        (uuid::Uuid::new_v4().to_string(), "an unknown devotional"),
        ("not-a-uuid".to_string(), "a malformed id"),
    ];

    for (devotional_id, description) in test_cases {
        let response = app
            .post_devotional(&json!({ "devotional_id": devotional_id }))
            .await;

        assert_eq!(
            response.status().as_u16(),
            500,
            "The API did not fail when asked to send {description}."
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Devotional not found");
    }
}

#[tokio::test]
async fn no_active_subscribers_means_nothing_is_sent() {
    let app = spawn_app().await;
    app.store.add_subscriber("left@example.com", false).await;
    app.add_devotional(today(), true).await;
    accept_all_emails(&app, 0).await;

    let response = app.post_devotional(&json!({})).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "No active subscribers found" }));
}

#[tokio::test]
async fn one_failed_delivery_does_not_stop_the_others() {
    let app = spawn_app().await;
    let emails = app.add_active_subscribers(4).await;
    app.add_devotional(today(), true).await;
    reject_emails_to(&app, &emails[1]).await;
    accept_all_emails(&app, 3).await;

    let response = app.post_devotional(&json!({})).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["successful"], 3);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["total"], 4);
}

#[tokio::test]
async fn an_unreachable_store_fails_the_request() {
    let app = spawn_app().await;
    app.store.set_unavailable(true);
    accept_all_emails(&app, 0).await;

    let response = app.post_devotional(&json!({})).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Error fetching devotional");
}
