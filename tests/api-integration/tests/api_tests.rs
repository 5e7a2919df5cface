//! End-to-end tests for the submission API over real HTTP.

use reqwest::Client;
use serde_json::{json, Value};

use vivaah_api_integration::TestServer;

async fn post_json(client: &Client, url: &str, body: Value) -> (reqwest::StatusCode, Value) {
    let resp = client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("request failed");
    let status = resp.status();
    let body = resp.json().await.expect("response was not JSON");
    (status, body)
}

async fn get_json(client: &Client, url: &str) -> Value {
    let resp = client.get(url).send().await.expect("request failed");
    assert!(resp.status().is_success(), "GET {url} failed");
    resp.json().await.expect("response was not JSON")
}

fn rsvp_body(attendance: &str, guest_count: &str, events: Value) -> Value {
    json!({
        "name": "Guest",
        "email": "guest@example.com",
        "phone": "555-0100",
        "attendance": attendance,
        "guestCount": guest_count,
        "events": events,
    })
}

// ─── Contact form ────────────────────────────────────────────────────────────

#[tokio::test]
async fn contact_submission_round_trip() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/contact"),
        json!({
            "name": "  Asha Kaur ",
            "email": " Asha@Example.COM ",
            "phone": "555-0100",
            "message": "Where is the venue?",
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Form submitted successfully");
    let id = body["id"].as_str().expect("id missing");
    assert!(!id.is_empty());

    // Appears exactly once, normalized.
    let listing = get_json(&client, &server.url("/api/submissions")).await;
    let submissions = listing["submissions"].as_array().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["id"], id);
    assert_eq!(submissions[0]["name"], "Asha Kaur");
    assert_eq!(submissions[0]["email"], "asha@example.com");
}

#[tokio::test]
async fn contact_missing_field_is_rejected_and_not_persisted() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/contact"),
        json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "555-0100",
            // message absent
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "All fields are required");

    let listing = get_json(&client, &server.url("/api/submissions")).await;
    assert_eq!(listing["submissions"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn contact_whitespace_only_field_is_rejected() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, _) = post_json(
        &client,
        &server.url("/api/contact"),
        json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "   ",
            "message": "hello",
        }),
    )
    .await;
    assert_eq!(status, 400);
}

// ─── RSVP form ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn rsvp_submission_round_trip_with_defaults() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/rsvp"),
        json!({
            "name": "Guest",
            "email": "guest@example.com",
            "phone": "555-0100",
            "attendance": "yes",
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "RSVP submitted successfully");
    let id = body["id"].as_str().unwrap();

    let listing = get_json(&client, &server.url("/api/rsvps")).await;
    let rsvps = listing["rsvps"].as_array().unwrap();
    assert_eq!(rsvps.len(), 1);
    assert_eq!(rsvps[0]["id"], id);
    assert_eq!(rsvps[0]["guestCount"], "1");
    assert_eq!(rsvps[0]["accommodation"], "no");
    assert_eq!(rsvps[0]["dietaryRestrictions"], "");
    assert_eq!(rsvps[0]["events"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rsvp_missing_attendance_is_rejected() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/rsvp"),
        json!({
            "name": "Guest",
            "email": "guest@example.com",
            "phone": "555-0100",
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Name, email, phone, and attendance are required");

    let listing = get_json(&client, &server.url("/api/rsvps")).await;
    assert_eq!(listing["rsvps"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rsvp_unknown_attendance_is_rejected() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/rsvp"),
        rsvp_body("probably", "1", json!([])),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("attendance"));
}

#[tokio::test]
async fn rsvp_unknown_event_is_rejected() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/rsvp"),
        rsvp_body("yes", "1", json!(["haldi", "reception"])),
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("events"));
}

// ─── Listings & stats ────────────────────────────────────────────────────────

#[tokio::test]
async fn listings_are_empty_before_any_submission() {
    let server = TestServer::start().await;
    let client = Client::new();

    let submissions = get_json(&client, &server.url("/api/submissions")).await;
    assert_eq!(submissions, json!({ "submissions": [] }));

    let rsvps = get_json(&client, &server.url("/api/rsvps")).await;
    assert_eq!(rsvps, json!({ "rsvps": [] }));

    let stats = get_json(&client, &server.url("/api/rsvp-stats")).await;
    assert_eq!(stats["total"], 0);
    assert_eq!(stats["totalGuests"], 0);
}

#[tokio::test]
async fn rsvp_stats_aggregate_attendance_and_guests() {
    let server = TestServer::start().await;
    let client = Client::new();

    for (attendance, guests) in [("yes", "2"), ("no", "1"), ("maybe", "1")] {
        let (status, _) = post_json(
            &client,
            &server.url("/api/rsvp"),
            rsvp_body(attendance, guests, json!([])),
        )
        .await;
        assert_eq!(status, 200);
    }

    let stats = get_json(&client, &server.url("/api/rsvp-stats")).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["attending"], 1);
    assert_eq!(stats["notAttending"], 1);
    assert_eq!(stats["maybe"], 1);
    assert_eq!(stats["totalGuests"], 2);
}

#[tokio::test]
async fn rsvp_stats_count_events_individually() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, _) = post_json(
        &client,
        &server.url("/api/rsvp"),
        rsvp_body("yes", "1", json!(["haldi", "wedding"])),
    )
    .await;
    assert_eq!(status, 200);

    let stats = get_json(&client, &server.url("/api/rsvp-stats")).await;
    assert_eq!(stats["events"]["haldi"], 1);
    assert_eq!(stats["events"]["mehandi"], 0);
    assert_eq!(stats["events"]["wedding"], 1);
}

#[tokio::test]
async fn repeated_gets_return_identical_results() {
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, _) = post_json(
        &client,
        &server.url("/api/rsvp"),
        rsvp_body("yes", "2", json!(["wedding"])),
    )
    .await;
    assert_eq!(status, 200);

    let first = get_json(&client, &server.url("/api/rsvps")).await;
    let second = get_json(&client, &server.url("/api/rsvps")).await;
    assert_eq!(first, second);
}

// ─── Health & static serving ─────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_configuration() {
    let server = TestServer::start().await;
    let client = Client::new();

    let health = get_json(&client, &server.url("/api/health")).await;
    assert_eq!(health["status"], "OK");
    assert!(health["uptime"].as_f64().unwrap() >= 0.0);
    assert_eq!(health["emailConfigured"], false);
    assert_eq!(health["googleSheetsConfigured"], false);
    assert!(health["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn posts_succeed_without_notification_credentials() {
    // The harness runs with neither email nor sheets configured; the POST
    // contract must be unaffected.
    let server = TestServer::start().await;
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        &server.url("/api/rsvp"),
        rsvp_body("maybe", "1", json!(["mehandi"])),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert!(body["id"].as_str().is_some());
}

#[tokio::test]
async fn unmatched_routes_fall_back_to_index() {
    let server = TestServer::start().await;
    let client = Client::new();

    let resp = client
        .get(server.url("/some/client/route"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let body = resp.text().await.unwrap();
    assert!(body.contains("wedding site"));
}
