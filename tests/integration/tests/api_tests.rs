//! API integration tests
//!
//! Each test spins up its own in-memory server with a manual clock starting
//! at 1 May 2026, 10:00.

use chrono::Duration;
use integration_tests::*;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn unique_email(prefix: &str) -> String {
    format!("{prefix}{}@example.com", unique_suffix())
}

async fn organiser(server: &TestServer) -> anyhow::Result<String> {
    server
        .register(&RegisterRequest::organiser(&unique_email("org")))
        .await
}

async fn create_event(server: &TestServer, token: &str) -> anyhow::Result<String> {
    let response = server
        .post_auth("/events", token, &CreateEventRequest::default())
        .await?;
    let event = assert_json(response, StatusCode::CREATED).await?;
    Ok(event["id"].as_str().unwrap_or_default().to_string())
}

async fn sign_up(server: &TestServer, event_id: &str, email: &str) -> anyhow::Result<Value> {
    let response = server
        .post(&format!("/events/{event_id}/signups"), &SignupRequest::new(email))
        .await?;
    assert_json(response, StatusCode::CREATED).await
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() -> anyhow::Result<()> {
    let server = TestServer::start().await?;

    let body = assert_json(server.get_raw("/health").await?, StatusCode::OK).await?;
    assert_eq!(body["status"], "healthy");

    let body = assert_json(server.get_raw("/health/ready").await?, StatusCode::OK).await?;
    assert_eq!(body["status"], "ready");
    Ok(())
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_register_login_and_current_user() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let email = unique_email("member");

    let token = server.register(&RegisterRequest::member(&email)).await?;
    let me = assert_json(server.get_auth("/users/@me", &token).await?, StatusCode::OK).await?;
    assert_eq!(me["email"], email.as_str());
    assert_eq!(me["role"], "member");

    let token = server.login(&email.to_uppercase(), PASSWORD).await?;
    assert!(!token.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_weak_passwords() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let email = unique_email("dup");
    server.register(&RegisterRequest::member(&email)).await?;

    let response = server
        .post("/auth/register", &RegisterRequest::member(&email))
        .await?;
    assert_error(response, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS").await?;

    let mut weak = RegisterRequest::member(&unique_email("weak"));
    weak.password = "short".to_string();
    let body = assert_error(
        server.post("/auth/register", &weak).await?,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
    )
    .await?;
    assert!(body["error"]["details"].get("password").is_some());
    Ok(())
}

#[tokio::test]
async fn test_login_with_wrong_password() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let request = LoginRequest {
        email: ADMIN_EMAIL.to_string(),
        password: "Wrong12345".to_string(),
    };
    let response = server.post("/auth/login", &request).await?;
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS").await?;
    Ok(())
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let response = server.get_auth("/users/@me", "not-a-token").await?;
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN").await?;

    let response = server.get("/users/@me").await?;
    assert_status(response, StatusCode::UNAUTHORIZED).await?;
    Ok(())
}

// ============================================================================
// Events
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_event() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let token = organiser(&server).await?;

    let event_id = create_event(&server, &token).await?;
    assert_eq!(event_id, "E001");

    let response = server.get(&format!("/events/{event_id}")).await?;
    let event = assert_json(response, StatusCode::OK).await?;
    assert_eq!(event["title"], "Beach cleanup");
    assert_eq!(event["status"], "upcoming");

    let response = server.get_auth("/events/managed", &token).await?;
    let managed = assert_json(response, StatusCode::OK).await?;
    assert_eq!(managed.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_member_cannot_create_event() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let token = server
        .register(&RegisterRequest::member(&unique_email("member")))
        .await?;

    let response = server
        .post_auth("/events", &token, &CreateEventRequest::default())
        .await?;
    assert_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE").await?;
    Ok(())
}

#[tokio::test]
async fn test_event_schedule_errors_are_reported_together() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let token = organiser(&server).await?;

    let request = CreateEventRequest {
        start_date: "2026-04-01".to_string(),
        end_date: "2026-03-30".to_string(),
        start_time: "07:00:00".to_string(),
        end_time: "06:00:00".to_string(),
        ..Default::default()
    };
    let body = assert_error(
        server.post_auth("/events", &token, &request).await?,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
    )
    .await?;

    let details = &body["error"]["details"];
    for field in ["start_date", "end_date", "start_time", "end_time"] {
        assert!(details.get(field).is_some(), "missing {field} in {details}");
    }
    Ok(())
}

#[tokio::test]
async fn test_only_owner_or_admin_can_update_event() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let owner = organiser(&server).await?;
    let other = organiser(&server).await?;
    let event_id = create_event(&server, &owner).await?;
    let path = format!("/events/{event_id}");

    let response = server
        .patch_auth(&path, &other, &json!({ "title": "Hijacked" }))
        .await?;
    assert_error(response, StatusCode::FORBIDDEN, "NOT_EVENT_OWNER").await?;

    let updated = assert_json(
        server
            .patch_auth(&path, &owner, &json!({ "title": "River cleanup" }))
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(updated["title"], "River cleanup");

    let admin = server.admin_token().await?;
    let updated = assert_json(
        server
            .patch_auth(&path, &admin, &json!({ "location": "Melaka" }))
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(updated["location"], "Melaka");
    Ok(())
}

#[tokio::test]
async fn test_list_events_filters_by_title() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let token = organiser(&server).await?;
    create_event(&server, &token).await?;
    let request = CreateEventRequest {
        title: "Food bank".to_string(),
        ..Default::default()
    };
    assert_status(
        server.post_auth("/events", &token, &request).await?,
        StatusCode::CREATED,
    )
    .await?;

    let all = assert_json(server.get("/events").await?, StatusCode::OK).await?;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let filtered = assert_json(server.get("/events?title=food").await?, StatusCode::OK).await?;
    let filtered = filtered.as_array().cloned().unwrap_or_default();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["title"], "Food bank");
    Ok(())
}

#[tokio::test]
async fn test_unknown_and_malformed_event_ids() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    assert_error(server.get("/events/E404").await?, StatusCode::NOT_FOUND, "UNKNOWN_EVENT").await?;
    assert_status(server.get("/events/nope").await?, StatusCode::NOT_FOUND).await?;
    Ok(())
}

#[tokio::test]
async fn test_event_photo_upload_is_served() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let token = organiser(&server).await?;
    let event_id = create_event(&server, &token).await?;
    let path = format!("/events/{event_id}/photo");
    let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    let event = assert_json(
        server
            .put_photo(&path, &token, "beach.png", "image/png", png.clone())
            .await?,
        StatusCode::OK,
    )
    .await?;
    let url = event["photo_url"].as_str().unwrap_or_default().to_string();
    assert!(url.ends_with(".png"), "{url}");

    let served = server.get_raw(&url).await?;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await?.to_vec(), png);

    let response = server
        .put_photo(&path, &token, "beach.gif", "image/gif", vec![1, 2, 3])
        .await?;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await?;
    Ok(())
}

// ============================================================================
// Signups and approvals
// ============================================================================

#[tokio::test]
async fn test_signup_flow() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let token = organiser(&server).await?;
    let event_id = create_event(&server, &token).await?;
    let email = unique_email("vol");

    let enrollment = sign_up(&server, &event_id, &email).await?;
    assert_eq!(enrollment["volunteer"]["id"], "V001");
    assert_eq!(enrollment["participation"]["points"], 40);
    assert_eq!(enrollment["participation"]["approval"], "pending");
    assert_eq!(enrollment["participation"]["completion"], "waiting");

    let path = format!("/events/{event_id}/signups");
    let response = server.post(&path, &SignupRequest::new(&email)).await?;
    assert_error(response, StatusCode::CONFLICT, "DUPLICATE_SIGNUP").await?;

    let response = server
        .post("/events/E999/signups", &SignupRequest::new(&email))
        .await?;
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_EVENT").await?;

    let mut bad = SignupRequest::new(&unique_email("bad"));
    bad.age = 3;
    bad.work_hours = 0;
    let body = assert_error(
        server.post(&path, &bad).await?,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
    )
    .await?;
    assert!(body["error"]["details"].get("age").is_some());
    assert!(body["error"]["details"].get("work_hours").is_some());
    Ok(())
}

#[tokio::test]
async fn test_signup_closes_after_event_ends() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let token = organiser(&server).await?;
    let event_id = create_event(&server, &token).await?;

    server.clock.advance(Duration::days(11));

    let response = server
        .post(
            &format!("/events/{event_id}/signups"),
            &SignupRequest::new(&unique_email("late")),
        )
        .await?;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "EVENT_CONCLUDED").await?;
    Ok(())
}

#[tokio::test]
async fn test_approval_workflow() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let owner = organiser(&server).await?;
    let event_id = create_event(&server, &owner).await?;
    let enrollment = sign_up(&server, &event_id, &unique_email("vol")).await?;
    let id = enrollment["participation"]["id"].as_i64().unwrap_or_default();

    let response = server.get_auth("/participations/pending", &owner).await?;
    let pending = assert_json(response, StatusCode::OK).await?;
    assert_eq!(pending.as_array().map(Vec::len), Some(1));

    let response = server
        .post_empty_auth(&format!("/participations/{id}/complete"), &owner)
        .await?;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "COMPLETION_REQUIRES_APPROVAL").await?;

    let approved = assert_json(
        server
            .post_empty_auth(&format!("/participations/{id}/approve"), &owner)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(approved["approval"], "approved");

    let response = server
        .post_empty_auth(&format!("/participations/{id}/reject"), &owner)
        .await?;
    assert_error(response, StatusCode::CONFLICT, "INVALID_TRANSITION").await?;

    let completed = assert_json(
        server
            .post_empty_auth(&format!("/participations/{id}/complete"), &owner)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(completed["completion"], "completed");

    let member = server
        .register(&RegisterRequest::member(&unique_email("member")))
        .await?;
    let response = server
        .post_empty_auth(&format!("/participations/{id}/reset"), &member)
        .await?;
    assert_status(response, StatusCode::FORBIDDEN).await?;

    let response = server
        .post_empty_auth(&format!("/participations/{id}/reset"), &owner)
        .await?;
    assert_error(response, StatusCode::CONFLICT, "INVALID_TRANSITION").await?;
    Ok(())
}

// ============================================================================
// Feedback
// ============================================================================

#[tokio::test]
async fn test_feedback_after_event_concludes() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let owner = organiser(&server).await?;
    let event_id = create_event(&server, &owner).await?;

    let email = unique_email("vol");
    let member = server.register(&RegisterRequest::member(&email)).await?;
    let enrollment = sign_up(&server, &event_id, &email).await?;
    let id = enrollment["participation"]["id"].as_i64().unwrap_or_default();

    let eligibility_path = format!("/events/{event_id}/feedback/eligibility");
    let feedback_path = format!("/events/{event_id}/feedback");
    let request = FeedbackRequest {
        rating: 5,
        comment: "Well organised".to_string(),
        anonymous: false,
    };

    // Not approved and not concluded yet
    let response = server.get_auth(&eligibility_path, &member).await?;
    let eligibility = assert_json(response, StatusCode::OK).await?;
    assert_eq!(eligibility["eligible"], false);

    assert_status(
        server
            .post_empty_auth(&format!("/participations/{id}/approve"), &owner)
            .await?,
        StatusCode::OK,
    )
    .await?;

    let response = server.post_auth(&feedback_path, &member, &request).await?;
    assert_error(response, StatusCode::UNPROCESSABLE_ENTITY, "FEEDBACK_NOT_OPEN").await?;

    server.clock.advance(Duration::days(11));

    let response = server.get_auth(&eligibility_path, &member).await?;
    let eligibility = assert_json(response, StatusCode::OK).await?;
    assert_eq!(eligibility["eligible"], true);

    let feedback = assert_json(
        server.post_auth(&feedback_path, &member, &request).await?,
        StatusCode::CREATED,
    )
    .await?;
    assert_eq!(feedback["rating"], 5);
    assert_eq!(feedback["volunteer_id"], "V001");

    let response = server.post_auth(&feedback_path, &member, &request).await?;
    assert_error(response, StatusCode::CONFLICT, "FEEDBACK_ALREADY_SUBMITTED").await?;

    let listed = assert_json(server.get(&feedback_path).await?, StatusCode::OK).await?;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    Ok(())
}

// ============================================================================
// Gallery postings and profiles
// ============================================================================

#[tokio::test]
async fn test_posting_gallery_lifecycle() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let owner = organiser(&server).await?;
    let rival = organiser(&server).await?;
    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0];

    let response = server
        .post_photo("/postings", &owner, "Harvest day", "harvest.jpg", jpeg.clone())
        .await?;
    let posting = assert_json(response, StatusCode::CREATED).await?;
    assert_eq!(posting["id"], "P001");
    let id = posting["id"].as_str().unwrap_or_default().to_string();
    let url = posting["photo_url"].as_str().unwrap_or_default().to_string();
    assert!(url.contains("/postings/"), "{url}");
    assert_eq!(server.get_raw(&url).await?.bytes().await?.to_vec(), jpeg);

    let gallery = assert_json(server.get("/postings").await?, StatusCode::OK).await?;
    assert_eq!(gallery.as_array().map(Vec::len), Some(1));

    let path = format!("/postings/{id}");
    let rename = json!({ "title": "Harvest festival" });
    let response = server.patch_auth(&path, &rival, &rename).await?;
    assert_error(response, StatusCode::FORBIDDEN, "NOT_POSTING_OWNER").await?;

    let response = server.patch_auth(&path, &owner, &rename).await?;
    let renamed = assert_json(response, StatusCode::OK).await?;
    assert_eq!(renamed["title"], "Harvest festival");

    let response = server.get_auth("/postings/managed", &rival).await?;
    let managed = assert_json(response, StatusCode::OK).await?;
    assert_eq!(managed.as_array().map(Vec::len), Some(0));

    let member = server
        .register(&RegisterRequest::member(&unique_email("mem")))
        .await?;
    let response = server
        .post_photo("/postings", &member, "Mine", "mine.jpg", jpeg)
        .await?;
    assert_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE").await?;

    assert_status(server.delete_auth(&path, &owner).await?, StatusCode::NO_CONTENT).await?;
    assert_error(server.get(&path).await?, StatusCode::NOT_FOUND, "UNKNOWN_POSTING").await?;
    Ok(())
}

#[tokio::test]
async fn test_member_updates_profile() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let token = server
        .register(&RegisterRequest::member(&unique_email("mem")))
        .await?;

    let response = server
        .patch_auth("/users/@me", &token, &json!({ "name": "Mira Tan" }))
        .await?;
    let user = assert_json(response, StatusCode::OK).await?;
    assert_eq!(user["name"], "Mira Tan");

    let png = vec![0x89, b'P', b'N', b'G'];
    let response = server
        .put_photo("/users/@me/photo", &token, "me.png", "image/png", png)
        .await?;
    let user = assert_json(response, StatusCode::OK).await?;
    let url = user["photo_url"].as_str().unwrap_or_default().to_string();
    assert!(url.contains("/members/"), "{url}");

    let response = server
        .patch_auth("/users/@me", &token, &json!({ "name": "  " }))
        .await?;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await?;

    let current = assert_json(server.get_auth("/users/@me", &token).await?, StatusCode::OK).await?;
    assert_eq!(current["name"], "Mira Tan");
    assert_eq!(current["photo_url"].as_str(), Some(url.as_str()));
    Ok(())
}

// ============================================================================
// Donations, leaderboard, dashboard
// ============================================================================

#[tokio::test]
async fn test_donations_and_leaderboard() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let owner = organiser(&server).await?;
    let event_id = create_event(&server, &owner).await?;

    let email = unique_email("donor");
    let donor = server.register(&RegisterRequest::member(&email)).await?;

    let donation = assert_json(
        server
            .post_auth(
                "/donations",
                &donor,
                &DonateRequest::card(&event_id, "250.00", "4111 1111 1111 1111"),
            )
            .await?,
        StatusCode::CREATED,
    )
    .await?;
    assert_eq!(donation["amount"], "250.00");
    assert_eq!(donation["donor_email"], email.as_str());
    let reference = donation["payment_reference"].as_str().unwrap_or_default();
    assert!(reference.starts_with("card:1111:"), "{reference}");
    assert!(!reference.contains("4111111111111111"));

    let mine = assert_json(server.get_auth("/donations/@me", &donor).await?, StatusCode::OK).await?;
    assert_eq!(mine.as_array().map(Vec::len), Some(1));

    assert_status(server.get_auth("/donations", &donor).await?, StatusCode::FORBIDDEN).await?;

    let admin = server.admin_token().await?;
    let summary = assert_json(server.get_auth("/donations", &admin).await?, StatusCode::OK).await?;
    assert_eq!(summary["donation_count"], 1);
    assert_eq!(summary["total_amount"], "250.00");

    let board = assert_json(server.get("/leaderboard").await?, StatusCode::OK).await?;
    let top = &board["entries"][0];
    assert_eq!(top["email"], email.as_str());
    assert_eq!(top["donation_points"], 250);
    assert_eq!(top["rank"], 1);
    Ok(())
}

#[tokio::test]
async fn test_event_with_donations_cannot_be_deleted() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let owner = organiser(&server).await?;
    let donated = create_event(&server, &owner).await?;
    let quiet = create_event(&server, &owner).await?;

    assert_status(
        server
            .post_auth("/donations", &owner, &DonateRequest::banking(&donated, "10.00"))
            .await?,
        StatusCode::CREATED,
    )
    .await?;

    let response = server.delete_auth(&format!("/events/{donated}"), &owner).await?;
    assert_error(response, StatusCode::CONFLICT, "EVENT_HAS_DONATIONS").await?;

    let response = server.delete_auth(&format!("/events/{quiet}"), &owner).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;
    assert_status(server.get(&format!("/events/{quiet}")).await?, StatusCode::NOT_FOUND).await?;
    Ok(())
}

#[tokio::test]
async fn test_admin_dashboard() -> anyhow::Result<()> {
    let server = TestServer::start().await?;
    let owner = organiser(&server).await?;
    let event_id = create_event(&server, &owner).await?;
    sign_up(&server, &event_id, &unique_email("vol")).await?;

    assert_status(
        server.get_auth("/admin/dashboard", &owner).await?,
        StatusCode::FORBIDDEN,
    )
    .await?;

    let admin = server.admin_token().await?;
    let response = server.get_auth("/admin/dashboard", &admin).await?;
    let dashboard = assert_json(response, StatusCode::OK).await?;
    assert_eq!(dashboard["users"]["admin"], 1);
    assert_eq!(dashboard["users"]["organiser"], 1);
    assert_eq!(dashboard["events"]["upcoming"], 1);
    assert_eq!(dashboard["pending_approvals"], 1);
    assert_eq!(dashboard["total_volunteers"], 1);
    Ok(())
}
