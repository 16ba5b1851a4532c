mod common;

use admission_backend::domain::models::operator::Capability;
use admission_backend::domain::ports::ActivityLogRepository;
use axum::http::StatusCode;
use common::{parse_body, seeded_guest, wristband_code, Period, TestApp};
use serde_json::json;

#[tokio::test]
async fn register_spare_after_a_member_checked_in() {
    let app = TestApp::new().await;
    let term = app.create_term(Period::In, "GuestBlue").await;
    let reservation = app.create_reservation(&term, 1).await;
    let token = app.executive_token();
    let spare = wristband_code("GB");

    app.post(
        "/guests/check-in",
        &token,
        json!({ "guest_id": wristband_code("GB"), "reservation_id": reservation.id }),
    )
    .await;

    let response = app
        .post(
            "/guests/register-spare",
            &token,
            json!({ "guest_id": spare, "reservation_id": reservation.id }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["id"], spare);
    assert_eq!(body["is_spare"], true);

    let logs = app
        .state
        .activity_log_repo
        .list_by_guest(&spare)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].log_type, "register-spare");
}

#[tokio::test]
async fn register_spare_before_any_member_fails() {
    let app = TestApp::new().await;
    let term = app.create_term(Period::In, "GuestBlue").await;
    let reservation = app.create_reservation(&term, 2).await;
    let token = app.executive_token();

    let response = app
        .post(
            "/guests/register-spare",
            &token,
            json!({ "guest_id": wristband_code("GB"), "reservation_id": reservation.id }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error_code"], "NO_MEMBER_CHECKED_IN");
}

#[tokio::test]
async fn register_spare_after_the_exit_time_fails() {
    let app = TestApp::new().await;
    let term = app.create_term(Period::After, "GuestBlue").await;
    let reservation = app.create_reservation(&term, 2).await;
    // a member got in while the window was still open
    app.insert_guest(&seeded_guest(&wristband_code("GB"), &term, &reservation))
        .await;
    let token = app.executive_token();

    let response = app
        .post(
            "/guests/register-spare",
            &token,
            json!({ "guest_id": wristband_code("GB"), "reservation_id": reservation.id }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error_code"], "EXIT_TIME_EXCEEDED");
}

#[tokio::test]
async fn spares_are_not_capped_by_member_all() {
    let app = TestApp::new().await;
    let term = app.create_term(Period::In, "GuestBlue").await;
    let reservation = app.create_reservation(&term, 1).await;
    let token = app.executive_token();

    app.post(
        "/guests/check-in",
        &token,
        json!({ "guest_id": wristband_code("GB"), "reservation_id": reservation.id }),
    )
    .await;

    // spares keep working past the member cap
    for _ in 0..3 {
        let response = app
            .post(
                "/guests/register-spare",
                &token,
                json!({ "guest_id": wristband_code("GB"), "reservation_id": reservation.id }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn register_spare_validates_the_code() {
    let app = TestApp::new().await;
    let term = app.create_term(Period::In, "GuestBlue").await;
    let reservation = app.create_reservation(&term, 1).await;
    let token = app.executive_token();
    let member = wristband_code("GB");

    app.post(
        "/guests/check-in",
        &token,
        json!({ "guest_id": member, "reservation_id": reservation.id }),
    )
    .await;

    let cases = [
        (json!("GB-234"), "INVALID_WRISTBAND_CODE"),
        (json!(wristband_code("TR")), "WRONG_WRISTBAND_COLOR"),
        (json!(member), "ALREADY_USED_WRISTBAND"),
    ];
    for (guest_id, expected) in cases {
        let response = app
            .post(
                "/guests/register-spare",
                &token,
                json!({ "guest_id": guest_id, "reservation_id": reservation.id }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(response).await;
        assert_eq!(body["error_code"], expected);
    }
}

#[tokio::test]
async fn register_spare_requires_executive_capability() {
    let app = TestApp::new().await;
    let token = app.token("E-1", &[Capability::Exhibition]);

    let response = app
        .post(
            "/guests/register-spare",
            &token,
            json!({ "guest_id": "GB-2345J", "reservation_id": "R-1" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
