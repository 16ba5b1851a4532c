mod common;

use admission_backend::domain::models::activity_log::{ActivityLogDraft, LogType};
use admission_backend::domain::models::operator::Capability;
use admission_backend::domain::ports::{ActivityLogRepository, GuestRepository};
use admission_backend::error::{AppError, ErrorCode};
use axum::http::StatusCode;
use chrono::Utc;
use common::{parse_body, seeded_guest, wristband_code, Period, TestApp};
use serde_json::json;

struct Scene {
    app: TestApp,
    reservation_id: String,
}

/// One in-window reservation large enough for every test party.
async fn scene() -> Scene {
    let app = TestApp::new().await;
    let term = app.create_term(Period::In, "GuestBlue").await;
    let reservation = app.create_reservation(&term, 10).await;
    Scene {
        app,
        reservation_id: reservation.id,
    }
}

impl Scene {
    async fn admit(&self) -> String {
        let code = wristband_code("GB");
        let token = self.app.executive_token();
        let response = self
            .app
            .post(
                "/guests/check-in",
                &token,
                json!({ "guest_id": code, "reservation_id": self.reservation_id }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        code
    }
}

#[tokio::test]
async fn enter_records_the_room() {
    let s = scene().await;
    s.app.create_exhibition("E-1", 5).await;
    let guest = s.admit().await;
    let token = s.app.token("E-1", &[Capability::Exhibition]);

    let response = s
        .app
        .post(
            &format!("/guests/{guest}/enter"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["exhibition_id"], "E-1");

    let logs = s
        .app
        .state
        .activity_log_repo
        .list_by_guest(&guest)
        .await
        .unwrap();
    let enter = logs.last().unwrap();
    assert_eq!(enter.log_type, "enter");
    assert_eq!(enter.exhibition_id.as_deref(), Some("E-1"));
}

#[tokio::test]
async fn enter_unknown_exhibition_fails() {
    let s = scene().await;
    let guest = s.admit().await;
    let token = s.app.admin_token();

    let response = s
        .app
        .post(
            &format!("/guests/{guest}/enter"),
            &token,
            json!({ "exhibition_id": "E-missing" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error_code"], "EXHIBITION_NOT_FOUND");
}

#[tokio::test]
async fn enter_unknown_guest_is_not_found() {
    let s = scene().await;
    s.app.create_exhibition("E-1", 5).await;
    let token = s.app.admin_token();

    let response = s
        .app
        .post(
            "/guests/GB-2345J/enter",
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_body(response).await;
    assert_eq!(body["error_code"], "GUEST_NOT_FOUND");
}

#[tokio::test]
async fn enter_the_same_room_twice_fails() {
    let s = scene().await;
    s.app.create_exhibition("E-1", 5).await;
    let guest = s.admit().await;
    let token = s.app.admin_token();

    s.app
        .post(
            &format!("/guests/{guest}/enter"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;
    let response = s
        .app
        .post(
            &format!("/guests/{guest}/enter"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error_code"], "GUEST_ALREADY_ENTERED");
}

#[tokio::test]
async fn moving_rooms_overwrites_without_an_exit_log() {
    let s = scene().await;
    s.app.create_exhibition("E-1", 5).await;
    s.app.create_exhibition("E-2", 5).await;
    let guest = s.admit().await;
    let token = s.app.admin_token();

    s.app
        .post(
            &format!("/guests/{guest}/enter"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;
    let response = s
        .app
        .post(
            &format!("/guests/{guest}/enter"),
            &token,
            json!({ "exhibition_id": "E-2" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["exhibition_id"], "E-2");

    let logs = s
        .app
        .state
        .activity_log_repo
        .list_by_guest(&guest)
        .await
        .unwrap();
    let kinds: Vec<&str> = logs.iter().map(|l| l.log_type.as_str()).collect();
    assert_eq!(kinds, vec!["check-in", "enter", "enter"]);
}

#[tokio::test]
async fn capacity_frees_up_when_someone_exits() {
    let s = scene().await;
    s.app.create_exhibition("E-1", 2).await;
    let token = s.app.admin_token();

    let first = s.admit().await;
    let second = s.admit().await;
    let third = s.admit().await;

    for guest in [&first, &second] {
        let response = s
            .app
            .post(
                &format!("/guests/{guest}/enter"),
                &token,
                json!({ "exhibition_id": "E-1" }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = s
        .app
        .post(
            &format!("/guests/{third}/enter"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error_code"], "PEOPLE_LIMIT_EXCEEDED");

    let response = s
        .app
        .post(
            &format!("/guests/{first}/exit"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = s
        .app
        .post(
            &format!("/guests/{third}/enter"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn revoked_guests_cannot_enter_or_exit() {
    let s = scene().await;
    s.app.create_exhibition("E-1", 5).await;
    let guest = s.admit().await;
    let executive = s.app.executive_token();
    let admin = s.app.admin_token();

    s.app
        .post(&format!("/guests/{guest}/check-out"), &executive, json!({}))
        .await;

    for action in ["enter", "exit"] {
        let response = s
            .app
            .post(
                &format!("/guests/{guest}/{action}"),
                &admin,
                json!({ "exhibition_id": "E-1" }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{action}");
        let body = parse_body(response).await;
        assert_eq!(body["error_code"], "GUEST_ALREADY_CHECKED_OUT");
    }
}

#[tokio::test]
async fn enter_after_the_exit_time_fails() {
    let app = TestApp::new().await;
    let term = app.create_term(Period::After, "GuestBlue").await;
    let reservation = app.create_reservation(&term, 2).await;
    app.create_exhibition("E-1", 5).await;
    let code = wristband_code("GB");
    app.insert_guest(&seeded_guest(&code, &term, &reservation))
        .await;
    let token = app.admin_token();

    let response = app
        .post(
            &format!("/guests/{code}/enter"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error_code"], "EXIT_TIME_EXCEEDED");
}

#[tokio::test]
async fn exit_while_in_no_room_still_logs() {
    let s = scene().await;
    s.app.create_exhibition("E-1", 5).await;
    let guest = s.admit().await;
    let token = s.app.admin_token();

    let response = s
        .app
        .post(
            &format!("/guests/{guest}/exit"),
            &token,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert!(body["exhibition_id"].is_null());

    let logs = s
        .app
        .state
        .activity_log_repo
        .list_by_guest(&guest)
        .await
        .unwrap();
    let exit = logs.last().unwrap();
    assert_eq!(exit.log_type, "exit");
    assert_eq!(exit.exhibition_id.as_deref(), Some("E-1"));
}

// Exercises the store writes directly, standing in for a check-out that
// commits between the transition's revocation check and its final write.
#[tokio::test]
async fn store_writes_refuse_guests_revoked_after_the_lookup() {
    let app = TestApp::new().await;
    let term = app.create_term(Period::In, "GuestBlue").await;
    let reservation = app.create_reservation(&term, 2).await;
    app.create_exhibition("E-1", 5).await;
    let code = wristband_code("GB");
    let now = Utc::now();

    let mut guest = seeded_guest(&code, &term, &reservation);
    guest.revoked_at = Some(now);
    app.insert_guest(&guest).await;

    let log = ActivityLogDraft {
        timestamp: now,
        guest_id: code.clone(),
        exhibition_id: Some("E-1".to_string()),
        log_type: LogType::Enter,
        verified: true,
    };

    let err = app
        .state
        .guest_repo
        .enter_exhibition(&code, "E-1", 5, &log)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Code(ErrorCode::GuestAlreadyCheckedOut)
    ));

    let err = app
        .state
        .guest_repo
        .exit_exhibition(&code, &log)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Code(ErrorCode::GuestAlreadyCheckedOut)
    ));

    let err = app
        .state
        .guest_repo
        .check_out(&code, &reservation, now, &log)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Code(ErrorCode::GuestAlreadyCheckedOut)
    ));

    // the row stays revoked and outside any room
    let unchanged = app.find_guest(&code).await.unwrap();
    assert!(unchanged.revoked_at.is_some());
    assert!(unchanged.exhibition_id.is_none());
}

#[tokio::test]
async fn room_operators_are_confined_to_their_room() {
    let s = scene().await;
    s.app.create_exhibition("E-1", 5).await;
    s.app.create_exhibition("E-2", 5).await;
    let guest = s.admit().await;
    let other_room = s.app.token("E-2", &[Capability::Exhibition]);

    let response = s
        .app
        .post(
            &format!("/guests/{guest}/enter"),
            &other_room,
            json!({ "exhibition_id": "E-1" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // admins are not confined
    let response = s
        .app
        .post(
            &format!("/guests/{guest}/enter"),
            &s.app.admin_token(),
            json!({ "exhibition_id": "E-1" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}
