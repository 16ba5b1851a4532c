#![allow(dead_code)]

use admission_backend::{
    api::router::create_router,
    config::Config,
    domain::models::{
        exhibition::Exhibition,
        guest::Guest,
        operator::{Capability, Claims},
        reservation::Reservation,
        term::Term,
    },
    domain::ports::{
        ExhibitionRepository, GuestRepository, ReservationRepository, TermRepository,
    },
    domain::wristband,
    infra::factory::{build_sqlite_state, run_sqlite_migrations},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use rand::Rng;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

const TEST_SECRET: &str = "test-secret";

/// Where a term's window sits relative to the wall clock.
#[derive(Clone, Copy)]
pub enum Period {
    Before,
    In,
    After,
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        // a single connection keeps the in-memory database alive and shared
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .unwrap();
        run_sqlite_migrations(&pool).await;

        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            jwt_secret: TEST_SECRET.to_string(),
        };
        let state = Arc::new(build_sqlite_state(config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            state,
            pool,
        }
    }

    pub fn token(&self, operator_id: &str, perms: &[Capability]) -> String {
        let claims = Claims {
            sub: operator_id.to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
            perms: perms.to_vec(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    pub fn executive_token(&self) -> String {
        self.token("op-executive", &[Capability::Executive])
    }

    pub fn admin_token(&self) -> String {
        self.token("op-admin", &[Capability::Admin])
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn post_unauthenticated(&self, path: &str, body: Value) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn create_term(&self, period: Period, guest_type: &str) -> Term {
        let now = Utc::now();
        let (enter, exit) = match period {
            Period::Before => (now + Duration::hours(1), now + Duration::hours(3)),
            Period::In => (now - Duration::hours(1), now + Duration::hours(3)),
            Period::After => (now - Duration::hours(3), now - Duration::hours(1)),
        };
        let term = Term {
            id: format!("T-{}", uuid::Uuid::new_v4()),
            enter_scheduled_time: enter,
            exit_scheduled_time: exit,
            guest_type: guest_type.to_string(),
        };
        self.state.term_repo.create(&term).await.unwrap()
    }

    pub async fn create_reservation(&self, term: &Term, member_all: i64) -> Reservation {
        let reservation = Reservation {
            id: format!("R-{}", uuid::Uuid::new_v4()),
            term_id: term.id.clone(),
            member_all,
        };
        self.state
            .reservation_repo
            .create(&reservation)
            .await
            .unwrap()
    }

    pub async fn create_exhibition(&self, id: &str, capacity: i64) -> Exhibition {
        let exhibition = Exhibition {
            id: id.to_string(),
            name: format!("Exhibition {id}"),
            capacity,
            room_id: format!("room-{id}"),
            updated_at: Utc::now(),
        };
        self.state
            .exhibition_repo
            .create(&exhibition)
            .await
            .unwrap()
    }

    /// Seed a guest row directly, bypassing the admission transitions.
    pub async fn insert_guest(&self, guest: &Guest) {
        sqlx::query(
            "INSERT INTO guests (id, term_id, reservation_id, is_spare, registered_at, revoked_at, is_force_revoked, exhibition_id)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&guest.id)
        .bind(&guest.term_id)
        .bind(&guest.reservation_id)
        .bind(guest.is_spare)
        .bind(guest.registered_at)
        .bind(guest.revoked_at)
        .bind(guest.is_force_revoked)
        .bind(&guest.exhibition_id)
        .execute(&self.pool)
        .await
        .unwrap();
    }

    pub async fn find_guest(&self, id: &str) -> Option<Guest> {
        self.state.guest_repo.find_by_id(id).await.unwrap()
    }
}

/// A fresh wristband code with a correct checksum.
pub fn wristband_code(prefix: &str) -> String {
    let alphabet: Vec<char> = wristband::ALPHABET.chars().collect();
    let mut rng = rand::thread_rng();
    let payload: String = (0..4)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect();
    let check = wristband::checksum(&payload).unwrap();
    format!("{prefix}-{payload}{check}")
}

pub fn seeded_guest(id: &str, term: &Term, reservation: &Reservation) -> Guest {
    Guest {
        id: id.to_string(),
        term_id: term.id.clone(),
        reservation_id: reservation.id.clone(),
        is_spare: false,
        registered_at: Utc::now(),
        revoked_at: None,
        is_force_revoked: false,
        exhibition_id: None,
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
