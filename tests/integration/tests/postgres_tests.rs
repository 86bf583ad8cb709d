//! PostgreSQL-backed engine tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET_KEY
//!
//! Run with: cargo test -p integration-tests --test postgres_tests

use chrono::{Duration, Utc};
use integration_tests::{
    assert_kind, check_test_env, reservation_request, status_request, test_config, unique_suffix,
};
use sqlx::PgPool;
use venue_common::JwtService;
use venue_core::{Identity, ReservationStatus, ReservationTime, UserId, VenueId};
use venue_service::{AuthorizationService, ErrorKind, ReservationService, ServiceContext};

async fn insert_user(pool: &PgPool, user_type: &str) -> UserId {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, user_type) VALUES ($1, $2) RETURNING id",
    )
    .bind(format!("it_{user_type}_{}_{}", Utc::now().timestamp_micros(), unique_suffix()))
    .bind(user_type)
    .fetch_one(pool)
    .await
    .unwrap();
    UserId::new(id)
}

async fn insert_venue(pool: &PgPool, owner: UserId) -> VenueId {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO venues (name, owner_id) VALUES ($1, $2) RETURNING id")
            .bind(format!("it_venue_{}_{}", Utc::now().timestamp_micros(), unique_suffix()))
            .bind(owner.into_inner())
            .fetch_one(pool)
            .await
            .unwrap();
    VenueId::new(id)
}

async fn remove_users(pool: &PgPool, users: &[UserId]) {
    let ids: Vec<i64> = users.iter().map(|u| u.into_inner()).collect();
    sqlx::query("DELETE FROM users WHERE id = ANY($1)")
        .bind(&ids)
        .execute(pool)
        .await
        .unwrap();
}

fn future_slot() -> String {
    ReservationTime::from_datetime(Utc::now() + Duration::days(60)).to_string()
}

#[tokio::test]
async fn test_scenario_against_postgres() {
    if !check_test_env() {
        return;
    }

    let config = test_config().unwrap();
    let ctx = ServiceContext::connect(&config).await.unwrap();
    let pool = PgPool::connect(&config.database.url).await.unwrap();

    let owner_id = insert_user(&pool, "owner").await;
    let first_id = insert_user(&pool, "customer").await;
    let second_id = insert_user(&pool, "customer").await;
    let venue = insert_venue(&pool, owner_id).await;

    let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry);
    let auth = AuthorizationService::new(&ctx);
    let first = auth
        .authenticate(&jwt.issue_token(Identity::customer(first_id)).unwrap())
        .unwrap();
    let owner = auth
        .authenticate(&jwt.issue_token(Identity::owner(owner_id)).unwrap())
        .unwrap();
    let second = Identity::customer(second_id);

    let reservations = ReservationService::new(&ctx);
    let slot = future_slot();

    let created = reservations
        .create_reservation(&first, reservation_request(venue, &slot))
        .await
        .unwrap();
    assert_eq!(created.status, ReservationStatus::Pending);
    assert_eq!(created.reservation_time.to_string(), slot);

    assert_kind(
        reservations
            .create_reservation(&second, reservation_request(venue, &slot))
            .await,
        ErrorKind::SlotTaken,
    )
    .unwrap();

    let confirmed = reservations
        .update_status(&owner, created.id, status_request("confirmed"))
        .await
        .unwrap();
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    assert_kind(
        reservations
            .update_status(&second, created.id, status_request("confirmed"))
            .await,
        ErrorKind::Forbidden,
    )
    .unwrap();

    let listed = reservations
        .list_venue_reservations(&owner, venue)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    reservations
        .delete_reservation(&first, created.id)
        .await
        .unwrap();
    assert_kind(
        reservations.get_reservation(&first, created.id).await,
        ErrorKind::NotFound,
    )
    .unwrap();

    remove_users(&pool, &[first_id, second_id, owner_id]).await;
}

#[tokio::test]
async fn test_concurrent_creates_against_postgres() {
    if !check_test_env() {
        return;
    }

    let config = test_config().unwrap();
    let ctx = ServiceContext::connect(&config).await.unwrap();
    let pool = PgPool::connect(&config.database.url).await.unwrap();

    let owner_id = insert_user(&pool, "owner").await;
    let venue = insert_venue(&pool, owner_id).await;
    let mut users = vec![owner_id];
    for _ in 0..6 {
        users.push(insert_user(&pool, "customer").await);
    }

    let slot = future_slot();
    let attempts = users[1..].iter().map(|&customer| {
        let ctx = ctx.clone();
        let slot = slot.clone();
        tokio::spawn(async move {
            ReservationService::new(&ctx)
                .create_reservation(
                    &Identity::customer(customer),
                    reservation_request(venue, &slot),
                )
                .await
        })
    });

    let results: Vec<_> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.kind() == ErrorKind::SlotTaken));

    remove_users(&pool, &users).await;
}
