//! Reservation engine integration tests
//!
//! Drive the engine from bearer tokens through the service layer into the
//! in-memory store. No external services are required.
//!
//! Run with: cargo test -p integration-tests --test engine_tests

use integration_tests::{
    assert_kind, new_customer, reservation_request, status_request, TestEngine, CELLAR, HARBOR,
    OWNER_ONE, OWNER_TWO, ROOFTOP,
};
use venue_core::{Identity, ReservationStatus, UserId, UserRole};
use venue_service::{ErrorKind, ReservationService};

// ============================================================================
// Scenario
// ============================================================================

#[tokio::test]
async fn test_booking_scenario() {
    let engine = TestEngine::start().unwrap();
    let owner = engine
        .authenticate(&engine.token_for(Identity::owner(OWNER_ONE)).unwrap())
        .unwrap();
    let first = engine
        .authenticate(&engine.token_for(new_customer()).unwrap())
        .unwrap();
    let second = engine
        .authenticate(&engine.token_for(new_customer()).unwrap())
        .unwrap();
    let reservations = engine.reservations();

    let mut request = reservation_request(HARBOR, "2025-06-01 19:00");
    request.notes = Some("Anniversary".to_string());
    let created = reservations.create_reservation(&first, request).await.unwrap();
    assert_eq!(created.status, ReservationStatus::Pending);
    assert_eq!(created.party_size, 2);
    assert_eq!(created.venue_name, "Harbor Grill");

    assert_kind(
        reservations
            .create_reservation(&second, reservation_request(HARBOR, "2025-06-01 19:00"))
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

    assert_eq!(engine.store.reservation_count(), 1);
}

// ============================================================================
// Identity
// ============================================================================

#[tokio::test]
async fn test_token_roles_drive_authorization() {
    let engine = TestEngine::start().unwrap();

    let token = engine.token_for(Identity::owner(OWNER_ONE)).unwrap();
    let owner = engine.authenticate(&token).unwrap();
    assert_eq!(owner.role, UserRole::Owner);

    assert_kind(
        engine
            .reservations()
            .create_reservation(&owner, reservation_request(HARBOR, "2025-06-01 19:00"))
            .await,
        ErrorKind::Forbidden,
    )
    .unwrap();
}

#[test]
fn test_bad_tokens_are_unauthenticated() {
    let engine = TestEngine::start().unwrap();

    assert_kind(engine.authenticate(""), ErrorKind::Unauthenticated).unwrap();
    assert_kind(engine.authenticate("Bearer not-a-jwt"), ErrorKind::Unauthenticated).unwrap();

    let foreign = venue_common::JwtService::new("some-other-secret-entirely-000000", 3600)
        .issue_token(Identity::customer(UserId::new(1)))
        .unwrap();
    assert_kind(engine.authenticate(&foreign), ErrorKind::Unauthenticated).unwrap();
}

// ============================================================================
// Properties
// ============================================================================

#[tokio::test]
async fn test_past_times_always_rejected() {
    let engine = TestEngine::start().unwrap();
    let reservations = engine.reservations();

    for venue in [HARBOR, ROOFTOP, CELLAR, venue_core::VenueId::new(999)] {
        for time in ["2025-05-01 12:00", "2025-05-01 11:59", "1999-12-31 23:59"] {
            assert_kind(
                reservations
                    .create_reservation(&new_customer(), reservation_request(venue, time))
                    .await,
                ErrorKind::PastDate,
            )
            .unwrap();
        }
    }
    assert_eq!(engine.store.reservation_count(), 0);
}

#[tokio::test]
async fn test_list_completeness() {
    let engine = TestEngine::start().unwrap();
    let reservations = engine.reservations();
    let customer = new_customer();
    let other = new_customer();

    let times = ["2025-06-01 18:00", "2025-06-01 19:00", "2025-06-02 18:00"];
    let venues = [HARBOR, ROOFTOP, CELLAR];
    for (venue, time) in venues.into_iter().zip(times) {
        reservations
            .create_reservation(&customer, reservation_request(venue, time))
            .await
            .unwrap();
    }
    reservations
        .create_reservation(&other, reservation_request(CELLAR, "2025-06-03 18:00"))
        .await
        .unwrap();

    let mine = reservations.list_reservations(&customer).await.unwrap();
    assert_eq!(mine.len(), 3);
    assert!(mine.windows(2).all(|w| w[0].id < w[1].id));

    let first_owner = reservations
        .list_reservations(&Identity::owner(OWNER_ONE))
        .await
        .unwrap();
    assert_eq!(first_owner.len(), 2);
    assert!(first_owner
        .iter()
        .all(|r| r.venue_id == HARBOR || r.venue_id == ROOFTOP));

    let second_owner = reservations
        .list_reservations(&Identity::owner(OWNER_TWO))
        .await
        .unwrap();
    assert_eq!(second_owner.len(), 2);
    assert!(second_owner.iter().all(|r| r.venue_id == CELLAR));
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let engine = TestEngine::start().unwrap();
    let customer = new_customer();

    for id in [1, 42, i64::MAX] {
        assert_kind(
            engine
                .reservations()
                .delete_reservation(&customer, venue_core::ReservationId::new(id))
                .await,
            ErrorKind::NotFound,
        )
        .unwrap();
    }
}

#[tokio::test]
async fn test_cancelled_then_deleted_frees_slot() {
    let engine = TestEngine::start().unwrap();
    let reservations = engine.reservations();
    let customer = new_customer();

    let r = reservations
        .create_reservation(&customer, reservation_request(HARBOR, "2025-06-01 19:00"))
        .await
        .unwrap();
    reservations
        .update_status(&Identity::owner(OWNER_ONE), r.id, status_request("cancelled"))
        .await
        .unwrap();

    // A cancelled booking still occupies its slot until deleted
    assert_kind(
        reservations
            .create_reservation(&new_customer(), reservation_request(HARBOR, "2025-06-01 19:00"))
            .await,
        ErrorKind::SlotTaken,
    )
    .unwrap();

    reservations.delete_reservation(&customer, r.id).await.unwrap();
    reservations
        .create_reservation(&new_customer(), reservation_request(HARBOR, "2025-06-01 19:00"))
        .await
        .unwrap();
}

// ============================================================================
// Concurrency and atomicity
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_for_one_slot() {
    let engine = TestEngine::start().unwrap();

    let attempts = (0..20).map(|_| {
        let ctx = engine.ctx.clone();
        tokio::spawn(async move {
            ReservationService::new(&ctx)
                .create_reservation(
                    &new_customer(),
                    reservation_request(ROOFTOP, "2025-07-04 21:00"),
                )
                .await
        })
    });

    let results: Vec<_> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let losers = results
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::SlotTaken))
        .count();
    assert_eq!(winners, 1);
    assert_eq!(losers, 19);
    assert_eq!(engine.store.reservation_count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_status_changes_settle_once() {
    let engine = TestEngine::start().unwrap();
    let customer = new_customer();
    let r = engine
        .reservations()
        .create_reservation(&customer, reservation_request(CELLAR, "2025-07-04 20:00"))
        .await
        .unwrap();
    let id = r.id;

    let attempts = ["confirmed", "rejected", "cancelled", "rejected"].map(|token| {
        let ctx = engine.ctx.clone();
        tokio::spawn(async move {
            ReservationService::new(&ctx)
                .update_status(&Identity::owner(OWNER_TWO), id, status_request(token))
                .await
        })
    });

    let results: Vec<_> = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    // Two requests for the same target may both succeed: the later one is a
    // no-op write of the current state.
    let settled: Vec<_> = results
        .iter()
        .filter_map(|r| r.as_ref().ok().map(|ok| ok.status))
        .collect();
    assert!(!settled.is_empty());
    assert!(settled.iter().all(|status| *status == settled[0]));
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.kind() == ErrorKind::InvalidTransition));

    let current = engine
        .reservations()
        .get_reservation(&customer, id)
        .await
        .unwrap();
    assert_eq!(current.status, settled[0]);
}

#[tokio::test]
async fn test_store_failure_leaves_data_untouched() {
    let engine = TestEngine::start().unwrap();
    let reservations = engine.reservations();
    let customer = new_customer();
    let owner = Identity::owner(OWNER_ONE);

    let r = reservations
        .create_reservation(&customer, reservation_request(HARBOR, "2025-06-01 19:00"))
        .await
        .unwrap();
    let before = reservations.list_reservations(&owner).await.unwrap();

    engine.store.fail_next_write();
    assert_kind(
        reservations
            .create_reservation(&customer, reservation_request(HARBOR, "2025-06-01 20:00"))
            .await,
        ErrorKind::StoreFailure,
    )
    .unwrap();

    engine.store.fail_next_write();
    assert_kind(
        reservations
            .update_status(&owner, r.id, status_request("rejected"))
            .await,
        ErrorKind::StoreFailure,
    )
    .unwrap();

    engine.store.fail_next_write();
    assert_kind(
        reservations.delete_reservation(&customer, r.id).await,
        ErrorKind::StoreFailure,
    )
    .unwrap();

    let after = reservations.list_reservations(&owner).await.unwrap();
    assert_eq!(before, after);
}
