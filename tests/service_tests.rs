use chrono::{TimeDelta, TimeZone, Utc};
use paylink::application::service::PaymentRequestService;
use paylink::domain::payment_request::{DisplayStatus, PaymentStatus};
use paylink::domain::ports::Clock;
use paylink::domain::validation::CandidateRequest;
use paylink::error::PaymentError;
use paylink::infrastructure::clock::ManualClock;
use paylink::infrastructure::in_memory::InMemoryPaymentRequestStore;
use rand::seq::SliceRandom;
use rust_decimal_macros::dec;

fn setup() -> (PaymentRequestService, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap());
    let service = PaymentRequestService::new(
        Box::new(InMemoryPaymentRequestStore::new()),
        Box::new(clock.clone()),
    );
    (service, clock)
}

fn candidate(clock: &ManualClock, name: &str) -> CandidateRequest {
    CandidateRequest::from_parts(name, dec!(100), clock.now() + TimeDelta::hours(1))
}

#[tokio::test]
async fn test_somchai_example() {
    let (service, clock) = setup();

    let created = service.create(candidate(&clock, "Somchai")).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.status, PaymentStatus::Pending);
    assert_eq!(created.created_at, clock.now());

    let paid = service.mark_paid(created.id).await.unwrap();
    assert_eq!(paid.status, PaymentStatus::Paid);

    let paid_again = service.mark_paid(created.id).await.unwrap();
    assert_eq!(paid_again.status, PaymentStatus::Paid);
    assert_eq!(paid_again, paid);
}

#[tokio::test]
async fn test_ids_are_unique_and_increasing() {
    let (service, clock) = setup();

    let mut last_id = 0;
    for i in 0..20 {
        clock.advance(TimeDelta::seconds(1));
        let request = service
            .create(candidate(&clock, &format!("customer {i}")))
            .await
            .unwrap();
        assert!(request.id > last_id);
        last_id = request.id;
    }
    assert_eq!(last_id, 20);
}

#[tokio::test]
async fn test_invalid_inputs_leave_store_unchanged() {
    let (service, clock) = setup();
    service.create(candidate(&clock, "Somchai")).await.unwrap();
    let now = clock.now();

    let invalid = [
        CandidateRequest::from_parts("   ", dec!(100), now + TimeDelta::hours(1)),
        CandidateRequest::from_parts("Malee", dec!(0), now + TimeDelta::hours(1)),
        CandidateRequest::from_parts("Malee", dec!(-20), now + TimeDelta::hours(1)),
        CandidateRequest::from_parts("Malee", dec!(100), now - TimeDelta::minutes(1)),
        CandidateRequest::from_parts("Malee", dec!(100), now + TimeDelta::hours(48)),
        CandidateRequest::new("Malee", "100", "not a date"),
    ];

    for candidate in invalid {
        let result = service.create(candidate.clone()).await;
        assert!(
            matches!(result, Err(PaymentError::InvalidInput(_))),
            "{candidate:?} should be rejected"
        );
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    // A rejected create does not consume an id.
    let next = service.create(candidate(&clock, "Wichan")).await.unwrap();
    assert_eq!(next.id, 2);
}

#[tokio::test]
async fn test_mark_paid_unknown_id_is_not_found() {
    let (service, clock) = setup();
    service.create(candidate(&clock, "Somchai")).await.unwrap();

    assert!(matches!(
        service.mark_paid(2).await,
        Err(PaymentError::NotFound(2))
    ));
}

#[tokio::test]
async fn test_list_sorted_by_created_at_regardless_of_creation_order() {
    let (service, clock) = setup();
    let start = clock.now();

    let mut offsets: Vec<i64> = (0..30).collect();
    offsets.shuffle(&mut rand::thread_rng());

    for offset in offsets {
        clock.set(start + TimeDelta::minutes(offset));
        service
            .create(candidate(&clock, &format!("customer {offset}")))
            .await
            .unwrap();
    }

    let requests = service.list().await.unwrap();
    assert_eq!(requests.len(), 30);
    assert!(
        requests
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at)
    );
    assert_eq!(requests[0].created_at, start + TimeDelta::minutes(29));
}

#[tokio::test]
async fn test_overdue_is_derived_not_stored() {
    let (service, clock) = setup();
    let request = service.create(candidate(&clock, "Somchai")).await.unwrap();

    clock.advance(TimeDelta::hours(2));
    let stored = service.get(request.id).await.unwrap().unwrap();

    assert_eq!(stored.status, PaymentStatus::Pending);
    assert!(stored.is_overdue(clock.now()));
    assert_eq!(stored.display_status(clock.now()), DisplayStatus::Overdue);

    let paid = service.mark_paid(request.id).await.unwrap();
    assert!(!paid.is_overdue(clock.now()));
}

#[tokio::test]
async fn test_get_returns_none_for_missing_id() {
    let (service, clock) = setup();
    let request = service.create(candidate(&clock, "Somchai")).await.unwrap();

    assert_eq!(service.get(request.id).await.unwrap(), Some(request));
    assert_eq!(service.get(404).await.unwrap(), None);
}

#[tokio::test]
async fn test_demo_store_through_service() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let service = PaymentRequestService::new(
        Box::new(InMemoryPaymentRequestStore::with_demo_data(now).unwrap()),
        Box::new(ManualClock::new(now)),
    );

    let ids: Vec<u32> = service.list().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, [3, 2, 1]);

    let summary = service.summary().await.unwrap();
    assert_eq!(summary.pending, 2);
    assert_eq!(summary.paid, 1);
    assert_eq!(summary.total_amount, dec!(150000));
}
