mod common;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use common::{Fixture, at};
use shareit_bookings::application::booking::{
    BookingApplicationError, ErrorKind, ServiceDependencies, create_booking, decide_booking,
    get_booking,
};
use shareit_bookings::domain::commands::{CreateBooking, DecideBooking};
use shareit_bookings::domain::*;
use shareit_bookings::ports::BookingStore;
use shareit_bookings::ports::booking_store::Result as StoreResult;
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    at(2024, 5, 1, 12, 0)
}

struct Setup {
    fixture: Fixture,
    owner: UserId,
    booker: UserId,
    item: ItemId,
}

fn setup() -> Setup {
    let fixture = Fixture::new();
    let owner = fixture.add_user(1, "Owner");
    let booker = fixture.add_user(2, "Booker");
    let item = fixture.add_item(10, "Drill", owner, true);
    Setup {
        fixture,
        owner,
        booker,
        item,
    }
}

fn request(item_id: ItemId, booker_id: UserId) -> CreateBooking {
    CreateBooking {
        item_id,
        booker_id,
        start: now() + Duration::days(1),
        end: now() + Duration::days(2),
        requested_at: now(),
    }
}

// ============================================================================
// 予約の申し込み
// ============================================================================

#[tokio::test]
async fn test_create_booking_success() {
    let s = setup();

    let details = create_booking(&s.fixture.deps, request(s.item, s.booker))
        .await
        .unwrap();

    assert_eq!(details.status, BookingStatus::Waiting);
    assert_eq!(details.item.name, "Drill");
    assert_eq!(details.booker.name, "Booker");

    let stored = get_booking(&s.fixture.deps, details.id, s.booker)
        .await
        .unwrap();
    assert_eq!(stored, details);
}

#[tokio::test]
async fn test_create_booking_invalid_period() {
    let s = setup();

    let mut cmd = request(s.item, s.booker);
    cmd.end = cmd.start;
    let result = create_booking(&s.fixture.deps, cmd).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::InvalidBookingData(_))
    ));

    let mut cmd = request(s.item, s.booker);
    cmd.start = now() - Duration::hours(1);
    let result = create_booking(&s.fixture.deps, cmd).await;
    match result {
        Err(err @ BookingApplicationError::InvalidBookingData(_)) => {
            assert_eq!(err.kind(), ErrorKind::Client);
        }
        other => panic!("expected InvalidBookingData, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_booking_unknown_booker_or_item() {
    let s = setup();

    let result = create_booking(&s.fixture.deps, request(s.item, UserId::new(99))).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::UserNotFound(_))
    ));

    let result = create_booking(&s.fixture.deps, request(ItemId::new(99), s.booker)).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::ItemNotFound(_))
    ));
}

#[tokio::test]
async fn test_owner_cannot_book_own_item() {
    let s = setup();

    let result = create_booking(&s.fixture.deps, request(s.item, s.owner)).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::AccessDenied(_))
    ));
}

#[tokio::test]
async fn test_unavailable_item_cannot_be_booked() {
    let s = setup();
    let closed = s.fixture.add_item(11, "Closed", s.owner, false);

    let result = create_booking(&s.fixture.deps, request(closed, s.booker)).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::ItemUnavailable(id)) if id == closed
    ));
}

// ============================================================================
// 承認・却下
// ============================================================================

#[tokio::test]
async fn test_approve_then_repeat_is_rejected() {
    let s = setup();
    let created = create_booking(&s.fixture.deps, request(s.item, s.booker))
        .await
        .unwrap();

    let approved = decide_booking(
        &s.fixture.deps,
        DecideBooking {
            booking_id: created.id,
            owner_id: s.owner,
            approved: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    // 一度決定した予約は再決定できない
    let result = decide_booking(
        &s.fixture.deps,
        DecideBooking {
            booking_id: created.id,
            owner_id: s.owner,
            approved: false,
        },
    )
    .await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::AlreadyDecided(BookingStatus::Approved))
    ));

    let stored = get_booking(&s.fixture.deps, created.id, s.owner)
        .await
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_reject_booking() {
    let s = setup();
    let created = create_booking(&s.fixture.deps, request(s.item, s.booker))
        .await
        .unwrap();

    let rejected = decide_booking(
        &s.fixture.deps,
        DecideBooking {
            booking_id: created.id,
            owner_id: s.owner,
            approved: false,
        },
    )
    .await
    .unwrap();

    assert_eq!(rejected.status, BookingStatus::Rejected);
}

#[tokio::test]
async fn test_only_owner_can_decide() {
    let s = setup();
    let created = create_booking(&s.fixture.deps, request(s.item, s.booker))
        .await
        .unwrap();

    let result = decide_booking(
        &s.fixture.deps,
        DecideBooking {
            booking_id: created.id,
            owner_id: s.booker,
            approved: true,
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::AccessDenied(_))
    ));
}

#[tokio::test]
async fn test_decide_unknown_booking() {
    let s = setup();

    let result = decide_booking(
        &s.fixture.deps,
        DecideBooking {
            booking_id: BookingId::new(404),
            owner_id: s.owner,
            approved: true,
        },
    )
    .await;

    match result {
        Err(err @ BookingApplicationError::BookingNotFound(_)) => {
            assert_eq!(err.kind(), ErrorKind::NotFound);
        }
        other => panic!("expected BookingNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_decide_with_missing_booker_leaves_booking_unchanged() {
    let s = setup();
    let booking_id = s.fixture.add_booking(
        50,
        s.item,
        UserId::new(888),
        now() + Duration::days(1),
        now() + Duration::days(2),
        BookingStatus::Waiting,
    );

    let result = decide_booking(
        &s.fixture.deps,
        DecideBooking {
            booking_id,
            owner_id: s.owner,
            approved: true,
        },
    )
    .await;

    match result {
        Err(err @ BookingApplicationError::DanglingReference(_)) => {
            assert_eq!(err.kind(), ErrorKind::Internal);
        }
        other => panic!("expected DanglingReference, got {:?}", other),
    }

    // 参照エラー時はステータスもversionも変わらない
    let stored = s
        .fixture
        .bookings
        .find_by_id(booking_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Waiting);
    assert_eq!(stored.version, 0);
}

/// 読み込みと書き込みの間に他の決定が割り込んだ状況を再現するストア
struct RacingStore {
    inner: Arc<shareit_bookings::adapters::mock::BookingStore>,
}

#[async_trait]
impl BookingStore for RacingStore {
    async fn find_by_id(&self, booking_id: BookingId) -> StoreResult<Option<Booking>> {
        self.inner.find_by_id(booking_id).await
    }

    async fn find_by_booker(&self, booker_id: UserId) -> StoreResult<Vec<Booking>> {
        self.inner.find_by_booker(booker_id).await
    }

    async fn find_by_items_desc(&self, item_ids: &[ItemId]) -> StoreResult<Vec<Booking>> {
        self.inner.find_by_items_desc(item_ids).await
    }

    async fn find_by_items_asc(&self, item_ids: &[ItemId]) -> StoreResult<Vec<Booking>> {
        self.inner.find_by_items_asc(item_ids).await
    }

    async fn find_page(&self, page: PageRequest) -> StoreResult<Vec<Booking>> {
        self.inner.find_page(page).await
    }

    async fn insert(&self, booking: NewBooking) -> StoreResult<Booking> {
        self.inner.insert(booking).await
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        expected_version: i32,
        _status: BookingStatus,
    ) -> StoreResult<bool> {
        // 先に別の決定が書き込まれ、versionが進んでいる
        self.inner
            .update_status(booking_id, expected_version, BookingStatus::Rejected)
            .await?;
        self.inner
            .update_status(booking_id, expected_version, BookingStatus::Approved)
            .await
    }
}

#[tokio::test]
async fn test_concurrent_decision_is_not_overwritten() {
    let s = setup();
    let booking_id = s.fixture.add_booking(
        50,
        s.item,
        s.booker,
        now() + Duration::days(1),
        now() + Duration::days(2),
        BookingStatus::Waiting,
    );

    let deps = ServiceDependencies {
        booking_store: Arc::new(RacingStore {
            inner: s.fixture.bookings.clone(),
        }),
        ..s.fixture.deps.clone()
    };

    let result = decide_booking(
        &deps,
        DecideBooking {
            booking_id,
            owner_id: s.owner,
            approved: true,
        },
    )
    .await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::ConcurrentModification(id)) if id == booking_id
    ));

    // 先に書き込まれた決定が残っている
    let stored = get_booking(&s.fixture.deps, booking_id, s.owner)
        .await
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Rejected);
}

// ============================================================================
// 予約の取得
// ============================================================================

#[tokio::test]
async fn test_get_booking_access() {
    let s = setup();
    let stranger = s.fixture.add_user(3, "Stranger");
    let created = create_booking(&s.fixture.deps, request(s.item, s.booker))
        .await
        .unwrap();

    assert!(get_booking(&s.fixture.deps, created.id, s.booker).await.is_ok());
    assert!(get_booking(&s.fixture.deps, created.id, s.owner).await.is_ok());

    let result = get_booking(&s.fixture.deps, created.id, stranger).await;
    match result {
        Err(err @ BookingApplicationError::AccessDenied(_)) => {
            assert_eq!(err.kind(), ErrorKind::Client);
        }
        other => panic!("expected AccessDenied, got {:?}", other),
    }
}
