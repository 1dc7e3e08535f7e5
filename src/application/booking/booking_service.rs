use crate::domain::{
    self, Booking, BookingId, DecideBookingError, Item, ItemId, User, UserId,
    commands::{CreateBooking, DecideBooking},
};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{BookingApplicationError, Result};
use super::views::BookingDetails;

/// サービスの依存関係
///
/// 振る舞い（メソッド）は持たず、関数に依存関係を明示的に渡す。
/// テストではインメモリ実装、本番ではPostgreSQL実装を差し込む。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub item_catalog: Arc<dyn ItemCatalog>,
    pub user_directory: Arc<dyn UserDirectory>,
}

/// ユーザーを取得するヘルパー関数
///
/// # エラー
/// - UserDirectoryError: 読み込み失敗
/// - UserNotFound: ユーザーが存在しない
pub(crate) async fn load_user(deps: &ServiceDependencies, user_id: UserId) -> Result<User> {
    deps.user_directory
        .find_by_id(user_id)
        .await
        .map_err(BookingApplicationError::UserDirectoryError)?
        .ok_or(BookingApplicationError::UserNotFound(user_id))
}

/// アイテムを取得するヘルパー関数
///
/// # エラー
/// - ItemCatalogError: 読み込み失敗
/// - ItemNotFound: アイテムが存在しない
pub(crate) async fn load_item(deps: &ServiceDependencies, item_id: ItemId) -> Result<Item> {
    deps.item_catalog
        .find_by_id(item_id)
        .await
        .map_err(BookingApplicationError::ItemCatalogError)?
        .ok_or(BookingApplicationError::ItemNotFound(item_id))
}

/// 予約を取得するヘルパー関数
async fn load_booking(deps: &ServiceDependencies, booking_id: BookingId) -> Result<Booking> {
    deps.booking_store
        .find_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?
        .ok_or(BookingApplicationError::BookingNotFound(booking_id))
}

/// 保存済みの予約が参照するアイテムを取得する
///
/// 予約は必ず存在するアイテムを参照しているはずなので、見つからない場合は
/// NotFoundではなくDanglingReferenceとして扱う。
pub(crate) async fn load_referenced_item(
    deps: &ServiceDependencies,
    booking: &Booking,
) -> Result<Item> {
    match load_item(deps, booking.item_id).await {
        Err(BookingApplicationError::ItemNotFound(item_id)) => {
            tracing::error!(
                booking_id = booking.id.value(),
                item_id = item_id.value(),
                "Booking references a missing item"
            );
            Err(BookingApplicationError::DanglingReference(format!(
                "booking {} references missing item {}",
                booking.id, item_id
            )))
        }
        other => other,
    }
}

/// 保存済みの予約が参照する予約者を取得する
pub(crate) async fn load_referenced_booker(
    deps: &ServiceDependencies,
    booking: &Booking,
) -> Result<User> {
    match load_user(deps, booking.booker_id).await {
        Err(BookingApplicationError::UserNotFound(user_id)) => {
            tracing::error!(
                booking_id = booking.id.value(),
                user_id = user_id.value(),
                "Booking references a missing booker"
            );
            Err(BookingApplicationError::DanglingReference(format!(
                "booking {} references missing user {}",
                booking.id, user_id
            )))
        }
        other => other,
    }
}

/// 予約の表示名（アイテム名・予約者名）を解決する
pub(crate) async fn resolve_details(
    deps: &ServiceDependencies,
    booking: &Booking,
) -> Result<BookingDetails> {
    let item = load_referenced_item(deps, booking).await?;
    let booker = load_referenced_booker(deps, booking).await?;
    Ok(BookingDetails::new(booking, &item, &booker))
}

/// アイテムの予約を申し込む
///
/// ビジネスルール：
/// - 開始日時 < 終了日時、かつ開始日時が過去でないこと
/// - 予約者が存在すること
/// - アイテムが存在すること
/// - 所有者は自分のアイテムを予約できない
/// - アイテムが予約受付中であること
///
/// 作成された予約はWAITING状態。
pub async fn create_booking(
    deps: &ServiceDependencies,
    cmd: CreateBooking,
) -> Result<BookingDetails> {
    // 1. 期間のバリデーション（ドメイン層の純粋関数）
    let new_booking = domain::request_booking(
        cmd.item_id,
        cmd.booker_id,
        cmd.start,
        cmd.end,
        cmd.requested_at,
    )
    .map_err(|e| BookingApplicationError::InvalidBookingData(e.to_string()))?;

    // 2. 予約者の存在確認
    let booker = load_user(deps, cmd.booker_id).await?;

    // 3. アイテムの存在確認
    let item = load_item(deps, cmd.item_id).await?;

    // 4. 自分のアイテムは予約不可
    if item.is_owned_by(cmd.booker_id) {
        return Err(BookingApplicationError::AccessDenied(
            "Owner cannot book own item".to_string(),
        ));
    }

    // 5. 予約受付中か
    if !item.available {
        return Err(BookingApplicationError::ItemUnavailable(item.id));
    }

    // 6. 保存
    let booking = deps
        .booking_store
        .insert(new_booking)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    tracing::info!(
        booking_id = booking.id.value(),
        item_id = item.id.value(),
        booker_id = booker.id.value(),
        "Booking requested"
    );

    Ok(BookingDetails::new(&booking, &item, &booker))
}

/// 予約を承認または却下する
///
/// ビジネスルール：
/// - 予約が存在すること
/// - アイテム所有者のみが決定できる
/// - WAITINGからの遷移は1回のみ
///
/// # 一貫性保証
///
/// ステータス更新はversionによるcompare-and-swap。読み込み後に他の決定が
/// 先に書き込まれていた場合は `ConcurrentModification` を返し、上書きしない。
/// 参照先の解決は保存より前に行い、エラー時にステータスが変わることはない。
pub async fn decide_booking(
    deps: &ServiceDependencies,
    cmd: DecideBooking,
) -> Result<BookingDetails> {
    // 1. 予約の取得
    let booking = load_booking(deps, cmd.booking_id).await?;

    // 2. アイテムの取得と所有者確認
    let item = load_referenced_item(deps, &booking).await?;
    if !item.is_owned_by(cmd.owner_id) {
        tracing::warn!(
            booking_id = booking.id.value(),
            user_id = cmd.owner_id.value(),
            "Non-owner attempted to decide a booking"
        );
        return Err(BookingApplicationError::AccessDenied(
            "Only the item owner can approve a booking".to_string(),
        ));
    }

    // 3. 予約者の取得（保存前に参照を確定させる）
    let booker = load_referenced_booker(deps, &booking).await?;

    // 4. ドメイン層の純粋関数で遷移先を決定
    let new_status = domain::decide_booking(&booking, cmd.approved).map_err(|e| match e {
        DecideBookingError::AlreadyDecided(status) => {
            BookingApplicationError::AlreadyDecided(status)
        }
    })?;

    // 5. compare-and-swap で保存
    let updated = deps
        .booking_store
        .update_status(booking.id, booking.version, new_status)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    if !updated {
        tracing::warn!(
            booking_id = booking.id.value(),
            "Booking status changed concurrently"
        );
        return Err(BookingApplicationError::ConcurrentModification(booking.id));
    }

    let booking = Booking {
        status: new_status,
        version: booking.version + 1,
        ..booking
    };

    tracing::info!(
        booking_id = booking.id.value(),
        status = %new_status,
        "Booking decided"
    );

    Ok(BookingDetails::new(&booking, &item, &booker))
}

/// 予約を1件取得する
///
/// 予約者またはアイテム所有者のみが閲覧できる。
pub async fn get_booking(
    deps: &ServiceDependencies,
    booking_id: BookingId,
    user_id: UserId,
) -> Result<BookingDetails> {
    let booking = load_booking(deps, booking_id).await?;
    let item = load_referenced_item(deps, &booking).await?;

    if booking.booker_id != user_id && !item.is_owned_by(user_id) {
        tracing::warn!(
            booking_id = booking.id.value(),
            user_id = user_id.value(),
            "Booking access denied"
        );
        return Err(BookingApplicationError::AccessDenied(
            "Only the booker or the item owner can view a booking".to_string(),
        ));
    }

    let booker = load_referenced_booker(deps, &booking).await?;
    Ok(BookingDetails::new(&booking, &item, &booker))
}
