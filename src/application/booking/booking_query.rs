use crate::domain::{Booking, BookingState, PageRequest, UserId};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use std::collections::HashSet;

use super::booking_service::{ServiceDependencies, load_user, resolve_details};
use super::errors::{BookingApplicationError, Result};
use super::views::BookingDetails;

/// クエリ：予約一覧を取得する
///
/// `state`・`from`・`size` は呼び出し側から受け取った生の値で、
/// 検証はこの層の入口で1回だけ行う。`now` は判定の基準時刻。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBookings {
    pub actor: UserId,
    pub state: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
    pub now: DateTime<Utc>,
}

/// ページ指定と状態フィルタを検証する
///
/// ページ指定を先に検証し、次に状態フィルタをパースする。
fn validate(query: &ListBookings) -> Result<(BookingState, Option<PageRequest>)> {
    let page = PageRequest::from_params(query.from, query.size).map_err(|_| {
        BookingApplicationError::BadPageParameters {
            from: query.from,
            size: query.size,
        }
    })?;

    let state = query
        .state
        .parse::<BookingState>()
        .map_err(BookingApplicationError::UnsupportedState)?;

    Ok((state, page))
}

/// 状態フィルタを適用し、残った予約の表示名を解決する
///
/// ストアの並び順（開始日時の降順）をそのまま維持し、再ソートはしない。
async fn classify_and_resolve(
    deps: &ServiceDependencies,
    candidates: Vec<Booking>,
    state: BookingState,
    now: DateTime<Utc>,
) -> Result<Vec<BookingDetails>> {
    let retained: Vec<Booking> = candidates
        .into_iter()
        .filter(|booking| state.matches(booking, now))
        .collect();

    try_join_all(retained.iter().map(|booking| resolve_details(deps, booking))).await
}

/// 予約者として申し込んだ予約の一覧を取得する
///
/// 処理フロー：
/// 1. ページ指定と状態フィルタを検証
/// 2. 予約者の存在確認
/// 3. 候補の取得
///    - ページ指定なし：予約者の全予約（開始日時の降順）
///    - ページ指定あり：全予約の1ページを取得してから予約者で絞り込む
/// 4. 状態フィルタを適用（順序維持）
/// 5. 表示名を解決
///
/// ページ指定ありの場合、ページは全予約に対して切られるため、
/// 結果が `size` 件未満でも続きの予約が存在しうる。
///
/// # エラー
/// - BadPageParameters, UnsupportedState: 入力不正
/// - UserNotFound: 予約者が存在しない
/// - DanglingReference: 予約が存在しないアイテムを参照している
pub async fn find_requester_bookings(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<BookingDetails>> {
    let (state, page) = validate(&query)?;

    load_user(deps, query.actor).await?;

    let candidates = match page {
        None => deps
            .booking_store
            .find_by_booker(query.actor)
            .await
            .map_err(BookingApplicationError::BookingStoreError)?,
        Some(page) => deps
            .booking_store
            .find_page(page)
            .await
            .map_err(BookingApplicationError::BookingStoreError)?
            .into_iter()
            .filter(|booking| booking.booker_id == query.actor)
            .collect(),
    };

    tracing::debug!(
        actor = query.actor.value(),
        state = state.as_str(),
        paginated = page.is_some(),
        candidates = candidates.len(),
        "Listing requester bookings"
    );

    classify_and_resolve(deps, candidates, state, query.now).await
}

/// 所有するアイテムに対する予約の一覧を取得する
///
/// 処理フロー：
/// 1. ページ指定と状態フィルタを検証
/// 2. 所有者の存在確認
/// 3. 所有アイテムIDの取得（0件ならOwnerHasNoItems）
/// 4. 候補の取得
///    - ページ指定なし：所有アイテムの全予約（開始日時の降順）
///    - ページ指定あり：全予約の1ページを取得してから所有アイテムで絞り込む
/// 5. 状態フィルタを適用（順序維持）
/// 6. 表示名を解決
///
/// # エラー
/// - BadPageParameters, UnsupportedState: 入力不正
/// - UserNotFound, OwnerHasNoItems: 所有者または所有アイテムが存在しない
/// - DanglingReference: 予約が存在しないアイテム・ユーザーを参照している
pub async fn find_owner_bookings(
    deps: &ServiceDependencies,
    query: ListBookings,
) -> Result<Vec<BookingDetails>> {
    let (state, page) = validate(&query)?;

    load_user(deps, query.actor).await?;

    let item_ids = deps
        .item_catalog
        .find_ids_by_owner(query.actor)
        .await
        .map_err(BookingApplicationError::ItemCatalogError)?;

    if item_ids.is_empty() {
        return Err(BookingApplicationError::OwnerHasNoItems(query.actor));
    }

    let candidates = match page {
        None => deps
            .booking_store
            .find_by_items_desc(&item_ids)
            .await
            .map_err(BookingApplicationError::BookingStoreError)?,
        Some(page) => {
            let owned: HashSet<_> = item_ids.iter().copied().collect();
            deps.booking_store
                .find_page(page)
                .await
                .map_err(BookingApplicationError::BookingStoreError)?
                .into_iter()
                .filter(|booking| owned.contains(&booking.item_id))
                .collect()
        }
    };

    tracing::debug!(
        actor = query.actor.value(),
        state = state.as_str(),
        paginated = page.is_some(),
        items = item_ids.len(),
        candidates = candidates.len(),
        "Listing owner bookings"
    );

    classify_and_resolve(deps, candidates, state, query.now).await
}
