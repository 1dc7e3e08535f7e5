use crate::application::booking::{
    BookingApplicationError, Result, ServiceDependencies, load_item, load_user,
};
use crate::domain::{Booking, BookingRef, Item, ItemId, PageRequest, UserId, resolve_nearest};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// アイテム表示（直前・直後の予約付き）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemView {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub last_booking: Option<BookingRef>,
    pub next_booking: Option<BookingRef>,
}

impl ItemView {
    fn new(item: Item, last_booking: Option<BookingRef>, next_booking: Option<BookingRef>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            last_booking,
            next_booking,
        }
    }
}

/// アイテムを1件取得する
///
/// 直前・直後の予約は所有者にのみ表示する。それ以外のユーザーには両方None。
pub async fn get_item_view(
    deps: &ServiceDependencies,
    item_id: ItemId,
    user_id: UserId,
    now: DateTime<Utc>,
) -> Result<ItemView> {
    let item = load_item(deps, item_id).await?;

    if !item.is_owned_by(user_id) {
        return Ok(ItemView::new(item, None, None));
    }

    let bookings = deps
        .booking_store
        .find_by_items_asc(&[item.id])
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    let pair = resolve_nearest(&bookings, now);
    Ok(ItemView::new(item, pair.last, pair.next))
}

/// 所有者のアイテム一覧を取得する（ID昇順）
///
/// from/size の扱いは予約一覧と同じ（両方なしで全件、両方ありでoffset/limit）。
/// 予約は対象アイテム分を1回でまとめて取得し、アイテムごとに振り分ける。
pub async fn list_owner_items(
    deps: &ServiceDependencies,
    owner_id: UserId,
    from: Option<i64>,
    size: Option<i64>,
    now: DateTime<Utc>,
) -> Result<Vec<ItemView>> {
    let page = PageRequest::from_params(from, size)
        .map_err(|_| BookingApplicationError::BadPageParameters { from, size })?;

    load_user(deps, owner_id).await?;

    let items = deps
        .item_catalog
        .find_by_owner(owner_id)
        .await
        .map_err(BookingApplicationError::ItemCatalogError)?;

    let items = match page {
        Some(page) => page.apply(&items),
        None => items,
    };

    if items.is_empty() {
        return Ok(Vec::new());
    }

    let item_ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
    let bookings = deps
        .booking_store
        .find_by_items_asc(&item_ids)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    // 昇順を保ったままアイテムごとに振り分ける
    let mut by_item: HashMap<ItemId, Vec<Booking>> = HashMap::new();
    for booking in bookings {
        by_item.entry(booking.item_id).or_default().push(booking);
    }

    Ok(items
        .into_iter()
        .map(|item| {
            let pair = by_item
                .get(&item.id)
                .map(|bookings| resolve_nearest(bookings, now))
                .unwrap_or_default();
            ItemView::new(item, pair.last, pair.next)
        })
        .collect())
}
