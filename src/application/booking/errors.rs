use crate::domain::{BookingId, BookingStatus, ItemId, UserId};
use thiserror::Error;

/// エラーの分類
///
/// 上位層（HTTPなど）がステータスコードを決めるために使用する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 参照先が存在しない
    NotFound,
    /// クライアントの入力が不正
    Client,
    /// データ不整合またはインフラ障害
    Internal,
}

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// ユーザーが存在しない
    #[error("User {0} not found")]
    UserNotFound(UserId),

    /// アイテムが存在しない
    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    /// 予約が存在しない
    #[error("Booking {0} not found")]
    BookingNotFound(BookingId),

    /// 所有者がアイテムを1つも持っていない
    #[error("User {0} has no items")]
    OwnerHasNoItems(UserId),

    /// from/size の指定が不正（片方のみ、または範囲外）
    #[error("Bad page parameters: from={from:?} size={size:?}")]
    BadPageParameters {
        from: Option<i64>,
        size: Option<i64>,
    },

    /// 未知の状態フィルタ
    #[error("Unknown state: {0}")]
    UnsupportedState(String),

    /// 予約の入力データが不正
    #[error("Invalid booking data: {0}")]
    InvalidBookingData(String),

    /// アイテムが予約受付中でない
    #[error("Item {0} is not available for booking")]
    ItemUnavailable(ItemId),

    /// 操作する権限がない（所有者・予約者以外）
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// 既に承認または却下済み
    #[error("Booking already {0}")]
    AlreadyDecided(BookingStatus),

    /// 並行更新により楽観ロックに失敗した
    #[error("Booking {0} was modified concurrently")]
    ConcurrentModification(BookingId),

    /// 予約が存在しないアイテム・ユーザーを参照している（データ破損）
    #[error("Dangling reference: {0}")]
    DanglingReference(String),

    /// BookingStoreのエラー
    #[error("Booking store error")]
    BookingStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemCatalogのエラー
    #[error("Item catalog error")]
    ItemCatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserDirectoryのエラー
    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingApplicationError::UserNotFound(_)
            | BookingApplicationError::ItemNotFound(_)
            | BookingApplicationError::BookingNotFound(_)
            | BookingApplicationError::OwnerHasNoItems(_) => ErrorKind::NotFound,

            BookingApplicationError::BadPageParameters { .. }
            | BookingApplicationError::UnsupportedState(_)
            | BookingApplicationError::InvalidBookingData(_)
            | BookingApplicationError::ItemUnavailable(_)
            | BookingApplicationError::AccessDenied(_)
            | BookingApplicationError::AlreadyDecided(_)
            | BookingApplicationError::ConcurrentModification(_) => ErrorKind::Client,

            BookingApplicationError::DanglingReference(_)
            | BookingApplicationError::BookingStoreError(_)
            | BookingApplicationError::ItemCatalogError(_)
            | BookingApplicationError::UserDirectoryError(_) => ErrorKind::Internal,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
