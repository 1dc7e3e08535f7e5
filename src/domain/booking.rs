use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, DecideBookingError, ItemId, RequestBookingError, UserId};

// ============================================================================
// ステータスと状態フィルタ
// ============================================================================

/// 予約ステータス（永続化される値）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// 承認待ち
    Waiting,
    /// 承認済み
    Approved,
    /// 却下
    Rejected,
    /// 予約者によるキャンセル（予約済みの値、現在どの操作からも遷移しない）
    Canceled,
}

impl BookingStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "CANCELED" => Ok(BookingStatus::Canceled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// 予約一覧の状態フィルタ
///
/// クエリ文字列のタグ（大文字小文字を区別）から一度だけパースされる閉じた列挙型。
/// 未知のタグはパース時点でエラーになる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }

    /// 予約がこのフィルタに該当するか
    ///
    /// CURRENT/PAST/FUTURE は `now` を基準に判定し、WAITING/REJECTED は
    /// 保存されたステータスのみで判定する（時刻非依存）。
    pub fn matches(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => temporal_phase(booking, now) == Some(TemporalPhase::Current),
            BookingState::Past => temporal_phase(booking, now) == Some(TemporalPhase::Past),
            BookingState::Future => temporal_phase(booking, now) == Some(TemporalPhase::Future),
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

impl std::str::FromStr for BookingState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            other => Err(other.to_string()),
        }
    }
}

// ============================================================================
// 時間区分
// ============================================================================

/// 基準時刻に対する予約の時間区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalPhase {
    /// start < now < end
    Current,
    /// end < now
    Past,
    /// now < start
    Future,
}

/// 純粋関数：予約の時間区分を判定する
///
/// 境界はすべて厳密な不等号。`end == now` または `start == now` の予約は
/// どの区分にも属さず `None` を返す（既知の隙間として維持している）。
pub fn temporal_phase(booking: &Booking, now: DateTime<Utc>) -> Option<TemporalPhase> {
    if booking.start < now && booking.end > now {
        Some(TemporalPhase::Current)
    } else if booking.end < now {
        Some(TemporalPhase::Past)
    } else if booking.start > now {
        Some(TemporalPhase::Future)
    } else {
        None
    }
}

// ============================================================================
// 予約集約
// ============================================================================

/// Booking集約 - 1つのアイテムに対する1回の予約
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    // 識別子
    pub id: BookingId,

    // 予約期間（start < end）
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    // 他の集約への参照（IDのみ）
    pub item_id: ItemId,
    pub booker_id: UserId,

    pub status: BookingStatus,

    // 楽観的排他制御用のバージョン（ステータス更新ごとに+1）
    pub version: i32,
}

/// 永続化前の予約（IDはストアが採番する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub status: BookingStatus,
}

/// 純粋関数：予約を申し込む
///
/// ビジネスルール：
/// - 開始日時は終了日時より前
/// - 開始日時は申込時刻より前であってはならない
/// - 状態はWAITING
///
/// 副作用なし。永続化前の予約を返す。
pub fn request_booking(
    item_id: ItemId,
    booker_id: UserId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    requested_at: DateTime<Utc>,
) -> Result<NewBooking, RequestBookingError> {
    if start >= end {
        return Err(RequestBookingError::StartNotBeforeEnd);
    }

    if start < requested_at {
        return Err(RequestBookingError::StartInPast);
    }

    Ok(NewBooking {
        start,
        end,
        item_id,
        booker_id,
        status: BookingStatus::Waiting,
    })
}

/// 純粋関数：予約を承認または却下する
///
/// ビジネスルール：
/// - WAITINGからの遷移は1回のみ（APPROVED または REJECTED）
/// - 決定済みの予約への再決定は冗長としてエラー
///
/// 副作用なし。遷移後のステータスを返す。
pub fn decide_booking(
    booking: &Booking,
    approved: bool,
) -> Result<BookingStatus, DecideBookingError> {
    if booking.status != BookingStatus::Waiting {
        return Err(DecideBookingError::AlreadyDecided(booking.status));
    }

    if approved {
        Ok(BookingStatus::Approved)
    } else {
        Ok(BookingStatus::Rejected)
    }
}
