use super::BookingStatus;

/// 予約作成のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBookingError {
    /// 開始日時が終了日時より後、または同じ
    StartNotBeforeEnd,
    /// 開始日時が過去
    StartInPast,
}

impl std::fmt::Display for RequestBookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBookingError::StartNotBeforeEnd => write!(f, "booking start must be before end"),
            RequestBookingError::StartInPast => write!(f, "booking start is in the past"),
        }
    }
}

/// 承認・却下のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecideBookingError {
    /// 既に決定済み（現在のステータスを保持）
    AlreadyDecided(BookingStatus),
}
