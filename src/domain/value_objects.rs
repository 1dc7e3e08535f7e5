use serde::{Deserialize, Serialize};

/// 予約ID - ストアが採番する予約集約のID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingId(i64);

impl BookingId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// アイテムID - アイテム管理コンテキストへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(i64);

impl ItemId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// ユーザーID - ユーザー管理コンテキストへの参照
///
/// リクエストヘッダーから渡された値をそのまま信頼する（認証はこの層の責務外）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ページ指定エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageParamsError {
    /// from/size の片方だけが指定された
    Incomplete,
    /// from < 0 または size <= 0
    OutOfRange,
}

/// ページ指定（offset/limit）
///
/// 不変条件：offset >= 0, limit > 0
/// `from_params` 以外では構築できないため、不正な値のページ指定は存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: i64,
    limit: i64,
}

impl PageRequest {
    /// クエリパラメータ from/size からページ指定を作る
    ///
    /// - 両方なし → `Ok(None)`（ページングなしの全件取得）
    /// - 両方あり、from >= 0 かつ size > 0 → `Ok(Some(..))`
    /// - それ以外はエラー
    pub fn from_params(
        from: Option<i64>,
        size: Option<i64>,
    ) -> Result<Option<Self>, PageParamsError> {
        match (from, size) {
            (None, None) => Ok(None),
            (Some(from), Some(size)) => {
                if from < 0 || size <= 0 {
                    return Err(PageParamsError::OutOfRange);
                }
                Ok(Some(Self {
                    offset: from,
                    limit: size,
                }))
            }
            _ => Err(PageParamsError::Incomplete),
        }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// スライスにページ指定を適用する
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset as usize)
            .take(self.limit as usize)
            .cloned()
            .collect()
    }
}
