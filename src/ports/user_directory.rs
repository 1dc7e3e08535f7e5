use crate::domain::{User, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザーディレクトリポート
///
/// 予約コンテキストはUserIDのみを保持し、表示名は必要な時にここから引く。
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// IDでユーザーを取得する
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>>;
}
