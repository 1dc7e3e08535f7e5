use crate::domain::{Item, ItemId, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// アイテムカタログポート
///
/// 予約コンテキストとアイテム管理コンテキストの境界を維持する。
/// 予約コンテキストはアイテムの作成・更新を行わない。
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// IDでアイテムを取得する
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>>;

    /// 所有者の全アイテムを取得する（ID昇順）
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>>;

    /// 所有者の全アイテムIDを取得する
    ///
    /// 所有者向けの予約一覧でスコープを決めるために使用される。
    async fn find_ids_by_owner(&self, owner_id: UserId) -> Result<Vec<ItemId>>;
}
