use crate::domain::{Item, ItemId, UserId};
use crate::ports::item_catalog::{ItemCatalog as ItemCatalogTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// ItemCatalogのモック実装
///
/// アイテムを登録することで状態を持ったテストをサポート。
pub struct ItemCatalog {
    items: Mutex<BTreeMap<ItemId, Item>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(BTreeMap::new()),
        }
    }

    /// テスト用にアイテムを登録
    pub fn add_item(&self, item: Item) {
        self.items.lock().unwrap().insert(item.id, item);
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    async fn find_by_id(&self, item_id: ItemId) -> Result<Option<Item>> {
        Ok(self.items.lock().unwrap().get(&item_id).cloned())
    }

    /// BTreeMapの走査順がそのままID昇順になる
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Item>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_ids_by_owner(&self, owner_id: UserId) -> Result<Vec<ItemId>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|item| item.owner_id == owner_id)
            .map(|item| item.id)
            .collect())
    }
}
