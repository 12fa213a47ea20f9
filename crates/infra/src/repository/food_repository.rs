//! # FoodRepository
//!
//! 食品の永続化を担当するリポジトリ。
//!
//! ## 作業単位（Unit of Work）
//!
//! `add` / `update` / `delete` は変更を保留リストに積むだけで、
//! `save` を呼ぶまで読み取り系（`get_single` / `get_all` / `count`）には反映されない。
//! `save` は保留中の変更を順番に確定し、確定した変更があったかを返す。
//!
//! ## ID 採番
//!
//! `add` の時点でカウンタから ID を採番する。採番済み ID は削除後も再利用しない。
//! カウンタ・保留リスト・確定済みデータはストアごとの 1 つの `Mutex` で保護する。
//!
//! 保留リストはストア全体で 1 つなので、呼び出し側は「積む → `save`」の区間を
//! 他の書き込みと直列化する必要がある。途中で中断された書き込みの残骸は
//! `rollback` で破棄する。

use std::{
   collections::BTreeMap,
   sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use pantry_domain::{
   food::{Course, FoodEntity, FoodId, NewFood},
   query::QueryParameters,
};
use rand::seq::IndexedRandom;
use strum::IntoEnumIterator;

use crate::error::InfraError;

const ENTITY: &str = "Food";

/// 食品リポジトリトレイト
#[async_trait]
pub trait FoodRepository: Send + Sync {
   /// ID で食品を取得する
   async fn get_single(&self, id: FoodId) -> Result<Option<FoodEntity>, InfraError>;

   /// 食品を追加する（ID を採番し、採番済みのエンティティを返す）
   async fn add(&self, food: NewFood) -> Result<FoodEntity, InfraError>;

   /// 食品を削除する
   async fn delete(&self, id: FoodId) -> Result<(), InfraError>;

   /// 食品を置き換える
   async fn update(&self, id: FoodId, food: FoodEntity) -> Result<FoodEntity, InfraError>;

   /// 取得条件に従ってフィルタ・並び替え・ページングした食品を取得する
   async fn get_all(&self, params: &QueryParameters) -> Result<Vec<FoodEntity>, InfraError>;

   /// コースごとに 1 品ずつ無作為に選んだ献立を取得する
   ///
   /// 該当する種別の食品がないコースは含まれない。
   async fn get_random_meal(&self) -> Result<Vec<FoodEntity>, InfraError>;

   /// 取得条件のフィルタに一致する総件数を取得する（ページングは無視）
   async fn count(&self, params: &QueryParameters) -> Result<usize, InfraError>;

   /// 保留中の変更を確定する
   ///
   /// 確定した変更が 1 件以上あれば `true` を返す。
   async fn save(&self) -> Result<bool, InfraError>;

   /// 保留中の変更を確定せずに破棄する
   ///
   /// 破棄した変更の件数を返す。採番済みの ID は再利用しない。
   async fn rollback(&self) -> Result<usize, InfraError>;
}

/// 保留中の変更
#[derive(Debug, Clone)]
enum PendingChange {
   Upsert(FoodEntity),
   Remove(FoodId),
}

#[derive(Debug, Default)]
struct FoodStore {
   foods:   BTreeMap<FoodId, FoodEntity>,
   pending: Vec<PendingChange>,
   last_id: i64,
}

impl FoodStore {
   /// 保留中の変更を考慮して ID が存在するかを判定する
   fn exists(&self, id: FoodId) -> bool {
      self.pending
         .iter()
         .fold(self.foods.contains_key(&id), |exists, change| match change {
            PendingChange::Upsert(food) if food.id() == id => true,
            PendingChange::Remove(removed) if *removed == id => false,
            _ => exists,
         })
   }

   fn next_id(&mut self) -> Result<FoodId, InfraError> {
      let next = self
         .last_id
         .checked_add(1)
         .ok_or_else(|| InfraError::unexpected("食品 ID の採番上限に達しました"))?;
      let id = FoodId::from_raw(next)
         .ok_or_else(|| InfraError::unexpected(format!("不正な食品 ID を採番しました: {next}")))?;
      self.last_id = next;
      Ok(id)
   }

   fn filtered<'a>(&'a self, params: &'a QueryParameters) -> impl Iterator<Item = &'a FoodEntity> {
      self.foods.values().filter(move |food| params.matches(food))
   }
}

/// インメモリ実装の FoodRepository
#[derive(Debug, Default)]
pub struct InMemoryFoodRepository {
   store: Mutex<FoodStore>,
}

impl InMemoryFoodRepository {
   /// 空のストアを持つリポジトリを作成する
   pub fn new() -> Self {
      Self::default()
   }

   fn lock(&self) -> Result<MutexGuard<'_, FoodStore>, InfraError> {
      self.store
         .lock()
         .map_err(|e| InfraError::poisoned(e.to_string()))
   }

   /// ロックを取得してストアを操作する（ロックは await をまたがない）
   fn with_store<T>(
      &self,
      f: impl FnOnce(&mut FoodStore) -> Result<T, InfraError>,
   ) -> Result<T, InfraError> {
      let mut store = self.lock()?;
      f(&mut store)
   }
}

#[async_trait]
impl FoodRepository for InMemoryFoodRepository {
   async fn get_single(&self, id: FoodId) -> Result<Option<FoodEntity>, InfraError> {
      self.with_store(|store| Ok(store.foods.get(&id).cloned()))
   }

   async fn add(&self, food: NewFood) -> Result<FoodEntity, InfraError> {
      self.with_store(|store| {
         let id = store.next_id()?;
         let entity = FoodEntity::from_new(id, food);
         store.pending.push(PendingChange::Upsert(entity.clone()));
         Ok(entity)
      })
   }

   async fn delete(&self, id: FoodId) -> Result<(), InfraError> {
      self.with_store(|store| {
         if !store.exists(id) {
            return Err(InfraError::not_found(ENTITY, id));
         }
         store.pending.push(PendingChange::Remove(id));
         Ok(())
      })
   }

   async fn update(&self, id: FoodId, food: FoodEntity) -> Result<FoodEntity, InfraError> {
      if food.id() != id {
         return Err(InfraError::unexpected(format!(
            "更新対象の ID が一致しません: {id} != {}",
            food.id()
         )));
      }

      self.with_store(|store| {
         if !store.exists(id) {
            return Err(InfraError::not_found(ENTITY, id));
         }
         store.pending.push(PendingChange::Upsert(food.clone()));
         Ok(food)
      })
   }

   async fn get_all(&self, params: &QueryParameters) -> Result<Vec<FoodEntity>, InfraError> {
      self.with_store(|store| {
         let mut foods: Vec<&FoodEntity> = store.filtered(params).collect();
         foods.sort_by(|a, b| params.compare(a, b));

         Ok(foods
            .into_iter()
            .skip(params.offset())
            .take(params.page_size())
            .cloned()
            .collect())
      })
   }

   async fn get_random_meal(&self) -> Result<Vec<FoodEntity>, InfraError> {
      self.with_store(|store| {
         let mut rng = rand::rng();
         Ok(Course::iter()
            .filter_map(|course| {
               let candidates: Vec<&FoodEntity> = store
                  .foods
                  .values()
                  .filter(|food| food.food_type().and_then(|t| t.course()) == Some(course))
                  .collect();
               candidates.choose(&mut rng).map(|food| (*food).clone())
            })
            .collect())
      })
   }

   async fn count(&self, params: &QueryParameters) -> Result<usize, InfraError> {
      self.with_store(|store| Ok(store.filtered(params).count()))
   }

   async fn save(&self) -> Result<bool, InfraError> {
      self.with_store(|store| {
         let pending = std::mem::take(&mut store.pending);
         let committed = pending.len();

         for change in pending {
            match change {
               PendingChange::Upsert(food) => {
                  store.foods.insert(food.id(), food);
               }
               PendingChange::Remove(id) => {
                  store.foods.remove(&id);
               }
            }
         }

         tracing::debug!(committed, total = store.foods.len(), "食品ストアの変更を確定しました");
         Ok(committed > 0)
      })
   }

   async fn rollback(&self) -> Result<usize, InfraError> {
      self.with_store(|store| Ok(std::mem::take(&mut store.pending).len()))
   }
}
