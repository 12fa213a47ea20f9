//! # 食品ユースケース
//!
//! 食品の一覧・取得・作成・更新・削除・部分更新と、ランダムな献立の取得を実装する。

use std::sync::Arc;

use pantry_domain::{
   clock::Clock,
   food::{FoodEntity, FoodId, NewFood},
   patch::PatchDocument,
   query::QueryParameters,
};
use pantry_infra::repository::FoodRepository;
use pantry_shared::PaginationMetadata;
use tokio::sync::{Mutex, MutexGuard};

use super::helpers::{FindResultExt, parse_food_id};
use crate::error::FoodError;

/// 食品作成の入力
#[derive(Debug, Clone)]
pub struct CreateFoodInput {
   pub name:      String,
   pub calories:  i64,
   pub food_type: Option<String>,
}

/// 食品更新（全置換）の入力
#[derive(Debug, Clone)]
pub struct UpdateFoodInput {
   /// ボディ側の ID（パスの ID と一致する必要がある）
   pub id:        i64,
   pub name:      String,
   pub calories:  i64,
   pub food_type: Option<String>,
}

/// 一覧の 1 ページ分
#[derive(Debug, Clone)]
pub struct FoodPage {
   pub foods:      Vec<FoodEntity>,
   pub pagination: PaginationMetadata,
}

/// 食品ユースケース
///
/// 変更系の操作は `write_lock` を保持したまま変更を積み、`save` で確定する。
/// リポジトリの保留リストはストア全体で共有されるため、他の書き込みの変更を
/// 確定してしまわないようにこの区間を直列化する。
pub struct FoodUseCaseImpl {
   repository: Arc<dyn FoodRepository>,
   clock:      Arc<dyn Clock>,
   write_lock: Mutex<()>,
}

impl FoodUseCaseImpl {
   pub fn new(repository: Arc<dyn FoodRepository>, clock: Arc<dyn Clock>) -> Self {
      Self {
         repository,
         clock,
         write_lock: Mutex::new(()),
      }
   }

   /// 取得条件に一致する食品の 1 ページ分と、フィルタ後の総件数から計算したページング状態を返す
   pub async fn list_foods(&self, params: &QueryParameters) -> Result<FoodPage, FoodError> {
      let total_count = self.repository.count(params).await?;
      let foods = self.repository.get_all(params).await?;

      Ok(FoodPage {
         foods,
         pagination: PaginationMetadata::new(total_count, params.page_size(), params.page()),
      })
   }

   /// ID で食品を取得
   pub async fn get_food(&self, id: FoodId) -> Result<FoodEntity, FoodError> {
      self.repository.get_single(id).await.or_not_found(id)
   }

   /// 食品を作成
   ///
   /// 検証に失敗した場合はストアに触れない。
   pub async fn create_food(&self, input: CreateFoodInput) -> Result<FoodEntity, FoodError> {
      let new_food = NewFood::validate(
         &input.name,
         input.calories,
         input.food_type.as_deref(),
         self.clock.now(),
      )?;

      let _write = self.begin_write().await?;
      let food = self.repository.add(new_food).await?;
      self.commit().await?;

      tracing::info!(food_id = %food.id(), "食品を作成しました");
      Ok(food)
   }

   /// 食品を全置換で更新
   ///
   /// 判定順序: パスとボディの ID 不一致 → 0 以下の ID → 存在確認 → フィールド検証。
   /// 作成日時は維持する。
   pub async fn update_food(
      &self,
      path_id: i64,
      input: UpdateFoodInput,
   ) -> Result<FoodEntity, FoodError> {
      if path_id != input.id {
         return Err(FoodError::BadRequest(format!(
            "パスの ID ({path_id}) とボディの ID ({}) が一致しません",
            input.id
         )));
      }
      let id = parse_food_id(path_id)?;

      let _write = self.begin_write().await?;
      let existing = self.repository.get_single(id).await.or_not_found(id)?;

      let validated = NewFood::validate(
         &input.name,
         input.calories,
         input.food_type.as_deref(),
         existing.created(),
      )?;
      let replaced = existing.replaced(validated.name, validated.calories, validated.food_type);

      let food = self.repository.update(id, replaced).await?;
      self.commit().await?;

      tracing::info!(food_id = %id, "食品を更新しました");
      Ok(food)
   }

   /// 食品を削除
   pub async fn delete_food(&self, id: FoodId) -> Result<(), FoodError> {
      let _write = self.begin_write().await?;
      self.repository.get_single(id).await.or_not_found(id)?;

      self.repository.delete(id).await?;
      self.commit().await?;

      tracing::info!(food_id = %id, "食品を削除しました");
      Ok(())
   }

   /// 部分更新ドキュメントを適用して食品を更新
   ///
   /// 適用結果が検証に失敗した場合はストアに触れない。
   pub async fn patch_food(
      &self,
      id: FoodId,
      document: &PatchDocument,
   ) -> Result<FoodEntity, FoodError> {
      let _write = self.begin_write().await?;
      let existing = self.repository.get_single(id).await.or_not_found(id)?;

      let patched = document.apply(&existing)?;

      let food = self.repository.update(id, patched).await?;
      self.commit().await?;

      tracing::info!(
         food_id = %id,
         operations = document.operations().len(),
         "食品を部分更新しました"
      );
      Ok(food)
   }

   /// コースごとに 1 品ずつ無作為に選んだ献立を取得
   pub async fn random_meal(&self) -> Result<Vec<FoodEntity>, FoodError> {
      Ok(self.repository.get_random_meal().await?)
   }

   /// 書き込み区間を開始する
   ///
   /// ロック取得時点で残っている保留中の変更は、`save` 前に中断された
   /// 書き込みのものなので破棄する。
   async fn begin_write(&self) -> Result<MutexGuard<'_, ()>, FoodError> {
      let guard = self.write_lock.lock().await;

      let discarded = self.repository.rollback().await?;
      if discarded > 0 {
         tracing::warn!(discarded, "中断された書き込みの未確定の変更を破棄しました");
      }

      Ok(guard)
   }

   async fn commit(&self) -> Result<(), FoodError> {
      if self.repository.save().await? {
         Ok(())
      } else {
         Err(FoodError::Internal(
            "変更をストアに保存できませんでした".to_string(),
         ))
      }
   }
}
