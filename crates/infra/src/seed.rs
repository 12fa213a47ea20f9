//! # シードデータ
//!
//! 起動時にストアが空であれば、初期の食品一覧を投入する。

use pantry_domain::{DomainError, clock::Clock, food::NewFood, query::QueryParameters};

use crate::{error::InfraError, repository::FoodRepository};

/// 初期データ（名前, カロリー, 種別）
const SEED_FOODS: &[(&str, i64, &str)] = &[
   ("Tomato Soup", 150, "Starter"),
   ("Caesar Salad", 350, "Starter"),
   ("Bruschetta", 200, "Starter"),
   ("Lasagne", 1000, "Main"),
   ("Hamburger", 1100, "Main"),
   ("Spaghetti", 1200, "Main"),
   ("Pizza", 1300, "Main"),
   ("Tiramisu", 450, "Dessert"),
   ("Apple Pie", 400, "Dessert"),
   ("Ice Cream", 270, "Dessert"),
];

/// ストアが空の場合に初期データを投入する
///
/// 投入した件数を返す。既にデータがあれば何もせず 0 を返す。
pub async fn seed_foods(repo: &dyn FoodRepository, clock: &dyn Clock) -> Result<usize, InfraError> {
   if repo.count(&QueryParameters::default()).await? > 0 {
      tracing::debug!("食品データが既に存在するためシードをスキップします");
      return Ok(0);
   }

   let now = clock.now();
   for (name, calories, food_type) in SEED_FOODS {
      let food = NewFood::validate(name, *calories, Some(*food_type), now)
         .map_err(|e: DomainError| InfraError::unexpected(e.to_string()))?;
      repo.add(food).await?;
   }
   if !repo.save().await? {
      return Err(InfraError::unexpected("シードデータを確定できませんでした"));
   }

   tracing::info!(count = SEED_FOODS.len(), "食品のシードデータを投入しました");
   Ok(SEED_FOODS.len())
}

#[cfg(test)]
mod tests {
   use async_trait::async_trait;
   use chrono::DateTime;
   use pantry_domain::{
      clock::FixedClock,
      food::{FoodEntity, FoodId},
   };

   use super::*;
   use crate::repository::InMemoryFoodRepository;

   /// 変更を確定しないリポジトリ
   struct NeverCommittingRepository(InMemoryFoodRepository);

   #[async_trait]
   impl FoodRepository for NeverCommittingRepository {
      async fn get_single(&self, id: FoodId) -> Result<Option<FoodEntity>, InfraError> {
         self.0.get_single(id).await
      }

      async fn add(&self, food: NewFood) -> Result<FoodEntity, InfraError> {
         self.0.add(food).await
      }

      async fn delete(&self, id: FoodId) -> Result<(), InfraError> {
         self.0.delete(id).await
      }

      async fn update(&self, id: FoodId, food: FoodEntity) -> Result<FoodEntity, InfraError> {
         self.0.update(id, food).await
      }

      async fn get_all(&self, params: &QueryParameters) -> Result<Vec<FoodEntity>, InfraError> {
         self.0.get_all(params).await
      }

      async fn get_random_meal(&self) -> Result<Vec<FoodEntity>, InfraError> {
         self.0.get_random_meal().await
      }

      async fn count(&self, params: &QueryParameters) -> Result<usize, InfraError> {
         self.0.count(params).await
      }

      async fn save(&self) -> Result<bool, InfraError> {
         Ok(false)
      }

      async fn rollback(&self) -> Result<usize, InfraError> {
         self.0.rollback().await
      }
   }

   fn clock() -> FixedClock {
      FixedClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap())
   }

   #[tokio::test]
   async fn test_空のストアに初期データを投入する() {
      let repo = InMemoryFoodRepository::new();

      let seeded = seed_foods(&repo, &clock()).await.unwrap();

      assert_eq!(seeded, SEED_FOODS.len());
      assert_eq!(
         repo.count(&QueryParameters::default()).await.unwrap(),
         SEED_FOODS.len()
      );
   }

   #[tokio::test]
   async fn test_2回目の投入は何もしない() {
      let repo = InMemoryFoodRepository::new();
      seed_foods(&repo, &clock()).await.unwrap();

      let seeded = seed_foods(&repo, &clock()).await.unwrap();

      assert_eq!(seeded, 0);
      assert_eq!(
         repo.count(&QueryParameters::default()).await.unwrap(),
         SEED_FOODS.len()
      );
   }

   #[tokio::test]
   async fn test_確定されなかった投入はエラーになる() {
      let repo = NeverCommittingRepository(InMemoryFoodRepository::new());

      let result = seed_foods(&repo, &clock()).await;

      assert!(result.is_err());
      assert_eq!(repo.count(&QueryParameters::default()).await.unwrap(), 0);
   }

   #[tokio::test]
   async fn test_初期データには全コースが含まれる() {
      let repo = InMemoryFoodRepository::new();
      seed_foods(&repo, &clock()).await.unwrap();

      assert_eq!(repo.get_random_meal().await.unwrap().len(), 3);
   }
}
