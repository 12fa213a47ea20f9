//! ユースケース層の共通ヘルパー

use pantry_domain::{DomainError, food::FoodId};
use pantry_infra::InfraError;

use crate::error::FoodError;

const ENTITY: &str = "Food";

fn food_not_found(id: impl ToString) -> FoodError {
   DomainError::NotFound {
      entity_type: ENTITY,
      id:          id.to_string(),
   }
   .into()
}

/// 生の ID を食品 ID に変換する
///
/// 0 以下の ID は存在しない食品として `FoodError::NotFound` を返す。
pub(crate) fn parse_food_id(raw: i64) -> Result<FoodId, FoodError> {
   FoodId::from_raw(raw).ok_or_else(|| food_not_found(raw))
}

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, FoodError>` に変換する
pub(crate) trait FindResultExt<T> {
   /// `None` の場合は `FoodError::NotFound` を返す
   fn or_not_found(self, id: FoodId) -> Result<T, FoodError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
   fn or_not_found(self, id: FoodId) -> Result<T, FoodError> {
      self?.ok_or_else(|| food_not_found(id))
   }
}

#[cfg(test)]
mod tests {
   use rstest::rstest;

   use super::*;

   #[rstest]
   #[case(0)]
   #[case(-3)]
   fn test_parse_food_idは0以下をnot_foundにする(#[case] raw: i64) {
      assert!(matches!(parse_food_id(raw), Err(FoodError::NotFound(_))));
   }

   #[test]
   fn test_or_not_found_ok_some_は値を返す() {
      let id = FoodId::from_raw(1).unwrap();
      let result: Result<Option<i32>, InfraError> = Ok(Some(42));

      assert_eq!(result.or_not_found(id).unwrap(), 42);
   }

   #[test]
   fn test_or_not_found_ok_none_はnot_foundエラーを返す() {
      let id = FoodId::from_raw(1).unwrap();
      let result: Result<Option<i32>, InfraError> = Ok(None);

      assert!(matches!(result.or_not_found(id), Err(FoodError::NotFound(_))));
   }

   #[test]
   fn test_or_not_found_err_はストアエラーを返す() {
      let id = FoodId::from_raw(1).unwrap();
      let result: Result<Option<i32>, InfraError> = Err(InfraError::poisoned("poisoned"));

      assert!(matches!(result.or_not_found(id), Err(FoodError::Infra(_))));
   }
}
