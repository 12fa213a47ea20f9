//! # 食品（Food）
//!
//! API が公開する唯一のリソース。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`FoodEntity`] | 食品 | ストレージ上の表現。ID・名前・カロリー・種別・作成日時 |
//! | [`NewFood`] | 未登録の食品 | ID 採番前の食品。リポジトリへの追加時に使う |
//! | [`FoodType`] | 種別 | 自由入力の分類。`Starter` / `Main` / `Dessert` はコース扱い |
//! | [`Course`] | コース | ランダムな献立を組み立てるときの区分 |
//!
//! ## 不変条件
//!
//! - ID は正の整数で、リポジトリが採番する
//! - 名前は空でない
//! - カロリーは正の整数

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::DomainError;

/// 食品 ID
///
/// 正の整数のみを表現する。0 以下の値は「存在しない食品」として扱うため、
/// 変換は [`FoodId::from_raw`] で `Option` を返す。
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("{_0}")]
pub struct FoodId(i64);

impl FoodId {
   /// 生の整数から ID を作成する（0 以下は `None`）
   pub fn from_raw(value: i64) -> Option<Self> {
      (value > 0).then_some(Self(value))
   }

   pub fn value(&self) -> i64 {
      self.0
   }
}

define_validated_string! {
   /// 食品名
   pub struct FoodName {
      label: "食品名",
      max_length: 100,
   }
}

define_validated_string! {
   /// 食品の種別（例: `Main`）
   pub struct FoodType {
      label: "種別",
      max_length: 50,
   }
}

impl FoodType {
   /// 種別がコースに該当すればそのコースを返す（大文字小文字は区別しない）
   pub fn course(&self) -> Option<Course> {
      self.as_str().parse().ok()
   }
}

/// 献立のコース
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr, strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum Course {
   Starter,
   Main,
   Dessert,
}

/// カロリー（kcal）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Calories(i64);

impl Calories {
   /// カロリーを作成する
   ///
   /// # バリデーション
   ///
   /// - 1 以上
   pub fn new(value: i64) -> Result<Self, DomainError> {
      if value <= 0 {
         return Err(DomainError::validation(
            "カロリーは正の整数である必要があります",
         ));
      }
      Ok(Self(value))
   }

   pub fn value(&self) -> i64 {
      self.0
   }
}

/// ID 採番前の食品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFood {
   pub name:      FoodName,
   pub calories:  Calories,
   pub food_type: Option<FoodType>,
   pub created:   DateTime<Utc>,
}

impl NewFood {
   /// 生の入力値を検証して未登録の食品を作成する
   ///
   /// 名前 → カロリー → 種別の順に検証し、最初の違反を返す。
   pub fn validate(
      name: &str,
      calories: i64,
      food_type: Option<&str>,
      created: DateTime<Utc>,
   ) -> Result<Self, DomainError> {
      Ok(Self {
         name: FoodName::new(name)?,
         calories: Calories::new(calories)?,
         food_type: parse_food_type(food_type)?,
         created,
      })
   }
}

/// 食品エンティティ
///
/// リポジトリが所有するストレージ表現。ハンドラは 1 リクエストの間だけ
/// クローンを保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodEntity {
   id:        FoodId,
   name:      FoodName,
   calories:  Calories,
   food_type: Option<FoodType>,
   created:   DateTime<Utc>,
}

impl FoodEntity {
   /// 採番済み ID と未登録の食品からエンティティを組み立てる
   pub fn from_new(id: FoodId, food: NewFood) -> Self {
      Self {
         id,
         name: food.name,
         calories: food.calories,
         food_type: food.food_type,
         created: food.created,
      }
   }

   // Getter メソッド

   pub fn id(&self) -> FoodId {
      self.id
   }

   pub fn name(&self) -> &FoodName {
      &self.name
   }

   pub fn calories(&self) -> Calories {
      self.calories
   }

   pub fn food_type(&self) -> Option<&FoodType> {
      self.food_type.as_ref()
   }

   pub fn created(&self) -> DateTime<Utc> {
      self.created
   }

   /// 変更可能な全フィールドを置き換えた新しいインスタンスを返す
   ///
   /// ID と作成日時は維持する。
   pub fn replaced(
      self,
      name: FoodName,
      calories: Calories,
      food_type: Option<FoodType>,
   ) -> Self {
      Self {
         name,
         calories,
         food_type,
         ..self
      }
   }
}

/// 任意入力の種別をパースする（空白のみは未指定とみなす）
pub(crate) fn parse_food_type(value: Option<&str>) -> Result<Option<FoodType>, DomainError> {
   match value {
      Some(v) if !v.trim().is_empty() => FoodType::new(v).map(Some),
      _ => Ok(None),
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   fn now() -> DateTime<Utc> {
      DateTime::from_timestamp(1_700_000_000, 0).unwrap()
   }

   #[rstest]
   #[case(0)]
   #[case(-1)]
   #[case(i64::MIN)]
   fn test_food_idは0以下を拒否する(#[case] raw: i64) {
      assert_eq!(FoodId::from_raw(raw), None);
   }

   #[test]
   fn test_food_idは正の整数を受け入れる() {
      assert_eq!(FoodId::from_raw(7).map(|id| id.value()), Some(7));
   }

   #[rstest]
   #[case(0)]
   #[case(-95)]
   fn test_カロリーは0以下を拒否する(#[case] value: i64) {
      assert!(matches!(
         Calories::new(value),
         Err(DomainError::Validation(_))
      ));
   }

   #[rstest]
   #[case("", "空文字列")]
   #[case("   ", "空白のみ")]
   fn test_食品名は空を拒否する(#[case] input: &str, #[case] _reason: &str) {
      assert!(FoodName::new(input).is_err());
   }

   #[test]
   fn test_食品名は前後の空白をトリムする() {
      assert_eq!(FoodName::new("  Apple  ").unwrap().as_str(), "Apple");
   }

   #[test]
   fn test_食品名は100文字を超えると拒否する() {
      assert!(FoodName::new("a".repeat(100)).is_ok());
      assert!(FoodName::new("a".repeat(101)).is_err());
   }

   #[rstest]
   #[case("Starter", Some(Course::Starter))]
   #[case("main", Some(Course::Main))]
   #[case("DESSERT", Some(Course::Dessert))]
   #[case("Snack", None)]
   fn test_種別からコースを判定する(#[case] input: &str, #[case] expected: Option<Course>) {
      assert_eq!(FoodType::new(input).unwrap().course(), expected);
   }

   #[test]
   fn test_validateは名前の違反をカロリーより先に報告する() {
      let err = NewFood::validate("", 0, None, now()).unwrap_err();

      assert_eq!(err, DomainError::Validation("食品名は必須です".to_string()));
   }

   #[test]
   fn test_validateは空白のみの種別を未指定として扱う() {
      let food = NewFood::validate("Apple", 95, Some("  "), now()).unwrap();

      assert_eq!(food.food_type, None);
   }

   #[test]
   fn test_replacedはidと作成日時を維持する() {
      let id = FoodId::from_raw(3).unwrap();
      let entity = FoodEntity::from_new(
         id,
         NewFood::validate("Apple", 95, Some("Starter"), now()).unwrap(),
      );

      let replaced = entity.replaced(
         FoodName::new("Green Apple").unwrap(),
         Calories::new(100).unwrap(),
         None,
      );

      assert_eq!(replaced.id(), id);
      assert_eq!(replaced.created(), now());
      assert_eq!(replaced.name().as_str(), "Green Apple");
      assert_eq!(replaced.calories().value(), 100);
      assert_eq!(replaced.food_type(), None);
   }

   #[test]
   fn test_食品名はjsonの文字列として入出力される() {
      let name: FoodName = serde_json::from_str("\"Pizza\"").unwrap();
      assert_eq!(serde_json::to_string(&name).unwrap(), "\"Pizza\"");
      assert!(serde_json::from_str::<FoodName>("\"\"").is_err());
   }
}
