//! # 部分更新ドキュメント（JSON Patch）
//!
//! 食品に対する部分更新を、既知フィールドへの操作の列として表現する。
//!
//! ## JSON 形式（RFC 6902 のサブセット）
//!
//! ```json
//! [
//!   { "op": "replace", "path": "/calories", "value": 110 },
//!   { "op": "remove",  "path": "/type" }
//! ]
//! ```
//!
//! ## 対応する操作
//!
//! | op | 意味 |
//! |----|------|
//! | `add` / `replace` | フィールドに値を設定する |
//! | `remove` | 任意フィールド（`type`）を未設定にする |
//! | `test` | 現在値が一致しなければ適用全体を失敗させる |
//!
//! `move` / `copy` は対応しないため、デシリアライズ時点で不正なドキュメントとなる。
//!
//! ## 適用の流れ
//!
//! 操作は生の値を持つ下書きに順番に適用し、最後に下書き全体を検証する。
//! 途中で一時的に不正な値になっても、最終状態が正しければ成功する。

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use strum::{EnumString, IntoStaticStr};

use crate::{
   DomainError,
   food::{Calories, FoodEntity, FoodName, parse_food_type},
};

/// 部分更新の 1 操作
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
   Add { path: String, value: JsonValue },
   Replace { path: String, value: JsonValue },
   Remove { path: String },
   Test { path: String, value: JsonValue },
}

impl PatchOperation {
   fn path(&self) -> &str {
      match self {
         Self::Add { path, .. }
         | Self::Replace { path, .. }
         | Self::Remove { path }
         | Self::Test { path, .. } => path,
      }
   }
}

/// 部分更新ドキュメント（操作の順序付きリスト）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<PatchOperation>);

impl PatchDocument {
   pub fn new(operations: Vec<PatchOperation>) -> Self {
      Self(operations)
   }

   pub fn operations(&self) -> &[PatchOperation] {
      &self.0
   }

   /// 食品にドキュメントを適用した結果を返す
   ///
   /// 元のエンティティは変更しない。ID と作成日時は変更できない。
   pub fn apply(&self, food: &FoodEntity) -> Result<FoodEntity, DomainError> {
      let mut draft = FoodDraft::from(food);

      for operation in &self.0 {
         let field = PatchField::parse(operation.path())?;
         match operation {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
               draft.set(field, value)?;
            }
            PatchOperation::Remove { .. } => draft.remove(field)?,
            PatchOperation::Test { value, .. } => {
               if draft.get(field) != *value {
                  return Err(DomainError::validation(format!(
                     "test 操作が失敗しました: {} の値が一致しません",
                     operation.path()
                  )));
               }
            }
         }
      }

      draft.into_entity(food)
   }
}

/// 部分更新の対象になり得るフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
enum PatchField {
   Id,
   Name,
   Calories,
   Type,
   Created,
}

impl PatchField {
   /// `/name` 形式のパスをフィールドに変換する
   ///
   /// 未知のフィールドと、変更不可のフィールド（`id`, `created`）は拒否する。
   fn parse(path: &str) -> Result<Self, DomainError> {
      let field = path
         .strip_prefix('/')
         .and_then(|name| name.parse::<Self>().ok())
         .ok_or_else(|| DomainError::validation(format!("不明なフィールドです: {path}")))?;

      match field {
         Self::Id | Self::Created => Err(DomainError::validation(format!(
            "{path} は変更できません"
         ))),
         _ => Ok(field),
      }
   }
}

/// 検証前の生の値を持つ下書き
struct FoodDraft {
   name:      String,
   calories:  i64,
   food_type: Option<String>,
}

impl From<&FoodEntity> for FoodDraft {
   fn from(food: &FoodEntity) -> Self {
      Self {
         name:      food.name().as_str().to_string(),
         calories:  food.calories().value(),
         food_type: food.food_type().map(|t| t.as_str().to_string()),
      }
   }
}

impl FoodDraft {
   fn get(&self, field: PatchField) -> JsonValue {
      match field {
         PatchField::Name => JsonValue::from(self.name.as_str()),
         PatchField::Calories => JsonValue::from(self.calories),
         PatchField::Type => self
            .food_type
            .as_deref()
            .map_or(JsonValue::Null, JsonValue::from),
         PatchField::Id | PatchField::Created => JsonValue::Null,
      }
   }

   fn set(&mut self, field: PatchField, value: &JsonValue) -> Result<(), DomainError> {
      match field {
         PatchField::Name => {
            self.name = value
               .as_str()
               .ok_or_else(|| DomainError::validation("name には文字列を指定してください"))?
               .to_string();
         }
         PatchField::Calories => {
            self.calories = value.as_i64().ok_or_else(|| {
               DomainError::validation("calories には整数を指定してください")
            })?;
         }
         PatchField::Type => {
            self.food_type = match value {
               JsonValue::Null => None,
               JsonValue::String(s) => Some(s.clone()),
               _ => {
                  return Err(DomainError::validation(
                     "type には文字列または null を指定してください",
                  ));
               }
            };
         }
         PatchField::Id | PatchField::Created => {
            let name: &'static str = field.into();
            return Err(DomainError::validation(format!("/{name} は変更できません")));
         }
      }
      Ok(())
   }

   fn remove(&mut self, field: PatchField) -> Result<(), DomainError> {
      match field {
         PatchField::Type => {
            self.food_type = None;
            Ok(())
         }
         _ => {
            let name: &'static str = field.into();
            Err(DomainError::validation(format!(
               "必須項目 {name} は削除できません"
            )))
         }
      }
   }

   fn into_entity(self, original: &FoodEntity) -> Result<FoodEntity, DomainError> {
      let name = FoodName::new(self.name)?;
      let calories = Calories::new(self.calories)?;
      let food_type = parse_food_type(self.food_type.as_deref())?;

      Ok(original.clone().replaced(name, calories, food_type))
   }
}

#[cfg(test)]
mod tests {
   use chrono::{DateTime, Utc};
   use pretty_assertions::assert_eq;
   use rstest::rstest;
   use serde_json::json;

   use super::*;
   use crate::food::{FoodId, NewFood};

   fn apple() -> FoodEntity {
      let created: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
      FoodEntity::from_new(
         FoodId::from_raw(1).unwrap(),
         NewFood::validate("Apple", 95, Some("Starter"), created).unwrap(),
      )
   }

   fn document(value: JsonValue) -> PatchDocument {
      serde_json::from_value(value).unwrap()
   }

   #[test]
   fn test_単一フィールドの置換はそのフィールドだけを変更する() {
      let original = apple();
      let doc = document(json!([{ "op": "replace", "path": "/calories", "value": 110 }]));

      let patched = doc.apply(&original).unwrap();

      assert_eq!(patched.calories().value(), 110);
      assert_eq!(patched.id(), original.id());
      assert_eq!(patched.name(), original.name());
      assert_eq!(patched.food_type(), original.food_type());
      assert_eq!(patched.created(), original.created());
   }

   #[test]
   fn test_操作は順番に適用され最終状態で検証される() {
      let doc = document(json!([
         { "op": "replace", "path": "/name", "value": "" },
         { "op": "replace", "path": "/name", "value": "Green Apple" }
      ]));

      let patched = doc.apply(&apple()).unwrap();

      assert_eq!(patched.name().as_str(), "Green Apple");
   }

   #[test]
   fn test_removeで種別を未設定にできる() {
      let doc = document(json!([{ "op": "remove", "path": "/type" }]));

      assert_eq!(doc.apply(&apple()).unwrap().food_type(), None);
   }

   #[test]
   fn test_testが一致すれば後続の操作が適用される() {
      let doc = document(json!([
         { "op": "test", "path": "/calories", "value": 95 },
         { "op": "add", "path": "/type", "value": "Dessert" }
      ]));

      let patched = doc.apply(&apple()).unwrap();

      assert_eq!(patched.food_type().map(|t| t.as_str()), Some("Dessert"));
   }

   #[rstest]
   #[case(json!([{ "op": "replace", "path": "/calories", "value": 0 }]), "カロリー")]
   #[case(json!([{ "op": "replace", "path": "/name", "value": "  " }]), "食品名")]
   #[case(json!([{ "op": "replace", "path": "/calories", "value": "many" }]), "calories")]
   #[case(json!([{ "op": "replace", "path": "/colour", "value": "red" }]), "不明")]
   #[case(json!([{ "op": "replace", "path": "/id", "value": 9 }]), "変更できません")]
   #[case(json!([{ "op": "replace", "path": "/created", "value": "2020-01-01T00:00:00Z" }]), "変更できません")]
   #[case(json!([{ "op": "remove", "path": "/name" }]), "削除できません")]
   #[case(json!([{ "op": "test", "path": "/name", "value": "Pear" }]), "test")]
   fn test_適用後に不正となるドキュメントはバリデーションエラー(
      #[case] value: JsonValue,
      #[case] expected_fragment: &str,
   ) {
      let err = document(value).apply(&apple()).unwrap_err();

      let DomainError::Validation(msg) = err else {
         panic!("バリデーションエラーであること: {err:?}");
      };
      assert!(msg.contains(expected_fragment), "{msg}");
   }

   #[rstest]
   #[case(json!({ "op": "replace", "path": "/name", "value": "x" }))]
   #[case(json!([{ "op": "move", "from": "/name", "path": "/type" }]))]
   #[case(json!([{ "path": "/name", "value": "x" }]))]
   #[case(json!([{ "op": "replace", "path": "/name" }]))]
   fn test_形式が不正なドキュメントはデシリアライズできない(#[case] value: JsonValue) {
      assert!(serde_json::from_value::<PatchDocument>(value).is_err());
   }
}
