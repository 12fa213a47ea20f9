//! # ドメイン層エラー定義
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | 食品が存在しない、または ID が正でない |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// 必須項目の欠落、範囲外の数値、不正な並び順指定、適用できない部分更新など。
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// エンティティが見つからない
   #[error("{entity_type} が見つかりません: {id}")]
   NotFound {
      /// エンティティの種類（"Food" など）
      entity_type: &'static str,
      /// 検索に使用した識別子
      id:          String,
   },
}

impl DomainError {
   /// バリデーションエラーを作成する
   pub fn validation(msg: impl Into<String>) -> Self {
      Self::Validation(msg.into())
   }
}
