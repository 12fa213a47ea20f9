//! # インフラ層エラー定義
//!
//! ストレージ操作で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! convenience constructor でエラーを生成すると、その時点のスパン情報
//! （どのリクエスト・どのリポジトリ操作か）が自動的に記録される。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// 対象のレコードが存在しない
   ///
   /// 存在確認と更新の間に別リクエストが削除した場合などに発生する。
   #[error("{entity}(id={id}) が存在しません")]
   NotFound {
      /// エンティティ名（例: "Food"）
      entity: String,
      /// エンティティの ID
      id:     String,
   },

   /// ストアのロックが毒化している
   ///
   /// ロック保持中に別スレッドが panic した場合に発生する。
   #[error("ストアのロックが破損しています: {0}")]
   Poisoned(String),

   /// 予期しないエラー
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

impl InfraError {
   /// エラー種別を取得する
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   /// SpanTrace を取得する
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   /// NotFound の場合に `true` を返す
   pub fn is_not_found(&self) -> bool {
      matches!(self.kind, InfraErrorKind::NotFound { .. })
   }

   // ===== Convenience constructors =====

   fn capture(kind: InfraErrorKind) -> Self {
      Self {
         kind,
         span_trace: SpanTrace::capture(),
      }
   }

   /// レコード不在エラーを生成する
   pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
      Self::capture(InfraErrorKind::NotFound {
         entity: entity.into(),
         id:     id.to_string(),
      })
   }

   /// ロック毒化エラーを生成する
   pub fn poisoned(msg: impl Into<String>) -> Self {
      Self::capture(InfraErrorKind::Poisoned(msg.into()))
   }

   /// 予期しないエラーを生成する
   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self::capture(InfraErrorKind::Unexpected(msg.into()))
   }
}

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

#[cfg(test)]
mod tests {
   use tracing_subscriber::layer::SubscriberExt as _;

   use super::*;

   #[test]
   fn test_not_foundでspan_traceがキャプチャされる() {
      let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
      let _guard = tracing::subscriber::set_default(subscriber);
      let span = tracing::info_span!("food_repository_delete");
      let _enter = span.enter();

      let err = InfraError::not_found("Food", 42);

      assert!(err.is_not_found());
      let trace = format!("{}", err.span_trace());
      assert!(
         trace.contains("food_repository_delete"),
         "SpanTrace がスパン名を含むこと: {trace}"
      );
   }

   #[test]
   fn test_displayはエラー種別のメッセージを出力する() {
      assert_eq!(
         InfraError::not_found("Food", 7).to_string(),
         "Food(id=7) が存在しません"
      );
      assert_eq!(
         InfraError::poisoned("food store").to_string(),
         "ストアのロックが破損しています: food store"
      );
   }

   #[test]
   fn test_not_found以外はis_not_foundがfalse() {
      assert!(!InfraError::unexpected("boom").is_not_found());
   }
}
