//! # Food Service エラー定義
//!
//! Food Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//! レスポンスボディは共有クレートの [`ErrorResponse`]（RFC 9457）を使う。

use axum::{
   Json,
   extract::rejection::{JsonRejection, PathRejection, QueryRejection},
   http::StatusCode,
   response::{IntoResponse, Response},
};
use pantry_domain::DomainError;
use pantry_infra::InfraError;
use pantry_shared::ErrorResponse;
use thiserror::Error;

/// Food Service で発生するエラー
#[derive(Debug, Error)]
pub enum FoodError {
   /// リソースが見つからない（存在しない ID、0 以下の ID を含む）
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 不正なリクエスト（ボディの形式不正、パスとボディの ID 不一致）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 入力値のバリデーションエラー
   #[error("バリデーションエラー: {0}")]
   Validation(String),

   /// ストアのエラー
   #[error("ストアエラー: {0}")]
   Infra(InfraError),

   /// 内部エラー
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl FoodError {
   /// レスポンスの HTTP ステータス
   pub fn status(&self) -> StatusCode {
      match self {
         Self::NotFound(_) => StatusCode::NOT_FOUND,
         Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
         Self::Infra(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      }
   }
}

impl From<DomainError> for FoodError {
   fn from(err: DomainError) -> Self {
      match err {
         DomainError::Validation(msg) => Self::Validation(msg),
         not_found @ DomainError::NotFound { .. } => Self::NotFound(not_found.to_string()),
      }
   }
}

impl From<InfraError> for FoodError {
   fn from(err: InfraError) -> Self {
      if err.is_not_found() {
         Self::NotFound(err.to_string())
      } else {
         Self::Infra(err)
      }
   }
}

impl From<JsonRejection> for FoodError {
   fn from(rejection: JsonRejection) -> Self {
      Self::BadRequest(format!(
         "リクエストボディが不正です: {}",
         rejection.body_text()
      ))
   }
}

impl From<QueryRejection> for FoodError {
   fn from(rejection: QueryRejection) -> Self {
      Self::Validation(format!(
         "クエリパラメータが不正です: {}",
         rejection.body_text()
      ))
   }
}

/// 数値として解釈できないパスの ID は「存在しない食品」として扱う
impl From<PathRejection> for FoodError {
   fn from(rejection: PathRejection) -> Self {
      Self::NotFound(format!("食品が見つかりません: {}", rejection.body_text()))
   }
}

impl IntoResponse for FoodError {
   fn into_response(self) -> Response {
      let status = self.status();
      let body = match self {
         FoodError::NotFound(msg) => ErrorResponse::not_found(msg),
         FoodError::BadRequest(msg) => ErrorResponse::bad_request(msg),
         FoodError::Validation(msg) => ErrorResponse::validation_error(msg),
         FoodError::Infra(e) => {
            tracing::error!(
               error = %e,
               span_trace = %e.span_trace(),
               "ストアエラー"
            );
            ErrorResponse::internal_error()
         }
         FoodError::Internal(msg) => {
            tracing::error!("内部エラー: {}", msg);
            ErrorResponse::internal_error()
         }
      };

      (status, Json(body)).into_response()
   }
}
