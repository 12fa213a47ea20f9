//! # Pantry 共有ユーティリティ
//!
//! このクレートは、Pantry プロジェクト全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, food-service）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum への依存は持たない（`IntoResponse` 変換は各サービスの責務）

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod link;
pub mod message_response;
pub mod observability;
pub mod paginated_response;

pub use error_response::ErrorResponse;
pub use health::HealthResponse;
pub use link::{HttpMethod, LinkDto};
pub use message_response::MessageResponse;
pub use paginated_response::{PaginatedResponse, PaginationMetadata};
