//! # Pantry ドメイン層
//!
//! 食品リソースのドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! food-service → infra → domain
//! ```
//!
//! ドメイン層は HTTP にもストレージにも依存しない。
//!
//! ## モジュール構成
//!
//! - [`food`] - 食品エンティティと値オブジェクト
//! - [`query`] - 一覧取得のページング・フィルタ・並び順
//! - [`patch`] - 部分更新ドキュメント（JSON Patch）
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層エラー
//!
//! ## 使用例
//!
//! ```rust
//! use pantry_domain::food::{Calories, FoodName};
//!
//! let name = FoodName::new("Apple").unwrap();
//! let calories = Calories::new(95).unwrap();
//! assert_eq!(name.as_str(), "Apple");
//! assert_eq!(calories.value(), 95);
//! assert!(Calories::new(0).is_err());
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod food;
pub mod patch;
pub mod query;

pub use error::DomainError;
