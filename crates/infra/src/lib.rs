//! # Pantry インフラ層
//!
//! ストレージとの接続を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **リポジトリ**: [`repository::FoodRepository`] トレイトとインメモリ実装
//! - **シードデータ**: 起動時の初期データ投入（[`seed`]）
//! - **エラー**: [`InfraError`]
//!
//! ## 依存関係
//!
//! ```text
//! food-service → infra → domain
//! ```

pub mod error;
pub mod repository;
pub mod seed;

pub use error::{InfraError, InfraErrorKind};
