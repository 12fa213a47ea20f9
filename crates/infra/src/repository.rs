//! # リポジトリ
//!
//! 食品ストレージへのアクセスを抽象化する。
//!
//! ## 設計方針
//!
//! - **トレイト経由の注入**: ユースケースは `Arc<dyn FoodRepository>` だけを知る
//! - **明示的なストア**: グローバル状態を持たず、ストアはインスタンスが所有する

pub mod food_repository;

pub use food_repository::{FoodRepository, InMemoryFoodRepository};
