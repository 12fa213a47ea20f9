//! # ユースケース層
//!
//! Food Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと時計を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入出力の変換のみ、判定の順序はユースケースに集約
//! - **作業単位**: 変更系の操作は最後に `save` で確定する

pub(crate) mod helpers;

pub mod food;

pub use food::{CreateFoodInput, FoodPage, FoodUseCaseImpl, UpdateFoodInput};
