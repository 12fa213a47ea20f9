//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、判定の順序はユースケースに委譲

pub mod food;
pub mod health;

pub use food::{
   FoodState,
   create_food,
   delete_food,
   get_food,
   get_food_details,
   get_random_meal,
   list_foods,
   patch_food,
   update_food,
};
pub use health::health_check;
