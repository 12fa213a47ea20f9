//! # ルーター構築
//!
//! ヘルスチェックと、バージョンごとの食品ルートを 1 つの `Router` にまとめる。
//!
//! ```text
//! /health
//! /api/v1/food...
//! /api/v2/food...
//! ```

use std::sync::Arc;

use axum::{Router, routing::get};
use strum::IntoEnumIterator;

use crate::{
   handler::{
      FoodState,
      create_food,
      delete_food,
      get_food,
      get_food_details,
      get_random_meal,
      health_check,
      list_foods,
      patch_food,
      update_food,
   },
   link::{ApiVersion, LinkBuilder},
   usecase::FoodUseCaseImpl,
};

/// アプリケーションのルーターを構築する
///
/// ミドルウェア（トレース、canonical log line）は呼び出し側で重ねる。
pub fn build_app(usecase: Arc<FoodUseCaseImpl>, links: LinkBuilder) -> Router {
   ApiVersion::iter().fold(
      Router::new().route("/health", get(health_check)),
      |app, version| {
         let state = Arc::new(FoodState {
            usecase: usecase.clone(),
            links: links.clone(),
            version,
         });
         app.nest(&version.prefix(), food_routes(state))
      },
   )
}

fn food_routes(state: Arc<FoodState>) -> Router {
   Router::new()
      .route("/food", get(list_foods).post(create_food))
      .route("/food/random-meal", get(get_random_meal))
      .route("/food/details/{id}", get(get_food_details))
      .route(
         "/food/{id}",
         get(get_food)
            .put(update_food)
            .patch(patch_food)
            .delete(delete_food),
      )
      .with_state(state)
}
