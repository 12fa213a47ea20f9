//! # 食品ハンドラ
//!
//! 食品リソースの CRUD・部分更新・ランダム献立の API。
//! 同じハンドラを `/api/v1` と `/api/v2` の両方にマウントし、
//! リンクの href にはリクエストを処理したバージョンを使う。
//!
//! ## エンドポイント
//!
//! - `GET /food` - 一覧（`X-Pagination` ヘッダー付き）
//! - `POST /food` - 作成
//! - `GET /food/random-meal` - コースごとに 1 品の献立
//! - `GET /food/{id}` - 取得
//! - `GET /food/details/{id}` - 取得（非推奨）
//! - `PUT /food/{id}` - 全置換更新
//! - `PATCH /food/{id}` - 部分更新（JSON Patch）
//! - `DELETE /food/{id}` - 削除
//!
//! ボディの JSON が不正な場合は axum 既定の 422 ではなく 400 を返す。

use std::sync::Arc;

use axum::{
   Json,
   extract::{
      Path,
      Query,
      State,
      rejection::{JsonRejection, PathRejection, QueryRejection},
   },
   http::{HeaderValue, StatusCode, header},
   response::IntoResponse,
};
use pantry_domain::{
   food::{FoodEntity, FoodId},
   patch::PatchDocument,
   query::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, OrderBy, QueryParameters},
};
use pantry_shared::{LinkDto, MessageResponse, PaginatedResponse, PaginationMetadata};
use serde::{Deserialize, Serialize};

use crate::{
   error::FoodError,
   link::{ApiVersion, LinkBuilder},
   usecase::{CreateFoodInput, FoodUseCaseImpl, UpdateFoodInput, helpers::parse_food_id},
};

/// ページング状態を JSON で返すレスポンスヘッダー
pub const X_PAGINATION: &str = "x-pagination";

/// 非推奨エンドポイントであることを示すレスポンスヘッダー
pub const DEPRECATION: &str = "deprecation";

/// 削除成功時のメッセージ
pub const DELETED_MESSAGE: &str = "Food item deleted successfully.";

/// 食品 API の共有状態（バージョンごとに 1 つ）
pub struct FoodState {
   pub usecase: Arc<FoodUseCaseImpl>,
   pub links:   LinkBuilder,
   pub version: ApiVersion,
}

impl FoodState {
   fn expand(&self, food: FoodEntity) -> FoodDto {
      let links = self.links.item_links(self.version, food.id());
      FoodDto::from_entity(food, links)
   }
}

// --- リクエスト型 ---

/// 一覧取得のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFoodsQuery {
   pub page:      Option<usize>,
   pub page_size: Option<usize>,
   pub query:     Option<String>,
   pub order_by:  Option<String>,
}

impl ListFoodsQuery {
   fn into_parameters(self) -> Result<QueryParameters, FoodError> {
      let order_by = match self.order_by.as_deref().map(str::trim) {
         Some(order_by) if !order_by.is_empty() => order_by.parse::<OrderBy>()?,
         _ => OrderBy::default(),
      };

      Ok(QueryParameters::new(
         self.page.unwrap_or(DEFAULT_PAGE),
         self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
         self.query,
         order_by,
      )?)
   }
}

/// 食品作成リクエスト
///
/// 欠落したフィールドは空値として扱い、ドメインの検証メッセージで報告する。
#[derive(Debug, Deserialize)]
pub struct CreateFoodRequest {
   #[serde(default)]
   pub name:      String,
   #[serde(default)]
   pub calories:  i64,
   #[serde(rename = "type", default)]
   pub food_type: Option<String>,
}

/// 食品更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateFoodRequest {
   #[serde(default)]
   pub id:        i64,
   #[serde(default)]
   pub name:      String,
   #[serde(default)]
   pub calories:  i64,
   #[serde(rename = "type", default)]
   pub food_type: Option<String>,
}

// --- レスポンス型 ---

/// 食品 DTO（リンク展開済み）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodDto {
   pub id:        i64,
   pub name:      String,
   pub calories:  i64,
   #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
   pub food_type: Option<String>,
   /// 作成日時（RFC 3339）
   pub created:   String,
   pub links:     Vec<LinkDto>,
}

impl FoodDto {
   fn from_entity(food: FoodEntity, links: Vec<LinkDto>) -> Self {
      Self {
         id: food.id().value(),
         name: food.name().as_str().to_string(),
         calories: food.calories().value(),
         food_type: food.food_type().map(|t| t.as_str().to_string()),
         created: food.created().to_rfc3339(),
         links,
      }
   }
}

fn food_id(path: Result<Path<i64>, PathRejection>) -> Result<FoodId, FoodError> {
   let Path(raw) = path?;
   parse_food_id(raw)
}

fn pagination_header(pagination: &PaginationMetadata) -> Result<HeaderValue, FoodError> {
   let json = serde_json::to_string(pagination)
      .map_err(|e| FoodError::Internal(format!("ページング情報のシリアライズに失敗: {e}")))?;
   HeaderValue::from_str(&json)
      .map_err(|e| FoodError::Internal(format!("ページング情報のヘッダー化に失敗: {e}")))
}

// --- ハンドラ ---

/// GET /api/{version}/food
///
/// ## レスポンス
///
/// - `200 OK`: 食品一覧と一覧リンク、`X-Pagination` ヘッダー
/// - `400 Bad Request`: 不正なページ指定・並び順
#[tracing::instrument(skip_all, fields(version = %state.version))]
pub async fn list_foods(
   State(state): State<Arc<FoodState>>,
   query: Result<Query<ListFoodsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, FoodError> {
   let Query(query) = query?;
   let params = query.into_parameters()?;

   let page = state.usecase.list_foods(&params).await?;

   let links = state
      .links
      .collection_links(state.version, &params, &page.pagination);
   let foods = page
      .foods
      .into_iter()
      .map(|food| state.expand(food))
      .collect();

   Ok((
      StatusCode::OK,
      [(X_PAGINATION, pagination_header(&page.pagination)?)],
      Json(PaginatedResponse::new(foods, links)),
   ))
}

/// GET /api/{version}/food/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 食品
/// - `404 Not Found`: 存在しない、または 0 以下の ID
#[tracing::instrument(skip_all, fields(version = %state.version))]
pub async fn get_food(
   State(state): State<Arc<FoodState>>,
   path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, FoodError> {
   let id = food_id(path)?;

   let food = state.usecase.get_food(id).await?;

   Ok((StatusCode::OK, Json(state.expand(food))))
}

/// GET /api/{version}/food/details/{id}
///
/// [`get_food`] と同じ契約を持つ非推奨エンドポイント。
/// 呼び出しを警告ログに残し、`Deprecation` ヘッダーを付ける。
#[tracing::instrument(skip_all, fields(version = %state.version))]
pub async fn get_food_details(
   State(state): State<Arc<FoodState>>,
   path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, FoodError> {
   tracing::warn!("非推奨のエンドポイント /food/details/{{id}} が呼び出されました");
   let id = food_id(path)?;

   let food = state.usecase.get_food(id).await?;

   Ok((
      StatusCode::OK,
      [(DEPRECATION, HeaderValue::from_static("true"))],
      Json(state.expand(food)),
   ))
}

/// POST /api/{version}/food
///
/// ## レスポンス
///
/// - `201 Created`: 作成された食品と `Location` ヘッダー
/// - `400 Bad Request`: ボディ不正、名前が空、カロリーが 0 以下
#[tracing::instrument(skip_all, fields(version = %state.version))]
pub async fn create_food(
   State(state): State<Arc<FoodState>>,
   payload: Result<Json<CreateFoodRequest>, JsonRejection>,
) -> Result<impl IntoResponse, FoodError> {
   let Json(req) = payload?;

   let food = state
      .usecase
      .create_food(CreateFoodInput {
         name:      req.name,
         calories:  req.calories,
         food_type: req.food_type,
      })
      .await?;

   let location = HeaderValue::from_str(&state.links.item_url(state.version, food.id()))
      .map_err(|e| FoodError::Internal(format!("Location ヘッダーの生成に失敗: {e}")))?;

   Ok((
      StatusCode::CREATED,
      [(header::LOCATION, location)],
      Json(state.expand(food)),
   ))
}

/// PUT /api/{version}/food/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の食品
/// - `400 Bad Request`: ボディ不正、パスとボディの ID 不一致、フィールド不正
/// - `404 Not Found`: 存在しない、または 0 以下の ID
#[tracing::instrument(skip_all, fields(version = %state.version))]
pub async fn update_food(
   State(state): State<Arc<FoodState>>,
   path: Result<Path<i64>, PathRejection>,
   payload: Result<Json<UpdateFoodRequest>, JsonRejection>,
) -> Result<impl IntoResponse, FoodError> {
   let Path(path_id) = path?;
   let Json(req) = payload?;

   let food = state
      .usecase
      .update_food(
         path_id,
         UpdateFoodInput {
            id:        req.id,
            name:      req.name,
            calories:  req.calories,
            food_type: req.food_type,
         },
      )
      .await?;

   Ok((StatusCode::OK, Json(state.expand(food))))
}

/// PATCH /api/{version}/food/{id}
///
/// ボディは JSON Patch ドキュメント（`[{"op", "path", "value"}]`）。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の食品
/// - `400 Bad Request`: ドキュメント不正、適用結果が不正
/// - `404 Not Found`: 存在しない、または 0 以下の ID
#[tracing::instrument(skip_all, fields(version = %state.version))]
pub async fn patch_food(
   State(state): State<Arc<FoodState>>,
   path: Result<Path<i64>, PathRejection>,
   payload: Result<Json<PatchDocument>, JsonRejection>,
) -> Result<impl IntoResponse, FoodError> {
   let id = food_id(path)?;
   let Json(document) = payload?;

   let food = state.usecase.patch_food(id, &document).await?;

   Ok((StatusCode::OK, Json(state.expand(food))))
}

/// DELETE /api/{version}/food/{id}
///
/// ## レスポンス
///
/// - `200 OK`: `{"message": "Food item deleted successfully."}`
/// - `404 Not Found`: 存在しない、または 0 以下の ID
#[tracing::instrument(skip_all, fields(version = %state.version))]
pub async fn delete_food(
   State(state): State<Arc<FoodState>>,
   path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, FoodError> {
   let id = food_id(path)?;

   state.usecase.delete_food(id).await?;

   Ok((StatusCode::OK, Json(MessageResponse::new(DELETED_MESSAGE))))
}

/// GET /api/{version}/food/random-meal
///
/// 種別が `Starter` / `Main` / `Dessert` の食品から 1 品ずつ選ぶ。
/// 該当する食品がないコースは含まれない。
#[tracing::instrument(skip_all, fields(version = %state.version))]
pub async fn get_random_meal(
   State(state): State<Arc<FoodState>>,
) -> Result<impl IntoResponse, FoodError> {
   let meal = state
      .usecase
      .random_meal()
      .await?
      .into_iter()
      .map(|food| state.expand(food))
      .collect::<Vec<_>>();

   Ok((StatusCode::OK, Json(meal)))
}
