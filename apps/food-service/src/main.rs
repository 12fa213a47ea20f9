//! # Food Service サーバー
//!
//! 食品リソースの CRUD API を提供する HTTP サーバー。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `FOOD_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `FOOD_PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `PUBLIC_BASE_URL` | No | リンクの href に付ける公開 URL |
//! | `SEED_DATA` | No | 起動時に初期データを投入するか（デフォルト: `true`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,pantry=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p pantry-food-service
//!
//! FOOD_PORT=8080 LOG_FORMAT=json cargo run -p pantry-food-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use pantry_domain::clock::{Clock, SystemClock};
use pantry_food_service::{
   app_builder::build_app,
   config::FoodConfig,
   link::LinkBuilder,
   usecase::FoodUseCaseImpl,
};
use pantry_infra::{
   repository::{FoodRepository, InMemoryFoodRepository},
   seed::seed_foods,
};
use pantry_shared::{
   canonical_log::CanonicalLogLineLayer,
   observability::{TracingConfig, init_tracing, make_request_span},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Food Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("food-service");
   init_tracing(&tracing_config);
   let _service_span =
      tracing::info_span!("app", service = %tracing_config.service_name).entered();

   // 設定読み込み
   let config = FoodConfig::from_env()?;

   tracing::info!(
      "Food Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // 依存コンポーネントを初期化
   let repository: Arc<dyn FoodRepository> = Arc::new(InMemoryFoodRepository::new());
   let clock: Arc<dyn Clock> = Arc::new(SystemClock);

   if config.seed_data {
      seed_foods(repository.as_ref(), clock.as_ref()).await?;
   }

   let usecase = Arc::new(FoodUseCaseImpl::new(repository, clock));

   // ルーター構築
   let app = build_app(usecase, LinkBuilder::new(config.public_base_url.clone()))
      .layer(CanonicalLogLineLayer)
      .layer(TraceLayer::new_for_http().make_span_with(make_request_span));

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Food Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
