//! # Canonical Log Line ミドルウェア
//!
//! HTTP リクエスト完了時に、メソッド・パス・ステータス・レイテンシを
//! 1行に集約したサマリログを出力する tower Layer。
//!
//! `TraceLayer` の内側に配置し、リクエストスパンのフィールドを引き継ぐ:
//!
//! ```text
//! TraceLayer → CanonicalLogLineLayer → handler
//! ```

use std::{
   future::Future,
   pin::Pin,
   task::{Context, Poll},
   time::Instant,
};

use http::{Request, Response};
use tower::{Layer, Service};

/// ヘルスチェックはログ対象外
fn is_health_check_path(path: &str) -> bool {
   path.starts_with("/health")
}

/// Canonical Log Line を出力する Layer
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
   type Service = CanonicalLogLineService<S>;

   fn layer(&self, inner: S) -> Self::Service {
      CanonicalLogLineService { inner }
   }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
   inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
   S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
   S::Future: Send + 'static,
   S::Error: std::fmt::Display + 'static,
   ReqBody: Send + 'static,
   ResBody: Send + 'static,
{
   type Error = S::Error;
   type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
   type Response = S::Response;

   fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
      self.inner.poll_ready(cx)
   }

   fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
      // poll_ready 済みの inner を使い、次回用にクローンを残す
      let clone = self.inner.clone();
      let mut inner = std::mem::replace(&mut self.inner, clone);

      let path = req.uri().path().to_owned();
      if is_health_check_path(&path) {
         return Box::pin(async move { inner.call(req).await });
      }

      let method = req.method().to_string();
      let start = Instant::now();

      Box::pin(async move {
         let result = inner.call(req).await;
         let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

         match &result {
            Ok(response) => {
               tracing::info!(
                  log.r#type = "canonical",
                  http.method = %method,
                  http.path = %path,
                  http.status_code = response.status().as_u16(),
                  http.latency_ms = latency_ms,
                  "リクエスト完了"
               );
            }
            Err(err) => {
               tracing::error!(
                  log.r#type = "canonical",
                  http.method = %method,
                  http.path = %path,
                  http.latency_ms = latency_ms,
                  error.message = %err,
                  "リクエスト処理エラー"
               );
            }
         }

         result
      })
   }
}

#[cfg(test)]
mod tests {
   use std::{
      convert::Infallible,
      sync::{Arc, Mutex},
   };

   use tracing_subscriber::layer::SubscriberExt;

   use super::*;

   #[derive(Clone)]
   struct StatusService {
      status: http::StatusCode,
   }

   impl Service<Request<()>> for StatusService {
      type Error = Infallible;
      type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
      type Response = Response<()>;

      fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
         Poll::Ready(Ok(()))
      }

      fn call(&mut self, _req: Request<()>) -> Self::Future {
         let status = self.status;
         Box::pin(async move { Ok(Response::builder().status(status).body(()).unwrap()) })
      }
   }

   /// 出力されたイベントのフィールドを記録する Layer
   #[derive(Clone, Default)]
   struct CaptureLayer {
      events: Arc<Mutex<Vec<Vec<(String, String)>>>>,
   }

   struct FieldVisitor<'a>(&'a mut Vec<(String, String)>);

   impl tracing::field::Visit for FieldVisitor<'_> {
      fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
         self.0.push((field.name().to_string(), format!("{value:?}")));
      }

      fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
         self.0.push((field.name().to_string(), value.to_string()));
      }

      fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
         self.0.push((field.name().to_string(), value.to_string()));
      }
   }

   impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
      fn on_event(
         &self,
         event: &tracing::Event<'_>,
         _ctx: tracing_subscriber::layer::Context<'_, S>,
      ) {
         let mut fields = Vec::new();
         event.record(&mut FieldVisitor(&mut fields));
         self.events.lock().unwrap().push(fields);
      }
   }

   fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
      fields
         .iter()
         .find(|(k, _)| k == name)
         .map(|(_, v)| v.as_str())
   }

   fn request(method: &str, path: &str) -> Request<()> {
      Request::builder().method(method).uri(path).body(()).unwrap()
   }

   #[tokio::test]
   async fn test_リクエスト完了時にメソッドとパスとステータスが出力される() {
      let capture = CaptureLayer::default();
      let subscriber = tracing_subscriber::registry().with(capture.clone());
      let _guard = tracing::subscriber::set_default(subscriber);

      let mut sut = CanonicalLogLineLayer.layer(StatusService {
         status: http::StatusCode::CREATED,
      });
      sut.call(request("POST", "/api/v1/food")).await.unwrap();

      let events = capture.events.lock().unwrap();
      assert_eq!(events.len(), 1);
      assert_eq!(field(&events[0], "log.type"), Some("canonical"));
      assert_eq!(field(&events[0], "http.method"), Some("POST"));
      assert_eq!(field(&events[0], "http.path"), Some("/api/v1/food"));
      assert_eq!(field(&events[0], "http.status_code"), Some("201"));
      assert!(field(&events[0], "http.latency_ms").is_some());
   }

   #[tokio::test]
   async fn test_healthパスではログが出力されない() {
      let capture = CaptureLayer::default();
      let subscriber = tracing_subscriber::registry().with(capture.clone());
      let _guard = tracing::subscriber::set_default(subscriber);

      let mut sut = CanonicalLogLineLayer.layer(StatusService {
         status: http::StatusCode::OK,
      });
      sut.call(request("GET", "/health")).await.unwrap();

      assert!(capture.events.lock().unwrap().is_empty());
   }

   #[test]
   fn test_is_health_check_pathはapiパスを除外しない() {
      assert!(is_health_check_path("/health"));
      assert!(!is_health_check_path("/api/v1/food"));
   }
}
