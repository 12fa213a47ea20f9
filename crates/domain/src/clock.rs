//! # 作成日時の時刻源
//!
//! 食品の `created` はユースケースが [`Clock`] から取得した時刻で確定する。
//! 本番では [`SystemClock`]、テストでは [`FixedClock`] を注入し、
//! レスポンスの `created` を固定値で検証できるようにする。
//!
//! 更新・部分更新では `created` を引き継ぐため、時刻源を参照するのは作成時と
//! 起動時のシード投入のみ。

use chrono::{DateTime, Utc};

/// 食品の作成日時を決める時刻源
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// UTC のシステム時刻
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 生成時に与えた時刻を返し続ける時刻源
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}
