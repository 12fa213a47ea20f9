//! # Food Service 設定
//!
//! 環境変数から Food Service サーバーの設定を読み込む。
//!
//! | 変数名 | 既定値 | 説明 |
//! |--------|--------|------|
//! | `FOOD_HOST` | `0.0.0.0` | バインドアドレス |
//! | `FOOD_PORT` | `5000` | ポート番号 |
//! | `PUBLIC_BASE_URL` | （空） | リンクの href に付ける公開 URL |
//! | `SEED_DATA` | `true` | 起動時に初期データを投入するか |

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
   #[error("{name} の値が不正です: {value:?}")]
   Invalid { name: &'static str, value: String },
}

/// Food Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodConfig {
   /// バインドアドレス
   pub host:            String,
   /// ポート番号
   pub port:            u16,
   /// リンク生成に使う公開 URL（末尾の `/` は除去済み）
   pub public_base_url: String,
   /// 起動時のシードデータ投入
   pub seed_data:       bool,
}

impl FoodConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の変数参照関数から設定を読み込む
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let port = match lookup("FOOD_PORT") {
         Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name: "FOOD_PORT",
            value,
         })?,
         None => 5000,
      };

      let seed_data = match lookup("SEED_DATA") {
         Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
            name: "SEED_DATA",
            value,
         })?,
         None => true,
      };

      Ok(Self {
         host: lookup("FOOD_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
         port,
         public_base_url: lookup("PUBLIC_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_default(),
         seed_data,
      })
   }
}

fn parse_bool(value: &str) -> Option<bool> {
   match value.trim().to_ascii_lowercase().as_str() {
      "true" | "1" | "yes" => Some(true),
      "false" | "0" | "no" => Some(false),
      _ => None,
   }
}

#[cfg(test)]
mod tests {
   use std::collections::HashMap;

   use pretty_assertions::assert_eq;

   use super::*;

   fn load(vars: &[(&str, &str)]) -> Result<FoodConfig, ConfigError> {
      let vars: HashMap<String, String> = vars
         .iter()
         .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
         .collect();
      FoodConfig::from_lookup(|name| vars.get(name).cloned())
   }

   #[test]
   fn test_未設定なら既定値を使う() {
      assert_eq!(
         load(&[]).unwrap(),
         FoodConfig {
            host:            "0.0.0.0".to_string(),
            port:            5000,
            public_base_url: String::new(),
            seed_data:       true,
         }
      );
   }

   #[test]
   fn test_公開urlの末尾スラッシュを除去する() {
      let config = load(&[("PUBLIC_BASE_URL", "https://food.example.com/")]).unwrap();

      assert_eq!(config.public_base_url, "https://food.example.com");
   }

   #[test]
   fn test_不正なポート番号はエラー() {
      assert_eq!(
         load(&[("FOOD_PORT", "http")]),
         Err(ConfigError::Invalid {
            name:  "FOOD_PORT",
            value: "http".to_string(),
         })
      );
   }

   #[test]
   fn test_seed_dataは真偽値として解釈する() {
      assert!(!load(&[("SEED_DATA", "false")]).unwrap().seed_data);
      assert!(load(&[("SEED_DATA", "1")]).unwrap().seed_data);
      assert!(load(&[("SEED_DATA", "maybe")]).is_err());
   }
}
