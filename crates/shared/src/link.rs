//! # ハイパーメディアリンク
//!
//! レスポンスに添付するナビゲーション用リンク（HATEOAS）の DTO。
//! リンクは毎レスポンスで組み立てられ、永続化されない。

use serde::{Deserialize, Serialize};

/// リンク先に対して使う HTTP メソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
   Get,
   Post,
   Put,
   Patch,
   Delete,
}

/// ナビゲーションリンク
///
/// ## JSON 形式
///
/// ```json
/// { "href": "/api/v1/food/1", "rel": "self", "method": "GET" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDto {
   pub href:   String,
   pub rel:    String,
   pub method: HttpMethod,
}

impl LinkDto {
   pub fn new(href: impl Into<String>, rel: impl Into<String>, method: HttpMethod) -> Self {
      Self {
         href: href.into(),
         rel: rel.into(),
         method,
      }
   }
}
