//! # リンク生成
//!
//! レスポンスに添付するハイパーメディアリンク（HATEOAS）を組み立てる。
//!
//! ## 生成されるリンク
//!
//! | 対象 | rel | メソッド |
//! |------|-----|---------|
//! | 食品 | `self` / `update` / `patch` / `delete` | GET / PUT / PATCH / DELETE |
//! | 一覧 | `self` / `next` / `previous` / `create` | GET / GET / GET / POST |
//!
//! `next` は次ページがある場合、`previous` は 2 ページ目以降の場合のみ含まれる。
//! href は設定された公開 URL を前置したパスで、リクエストを処理したバージョンを含む。

use pantry_domain::{food::FoodId, query::QueryParameters};
use pantry_shared::{HttpMethod, LinkDto, PaginationMetadata};
use strum::EnumIter;

/// API バージョン
///
/// どのバージョンも同じ契約を持ち、リンクの href だけが異なる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ApiVersion {
   V1,
   V2,
}

impl ApiVersion {
   /// ルートのプレフィックス（例: `/api/v1`）
   pub fn prefix(&self) -> String {
      format!("/api/{self}")
   }
}

/// リンクビルダー
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
   base_url: String,
}

impl LinkBuilder {
   /// 公開 URL を指定してビルダーを作成する（空文字列なら相対パスのみ）
   pub fn new(base_url: impl Into<String>) -> Self {
      let base_url: String = base_url.into();
      Self {
         base_url: base_url.trim_end_matches('/').to_string(),
      }
   }

   /// 食品コレクションの URL
   pub fn collection_url(&self, version: ApiVersion) -> String {
      format!("{}{}/food", self.base_url, version.prefix())
   }

   /// 食品 1 件の URL（`Location` ヘッダーにも使う）
   pub fn item_url(&self, version: ApiVersion, id: FoodId) -> String {
      format!("{}/{id}", self.collection_url(version))
   }

   /// 食品 1 件に対する操作リンク
   pub fn item_links(&self, version: ApiVersion, id: FoodId) -> Vec<LinkDto> {
      let href = self.item_url(version, id);
      vec![
         LinkDto::new(href.clone(), "self", HttpMethod::Get),
         LinkDto::new(href.clone(), "update", HttpMethod::Put),
         LinkDto::new(href.clone(), "patch", HttpMethod::Patch),
         LinkDto::new(href, "delete", HttpMethod::Delete),
      ]
   }

   /// 一覧に対するナビゲーションリンク
   pub fn collection_links(
      &self,
      version: ApiVersion,
      params: &QueryParameters,
      pagination: &PaginationMetadata,
   ) -> Vec<LinkDto> {
      let mut links = vec![LinkDto::new(
         self.page_url(version, params),
         "self",
         HttpMethod::Get,
      )];

      if pagination.has_next() {
         links.push(LinkDto::new(
            self.page_url(version, &params.with_page(params.page() + 1)),
            "next",
            HttpMethod::Get,
         ));
      }

      if pagination.has_previous() {
         // 範囲外のページからは最終ページへ戻す
         let previous = (params.page() - 1).min(pagination.total_pages.max(1));
         links.push(LinkDto::new(
            self.page_url(version, &params.with_page(previous)),
            "previous",
            HttpMethod::Get,
         ));
      }

      links.push(LinkDto::new(
         self.collection_url(version),
         "create",
         HttpMethod::Post,
      ));

      links
   }

   fn page_url(&self, version: ApiVersion, params: &QueryParameters) -> String {
      let mut url = format!(
         "{}?page={}&pageSize={}&orderBy={}",
         self.collection_url(version),
         params.page(),
         params.page_size(),
         urlencoding::encode(&params.order_by().to_string())
      );
      if let Some(query) = params.query() {
         url.push_str("&query=");
         url.push_str(&urlencoding::encode(query));
      }
      url
   }
}
