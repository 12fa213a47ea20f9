//! # ページネーション付きレスポンス
//!
//! ページ番号ベースのページネーションに対応した一覧レスポンス型。

use serde::{Deserialize, Serialize};

use crate::LinkDto;

/// ページネーション付きレスポンス
///
/// ## JSON 形式
///
/// ```json
/// {
///   "value": [...],
///   "links": [{ "href": "...", "rel": "next", "method": "GET" }]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
   pub value: Vec<T>,
   pub links: Vec<LinkDto>,
}

impl<T> PaginatedResponse<T> {
   pub fn new(value: Vec<T>, links: Vec<LinkDto>) -> Self {
      Self { value, links }
   }
}

/// ページング状態
///
/// `X-Pagination` レスポンスヘッダーに JSON として出力される。
/// `total_pages` は `total_count / page_size` の切り上げ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
   pub total_count:  usize,
   pub page_size:    usize,
   pub current_page: usize,
   pub total_pages:  usize,
}

impl PaginationMetadata {
   /// 総件数・ページサイズ・現在ページからページング状態を計算する
   ///
   /// `page_size` が 0 の場合はページ数 0 として扱う。
   pub fn new(total_count: usize, page_size: usize, current_page: usize) -> Self {
      let total_pages = if page_size == 0 {
         0
      } else {
         total_count.div_ceil(page_size)
      };

      Self {
         total_count,
         page_size,
         current_page,
         total_pages,
      }
   }

   /// 次ページが存在するか
   pub fn has_next(&self) -> bool {
      self.current_page < self.total_pages
   }

   /// 前ページが存在するか
   pub fn has_previous(&self) -> bool {
      self.current_page > 1
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;

   use super::*;

   #[test]
   fn test_total_pagesは切り上げで計算される() {
      assert_eq!(PaginationMetadata::new(10, 3, 1).total_pages, 4);
      assert_eq!(PaginationMetadata::new(9, 3, 1).total_pages, 3);
      assert_eq!(PaginationMetadata::new(0, 3, 1).total_pages, 0);
   }

   #[test]
   fn test_最初のページには前ページがない() {
      let meta = PaginationMetadata::new(10, 3, 1);

      assert!(!meta.has_previous());
      assert!(meta.has_next());
   }

   #[test]
   fn test_最後のページには次ページがない() {
      let meta = PaginationMetadata::new(10, 3, 4);

      assert!(meta.has_previous());
      assert!(!meta.has_next());
   }

   #[test]
   fn test_件数ゼロでは前後どちらのページもない() {
      let meta = PaginationMetadata::new(0, 50, 1);

      assert!(!meta.has_previous());
      assert!(!meta.has_next());
   }

   #[test]
   fn test_ヘッダー用jsonはキャメルケース() {
      let json = serde_json::to_value(PaginationMetadata::new(5, 2, 2)).unwrap();

      assert_eq!(
         json,
         serde_json::json!({
            "totalCount": 5,
            "pageSize": 2,
            "currentPage": 2,
            "totalPages": 3
         })
      );
   }
}
