//! # 一覧取得条件
//!
//! 食品一覧のページング・名前フィルタ・並び順を表現する。
//! 永続化される状態は持たず、リポジトリの一覧取得を切り出すためだけに使う。

use std::{cmp::Ordering, fmt, str::FromStr};

use strum::{EnumString, IntoStaticStr};

use crate::{DomainError, food::FoodEntity};

/// ページ番号の既定値
pub const DEFAULT_PAGE: usize = 1;
/// ページサイズの既定値
pub const DEFAULT_PAGE_SIZE: usize = 50;
/// ページサイズの上限
pub const MAX_PAGE_SIZE: usize = 100;

/// 並び替えの対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortField {
   Id,
   Name,
   Calories,
   Created,
}

/// 並び順
///
/// 文字列表現は `"name"` / `"calories desc"` の形式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
   pub field:      SortField,
   pub descending: bool,
}

impl Default for OrderBy {
   fn default() -> Self {
      Self {
         field:      SortField::Name,
         descending: false,
      }
   }
}

impl FromStr for OrderBy {
   type Err = DomainError;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      let invalid = || {
         DomainError::validation(format!(
            "並び順 '{s}' は不正です（id, name, calories, created のいずれかに任意で desc / asc を付けてください）"
         ))
      };

      let mut parts = s.split_whitespace();
      let field = parts
         .next()
         .ok_or_else(invalid)?
         .parse::<SortField>()
         .map_err(|_| invalid())?;
      let descending = match parts.next() {
         None => false,
         Some(dir) if dir.eq_ignore_ascii_case("asc") => false,
         Some(dir) if dir.eq_ignore_ascii_case("desc") => true,
         Some(_) => return Err(invalid()),
      };
      if parts.next().is_some() {
         return Err(invalid());
      }

      Ok(Self { field, descending })
   }
}

impl fmt::Display for OrderBy {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      let field: &'static str = self.field.into();
      if self.descending {
         write!(f, "{field} desc")
      } else {
         f.write_str(field)
      }
   }
}

/// 一覧取得条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
   page:      usize,
   page_size: usize,
   query:     Option<String>,
   order_by:  OrderBy,
}

impl Default for QueryParameters {
   fn default() -> Self {
      Self {
         page:      DEFAULT_PAGE,
         page_size: DEFAULT_PAGE_SIZE,
         query:     None,
         order_by:  OrderBy::default(),
      }
   }
}

impl QueryParameters {
   /// 取得条件を作成する
   ///
   /// # バリデーション
   ///
   /// - `page` は 1 以上
   /// - `page_size` は 1 以上 [`MAX_PAGE_SIZE`] 以下
   /// - 空白のみの `query` は未指定とみなす
   pub fn new(
      page: usize,
      page_size: usize,
      query: Option<String>,
      order_by: OrderBy,
   ) -> Result<Self, DomainError> {
      if page == 0 {
         return Err(DomainError::validation("page は 1 以上である必要があります"));
      }
      if page_size == 0 || page_size > MAX_PAGE_SIZE {
         return Err(DomainError::validation(format!(
            "pageSize は 1 以上 {MAX_PAGE_SIZE} 以下である必要があります"
         )));
      }

      let query = query
         .map(|q| q.trim().to_string())
         .filter(|q| !q.is_empty());

      Ok(Self {
         page,
         page_size,
         query,
         order_by,
      })
   }

   pub fn page(&self) -> usize {
      self.page
   }

   pub fn page_size(&self) -> usize {
      self.page_size
   }

   pub fn query(&self) -> Option<&str> {
      self.query.as_deref()
   }

   pub fn order_by(&self) -> OrderBy {
      self.order_by
   }

   /// 指定ページの先頭位置（0 起点）
   pub fn offset(&self) -> usize {
      (self.page - 1).saturating_mul(self.page_size)
   }

   /// 同じ条件で別ページを指す取得条件を返す
   pub fn with_page(&self, page: usize) -> Self {
      Self {
         page,
         ..self.clone()
      }
   }

   /// 名前フィルタに一致するか（大文字小文字を区別しない部分一致）
   pub fn matches(&self, food: &FoodEntity) -> bool {
      match &self.query {
         None => true,
         Some(q) => food
            .name()
            .as_str()
            .to_lowercase()
            .contains(&q.to_lowercase()),
      }
   }

   /// 並び順に従って 2 つの食品を比較する
   ///
   /// 同値の場合は ID 昇順で決定的に並べる。
   pub fn compare(&self, a: &FoodEntity, b: &FoodEntity) -> Ordering {
      let primary = match self.order_by.field {
         SortField::Id => a.id().cmp(&b.id()),
         SortField::Name => a
            .name()
            .as_str()
            .to_lowercase()
            .cmp(&b.name().as_str().to_lowercase()),
         SortField::Calories => a.calories().cmp(&b.calories()),
         SortField::Created => a.created().cmp(&b.created()),
      };
      let primary = if self.order_by.descending {
         primary.reverse()
      } else {
         primary
      };

      primary.then_with(|| a.id().cmp(&b.id()))
   }
}
