//! # メッセージレスポンス
//!
//! 本文を持たない操作（削除など）の完了通知に使う `{ "message": "..." }` 形式。

use serde::{Deserialize, Serialize};

/// 完了メッセージのみを返すレスポンス
///
/// ```
/// use pantry_shared::MessageResponse;
///
/// let response = MessageResponse::new("Food item deleted successfully.");
/// assert_eq!(response.message, "Food item deleted successfully.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
   pub message: String,
}

impl MessageResponse {
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         message: message.into(),
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_serializeでmessageフィールドのみのjsonになる() {
      let json = serde_json::to_value(MessageResponse::new("done")).unwrap();

      assert_eq!(json, serde_json::json!({ "message": "done" }));
   }
}
