//! Customer feedback model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub tenant: String,
    pub customer_name: String,
    /// 1-5 stars
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCreate {
    #[validate(length(min = 1, message = "customerName is required"))]
    pub customer_name: String,
    #[validate(range(min = 1, max = 5, message = "rating must be 1-5"))]
    pub rating: i32,
    pub comment: Option<String>,
}
