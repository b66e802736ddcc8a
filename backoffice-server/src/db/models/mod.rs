//! Database models

// Serde helpers
pub mod serde_helpers;

// Orders
pub mod order;

// Catalog
pub mod product;

// Surrounding features
pub mod feedback;
pub mod promotion;
pub mod review_cache;
pub mod scheduled_post;
pub mod staff_user;

// Re-exports
pub use feedback::{Feedback, FeedbackCreate};
pub use order::{Order, OrderCreate};
pub use product::{Product, ProductCreate, ProductStatus, ProductUnit, ProductUpdate};
pub use promotion::{Promotion, PromotionCreate, PromotionUpdate};
pub use review_cache::ReviewCacheRecord;
pub use scheduled_post::{ScheduledPost, ScheduledPostCreate, ScheduledPostUpdate};
pub use staff_user::{StaffUser, StaffUserCreate, StaffUserUpdate};
