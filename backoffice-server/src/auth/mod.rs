//! Authentication module
//!
//! JWT bearer tokens carry the tenant id; every repository call is scoped
//! by the tenant claim of the authenticated staff member.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtService};
pub use middleware::require_auth;

use serde::{Deserialize, Serialize};

/// Authenticated staff member, injected into request extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user_id: String,
    /// Tenant (restaurant account) that owns every record this user touches
    pub tenant: String,
    pub name: String,
    pub role: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            tenant: claims.tenant,
            name: claims.name,
            role: claims.role,
        }
    }
}
