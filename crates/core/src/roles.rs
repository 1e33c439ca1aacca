//! Role names shared between the JWT claims, the users table, and the
//! authorization extractors.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

/// True if `role` is one of the known role names.
pub fn is_known_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_STAFF
}
