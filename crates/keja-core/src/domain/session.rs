//! Request context
//!
//! Every service call receives the caller's session explicitly; all reads and
//! writes are scoped to data owned by `user_id` (directly, or via
//! unit → property).

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
}

impl Session {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
