use serde::{Deserialize, Serialize};

/// Row of the `account` table.
///
/// Shape only: the backing store assigns `id` and enforces uniqueness of
/// `id` and `username`. `password` is kept exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// auto-increment primary key, never reused
    pub id: i64,
    /// unique index
    pub username: String,
    /// no index
    pub password: String,
}
