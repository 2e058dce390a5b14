use serde::{Deserialize, Serialize};

/// A catalog book. The backend owns its storage; the gateway only moves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Server-assigned identifier, zero for books that were never stored
    #[serde(default)]
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Identifier of the category the book is filed under
    pub category_id: i32,
    #[serde(default)]
    pub description: String,
}

/// A catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A single identifier wrapped for transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id {
    pub id: i32,
}

impl From<i32> for Id {
    fn from(id: i32) -> Self {
        Self { id }
    }
}

/// Search and pagination parameters for list calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    pub limit: i32,
    pub offset: i32,
}

impl ListQuery {
    pub const DEFAULT_LIMIT: i32 = 10;
    pub const DEFAULT_OFFSET: i32 = 0;
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            limit: Self::DEFAULT_LIMIT,
            offset: Self::DEFAULT_OFFSET,
        }
    }
}
