//! The student entity as stored in the `students` table and exchanged as JSON.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One student row. `id` is supplied by the caller and is the primary key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = 22)]
    pub age: i32,
}

impl Student {
    pub fn new(id: i32, first_name: impl Into<String>, last_name: impl Into<String>, age: i32) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }
}
