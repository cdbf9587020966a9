use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Villa {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Rose Villa")]
    pub name: String,

    #[schema(example = "12 Orchard Lane")]
    pub address: String,

    #[schema(example = "pool heating under repair", nullable = true)]
    pub notes: Option<String>,
}
