use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Stakeholder {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Dariush Khan")]
    pub full_name: String,

    #[schema(example = "owner")]
    pub relation: String,

    #[schema(example = "+989121234567", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "dariush@example.com", nullable = true)]
    pub email: Option<String>,
}
