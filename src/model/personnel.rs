use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "Sara",
        "last_name": "Moradi",
        "phone": "+989121234567",
        "duty": "housekeeper",
        "villa_id": 3,
        "base_salary": 9600000.0,
        "number_of_children": 2,
        "is_married": true,
        "hire_date": "2024-03-01",
        "status": "active"
    })
)]
pub struct Personnel {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Sara")]
    pub first_name: String,

    #[schema(example = "Moradi")]
    pub last_name: String,

    #[schema(example = "+989121234567", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = "housekeeper")]
    pub duty: String,

    #[schema(example = 3, nullable = true)]
    pub villa_id: Option<u64>,

    #[schema(example = 9600000.0)]
    pub base_salary: f64,

    #[schema(example = 2)]
    pub number_of_children: u32,

    #[schema(example = true)]
    pub is_married: bool,

    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub hire_date: NaiveDate,

    #[schema(example = "active")]
    pub status: String,
}
