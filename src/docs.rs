use crate::api::attendance::{AttendanceEdit, AttendanceQuery};
use crate::api::payroll::{ComputePayroll, PaginatedPayrollResponse, PayrollQuery};
use crate::api::personnel::{
    CreatePersonnel, PersonnelListResponse, PersonnelQuery, UpdatePersonnel,
};
use crate::api::stakeholder::{CreateStakeholder, UpdateStakeholder};
use crate::api::villa::{CreateVilla, UpdateVilla};
use crate::engine::payslip::{Payslip, PayrollDocument, PayslipRow};
use crate::engine::resolver::FieldUpdate;
use crate::engine::rules::PayrollBreakdown;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::payroll::Payroll;
use crate::model::personnel::Personnel;
use crate::model::settings::{PayrollSettings, TaxBracket};
use crate::model::stakeholder::Stakeholder;
use crate::model::villa::Villa;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estate Office API",
        version = "1.0.0",
        description = r#"
## Estate-Management Back Office

This API powers the back office of a private estate: the people who keep the
villas running, their attendance, and the monthly payroll computed from it.

### Key Features
- **Personnel Management**
  - Create, update, list, and view staff profiles with duty and villa assignment
- **Villa & Stakeholder Registers**
  - Thin CRUD over the estate's villas and its stakeholders
- **Attendance Tracking**
  - Per-day, per-field edits with automatic presence and lateness resolution
- **Payroll Computation**
  - Aggregates a month of attendance into worked hours, applies overtime,
    allowances, insurance, and progressive income tax, and persists an
    immutable payroll document with a rendered payslip view

### Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::edit_attendance,
        crate::api::attendance::list_attendance,

        crate::api::payroll::create_payroll,
        crate::api::payroll::get_payroll,
        crate::api::payroll::list_payrolls,
        crate::api::payroll::get_payslip,

        crate::api::settings::get_settings,
        crate::api::settings::update_settings,

        crate::api::personnel::create_personnel,
        crate::api::personnel::get_personnel,
        crate::api::personnel::list_personnel,
        crate::api::personnel::update_personnel,
        crate::api::personnel::delete_personnel,

        crate::api::villa::create_villa,
        crate::api::villa::get_villa,
        crate::api::villa::list_villas,
        crate::api::villa::update_villa,
        crate::api::villa::delete_villa,

        crate::api::stakeholder::create_stakeholder,
        crate::api::stakeholder::get_stakeholder,
        crate::api::stakeholder::list_stakeholders,
        crate::api::stakeholder::update_stakeholder,
        crate::api::stakeholder::delete_stakeholder
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            AttendanceEdit,
            AttendanceQuery,
            FieldUpdate,
            Payroll,
            PayrollBreakdown,
            PayrollDocument,
            Payslip,
            PayslipRow,
            ComputePayroll,
            PayrollQuery,
            PaginatedPayrollResponse,
            PayrollSettings,
            TaxBracket,
            Personnel,
            CreatePersonnel,
            UpdatePersonnel,
            PersonnelQuery,
            PersonnelListResponse,
            Villa,
            CreateVilla,
            UpdateVilla,
            Stakeholder,
            CreateStakeholder,
            UpdateStakeholder
        )
    ),
    tags(
        (name = "Attendance", description = "Attendance tracking APIs"),
        (name = "Payroll", description = "Payroll computation and payslip APIs"),
        (name = "Settings", description = "Payroll settings APIs"),
        (name = "Personnel", description = "Personnel management APIs"),
        (name = "Villa", description = "Villa register APIs"),
        (name = "Stakeholder", description = "Stakeholder register APIs"),
    )
)]
pub struct ApiDoc;
