use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Roles known to the employee directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
}

/// Directory entry for one employee.
///
/// Owned by the collaborating identity subsystem; this service reads it
/// through the `EmployeeDirectory` contract and never writes it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1002,
    "employee_code": "EMP002",
    "name": "Jane Smith",
    "email": "emp2@company.com",
    "role": "employee",
    "department": "Engineering"
}))]
pub struct Employee {
    #[schema(example = 1002)]
    pub id: u64,

    #[schema(example = "EMP002")]
    pub employee_code: String,

    #[schema(example = "Jane Smith")]
    pub name: String,

    #[schema(example = "emp2@company.com")]
    pub email: String,

    pub role: Role,

    #[schema(example = "Engineering")]
    pub department: String,
}

/// Slim employee projection joined onto attendance rows and rosters.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeRef {
    #[schema(example = 1002)]
    pub id: u64,

    #[schema(example = "Jane Smith")]
    pub name: String,

    #[schema(example = "emp2@company.com")]
    pub email: String,

    #[schema(example = "EMP002")]
    pub employee_code: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

impl From<&Employee> for EmployeeRef {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            email: employee.email.clone(),
            employee_code: employee.employee_code.clone(),
            department: employee.department.clone(),
        }
    }
}
