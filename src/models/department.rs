use serde::{Deserialize, Serialize};

use super::required;
use crate::db::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub head_doctor: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDepartment {
    #[serde(default)]
    pub name: String,
    pub head_doctor: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}

impl NewDepartment {
    pub fn validate(&self) -> Result<(), DatabaseError> {
        required(&self.name, "Department name")?;
        Ok(())
    }
}
