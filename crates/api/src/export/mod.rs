//! Export document builders.
//!
//! Every format is rendered from one [`ExportSnapshot`] so users, projects and
//! tasks always agree with each other.

pub mod xlsx;
pub mod xml;

use chrono::{DateTime, Utc};
use kpi_db::models::export::ExportSnapshot;
use serde::{Deserialize, Serialize};

/// Version stamp carried by JSON and XML exports.
pub const EXPORT_VERSION: &str = "1.0.0";

/// Content type of spreadsheet downloads.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("XML export failed: {0}")]
    Xml(String),

    #[error("Spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Header block of a JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportInfo {
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub format: String,
}

/// Body of `GET /api/export/json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonExport {
    pub export_info: ExportInfo,
    #[serde(flatten)]
    pub data: ExportSnapshot,
}

impl JsonExport {
    pub fn new(data: ExportSnapshot, timestamp: DateTime<Utc>) -> Self {
        Self {
            export_info: ExportInfo {
                timestamp,
                version: EXPORT_VERSION.to_string(),
                format: "json".to_string(),
            },
            data,
        }
    }
}

/// Body of `GET /api/export/xml`: the document travels as a JSON string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XmlExport {
    pub xml: String,
}

/// Download name for a spreadsheet generated at `timestamp`.
pub fn xlsx_file_name(timestamp: DateTime<Utc>) -> String {
    format!("kpi_export_{}.xlsx", timestamp.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{NaiveDate, TimeZone, Utc};
    use kpi_core::visibility::{DepartmentSet, VisibilityType};
    use kpi_db::models::export::ExportSnapshot;
    use kpi_db::models::project::Project;
    use kpi_db::models::task::TaskDetail;
    use kpi_db::models::user::User;

    pub fn snapshot() -> ExportSnapshot {
        let created_at = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        ExportSnapshot {
            users: vec![User {
                id: 1,
                name: "Ana & Co".to_string(),
                email: "ana@company.com".to_string(),
                role: "Developer".to_string(),
                department: "IT".to_string(),
                total_hours: 3.5,
                created_at,
            }],
            projects: vec![Project {
                id: 2,
                name: "Portal".to_string(),
                description: "Customer <portal>".to_string(),
                module_type: "proiecte".to_string(),
                status: "active".to_string(),
                total_hours: 3.5,
                visibility_type: VisibilityType::SpecificDepartments,
                visible_departments: ["Sales", "IT"].into_iter().collect::<DepartmentSet>(),
                created_at,
            }],
            tasks: vec![TaskDetail {
                id: 3,
                user_id: 1,
                project_id: 2,
                description: "Login page".to_string(),
                hours: 3.5,
                date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                created_at,
                user_name: "Ana & Co".to_string(),
                project_name: "Portal".to_string(),
                module_type: "proiecte".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn json_export_flattens_data_next_to_export_info() {
        let timestamp = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let value = serde_json::to_value(JsonExport::new(fixtures::snapshot(), timestamp)).unwrap();

        assert_eq!(value["export_info"]["version"], "1.0.0");
        assert_eq!(value["export_info"]["format"], "json");
        assert_eq!(value["users"].as_array().unwrap().len(), 1);
        assert_eq!(value["projects"][0]["visible_departments"][0], "IT");
        assert_eq!(value["tasks"][0]["hours"], 3.5);
    }

    #[test]
    fn xlsx_file_name_embeds_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2025, 2, 1, 8, 5, 9).unwrap();
        assert_eq!(xlsx_file_name(timestamp), "kpi_export_20250201_080509.xlsx");
    }
}
