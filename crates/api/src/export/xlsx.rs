//! Spreadsheet rendering of an export snapshot.
//!
//! One sheet per table plus a `Summary` sheet with overall counts.

use kpi_db::models::export::ExportSnapshot;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::ExportError;

enum Cell {
    Text(String),
    Number(f64),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

/// Render the workbook and return the `.xlsx` bytes.
pub fn render(data: &ExportSnapshot) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();

    let users: Vec<Vec<Cell>> = data
        .users
        .iter()
        .map(|u| {
            vec![
                u.id.into(),
                u.name.as_str().into(),
                u.email.as_str().into(),
                u.role.as_str().into(),
                u.department.as_str().into(),
                u.total_hours.into(),
                u.created_at.to_rfc3339().as_str().into(),
            ]
        })
        .collect();
    write_sheet(
        &mut workbook,
        "Users",
        &["ID", "Name", "Email", "Role", "Department", "Total Hours", "Created At"],
        &users,
    )?;

    let projects: Vec<Vec<Cell>> = data
        .projects
        .iter()
        .map(|p| {
            vec![
                p.id.into(),
                p.name.as_str().into(),
                p.description.as_str().into(),
                p.module_type.as_str().into(),
                p.status.as_str().into(),
                p.total_hours.into(),
                p.visibility_type.as_str().into(),
                p.visible_departments.to_string().as_str().into(),
                p.created_at.to_rfc3339().as_str().into(),
            ]
        })
        .collect();
    write_sheet(
        &mut workbook,
        "Projects",
        &[
            "ID",
            "Name",
            "Description",
            "Module",
            "Status",
            "Total Hours",
            "Visibility",
            "Departments",
            "Created At",
        ],
        &projects,
    )?;

    let tasks: Vec<Vec<Cell>> = data
        .tasks
        .iter()
        .map(|t| {
            vec![
                t.id.into(),
                t.user_name.as_str().into(),
                t.project_name.as_str().into(),
                t.module_type.as_str().into(),
                t.description.as_str().into(),
                t.hours.into(),
                t.date.to_string().as_str().into(),
                t.created_at.to_rfc3339().as_str().into(),
            ]
        })
        .collect();
    write_sheet(
        &mut workbook,
        "Tasks",
        &[
            "ID",
            "User",
            "Project",
            "Module",
            "Description",
            "Hours",
            "Date",
            "Created At",
        ],
        &tasks,
    )?;

    let summary = vec![
        vec!["Total Users".into(), (data.users.len() as i64).into()],
        vec!["Total Projects".into(), (data.projects.len() as i64).into()],
        vec!["Total Tasks".into(), (data.tasks.len() as i64).into()],
        vec!["Total Hours".into(), data.total_hours().into()],
    ];
    write_sheet(&mut workbook, "Summary", &["Metric", "Value"], &summary)?;

    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(
    workbook: &mut Workbook,
    name: &str,
    headers: &[&str],
    rows: &[Vec<Cell>],
) -> Result<(), XlsxError> {
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let row_num = i as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Text(text) => sheet.write_string(row_num, col as u16, text)?,
                Cell::Number(number) => sheet.write_number(row_num, col as u16, *number)?,
            };
        }
    }

    sheet.autofit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn produces_a_zip_container() {
        let bytes = render(&fixtures::snapshot()).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn renders_empty_snapshot() {
        let empty = ExportSnapshot {
            users: Vec::new(),
            projects: Vec::new(),
            tasks: Vec::new(),
        };
        assert!(render(&empty).is_ok());
    }
}
