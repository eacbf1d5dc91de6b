//! XML rendering of an export snapshot.
//!
//! Layout:
//!
//! ```text
//! <kpi_export timestamp=".." version="1.0.0">
//!   <users><user id=".." name=".." .../></users>
//!   <projects><project .../></projects>
//!   <tasks><task .../></tasks>
//! </kpi_export>
//! ```
//!
//! Every field becomes an attribute. Arrays are joined with commas and nulls
//! become empty strings.

use chrono::{DateTime, Utc};
use kpi_db::models::export::ExportSnapshot;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use serde::Serialize;
use serde_json::Value;

use super::{ExportError, EXPORT_VERSION};

const ROOT: &str = "kpi_export";

pub fn render(data: &ExportSnapshot, timestamp: DateTime<Utc>) -> Result<String, ExportError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let timestamp = timestamp.to_rfc3339();
    let mut root = BytesStart::new(ROOT);
    root.push_attribute(("timestamp", timestamp.as_str()));
    root.push_attribute(("version", EXPORT_VERSION));
    writer.write_event(Event::Start(root)).map_err(xml_error)?;

    write_section(&mut writer, "users", "user", &data.users)?;
    write_section(&mut writer, "projects", "project", &data.projects)?;
    write_section(&mut writer, "tasks", "task", &data.tasks)?;

    writer
        .write_event(Event::End(BytesEnd::new(ROOT)))
        .map_err(xml_error)?;

    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn write_section<T: Serialize>(
    writer: &mut Writer<Vec<u8>>,
    section: &str,
    item: &str,
    rows: &[T],
) -> Result<(), ExportError> {
    writer
        .write_event(Event::Start(BytesStart::new(section)))
        .map_err(xml_error)?;

    for row in rows {
        let mut element = BytesStart::new(item);
        if let Value::Object(fields) = serde_json::to_value(row)? {
            for (key, value) in &fields {
                element.push_attribute((key.as_str(), attribute_text(value).as_str()));
            }
        }
        writer.write_event(Event::Empty(element)).map_err(xml_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(section)))
        .map_err(xml_error)
}

fn attribute_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(attribute_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn xml_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Xml(err.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::export::fixtures;

    #[test]
    fn renders_one_element_per_row_with_escaped_attributes() {
        let timestamp = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let xml = render(&fixtures::snapshot(), timestamp).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains(
            "<kpi_export timestamp=\"2025-02-01T12:00:00+00:00\" version=\"1.0.0\">"
        ));
        assert!(xml.contains("name=\"Ana &amp; Co\""));
        assert!(xml.contains("description=\"Customer &lt;portal&gt;\""));
        assert!(xml.contains("visible_departments=\"IT,Sales\""));
        assert!(xml.contains("hours=\"3.5\""));
        assert_eq!(xml.matches("<user ").count(), 1);
        assert_eq!(xml.matches("<task ").count(), 1);
        assert!(xml.trim_end().ends_with("</kpi_export>"));
    }

    #[test]
    fn empty_sections_are_still_present() {
        let empty = ExportSnapshot {
            users: Vec::new(),
            projects: Vec::new(),
            tasks: Vec::new(),
        };
        let xml = render(&empty, Utc::now()).unwrap();
        assert!(xml.contains("<users>"));
        assert!(xml.contains("</tasks>"));
        assert!(!xml.contains("<user "));
    }
}
