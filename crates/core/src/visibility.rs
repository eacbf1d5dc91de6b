//! Department visibility policy for projects.
//!
//! A project is listed for a department when its policy is [`VisibilityType::All`],
//! or when it is [`VisibilityType::SpecificDepartments`] and the department is a
//! member of the project's [`DepartmentSet`]. Private projects are never listed.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// VisibilityType
// ---------------------------------------------------------------------------

/// Policy controlling which departments may see a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityType {
    #[default]
    All,
    SpecificDepartments,
    Private,
}

impl VisibilityType {
    /// The value stored in the `projects.visibility_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            VisibilityType::All => "all",
            VisibilityType::SpecificDepartments => "specific_departments",
            VisibilityType::Private => "private",
        }
    }

    /// Whether a project with this policy and department set is visible to `department`.
    pub fn is_visible_to(self, departments: &DepartmentSet, department: &str) -> bool {
        match self {
            VisibilityType::All => true,
            VisibilityType::SpecificDepartments => departments.contains(department),
            VisibilityType::Private => false,
        }
    }
}

impl fmt::Display for VisibilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisibilityType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(VisibilityType::All),
            "specific_departments" => Ok(VisibilityType::SpecificDepartments),
            "private" => Ok(VisibilityType::Private),
            other => Err(CoreError::Validation(format!(
                "Unknown visibility type '{other}'. \
                 Expected one of: all, specific_departments, private"
            ))),
        }
    }
}

impl TryFrom<String> for VisibilityType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// DepartmentSet
// ---------------------------------------------------------------------------

/// An order-insensitive set of department names.
///
/// Names are trimmed and blank entries are dropped, so two sets built from the
/// same names in any order (or with duplicates) compare equal and serialize to
/// the same sorted array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct DepartmentSet(BTreeSet<String>);

impl DepartmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, department: &str) -> bool {
        self.0.contains(department.trim())
    }

    pub fn insert(&mut self, department: &str) -> bool {
        let name = department.trim();
        if name.is_empty() {
            return false;
        }
        self.0.insert(name.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Sorted names, in the form bound to the `TEXT[]` column.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl From<Vec<String>> for DepartmentSet {
    fn from(names: Vec<String>) -> Self {
        names.iter().map(String::as_str).collect()
    }
}

impl From<DepartmentSet> for Vec<String> {
    fn from(set: DepartmentSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for DepartmentSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = DepartmentSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl fmt::Display for DepartmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_vec().join(","))
    }
}
