//! Domain DTOs for the employee API.
//!
//! # Design
//! The server has been seen handing out both numeric and string ids, and
//! form values carry no id at all until the first save. `EmployeeId` covers
//! the two id shapes; `EmployeeDraft` and `Employee` split "not yet saved"
//! from "saved", and `EmployeeRecord` picks between them when reading a
//! payload whose `id` may be missing.
//!
//! These types mirror the mock-server's schema but are defined
//! independently. Integration tests catch any drift between the two crates.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Server-assigned employee identifier.
///
/// Two ids are equal when they print the same, so `Text("1")` and
/// `Number(1)` name the same employee. Route parsing and the wire format
/// may disagree on which variant an id arrives as.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmployeeId {
    Number(u64),
    Text(String),
}

impl EmployeeId {
    /// An id is usable as a single URL path segment: numeric, or non-empty
    /// text made only of unreserved characters and not `.` or `..`.
    pub fn is_valid(&self) -> bool {
        match self {
            EmployeeId::Number(_) => true,
            EmployeeId::Text(s) => {
                !s.is_empty()
                    && s != "."
                    && s != ".."
                    && s
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
            }
        }
    }

    fn canonical(&self) -> Cow<'_, str> {
        match self {
            EmployeeId::Number(n) => Cow::Owned(n.to_string()),
            EmployeeId::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl PartialEq for EmployeeId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EmployeeId::Number(a), EmployeeId::Number(b)) => a == b,
            _ => self.canonical() == other.canonical(),
        }
    }
}

impl Eq for EmployeeId {}

impl Hash for EmployeeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmployeeId::Number(n) => write!(f, "{n}"),
            EmployeeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EmployeeId {
    fn from(n: u64) -> Self {
        EmployeeId::Number(n)
    }
}

impl From<&str> for EmployeeId {
    fn from(s: &str) -> Self {
        EmployeeId::Text(s.to_string())
    }
}

/// A postal address owned by a single employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street_name: String,
    pub postal_code: String,
    /// `None` until the form field is filled in.
    #[serde(default)]
    pub apartment_number: Option<u32>,
    pub state: String,
    pub country: String,
}

/// Employee fields before the server has assigned an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// A persisted employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
}

impl Employee {
    pub fn from_draft(id: EmployeeId, draft: EmployeeDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone_number: draft.phone_number,
            addresses: draft.addresses,
        }
    }

    /// Copy of every field except the id.
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            addresses: self.addresses.clone(),
        }
    }
}

/// Either side of the saved/unsaved split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeRecord {
    Unsaved(EmployeeDraft),
    Persisted(Employee),
}

#[derive(Deserialize)]
struct WireEmployee {
    #[serde(default)]
    id: Option<EmployeeId>,
    #[serde(flatten)]
    draft: EmployeeDraft,
}

impl EmployeeRecord {
    /// Read a payload whose `id` may be absent or `null`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let wire: WireEmployee = serde_json::from_str(json)?;
        Ok(match wire.id {
            Some(id) => EmployeeRecord::Persisted(Employee::from_draft(id, wire.draft)),
            None => EmployeeRecord::Unsaved(wire.draft),
        })
    }

    pub fn id(&self) -> Option<&EmployeeId> {
        match self {
            EmployeeRecord::Unsaved(_) => None,
            EmployeeRecord::Persisted(employee) => Some(&employee.id),
        }
    }

    pub fn to_draft(&self) -> EmployeeDraft {
        match self {
            EmployeeRecord::Unsaved(draft) => draft.clone(),
            EmployeeRecord::Persisted(employee) => employee.to_draft(),
        }
    }
}

impl From<EmployeeDraft> for EmployeeRecord {
    fn from(draft: EmployeeDraft) -> Self {
        EmployeeRecord::Unsaved(draft)
    }
}

impl From<Employee> for EmployeeRecord {
    fn from(employee: Employee) -> Self {
        EmployeeRecord::Persisted(employee)
    }
}
