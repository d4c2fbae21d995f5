//! Client-side checks run before any create or update request.
//!
//! Every rule is evaluated and all violations are returned together, keyed
//! by the camelCase field path a form would bind to
//! (`addresses[1].postalCode`). Email uniqueness is an exact,
//! case-sensitive match against the store's cached email set.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Address, Employee, EmployeeDraft};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All rules violated by a single employee value. Never empty when returned
/// as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// First message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

struct Fields<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone_number: &'a str,
    addresses: &'a [Address],
}

/// Check a new employee. `taken` is every email currently cached.
pub fn validate_draft(draft: &EmployeeDraft, taken: &BTreeSet<String>) -> Result<(), ValidationErrors> {
    let fields = Fields {
        first_name: &draft.first_name,
        last_name: &draft.last_name,
        email: &draft.email,
        phone_number: &draft.phone_number,
        addresses: &draft.addresses,
    };
    check(&fields, taken, None)
}

/// Check an edited employee. `own_email` is the address the employee holds
/// in the cache right now, so keeping it unchanged is not a conflict.
pub fn validate_employee(
    employee: &Employee,
    taken: &BTreeSet<String>,
    own_email: Option<&str>,
) -> Result<(), ValidationErrors> {
    let fields = Fields {
        first_name: &employee.first_name,
        last_name: &employee.last_name,
        email: &employee.email,
        phone_number: &employee.phone_number,
        addresses: &employee.addresses,
    };
    check(&fields, taken, own_email)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Parse the apartment number text field. Blank input means "not filled in".
pub fn parse_apartment_number(input: &str) -> Result<Option<u32>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| "Apartment Number must be a number".to_string())
}

fn check(fields: &Fields<'_>, taken: &BTreeSet<String>, own_email: Option<&str>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    required(&mut errors, "firstName", fields.first_name, "First Name is required");
    required(&mut errors, "lastName", fields.last_name, "Last Name is required");

    if is_blank(fields.email) {
        errors.push("email", "Email is required");
    } else if !is_valid_email(fields.email) {
        errors.push("email", "Invalid email format");
    } else if taken.contains(fields.email) && own_email != Some(fields.email) {
        errors.push("email", "Email already exists");
    }

    required(&mut errors, "phoneNumber", fields.phone_number, "Phone Number is required");

    if fields.addresses.is_empty() {
        errors.push("addresses", "At least one address is required");
    }
    for (i, address) in fields.addresses.iter().enumerate() {
        let path = |name: &str| format!("addresses[{i}].{name}");
        required(&mut errors, path("streetName"), &address.street_name, "Street Name is required");
        required(&mut errors, path("postalCode"), &address.postal_code, "Postal Code is required");
        if address.apartment_number.is_none() {
            errors.push(path("apartmentNumber"), "Apartment Number is required");
        }
        required(&mut errors, path("state"), &address.state, "State is required");
        required(&mut errors, path("country"), &address.country, "Country is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn required(errors: &mut ValidationErrors, field: impl Into<String>, value: &str, message: &str) {
    if is_blank(value) {
        errors.push(field, message);
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
