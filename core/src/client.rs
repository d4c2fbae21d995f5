//! Stateless HTTP request builder and response parser for the employee API.
//!
//! # Design
//! `EmployeeClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `EmployeeApi` glues the two halves to a `Transport`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Address, Employee, EmployeeDraft, EmployeeId};

/// Synchronous, stateless client for the employee API.
#[derive(Debug, Clone)]
pub struct EmployeeClient {
    base_url: String,
}

impl EmployeeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_employees(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/employee", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_employee(&self, id: &EmployeeId) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            path: self.employee_path(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_create_employee(&self, draft: &EmployeeDraft) -> Result<HttpRequest, ApiError> {
        check_addresses(&draft.addresses)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/employee", self.base_url),
            headers: json_headers(),
            body: Some(to_json(draft)?),
        })
    }

    pub fn build_update_employee(&self, employee: &Employee) -> Result<HttpRequest, ApiError> {
        check_addresses(&employee.addresses)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.employee_path(&employee.id)?,
            headers: json_headers(),
            body: Some(to_json(employee)?),
        })
    }

    pub fn build_delete_employee(&self, id: &EmployeeId) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            path: self.employee_path(id)?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_list_employees(&self, response: HttpResponse) -> Result<Vec<Employee>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_get_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    /// The created body must carry the server-assigned id.
    pub fn parse_create_employee(&self, response: HttpResponse) -> Result<Employee, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_employee(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_employee(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn employee_path(&self, id: &EmployeeId) -> Result<String, ApiError> {
        if !id.is_valid() {
            return Err(ApiError::InvalidRequest(format!(
                "employee id {id:?} is not a single path segment"
            )));
        }
        Ok(format!("{}/employee/{id}", self.base_url))
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn check_addresses(addresses: &[Address]) -> Result<(), ApiError> {
    if addresses.is_empty() {
        return Err(ApiError::InvalidRequest(
            "an employee needs at least one address".to_string(),
        ));
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
