//! The five employee API operations, each a single round-trip.
//!
//! `EmployeeApi` pairs the stateless `EmployeeClient` with a `Transport`.
//! Nothing is cached and nothing is retried.

use tracing::debug;

use crate::client::EmployeeClient;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Employee, EmployeeDraft, EmployeeId};

#[derive(Debug, Clone)]
pub struct EmployeeApi<T> {
    client: EmployeeClient,
    transport: T,
}

impl EmployeeApi<UreqTransport> {
    /// Blocking client for the configured base URL.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(EmployeeClient::new(&config.base_url), UreqTransport::new())
    }
}

impl<T: Transport> EmployeeApi<T> {
    pub fn new(client: EmployeeClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &EmployeeClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let request = self.client.build_list_employees();
        let employees = self
            .client
            .parse_list_employees(self.transport.execute(request)?)?;
        debug!(count = employees.len(), "listed employees");
        Ok(employees)
    }

    pub fn get_employee(&self, id: &EmployeeId) -> Result<Employee, ApiError> {
        let request = self.client.build_get_employee(id)?;
        self.client.parse_get_employee(self.transport.execute(request)?)
    }

    pub fn create_employee(&self, draft: &EmployeeDraft) -> Result<Employee, ApiError> {
        let request = self.client.build_create_employee(draft)?;
        let created = self
            .client
            .parse_create_employee(self.transport.execute(request)?)?;
        debug!(id = %created.id, "created employee");
        Ok(created)
    }

    pub fn update_employee(&self, employee: &Employee) -> Result<(), ApiError> {
        let request = self.client.build_update_employee(employee)?;
        self.client
            .parse_update_employee(self.transport.execute(request)?)
    }

    pub fn delete_employee(&self, id: &EmployeeId) -> Result<(), ApiError> {
        let request = self.client.build_delete_employee(id)?;
        self.client
            .parse_delete_employee(self.transport.execute(request)?)
    }
}
