//! In-memory cache of employees kept in step with the API.
//!
//! # Design
//! The current state is an immutable `Snapshot` behind an `Arc`, held in a
//! `tokio::sync::watch` channel. Each mutation clones the snapshot, applies
//! the change, re-derives the email set from the list and publishes the
//! result inside `send_if_modified`, so the read-modify-write happens under
//! the channel lock and concurrent mutations never drop each other. Subscribers either compare `Arc`s by
//! pointer or snapshots by value. A mutation that changes nothing publishes
//! nothing.
//!
//! API failures are recorded as a user-facing message in `Snapshot::error`
//! and leave the list as it was. Validation failures are returned to the
//! caller only and never reach the network.

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::EmployeeApi;
use crate::error::{ApiError, StoreError};
use crate::route::Route;
use crate::transport::Transport;
use crate::types::{Employee, EmployeeDraft, EmployeeId, EmployeeRecord};
use crate::validation::{validate_draft, validate_employee};

/// The state visible to subscribers at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    employees: Vec<Employee>,
    selected: Option<Employee>,
    emails: BTreeSet<String>,
    error: Option<String>,
}

impl Snapshot {
    /// Employees in API response order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn selected(&self) -> Option<&Employee> {
        self.selected.as_ref()
    }

    /// Every email in `employees()`.
    pub fn emails(&self) -> &BTreeSet<String> {
        &self.emails
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }
}

/// Single source of truth for employee data, passed explicitly to every
/// consumer.
pub struct EmployeeStore<T> {
    api: EmployeeApi<T>,
    state: watch::Sender<Arc<Snapshot>>,
}

impl<T: Transport> EmployeeStore<T> {
    pub fn new(api: EmployeeApi<T>) -> Self {
        let (state, _) = watch::channel(Arc::new(Snapshot::default()));
        Self { api, state }
    }

    pub fn api(&self) -> &EmployeeApi<T> {
        &self.api
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.state.subscribe()
    }

    /// Cached lookup, no request.
    pub fn find(&self, id: &EmployeeId) -> Option<Employee> {
        self.snapshot().find(id).cloned()
    }

    /// Replace the cached list with the server's.
    pub fn initialize(&self) -> Result<(), StoreError> {
        match self.api.list_employees() {
            Ok(employees) => {
                debug!(count = employees.len(), "loaded employees");
                self.publish(|s| {
                    s.employees = employees;
                    s.error = None;
                });
                Ok(())
            }
            Err(err) => Err(self.record(format!("Failed to load employees: {err}"), err)),
        }
    }

    /// Fetch one employee and make it the selection.
    pub fn select_by_id(&self, id: &EmployeeId) -> Result<Employee, StoreError> {
        match self.api.get_employee(id) {
            Ok(employee) => {
                debug!(%id, "selected employee");
                let selected = employee.clone();
                self.publish(|s| {
                    s.selected = Some(selected);
                    s.error = None;
                });
                Ok(employee)
            }
            Err(ApiError::NotFound) => {
                warn!(%id, "employee not found");
                let message = format!("Employee {id} not found");
                self.publish(|s| {
                    s.selected = None;
                    s.error = Some(message);
                });
                Err(ApiError::NotFound.into())
            }
            Err(err) => Err(self.record(format!("Failed to fetch employee {id}: {err}"), err)),
        }
    }

    pub fn create(&self, draft: EmployeeDraft) -> Result<Employee, StoreError> {
        validate_draft(&draft, self.snapshot().emails())?;

        match self.api.create_employee(&draft) {
            Ok(created) => {
                let appended = created.clone();
                self.publish(|s| {
                    s.employees.push(appended);
                    s.error = None;
                });
                Ok(created)
            }
            Err(err) => Err(self.record(format!("Failed to create employee: {err}"), err)),
        }
    }

    /// Send an edited employee. The entry with the same id is replaced and
    /// the selection cleared.
    pub fn update(&self, employee: Employee) -> Result<(), StoreError> {
        {
            let snapshot = self.snapshot();
            let own_email = snapshot.find(&employee.id).map(|e| e.email.as_str());
            validate_employee(&employee, snapshot.emails(), own_email)?;
        }

        match self.api.update_employee(&employee) {
            Ok(()) => {
                debug!(id = %employee.id, "updated employee");
                self.publish(|s| {
                    if let Some(slot) = s.employees.iter_mut().find(|e| e.id == employee.id) {
                        *slot = employee;
                    }
                    s.selected = None;
                    s.error = None;
                });
                Ok(())
            }
            Err(err) => Err(self.record(
                format!("Failed to update employee {}: {err}", employee.id),
                err,
            )),
        }
    }

    pub fn remove(&self, id: &EmployeeId) -> Result<(), StoreError> {
        match self.api.delete_employee(id) {
            Ok(()) => {
                debug!(%id, "removed employee");
                self.publish(|s| {
                    if let Some(index) = s.employees.iter().position(|e| &e.id == id) {
                        s.employees.remove(index);
                    }
                    s.selected = None;
                    s.error = None;
                });
                Ok(())
            }
            Err(err) => Err(self.record(format!("Failed to delete employee {id}: {err}"), err)),
        }
    }

    /// Create or update depending on whether the record has an id yet.
    pub fn save(&self, record: EmployeeRecord) -> Result<Employee, StoreError> {
        match record {
            EmployeeRecord::Unsaved(draft) => self.create(draft),
            EmployeeRecord::Persisted(employee) => {
                self.update(employee.clone())?;
                Ok(employee)
            }
        }
    }

    /// Select a row that is already loaded, without a request.
    pub fn set_selected(&self, employee: Option<Employee>) {
        self.publish(|s| s.selected = employee);
    }

    pub fn clear_selection(&self) {
        self.set_selected(None);
    }

    pub fn clear_error(&self) {
        self.publish(|s| s.error = None);
    }

    /// Follow a route: a detail route fetches and selects its employee,
    /// anything else drops the selection.
    pub fn navigate(&self, route: &Route) -> Result<(), StoreError> {
        match route {
            Route::Detail(id) => self.select_by_id(id).map(|_| ()),
            _ => {
                self.clear_selection();
                Ok(())
            }
        }
    }

    fn record(&self, message: String, err: ApiError) -> StoreError {
        warn!(error = %err, "{message}");
        self.publish(|s| s.error = Some(message));
        err.into()
    }

    fn publish(&self, change: impl FnOnce(&mut Snapshot)) {
        self.state.send_if_modified(|current| {
            let mut next = Snapshot::clone(&**current);
            change(&mut next);
            next.emails = next.employees.iter().map(|e| e.email.clone()).collect();
            if next == **current {
                return false;
            }
            *current = Arc::new(next);
            true
        });
    }
}
