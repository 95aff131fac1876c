use std::sync::Arc;

use super::model::{
    CreateEmployeeInput, DeleteEmployeeInput, DeleteTarget, Employee, EmployeeId, ValidationErrors,
};
use super::store::{EmployeeStore, StoreError};

pub const TOP_EARNERS_LIMIT: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Directory operations over a shared [`EmployeeStore`]
#[derive(Debug, Clone)]
pub struct EmployeeService {
    store: Arc<EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<EmployeeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EmployeeStore {
        &self.store
    }

    pub fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        self.store.list_all()
    }

    pub fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, StoreError> {
        self.store.get(id)
    }

    /// Case-sensitive substring match on name.
    ///
    /// Zero matches is `Some(vec![])`. `None` only when the store itself
    /// could not be read.
    pub fn find_by_name(&self, text: &str) -> Option<Vec<Employee>> {
        match self.store.list_all() {
            Ok(all) => Some(all.into_iter().filter(|employee| employee.name.contains(text)).collect()),
            Err(e) => {
                tracing::warn!("name search for {:?} failed: {}", text, e);
                None
            }
        }
    }

    pub fn highest_salary(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.store.list_all()?.iter().map(|employee| employee.salary).max())
    }

    /// Names of the best paid records, highest first; ties keep insertion order
    pub fn top_ten_names(&self) -> Result<Vec<String>, StoreError> {
        let mut all = self.store.list_all()?;
        // sort_by is stable
        all.sort_by(|a, b| b.salary.cmp(&a.salary));
        Ok(all
            .into_iter()
            .take(TOP_EARNERS_LIMIT)
            .map(|employee| employee.name)
            .collect())
    }

    pub fn create(&self, input: &CreateEmployeeInput) -> Result<Employee, ServiceError> {
        let new = input.validate()?;
        let employee = self.store.insert(new)?;
        tracing::info!("created employee {} ({})", employee.id, employee.name);
        Ok(employee)
    }

    pub fn delete_by_id(&self, id: &EmployeeId) -> Result<Option<String>, StoreError> {
        let removed = self.store.remove(id)?;
        match &removed {
            Some(name) => tracing::info!("deleted employee {} ({})", id, name),
            None => tracing::debug!("delete of unknown employee {}", id),
        }
        Ok(removed)
    }

    /// Delete by id or by first exact name match; `true` if a record went away
    pub fn delete(&self, input: &DeleteEmployeeInput) -> Result<bool, ServiceError> {
        let removed = match input.target()? {
            DeleteTarget::Id(id) => self.delete_by_id(&id)?.is_some(),
            DeleteTarget::UnknownId => false,
            DeleteTarget::Name(name) => match self.store.remove_first_named(&name)? {
                Some(employee) => {
                    tracing::info!("deleted employee {} ({})", employee.id, employee.name);
                    true
                }
                None => false,
            },
        };
        Ok(removed)
    }
}
