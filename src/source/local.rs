use async_trait::async_trait;

use super::{EmployeeSource, SourceError};
use crate::employee::{CreateEmployeeInput, DeleteEmployeeInput, Employee, EmployeeId, EmployeeService};

/// Answers from an in-process [`EmployeeService`]
#[derive(Debug, Clone)]
pub struct LocalSource {
    service: EmployeeService,
}

impl LocalSource {
    pub fn new(service: EmployeeService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EmployeeSource for LocalSource {
    fn kind(&self) -> &'static str {
        "local"
    }

    fn record_count(&self) -> Option<usize> {
        self.service.store().len().ok()
    }

    async fn list_all(&self) -> Result<Vec<Employee>, SourceError> {
        Ok(self.service.list_all()?)
    }

    async fn get_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, SourceError> {
        Ok(self.service.get_by_id(id)?)
    }

    async fn find_by_name(&self, text: &str) -> Result<Option<Vec<Employee>>, SourceError> {
        Ok(self.service.find_by_name(text))
    }

    async fn highest_salary(&self) -> Result<Option<u32>, SourceError> {
        Ok(self.service.highest_salary()?)
    }

    async fn top_ten_names(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.service.top_ten_names()?)
    }

    async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee, SourceError> {
        Ok(self.service.create(input)?)
    }

    async fn delete(&self, input: &DeleteEmployeeInput) -> Result<bool, SourceError> {
        Ok(self.service.delete(input)?)
    }

    async fn delete_by_id(&self, id: &EmployeeId) -> Result<Option<String>, SourceError> {
        Ok(self.service.delete_by_id(id)?)
    }
}
