use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use super::model::{Employee, EmployeeId, NewEmployee};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("employee store lock poisoned")]
    LockPoisoned,
}

/// In-memory ordered collection of employee records.
///
/// Records live in a map keyed by insertion sequence so iteration follows
/// insertion order; a second map indexes sequence numbers by id.
#[derive(Debug)]
pub struct EmployeeStore {
    inner: Mutex<StoreInner>,
    email_domain: String,
}

#[derive(Debug, Default)]
struct StoreInner {
    next_seq: u64,
    records: BTreeMap<u64, Employee>,
    index: HashMap<EmployeeId, u64>,
}

impl StoreInner {
    fn take(&mut self, id: &EmployeeId) -> Option<Employee> {
        let seq = self.index.remove(id)?;
        self.records.remove(&seq)
    }
}

impl EmployeeStore {
    pub fn new(email_domain: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            email_domain: email_domain.into(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Snapshot of every record in insertion order
    pub fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    pub fn get(&self, id: &EmployeeId) -> Result<Option<Employee>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .index
            .get(id)
            .and_then(|seq| inner.records.get(seq))
            .cloned())
    }

    /// Append a record under a freshly assigned id
    pub fn insert(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let mut inner = self.lock()?;

        let mut id = EmployeeId::new();
        while inner.index.contains_key(&id) {
            id = EmployeeId::new();
        }

        let employee = Employee::from_new(id, new, &self.email_domain);
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.index.insert(id, seq);
        inner.records.insert(seq, employee.clone());
        Ok(employee)
    }

    /// Remove by id, returning the removed record's name
    pub fn remove(&self, id: &EmployeeId) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.take(id).map(|employee| employee.name))
    }

    /// Remove the earliest inserted record whose name equals `name`
    pub fn remove_first_named(&self, name: &str) -> Result<Option<Employee>, StoreError> {
        let mut inner = self.lock()?;
        let id = inner
            .records
            .values()
            .find(|employee| employee.name == name)
            .map(|employee| employee.id);
        Ok(id.and_then(|id| inner.take(&id)))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Poison the lock by panicking while holding it
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = self.inner.lock();
                    panic!("poisoning employee store");
                })
                .join();
        });
    }
}
