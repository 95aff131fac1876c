pub mod model;
pub mod seed;
pub mod service;
pub mod store;

pub use model::{
    derive_email, CreateEmployeeInput, DeleteEmployeeInput, DeleteTarget, Employee, EmployeeId,
    InvalidEmployeeId, NewEmployee, ValidationErrors,
};
pub use seed::{builtin_roster, load_seed_file, seed_store, SeedError};
pub use service::{EmployeeService, ServiceError, TOP_EARNERS_LIMIT};
pub use store::{EmployeeStore, StoreError};
