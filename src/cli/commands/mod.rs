pub mod employee;
pub mod serve;
