use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const MIN_AGE: i64 = 16;
pub const MAX_AGE: i64 = 75;

/// Opaque unique identifier of an employee record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EmployeeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not an employee id: {0:?}")]
pub struct InvalidEmployeeId(String);

/// Only the lowercase hyphenated form a record carries names it
impl FromStr for EmployeeId {
    type Err = InvalidEmployeeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Uuid::parse_str(s) {
            Ok(id) if id.hyphenated().to_string() == s => Ok(Self(id)),
            _ => Err(InvalidEmployeeId(s.to_string())),
        }
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One record of the directory, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(rename = "employee_name")]
    pub name: String,
    #[serde(rename = "employee_salary")]
    pub salary: u32,
    #[serde(rename = "employee_age")]
    pub age: u8,
    #[serde(rename = "employee_title")]
    pub title: String,
    #[serde(rename = "employee_email")]
    pub email: String,
}

impl Employee {
    pub fn from_new(id: EmployeeId, new: NewEmployee, email_domain: &str) -> Self {
        let email = derive_email(&new.name, email_domain);
        Self {
            id,
            name: new.name,
            salary: new.salary,
            age: new.age,
            title: new.title,
            email,
        }
    }
}

/// Create request body. Every field is optional on the wire so a missing
/// field is reported by [`CreateEmployeeInput::validate`] rather than by the
/// JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeInput {
    pub name: Option<String>,
    pub salary: Option<i64>,
    pub age: Option<i64>,
    pub title: Option<String>,
}

/// Input that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub name: String,
    pub salary: u32,
    pub age: u8,
    pub title: String,
}

impl CreateEmployeeInput {
    pub fn new(name: &str, salary: i64, age: i64, title: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            salary: Some(salary),
            age: Some(age),
            title: Some(title.to_string()),
        }
    }

    /// Check every field and collect all violations
    pub fn validate(&self) -> Result<NewEmployee, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required_text(&mut errors, "name", self.name.as_deref());
        let title = required_text(&mut errors, "title", self.title.as_deref());

        let salary = match self.salary {
            None => {
                errors.add("salary", "must not be null");
                None
            }
            Some(s) if s <= 0 => {
                errors.add("salary", "must be greater than 0");
                None
            }
            Some(s) => match u32::try_from(s) {
                Ok(s) => Some(s),
                Err(_) => {
                    errors.add("salary", format!("must be at most {}", u32::MAX));
                    None
                }
            },
        };

        let age = match self.age {
            None => {
                errors.add("age", "must not be null");
                None
            }
            Some(a) if !(MIN_AGE..=MAX_AGE).contains(&a) => {
                errors.add("age", format!("must be between {} and {}", MIN_AGE, MAX_AGE));
                None
            }
            Some(a) => u8::try_from(a).ok(),
        };

        match (name, salary, age, title) {
            (Some(name), Some(salary), Some(age), Some(title)) if errors.is_empty() => Ok(NewEmployee {
                name,
                salary,
                age,
                title,
            }),
            _ => Err(errors),
        }
    }
}

fn required_text(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> Option<String> {
    match value {
        None => {
            errors.add(field, "must not be null");
            None
        }
        Some(v) if v.trim().is_empty() => {
            errors.add(field, "must not be blank");
            None
        }
        Some(v) => Some(v.to_string()),
    }
}

/// Delete request body: by id, or by the first record with this exact name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteEmployeeInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Resolved delete target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Id(EmployeeId),
    /// The id was supplied but does not parse, so nothing can match it
    UnknownId,
    Name(String),
}

impl DeleteEmployeeInput {
    pub fn by_id(id: EmployeeId) -> Self {
        Self {
            id: Some(id.to_string()),
            name: None,
        }
    }

    pub fn by_name(name: &str) -> Self {
        Self {
            id: None,
            name: Some(name.to_string()),
        }
    }

    pub fn target(&self) -> Result<DeleteTarget, ValidationErrors> {
        if let Some(id) = self.id.as_deref().filter(|id| !id.trim().is_empty()) {
            return Ok(id
                .parse::<EmployeeId>()
                .map(DeleteTarget::Id)
                .unwrap_or(DeleteTarget::UnknownId));
        }
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(DeleteTarget::Name(name.to_string())),
            _ => {
                let mut errors = ValidationErrors::default();
                errors.add("name", "either id or name must be provided");
                Err(errors)
            }
        }
    }
}

/// Field-level validation failures, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid employee input")?;
        for (i, (field, message)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{} {}", sep, field, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl FromIterator<(String, String)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Synthetic email: lowercase alphanumeric words of the name joined by dots
pub fn derive_email(name: &str, domain: &str) -> String {
    let local = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(".");

    if local.is_empty() {
        format!("employee@{}", domain)
    } else {
        format!("{}@{}", local, domain)
    }
}
