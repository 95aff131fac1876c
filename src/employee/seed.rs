use std::path::Path;

use super::model::{CreateEmployeeInput, ValidationErrors};
use super::store::{EmployeeStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("seed entry {index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: ValidationErrors,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

const BUILTIN_ROSTER: &[(&str, i64, i64, &str)] = &[
    ("Tiger Nixon", 320800, 61, "System Architect"),
    ("Garrett Winters", 170750, 63, "Accountant"),
    ("Ashton Cox", 86000, 66, "Junior Technical Author"),
    ("Cedric Kelly", 433060, 22, "Senior Javascript Developer"),
    ("Airi Satou", 162700, 33, "Accountant"),
    ("Brielle Williamson", 372000, 61, "Integration Specialist"),
    ("Herrod Chandler", 137500, 59, "Sales Assistant"),
    ("Rhona Davidson", 327900, 55, "Integration Specialist"),
    ("Colleen Hurst", 205500, 39, "Javascript Developer"),
    ("Sonya Frost", 103600, 23, "Software Engineer"),
    ("Jena Gaines", 90560, 30, "Office Manager"),
    ("Quinn Flynn", 342000, 22, "Support Lead"),
    ("Charde Marshall", 470600, 36, "Regional Director"),
    ("Haley Kennedy", 313500, 43, "Senior Marketing Designer"),
    ("Tatyana Fitzpatrick", 385750, 19, "Regional Director"),
];

/// The roster a fresh store starts with when no seed file is configured
pub fn builtin_roster() -> Vec<CreateEmployeeInput> {
    BUILTIN_ROSTER
        .iter()
        .map(|(name, salary, age, title)| CreateEmployeeInput::new(name, *salary, *age, title))
        .collect()
}

pub fn load_seed_file(path: &Path) -> Result<Vec<CreateEmployeeInput>, SeedError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: display.clone(),
        source,
    })?;
    serde_yaml::from_str(&raw).map_err(|source| SeedError::Parse { path: display, source })
}

/// Validate every entry first, then append them all; a bad entry seeds nothing
pub fn seed_store(store: &EmployeeStore, roster: &[CreateEmployeeInput]) -> Result<usize, SeedError> {
    let validated = roster
        .iter()
        .enumerate()
        .map(|(index, input)| input.validate().map_err(|source| SeedError::Invalid { index, source }))
        .collect::<Result<Vec<_>, _>>()?;

    let count = validated.len();
    for new in validated {
        store.insert(new)?;
    }
    Ok(count)
}
