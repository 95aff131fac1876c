use serde_json::{json, Value};
use crate::cli::OutputFormat;
use crate::employee::Employee;
use crate::source::SourceError;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(Value::Object(extra)) = data {
                if let Some(object) = response.as_object_mut() {
                    object.extend(extra);
                }
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<&str>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Machine-readable code for errors the CLI reports specially
pub fn error_code(error: &anyhow::Error) -> Option<&'static str> {
    match error.downcast_ref::<SourceError>() {
        Some(SourceError::Validation(_)) => Some("VALIDATION_ERROR"),
        Some(SourceError::Rejected(_)) => Some("BAD_REQUEST"),
        Some(SourceError::Upstream { .. } | SourceError::Transport(_)) => Some("UPSTREAM_ERROR"),
        _ => None,
    }
}

/// Report a failed command once, in the requested format
pub fn report_error(
    output_format: &OutputFormat,
    error: &anyhow::Error,
    verbose: bool,
) -> anyhow::Result<()> {
    let message = if verbose { format!("{error:?}") } else { error.to_string() };
    output_error(output_format, &message, error_code(error))
}

/// Output a single named value in the appropriate format
pub fn output_value(output_format: &OutputFormat, key: &str, value: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ key: value }))?);
        }
        OutputFormat::Text => match value {
            Value::Array(items) => {
                for item in items {
                    println!("{}", item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()));
                }
            }
            other => println!("{}", other),
        },
    }
    Ok(())
}

/// Output employees as a table or a JSON array
pub fn output_employees(output_format: &OutputFormat, employees: &[Employee]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "employees": employees }))?);
        }
        OutputFormat::Text => {
            if employees.is_empty() {
                println!("No employees found");
                return Ok(());
            }
            println!(
                "{:<36}  {:<24}  {:>10}  {:>3}  {}",
                "ID", "NAME", "SALARY", "AGE", "TITLE"
            );
            for e in employees {
                println!(
                    "{:<36}  {:<24}  {:>10}  {:>3}  {}",
                    e.id.to_string(),
                    e.name,
                    e.salary,
                    e.age,
                    e.title
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::ValidationErrors;

    #[test]
    fn error_code_names_source_failures() {
        let fields: ValidationErrors = [("age".to_string(), "must be between 16 and 75".to_string())]
            .into_iter()
            .collect();
        let validation = anyhow::Error::from(SourceError::Validation(fields));
        assert_eq!(error_code(&validation), Some("VALIDATION_ERROR"));

        let upstream = anyhow::Error::from(SourceError::Upstream {
            status: 503,
            message: "Service Unavailable".into(),
        });
        assert_eq!(error_code(&upstream), Some("UPSTREAM_ERROR"));

        assert_eq!(error_code(&anyhow::anyhow!("bad id")), None);
    }
}
