use std::time::Duration;

use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_employees, output_success, output_value};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::employee::{CreateEmployeeInput, DeleteEmployeeInput, EmployeeId};
use crate::source::{Credentials, EmployeeSource, RemoteSource};

#[derive(Subcommand)]
pub enum EmployeeCommands {
    #[command(about = "List every employee")]
    List,

    #[command(about = "Show one employee")]
    Get {
        #[arg(help = "Employee ID")]
        id: String,
    },

    #[command(about = "Find employees whose name contains the text (case-sensitive)")]
    Search {
        #[arg(help = "Text to look for")]
        text: String,
    },

    #[command(about = "Highest salary across the directory")]
    HighestSalary,

    #[command(about = "Names of the ten best paid employees")]
    TopTen,

    #[command(about = "Create an employee")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i64,
        #[arg(long)]
        age: i64,
        #[arg(long)]
        title: String,
    },

    #[command(about = "Delete an employee by ID")]
    Delete {
        #[arg(help = "Employee ID")]
        id: String,
    },

    #[command(about = "Delete the first employee with exactly this name")]
    DeleteByName {
        #[arg(help = "Employee name")]
        name: String,
    },
}

fn default_url(config: &AppConfig) -> String {
    format!("http://127.0.0.1:{}", config.api.port)
}

fn parse_id(raw: &str) -> anyhow::Result<EmployeeId> {
    raw.parse()
        .map_err(|e| anyhow::anyhow!("'{}' is not a valid employee id: {}", raw, e))
}

pub async fn handle(
    config: &AppConfig,
    url: Option<String>,
    cmd: EmployeeCommands,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let url = url.unwrap_or_else(|| default_url(config));
    let credentials = Credentials {
        username: config.security.username.clone(),
        password: config.security.password.clone(),
    };
    let client = RemoteSource::new(
        &url,
        Duration::from_secs(config.api.upstream_timeout_secs),
        Some(credentials),
    )?;

    run(&client, cmd, &output_format).await
}

async fn run(
    client: &RemoteSource,
    cmd: EmployeeCommands,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        EmployeeCommands::List => {
            let employees = client.list_all().await?;
            output_employees(output_format, &employees)
        }
        EmployeeCommands::Get { id } => match client.get_by_id(&parse_id(&id)?).await? {
            Some(employee) => output_employees(output_format, std::slice::from_ref(&employee)),
            None => Err(anyhow::anyhow!("Employee '{}' not found", id)),
        },
        EmployeeCommands::Search { text } => match client.find_by_name(&text).await? {
            Some(employees) => output_employees(output_format, &employees),
            None => Err(anyhow::anyhow!("Search for '{}' could not be served", text)),
        },
        EmployeeCommands::HighestSalary => match client.highest_salary().await? {
            Some(salary) => output_value(output_format, "highest_salary", json!(salary)),
            None => Err(anyhow::anyhow!("The directory is empty")),
        },
        EmployeeCommands::TopTen => {
            let names = client.top_ten_names().await?;
            output_value(output_format, "names", json!(names))
        }
        EmployeeCommands::Create {
            name,
            salary,
            age,
            title,
        } => {
            let input = CreateEmployeeInput::new(&name, salary, age, &title);
            let employee = client.create(&input).await?;
            output_success(
                output_format,
                &format!("Created employee '{}' ({})", employee.name, employee.id),
                Some(json!({ "employee": employee })),
            )
        }
        EmployeeCommands::Delete { id } => match client.delete_by_id(&parse_id(&id)?).await? {
            Some(name) => output_success(
                output_format,
                &format!("Deleted employee '{}'", name),
                Some(json!({ "name": name })),
            ),
            None => Err(anyhow::anyhow!("Employee '{}' not found", id)),
        },
        EmployeeCommands::DeleteByName { name } => {
            if client.delete(&DeleteEmployeeInput::by_name(&name)).await? {
                output_success(
                    output_format,
                    &format!("Deleted employee '{}'", name),
                    Some(json!({ "deleted": true })),
                )
            } else {
                Err(anyhow::anyhow!("No employee named '{}'", name))
            }
        }
    }
}
