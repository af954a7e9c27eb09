use std::io::Read;

use clap::Subcommand;
use serde_json::Value;

use crate::cli::utils::{output_employee, output_employees, output_success};
use crate::cli::{EmployeeClient, OutputFormat};

#[derive(Subcommand)]
pub enum EmployeeCommands {
    #[command(about = "List employees, optionally filtered")]
    List {
        #[arg(long, help = "Active-state filter (true/1/yes select active, anything else inactive)")]
        active: Option<String>,
        #[arg(long, help = "Case-insensitive substring over first name, last name and email")]
        search: Option<String>,
    },

    #[command(about = "Show a single employee")]
    Get {
        #[arg(help = "Employee ID")]
        id: i64,
    },

    #[command(about = "Create an employee from JSON (stdin or --data)")]
    Create {
        #[arg(long, help = "JSON payload; read from stdin when omitted")]
        data: Option<String>,
    },

    #[command(about = "Update fields of an employee from JSON (stdin or --data)")]
    Update {
        #[arg(help = "Employee ID")]
        id: i64,
        #[arg(long, help = "JSON payload with only the fields to change; read from stdin when omitted")]
        data: Option<String>,
    },

    #[command(about = "Delete an employee")]
    Delete {
        #[arg(help = "Employee ID")]
        id: i64,
    },
}

pub async fn handle(
    cmd: EmployeeCommands,
    client: &EmployeeClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        EmployeeCommands::List { active, search } => {
            let employees = client.list(active.as_deref(), search.as_deref()).await?;
            output_employees(&output_format, &employees)
        }
        EmployeeCommands::Get { id } => {
            let employee = client.get(id).await?;
            output_employee(&output_format, &employee)
        }
        EmployeeCommands::Create { data } => {
            let body = read_payload(data)?;
            let employee = client.create(&body).await?;
            output_employee(&output_format, &employee)
        }
        EmployeeCommands::Update { id, data } => {
            let body = read_payload(data)?;
            let employee = client.update(id, &body).await?;
            output_employee(&output_format, &employee)
        }
        EmployeeCommands::Delete { id } => {
            let message = client.delete(id).await?;
            output_success(&output_format, &message)
        }
    }
}

fn read_payload(data: Option<String>) -> anyhow::Result<Value> {
    let raw = match data {
        Some(raw) => raw,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_payload(&raw)
}

fn parse_payload(raw: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| anyhow::anyhow!("payload is not valid JSON: {}", e))?;
    if !value.is_object() {
        anyhow::bail!("payload must be a JSON object");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_must_be_an_object() {
        assert!(parse_payload(r#"{"first_name":"Ann"}"#).is_ok());
        assert!(parse_payload("[1,2]").is_err());
        assert!(parse_payload("{oops").is_err());
    }
}
