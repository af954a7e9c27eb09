use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::Employee;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "message": message }))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

pub fn output_employee(output_format: &OutputFormat, employee: &Employee) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(employee)?),
        OutputFormat::Text => println!("{}", format_employee_line(employee)),
    }
    Ok(())
}

pub fn output_employees(output_format: &OutputFormat, employees: &[Employee]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(employees)?),
        OutputFormat::Text => {
            if employees.is_empty() {
                println!("No employees found");
            }
            for employee in employees {
                println!("{}", format_employee_line(employee));
            }
        }
    }
    Ok(())
}

/// One tab-separated line: id, full name, email, date of birth, status
pub fn format_employee_line(employee: &Employee) -> String {
    let full_name = match &employee.middle_name {
        Some(middle) if !middle.is_empty() => {
            format!("{} {} {}", employee.first_name, middle, employee.last_name)
        }
        _ => employee.display_name(),
    };
    let status = if employee.is_active { "active" } else { "inactive" };

    format!(
        "{}\t{}\t{}\t{}\t{}",
        employee.id, full_name, employee.email, employee.date_of_birth, status
    )
}
