//! Employee directory commands.

use anyhow::Result;
use attend_core::HrClient;
use attend_core::types::{EmployeeUpdate, NewEmployee};
use comfy_table::Table;

pub async fn list(client: &HrClient) -> Result<()> {
    let roster = client.employees().await?;

    let mut table = Table::new();
    table.set_header(["ID", "Name", "Email", "Designation"]);
    for employee in roster {
        table.add_row([
            employee.employee_id.to_string(),
            employee.name,
            employee.email,
            employee.designation.unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(client: &HrClient, id: i64) -> Result<()> {
    let employee = client.employee(id).await?;

    println!("#{} {}", employee.employee_id, employee.name);
    println!("email: {}", employee.email);
    if let Some(designation) = &employee.designation {
        println!("designation: {designation}");
    }
    if let Some(department) = &employee.department {
        println!("department: {department}");
    }
    if let Some(phone) = &employee.phone_number {
        println!("phone: {phone}");
    }
    if let Some(salary) = employee.gross_monthly_salary {
        println!("gross monthly salary: {salary:.2}");
    }
    if let Some(joined) = &employee.date_of_joining {
        println!("joined: {joined}");
    }
    Ok(())
}

pub async fn add(
    client: &HrClient,
    name: String,
    email: String,
    role: String,
    salary: f64,
    department: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let created = client
        .create_employee(&NewEmployee {
            name,
            email,
            role,
            salary,
            department,
            phone,
        })
        .await?;
    println!("{} (id {})", created.message, created.employee_id);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    client: &HrClient,
    id: i64,
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    role: Option<String>,
    department: Option<String>,
    salary: Option<f64>,
) -> Result<()> {
    let update = EmployeeUpdate {
        full_name: name,
        email,
        phone_number: phone,
        job_title: role,
        department,
        gross_monthly_salary: salary,
        ..EmployeeUpdate::default()
    };
    let response = client.update_employee(id, &update).await?;
    println!("{}", response.message);
    Ok(())
}

pub async fn remove(client: &HrClient, id: i64) -> Result<()> {
    let response = client.delete_employee(id).await?;
    println!("{}", response.message);
    Ok(())
}
