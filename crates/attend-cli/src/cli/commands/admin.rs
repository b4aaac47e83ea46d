//! Admin commands.

use anyhow::Result;
use attend_core::HrClient;

use super::read_line;

pub async fn summary(client: &HrClient) -> Result<()> {
    let summary = client.admin_summary().await?;
    println!("employees: {}", summary.employee_count);
    println!("active: {}", summary.active_employee_count);
    println!("present today: {}", summary.today_attendance_count);
    println!("late today: {}", summary.late_count);
    Ok(())
}

pub async fn reset_password(client: &HrClient, email: &str) -> Result<()> {
    let new_password = read_line("New password: ")?;
    let response = client.reset_password(email, &new_password).await?;
    println!("{}", response.message);
    Ok(())
}
