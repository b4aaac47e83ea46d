//! Own-profile commands.

use anyhow::Result;
use attend_core::HrClient;
use attend_core::types::ProfileUpdate;

use super::read_line;

pub async fn show(client: &HrClient) -> Result<()> {
    let profile = client.profile().await?;
    println!("{} <{}>", profile.full_name, profile.email);
    println!("role: {}", profile.role);
    println!("employee id: {}", profile.employee_id);
    Ok(())
}

pub async fn update(client: &HrClient, name: Option<String>, email: Option<String>) -> Result<()> {
    let response = client
        .update_profile(&ProfileUpdate {
            full_name: name,
            email,
        })
        .await?;
    println!("{}", response.message);
    Ok(())
}

pub async fn change_password(client: &HrClient) -> Result<()> {
    let current = read_line("Current password: ")?;
    let new = read_line("New password: ")?;
    let response = client.change_password(&current, &new).await?;
    println!("{}", response.message);
    Ok(())
}
