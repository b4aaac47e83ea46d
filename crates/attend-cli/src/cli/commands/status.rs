//! Backend health and clock.

use anyhow::Result;
use attend_core::HrClient;

pub async fn health(client: &HrClient) -> Result<()> {
    let health = client.health().await?;
    match health.database.as_deref() {
        Some(database) => println!("status: {} (database: {database})", health.status),
        None => println!("status: {}", health.status),
    }
    Ok(())
}

pub async fn time(client: &HrClient) -> Result<()> {
    let time = client.server_time().await?;
    println!("{} ({})", time.iso, time.timezone);
    println!("epoch ms: {}", time.epoch_ms);
    println!("utc offset minutes: {}", time.offset_minutes);
    Ok(())
}
