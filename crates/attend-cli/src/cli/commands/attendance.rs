//! Attendance commands.

use anyhow::Result;
use attend_core::HrClient;
use attend_core::types::AttendanceQuery;
use comfy_table::Table;

use super::own_employee_id;

pub async fn show(
    client: &HrClient,
    employee: Option<i64>,
    from: Option<String>,
    to: Option<String>,
    limit: Option<u32>,
    offset: Option<u32>,
) -> Result<()> {
    let employee_id = match employee {
        Some(id) => id,
        None => own_employee_id(client)?,
    };
    let records = client
        .attendance(
            employee_id,
            &AttendanceQuery {
                from,
                to,
                limit,
                offset,
            },
        )
        .await?;

    let mut table = Table::new();
    table.set_header(["Date", "Clock in", "Clock out", "Notes"]);
    for record in records {
        table.add_row([
            record.attendance_date,
            record.clock_in_time.unwrap_or_default(),
            record.clock_out_time.unwrap_or_default(),
            record.notes.unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn check_in(client: &HrClient, employee: Option<i64>) -> Result<()> {
    let employee_id = match employee {
        Some(id) => id,
        None => own_employee_id(client)?,
    };
    let response = client.check_in(employee_id).await?;
    println!("{}", response.message);
    Ok(())
}

pub async fn check_out(client: &HrClient, employee: Option<i64>) -> Result<()> {
    let employee_id = match employee {
        Some(id) => id,
        None => own_employee_id(client)?,
    };
    let response = client.check_out(employee_id).await?;
    println!("{}", response.message);
    Ok(())
}
