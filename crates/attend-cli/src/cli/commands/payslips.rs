//! Payslip commands.

use anyhow::Result;
use attend_core::HrClient;
use attend_core::types::PayslipQuery;
use comfy_table::Table;

pub async fn list(
    client: &HrClient,
    month: Option<String>,
    employee: Option<i64>,
    status: Option<String>,
) -> Result<()> {
    let payslips = client
        .payslips(&PayslipQuery {
            month,
            employee_id: employee,
            status,
        })
        .await?;

    let mut table = Table::new();
    table.set_header(["ID", "Employee", "Period", "Present", "Payable", "Status"]);
    for payslip in payslips {
        table.add_row([
            payslip.payslip_id.to_string(),
            payslip.employee_id.to_string(),
            format!("{} - {}", payslip.pay_period_start, payslip.pay_period_end),
            payslip
                .days_present
                .map(|d| d.to_string())
                .unwrap_or_default(),
            payslip
                .payable_salary
                .map(|p| format!("{p:.2}"))
                .unwrap_or_default(),
            payslip.status.unwrap_or_default(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn generate(client: &HrClient, month: &str, employee: Option<i64>) -> Result<()> {
    let generated = client.generate_payslips(month, employee).await?;
    println!(
        "{} for {} ({} payslips)",
        generated.message,
        generated.month,
        generated.payslip_ids.len()
    );
    Ok(())
}

pub async fn set_status(client: &HrClient, id: i64, status: &str) -> Result<()> {
    let response = client.set_payslip_status(id, status).await?;
    println!("{}", response.message);
    Ok(())
}

pub fn export_url(client: &HrClient, id: i64, format: &str) -> Result<()> {
    let url = client.payslip_export_url(id, format)?;
    println!("{url}");
    Ok(())
}
