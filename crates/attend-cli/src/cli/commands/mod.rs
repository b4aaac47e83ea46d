//! Command handlers.

pub mod admin;
pub mod attendance;
pub mod auth;
pub mod employees;
pub mod payslips;
pub mod profile;
pub mod status;

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use attend_core::HrClient;

/// Prompts on stderr and reads one line from stdin (passwords and other
/// values that must not land in shell history).
pub(crate) fn read_line(prompt: &str) -> Result<String> {
    eprint!("{prompt}");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read from stdin")?;

    let value = line.trim().to_string();
    if value.is_empty() {
        bail!("Empty input");
    }
    Ok(value)
}

/// The caller's own employee id, for commands that default to it.
pub(crate) fn own_employee_id(client: &HrClient) -> Result<i64> {
    client
        .session()
        .store()
        .identity()
        .and_then(|identity| identity.employee_id)
        .context("No employee id on this account; pass --employee")
}
