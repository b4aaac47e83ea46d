//! Login, logout, whoami.

use anyhow::Result;
use attend_core::{HrClient, token};

use super::read_line;

pub async fn login(client: &HrClient, email: &str) -> Result<()> {
    let password = read_line("Password: ")?;
    client.login(email, &password).await?;

    let identity = client.session().store().identity();
    match identity {
        Some(identity) => println!("Logged in as {} ({})", identity.email, identity.role),
        None => println!("Logged in"),
    }
    Ok(())
}

pub fn logout(client: &HrClient) -> Result<()> {
    if client.session().store().credential().is_none() {
        println!("Not logged in");
        return Ok(());
    }
    client.logout();
    println!("Logged out");
    Ok(())
}

pub fn whoami(client: &HrClient) -> Result<()> {
    let store = client.session().store();
    let Some(identity) = store.identity() else {
        println!("Not logged in");
        return Ok(());
    };

    println!("{} <{}>", identity.name, identity.email);
    println!("role: {}", identity.role);
    if let Some(id) = identity.employee_id {
        println!("employee id: {id}");
    }

    if let Some(claims) = store.credential().as_deref().and_then(token::decode_claims)
        && let Some(exp) = claims.exp
    {
        println!("token expires at: {exp} (epoch seconds)");
    }
    Ok(())
}
