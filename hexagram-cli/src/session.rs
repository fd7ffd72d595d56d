//! Session commands - login, refresh, logout, whoami
//!
//! ## Architecture
//!
//! - Level 1: login(), refresh(), logout(), whoami() - orchestration
//! - Level 2: (delegated to hexagram-client)
//! - Level 3: describe_bundle() - formatting

use anyhow::Result;
use clap::Args;

use hexagram_core::TokenBundle;

use crate::context::{block_on, connect, format_millis, GlobalArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct LoginArgs {
    /// Player name
    pub name: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn login(global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    let client = connect(global)?;
    let bundle = block_on(client.add_user(&args.name))??;
    println!("Logged in. {}", describe_bundle(&bundle));
    Ok(())
}

pub fn refresh(global: &GlobalArgs) -> Result<()> {
    let client = connect(global)?;
    match block_on(client.refresh_token())? {
        Ok(bundle) => {
            println!("Token refreshed. {}", describe_bundle(&bundle));
            Ok(())
        }
        Err(e) => {
            println!("Refresh failed, you have been logged out");
            Err(e.into())
        }
    }
}

pub fn logout(global: &GlobalArgs) -> Result<()> {
    let client = connect(global)?;
    client.logout()?;
    println!("Logged out");
    Ok(())
}

pub fn whoami(global: &GlobalArgs) -> Result<()> {
    let client = connect(global)?;
    match client.session().bundle() {
        Some(bundle) => println!("{}", describe_bundle(&bundle)),
        None => println!("Not logged in"),
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - FORMATTING
// ============================================================================

fn describe_bundle(bundle: &TokenBundle) -> String {
    format!(
        "{} (id {}), token issued {}",
        bundle.user_name,
        bundle.user_id,
        format_millis(bundle.created_at)
    )
}
