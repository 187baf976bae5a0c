//! The `flashquiz routes` command.

use anyhow::Result;

use flashquiz_core::routes::{Access, ROUTES};

pub fn execute() -> Result<()> {
    for route in ROUTES {
        let access = match route.access {
            Access::RequiresAuth => "auth",
            Access::RequiresGuest => "guest",
        };
        println!("{:<14} {:<18} {access}", route.name, route.path);
    }
    Ok(())
}
