//! The `flashquiz icons` command.

use anyhow::Result;

use flashquiz_core::icons::ICON_OPTIONS;

pub fn execute() -> Result<()> {
    for icon in ICON_OPTIONS {
        println!("{:<15} {}", icon.name, icon.class);
    }
    Ok(())
}
