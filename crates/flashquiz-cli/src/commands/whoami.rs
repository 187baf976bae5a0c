//! The `flashquiz whoami` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::signed_in_app;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let app = signed_in_app(config_path.as_deref()).await?;
    let user = app
        .session
        .current_user()
        .context("session has no user after sign-in")?;
    if user.email.is_empty() {
        println!("{} (id {})", user.username, user.id);
    } else {
        println!("{} <{}> (id {})", user.username, user.email, user.id);
    }
    Ok(())
}
