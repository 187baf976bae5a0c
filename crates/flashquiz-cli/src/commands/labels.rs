//! The `flashquiz labels` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use super::signed_in_app;

pub async fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let app = signed_in_app(config_path.as_deref()).await?;
    let labels = app.api.list_labels().await?;

    if labels.is_empty() {
        println!("No labels found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Color", "Owner", "Shared with"]);
    for label in &labels {
        let owner = match (label.is_owner, &label.owner_username) {
            (Some(true), _) => "you".to_string(),
            (_, Some(name)) => name.clone(),
            _ => String::new(),
        };
        table.add_row(vec![
            label.id.to_string(),
            label.name.clone(),
            label.color.clone(),
            owner,
            label
                .shared_with_usernames
                .as_deref()
                .unwrap_or_default()
                .join(", "),
        ]);
    }
    println!("{table}");
    Ok(())
}
