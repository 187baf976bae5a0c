//! The `flashquiz cards` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::Table;

use flashquiz_core::icons::icon_by_class;
use flashquiz_core::selector::available_types_for;

use super::{parse_filter, signed_in_app};

pub async fn execute(
    labels: Option<String>,
    include_unlabeled: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let filter = parse_filter(labels.as_deref(), include_unlabeled)?;
    let app = signed_in_app(config_path.as_deref()).await?;
    let cards = app.api.list_cards(&filter).await?;

    if cards.is_empty() {
        println!("No cards found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Icon", "Labels", "Facts", "Keywords", "Question types"]);
    for card in &cards {
        let icon = icon_by_class(&card.icon).map_or(card.icon.as_str(), |i| i.name);
        let labels: Vec<&str> = card.labels.iter().map(|l| l.name.as_str()).collect();
        let types: Vec<&str> = available_types_for(card)
            .into_iter()
            .map(|t| t.identifier())
            .collect();
        table.add_row(vec![
            card.id.to_string(),
            card.title.clone(),
            icon.to_string(),
            labels.join(", "),
            card.quick_facts.len().to_string(),
            card.keywords.len().to_string(),
            types.join(", "),
        ]);
    }
    println!("{table}");
    println!("{} card(s)", cards.len());
    Ok(())
}
