//! The `flashquiz types` command.

use anyhow::Result;
use comfy_table::Table;

use flashquiz_core::question::registry;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Type", "Name", "All cards", "View", "Wrong-answer view"]);
    for desc in registry() {
        table.add_row(vec![
            desc.kind.identifier().to_string(),
            desc.display_name.to_string(),
            if desc.requires_all_cards { "yes" } else { "no" }.to_string(),
            desc.view.name().to_string(),
            desc.wrong_answer_view.name().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
