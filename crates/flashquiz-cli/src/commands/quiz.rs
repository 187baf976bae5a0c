//! The `flashquiz quiz` command.

use std::path::PathBuf;

use anyhow::{bail, Result};
use comfy_table::Table;

use flashquiz_client::InMemoryRepository;
use flashquiz_core::quiz::{plan_quiz, QuizPlan};
use flashquiz_core::selector::SeededSource;
use flashquiz_core::traits::CardRepository;

use super::{parse_filter, signed_in_app};

pub async fn execute(
    labels: Option<String>,
    include_unlabeled: bool,
    seed: Option<u64>,
    deck: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    if format != "text" && format != "json" {
        bail!("unknown format: {format} (expected text or json)");
    }
    let filter = parse_filter(labels.as_deref(), include_unlabeled)?;
    let mut source = SeededSource::new(seed.unwrap_or_else(rand::random));

    let plan = match deck {
        Some(path) => {
            let repo = InMemoryRepository::from_json_file(&path)?;
            plan_quiz(&repo, &filter, &mut source).await?
        }
        None => {
            let app = signed_in_app(config_path.as_deref()).await?;
            let repo: &dyn CardRepository = &app.api;
            plan_quiz(repo, &filter, &mut source).await?
        }
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(())
}

fn print_plan(plan: &QuizPlan) {
    println!("Quiz {} ({} questions)", plan.id, plan.items.len());
    if !plan.label_names.is_empty() {
        println!("Labels: {}", plan.label_names.join(", "));
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Card", "Question", "View"]);
    for (i, item) in plan.items.iter().enumerate() {
        let descriptor = item.question_type.descriptor();
        table.add_row(vec![
            (i + 1).to_string(),
            item.card.title.clone(),
            descriptor.display_name.to_string(),
            descriptor.view.name().to_string(),
        ]);
    }
    println!("{table}");
}
