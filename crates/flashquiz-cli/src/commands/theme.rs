//! The `flashquiz theme` command.

use std::path::PathBuf;

use anyhow::{bail, Result};

use flashquiz_client::config::load_config_from;

pub fn execute(format: String, config_path: Option<PathBuf>) -> Result<()> {
    let theme = load_config_from(config_path.as_deref())?.theme();
    match format.as_str() {
        "css" => print!("{}", theme.root_css()),
        "json" => println!("{}", serde_json::to_string_pretty(&theme)?),
        other => bail!("unknown format: {other} (expected css or json)"),
    }
    Ok(())
}
