pub mod cards;
pub mod icons;
pub mod init;
pub mod labels;
pub mod quiz;
pub mod routes;
pub mod theme;
pub mod types;
pub mod whoami;

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use flashquiz_client::config::load_config_from;
use flashquiz_client::App;
use flashquiz_core::model::CardFilter;

/// Build a card filter from `--labels 1,2` and `--include-unlabeled`.
pub fn parse_filter(labels: Option<&str>, include_unlabeled: bool) -> Result<CardFilter> {
    let mut label_ids = Vec::new();
    if let Some(labels) = labels {
        for part in labels.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = part
                .parse::<i64>()
                .with_context(|| format!("invalid label id: {part}"))?;
            label_ids.push(id);
        }
    }
    Ok(CardFilter {
        label_ids,
        include_unlabeled,
    })
}

/// Load config, connect and log in.
pub async fn signed_in_app(config_path: Option<&Path>) -> Result<App> {
    let config = load_config_from(config_path)?;
    let app = App::new(config).context("failed to create client")?;
    if !app.sign_in().await {
        bail!(
            "not logged in to {}: set username and password in flashquiz.toml \
             or FLASHQUIZ_USERNAME / FLASHQUIZ_PASSWORD",
            app.config.base_url
        );
    }
    if let Some(user) = app.session.current_user() {
        info!(user = %user.username, "signed in");
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_from_args() {
        let filter = parse_filter(Some("1, 2,"), true).unwrap();
        assert_eq!(filter.label_ids, vec![1, 2]);
        assert!(filter.include_unlabeled);
        assert_eq!(parse_filter(None, false).unwrap(), CardFilter::default());
    }

    #[test]
    fn bad_label_id() {
        let err = parse_filter(Some("1,x"), false).unwrap_err();
        assert!(err.to_string().contains("invalid label id: x"));
    }
}
