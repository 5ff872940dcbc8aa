//! `supportdesk config`: print the effective configuration.

use anyhow::Result;
use console::style;
use supportdesk_infra::filesystem::config_path;

use crate::state::AppState;

/// Print the merged configuration (file values over defaults) as TOML or JSON.
pub fn show_config(state: &AppState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state.config.as_ref())?);
        return Ok(());
    }

    let path = config_path(&state.data_dir);
    let source = if path.exists() {
        format!("{}", path.display())
    } else {
        format!("{} (not found, defaults)", path.display())
    };

    println!("# {}", style(source).dim());
    println!("{}", toml::to_string_pretty(state.config.as_ref())?);

    Ok(())
}
