//! System status command.

use anyhow::Result;
use console::style;
use supportdesk_core::chat::repository::ConversationRepository;
use supportdesk_infra::llm::test_provider_connection;
use supportdesk_infra::secret::resolve_api_key;

use crate::state::AppState;

/// Display data dir, provider, credential presence, and store counts.
///
/// With `check`, also sends a minimal completion request to the provider.
pub async fn status(state: &AppState, check: bool, json: bool) -> Result<()> {
    let repo = state.chat_service.repo();
    let conversations = repo.count_conversations().await?;
    let messages = repo.count_messages().await?;

    let provider = &state.config.provider;
    let key_env = provider.resolved_api_key_env();
    let key_present = resolve_api_key(key_env).is_some();

    let connection = match (check, state.chat_service.provider()) {
        (true, Some(p)) => Some(test_provider_connection(p).await.map_err(|e| e.to_string())),
        _ => None,
    };

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "provider": {
                "kind": provider.kind.to_string(),
                "base_url": provider.resolved_base_url(),
                "model": provider.model,
                "api_key_env": key_env,
                "api_key_present": key_present,
                "connection": connection.as_ref().map(|r| match r {
                    Ok(()) => "ok".to_string(),
                    Err(e) => e.clone(),
                }),
            },
            "conversations": conversations,
            "messages": messages,
            "history_window": state.config.history_window,
            "completion_failure": state.config.completion_failure.to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };

    println!();
    println!(
        "  {} Supportdesk v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Provider ──").dim());
    println!("  Kind:     {}", style(provider.kind).bold());
    println!(
        "  Base URL: {}",
        provider.resolved_base_url().unwrap_or("(not set)")
    );
    println!("  Model:    {}", provider.model);
    println!("  {} {} set", check_mark(key_present), key_env);
    match &connection {
        Some(Ok(())) => println!("  {} Connection ok", check_mark(true)),
        Some(Err(e)) => println!("  {} Connection failed: {e}", check_mark(false)),
        None => {}
    }
    println!();

    println!("  {}", style("── Conversations ──").dim());
    println!("  Conversations: {}", style(conversations).bold());
    println!("  Messages:      {}", style(messages).bold());
    println!(
        "  Window:        {} turns, on failure: {}",
        state.config.history_window, state.config.completion_failure
    );
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
