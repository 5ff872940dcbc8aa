//! `supportdesk send`: run one support turn from the terminal.

use anyhow::Result;
use console::style;
use supportdesk_types::chat::SendMessageRequest;

use crate::state::AppState;

/// Send `message` through the same orchestrator the HTTP endpoint uses.
pub async fn send(
    state: &AppState,
    message: String,
    session: Option<String>,
    json: bool,
) -> Result<()> {
    let reply = state
        .chat_service
        .handle_message(SendMessageRequest::new(message, session))
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("Agent:").cyan().bold(), reply.reply);
    println!();
    println!(
        "  {} {}",
        style("session").dim(),
        style(&reply.session_id).dim()
    );
    println!(
        "  {}",
        style(format!(
            "Continue with: supportdesk send \"...\" --session {}",
            reply.session_id
        ))
        .dim()
    );
    println!();

    Ok(())
}
