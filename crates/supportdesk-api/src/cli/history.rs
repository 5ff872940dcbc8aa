//! `supportdesk history <id>`: print a conversation as a table.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use supportdesk_core::chat::repository::ConversationRepository;
use supportdesk_core::chat::service::parse_session_id;
use supportdesk_types::chat::{HistoryEntry, SenderRole};

use crate::state::AppState;

/// Show every turn of a conversation, oldest first.
///
/// # Examples
///
/// ```bash
/// supportdesk history 0190a4b2-...
/// supportdesk history 0190a4b2-... --json
/// ```
pub async fn show_history(state: &AppState, session_id: &str, json: bool) -> Result<()> {
    let Some(id) = parse_session_id(Some(session_id))? else {
        bail!("session id is required");
    };

    let messages = state.chat_service.repo().get_messages(&id).await?;

    if json {
        let entries: Vec<HistoryEntry> = messages.into_iter().map(HistoryEntry::from).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages for session {}",
            style("i").blue().bold(),
            style(session_id).cyan()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Time").fg(Color::White),
        Cell::new("Sender").fg(Color::White),
        Cell::new("Text").fg(Color::White),
    ]);

    for message in &messages {
        let sender_cell = match message.sender {
            SenderRole::User => Cell::new("user").fg(Color::Green),
            SenderRole::Assistant => Cell::new("assistant").fg(Color::Cyan),
        };

        table.add_row(vec![
            Cell::new(message.id.to_string()).fg(Color::DarkGrey),
            Cell::new(message.created_at.format("%Y-%m-%d %H:%M:%S").to_string())
                .fg(Color::DarkGrey),
            sender_cell,
            Cell::new(&message.text),
        ]);
    }

    println!();
    println!("  Session {}", style(session_id).cyan().bold());
    println!();
    println!("{table}");
    println!();
    println!(
        "  {} message{}",
        style(messages.len()).bold(),
        if messages.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
