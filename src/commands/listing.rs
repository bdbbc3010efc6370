//! Terminal rendering of wardrobe state
//!
//! Tables for the available items and the laundry basket, the lookbook shown
//! after each answer, and the JSON shape printed by `ask --json`.

use crate::error::Result;
use crate::stylist::{ChatReply, ConfirmOutcome, ImageRecord, ItemId, Role, Session, UploadReport};

use colored::Colorize;
use prettytable::{format, row, Table};
use serde::Serialize;

/// One recommended item, as printed by `ask --json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Number the stylist used for the item (1-based)
    pub index: usize,
    /// Item identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
}

/// Machine-readable answer to a one-shot question
#[derive(Debug, Clone, Serialize)]
pub struct AskOutput {
    /// Raw stylist answer
    pub response: String,
    /// Items the stylist recommended, in citation order
    pub recommendations: Vec<Recommendation>,
}

/// Pairs each recommended identifier with its number and display name
///
/// # Errors
///
/// Returns `WardrobeError::UnknownItem` if a recommendation is not registered
pub fn recommendations(session: &Session, reply: &ChatReply) -> Result<Vec<Recommendation>> {
    reply
        .recommendations
        .iter()
        .zip(&reply.indices)
        .map(|(id, &index)| {
            Ok(Recommendation {
                index,
                id: *id,
                name: session.item(id)?.name.clone(),
            })
        })
        .collect()
}

/// Builds the JSON output for `ask --json`
pub fn ask_output(session: &Session, reply: &ChatReply) -> Result<AskOutput> {
    Ok(AskOutput {
        response: reply.text.clone(),
        recommendations: recommendations(session, reply)?,
    })
}

fn human_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < KIB * KIB {
        format!("{:.1} KB", bytes / KIB)
    } else {
        format!("{:.1} MB", bytes / (KIB * KIB))
    }
}

/// Table of items; `numbered` adds the 1-based column the stylist refers to
pub fn items_table(items: &[&ImageRecord], numbered: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    if numbered {
        table.set_titles(row!["#".bold(), "Name".bold(), "Format".bold(), "Size".bold(), "ID".bold()]);
    } else {
        table.set_titles(row!["Name".bold(), "Format".bold(), "Size".bold(), "ID".bold()]);
    }

    for (pos, item) in items.iter().enumerate() {
        let size = format!("{} ({}x{})", human_size(item.size()), item.width, item.height);
        let id_short = item.id.short();
        if numbered {
            let number = pos + 1;
            table.add_row(row![number, item.name, item.format, size, id_short.cyan()]);
        } else {
            table.add_row(row![item.name, item.format, size, id_short.cyan()]);
        }
    }

    table
}

/// Prints the available items with the numbers the stylist uses
pub fn print_items(session: &Session) {
    let available = session.available();
    if available.is_empty() {
        if session.total_items() == 0 {
            println!("{}", "No clothes uploaded yet. Try /upload <path>.".yellow());
        } else {
            println!(
                "{}",
                "Everything is in the laundry basket. Use /clear to bring it back.".yellow()
            );
        }
        return;
    }

    println!("\nYour Wardrobe ({} available):", available.len());
    items_table(&available, true).printstd();
    println!();
}

/// Prints the laundry basket
pub fn print_basket(session: &Session) {
    let items = session.basket_items();
    if items.is_empty() {
        println!("{}", "No items in the laundry basket.".yellow());
        return;
    }

    println!("\nLaundry Basket ({} items):", items.len());
    items_table(&items, false).printstd();
    println!();
    println!("Use {} to return everything to your wardrobe.", "/clear".cyan());
    println!();
}

/// Prints the answer followed by the recommended items
pub fn print_reply(session: &Session, reply: &ChatReply) {
    println!("\n{}\n", reply.text);

    if reply.recommendations.is_empty() {
        return;
    }

    println!("{}", "Your Lookbook Recommendations".bold().magenta());
    for (id, index) in reply.recommendations.iter().zip(&reply.indices) {
        let name = session
            .item(id)
            .map(|record| record.name.as_str())
            .unwrap_or("<unknown>");
        println!("  {} {}", format!("{}.", index).cyan(), name);
    }
    println!(
        "\nWore any of these? Type {} to move them to the laundry basket.\n",
        "/confirm".cyan()
    );
}

/// Prints the result of a batch upload
pub fn print_upload_report(session: &Session, report: &UploadReport) {
    for id in &report.accepted {
        if let Ok(record) = session.item(id) {
            println!("{}", format!("Uploaded {}", record.name).green());
        }
    }
    for (path, reason) in &report.rejected {
        eprintln!("{}", format!("Skipped {}: {}", path, reason).red());
    }
    println!(
        "{} items in your wardrobe, {} available\n",
        session.total_items(),
        session.available().len()
    );
}

/// Prints the outcome of `/confirm`
pub fn print_confirm_outcome(session: &Session, outcome: &ConfirmOutcome) {
    match outcome {
        ConfirmOutcome::NothingPending => {
            println!(
                "{}",
                "Nothing to confirm yet. Ask the stylist for a recommendation first.".yellow()
            );
        }
        ConfirmOutcome::Confirmed {
            added,
            already_present,
        } => {
            for id in added {
                if let Ok(record) = session.item(id) {
                    println!("{}", format!("Moved {} to the laundry basket", record.name).green());
                }
            }
            for id in already_present {
                if let Ok(record) = session.item(id) {
                    println!("{} is already in the basket", record.name);
                }
            }
            println!();
        }
    }
}

/// Prints the conversation so far
pub fn print_history(session: &Session) {
    let history = session.history();
    if history.is_empty() {
        println!("{}", "No messages yet.".yellow());
        return;
    }

    println!();
    for turn in history {
        let label = match turn.role {
            Role::User => turn.role.label().bold().blue(),
            Role::Assistant => turn.role.label().bold().magenta(),
        };
        println!("{}: {}", label, turn.text);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{png_bytes, ScriptedProvider};

    const LIMIT: usize = 1024 * 1024;

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_items_table_rows() {
        let mut session = Session::new();
        session.upload_bytes("tee.png", png_bytes(2, 2), LIMIT).unwrap();
        session.upload_bytes("cap.png", png_bytes(2, 2), LIMIT).unwrap();

        let table = items_table(&session.available(), true);
        assert_eq!(table.len(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("tee.png"));
        assert!(rendered.contains("cap.png"));
    }

    #[tokio::test]
    async fn test_ask_output_json_shape() {
        let mut session = Session::new();
        session.upload_bytes("tee.png", png_bytes(2, 2), LIMIT).unwrap();
        let cap = session.upload_bytes("cap.png", png_bytes(2, 2), LIMIT).unwrap();
        let provider = ScriptedProvider::new(vec!["Rock number 2!"]);

        let reply = session.ask(&provider, "hat?").await.unwrap();
        let output = ask_output(&session, &reply).unwrap();
        let json = serde_json::to_value(&output).unwrap();

        assert_eq!(json["response"], "Rock number 2!");
        assert_eq!(json["recommendations"][0]["index"], 2);
        assert_eq!(json["recommendations"][0]["name"], "cap.png");
        assert_eq!(json["recommendations"][0]["id"], cap.to_string());
    }

    #[test]
    fn test_recommendations_unknown_item_is_error() {
        let session = Session::new();
        let reply = ChatReply {
            text: "1".to_string(),
            recommendations: vec![ItemId::new()],
            indices: vec![1],
        };
        assert!(recommendations(&session, &reply).is_err());
    }
}
