//! Interactive text-menu client.
//!
//! Two variants share the same remote interface: [`MenuVariant::Plain`] offers
//! retrieval by topic, [`MenuVariant::Lookup`] offers the Wikipedia lookup in
//! its place.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::rpc::client::RpcClient;
use crate::store::types::now_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuVariant {
    Plain,
    Lookup,
}

impl MenuVariant {
    fn second_option(self) -> &'static str {
        match self {
            Self::Plain => "Get notes by topic",
            Self::Lookup => "Look up a topic on Wikipedia",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    AddNote,
    Second,
    Exit,
    Invalid,
}

impl Choice {
    fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Self::AddNote,
            "2" => Self::Second,
            "3" => Self::Exit,
            _ => Self::Invalid,
        }
    }
}

/// Run the menu loop until the user exits or input ends.
pub async fn run_menu<R: BufRead, W: Write>(
    client: &RpcClient,
    variant: MenuVariant,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        writeln!(out, "\nNOTEBOOK APPLICATION")?;
        writeln!(out, "1. Add a note")?;
        writeln!(out, "2. {}", variant.second_option())?;
        writeln!(out, "3. Exit")?;

        let Some(choice) = prompt(input, out, "Enter your choice (1-3): ")? else {
            writeln!(out, "\nExiting...")?;
            return Ok(());
        };

        match Choice::parse(&choice) {
            Choice::AddNote => {
                let Some(topic) = prompt(input, out, "Enter topic: ")? else { continue };
                let Some(text) = prompt(input, out, "Enter note text: ")? else { continue };
                let timestamp = now_timestamp();

                match client.add_note(&topic, &text, Some(&timestamp)).await {
                    Ok(true) => writeln!(out, "Note added successfully!")?,
                    Ok(false) => writeln!(out, "Failed to add note.")?,
                    Err(e) => writeln!(out, "Error: {e}")?,
                }
            }
            Choice::Second => match variant {
                MenuVariant::Plain => {
                    let Some(topic) = prompt(input, out, "Enter topic to retrieve: ")? else {
                        continue;
                    };
                    show_notes(client, &topic, out).await?;
                }
                MenuVariant::Lookup => {
                    let Some(term) = prompt(input, out, "Enter topic to look up: ")? else {
                        continue;
                    };
                    match client.lookup_wikipedia(&term).await {
                        Ok(true) => writeln!(out, "Wikipedia link added to topic '{term}'.")?,
                        Ok(false) => writeln!(
                            out,
                            "Failed to add Wikipedia link: topic '{term}' does not exist or already has one."
                        )?,
                        Err(e) => writeln!(out, "Error: {e}")?,
                    }
                }
            },
            Choice::Exit => {
                writeln!(out, "Exiting...")?;
                return Ok(());
            }
            Choice::Invalid => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
}

async fn show_notes<W: Write>(client: &RpcClient, topic: &str, out: &mut W) -> Result<()> {
    match client.get_notes_by_topic(topic).await {
        Ok(notes) if notes.is_empty() => writeln!(out, "No notes found for topic '{topic}'")?,
        Ok(notes) => {
            writeln!(out, "\n--- Notes for '{topic}' ---")?;
            for (i, note) in notes.iter().enumerate() {
                writeln!(out, "Note {}:", i + 1)?;
                writeln!(out, "  Text: {}", note.text)?;
                writeln!(out, "  Timestamp: {}", note.timestamp)?;
                writeln!(out)?;
            }
        }
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    Ok(())
}

/// Print `label` and read one line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
