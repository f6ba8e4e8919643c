//! CLI `show` command — print one topic straight from the document.

use std::io::Write;

use anyhow::Result;

use notebook::config::NotebookConfig;

pub fn show(config: &NotebookConfig, topic: &str, out: &mut impl Write) -> Result<()> {
    let Some(store) = super::open_existing(config, out)? else {
        return Ok(());
    };

    let Some(entry) = store.topic(topic)? else {
        writeln!(out, "No notes found for topic '{topic}'")?;
        return Ok(());
    };

    writeln!(out, "--- Notes for '{}' ---", entry.name)?;
    for (i, note) in entry.notes.iter().enumerate() {
        writeln!(out, "Note {}:", i + 1)?;
        writeln!(out, "  Text: {}", note.text)?;
        writeln!(out, "  Timestamp: {}", note.timestamp)?;
        writeln!(out)?;
    }
    if entry.notes.is_empty() {
        writeln!(out, "(no notes)")?;
    }

    match entry.reference {
        Some(reference) => writeln!(out, "Wikipedia: {} <{}>", reference.title, reference.url)?,
        None => writeln!(out, "Wikipedia: (not linked)")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::testing::config_for;
    use notebook::store::NoteStore;
    use tempfile::TempDir;

    fn run(config: &NotebookConfig, topic: &str) -> String {
        let mut out = Vec::new();
        show(config, topic, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn linked_topic_lists_notes_and_link() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.xml");
        let store = NoteStore::open(&path).unwrap();
        store.add_note("cooking", "preheat oven", Some("01.01.2024 09:00:00")).unwrap();
        store.add_note("cooking", "boil eggs", Some("01.01.2024 10:00:00")).unwrap();
        store
            .attach_reference("cooking", "Cooking", "https://en.wikipedia.org/wiki/Cooking")
            .unwrap();
        drop(store);

        let output = run(&config_for(&path), "cooking");
        let expected = [
            "--- Notes for 'cooking' ---",
            "Note 1:",
            "  Text: preheat oven",
            "  Timestamp: 01.01.2024 09:00:00",
            "",
            "Note 2:",
            "  Text: boil eggs",
            "  Timestamp: 01.01.2024 10:00:00",
            "",
            "Wikipedia: Cooking <https://en.wikipedia.org/wiki/Cooking>",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn missing_topic() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.xml");
        NoteStore::open(&path).unwrap().add_note("a", "x", None).unwrap();

        assert_eq!(
            run(&config_for(&path), "b"),
            "No notes found for topic 'b'\n"
        );
    }

    #[test]
    fn topic_without_notes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.xml");
        std::fs::write(&path, r#"<notes><topic name="empty"/></notes>"#).unwrap();

        assert_eq!(
            run(&config_for(&path), "empty"),
            "--- Notes for 'empty' ---\n(no notes)\nWikipedia: (not linked)\n"
        );
    }

    #[test]
    fn missing_document_is_reported_and_not_created() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.xml");

        let output = run(&config_for(&path), "anything");
        assert!(output.starts_with(&format!("Notebook: not found at {}", path.display())));
        assert!(!path.exists());
    }
}
