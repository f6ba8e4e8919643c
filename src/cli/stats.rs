use std::io::Write;

use anyhow::Result;

use notebook::config::NotebookConfig;

/// Display document statistics in the terminal.
pub fn stats(config: &NotebookConfig, out: &mut impl Write) -> Result<()> {
    let Some(store) = super::open_existing(config, out)? else {
        return Ok(());
    };

    let doc = store.snapshot()?;
    let file_size = std::fs::metadata(store.path())
        .map(|m| m.len())
        .unwrap_or(0);

    writeln!(out, "Notebook Statistics")?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "  Document:            {}", store.path().display())?;
    writeln!(out, "  File size:           {}", format_bytes(file_size))?;
    writeln!(out, "  Topics:              {}", doc.topics.len())?;
    writeln!(out, "  Notes:               {}", doc.note_count())?;
    writeln!(out, "  Wikipedia links:     {}", doc.reference_count())?;
    writeln!(out)?;

    if !doc.topics.is_empty() {
        writeln!(out, "By Topic:")?;
        for topic in &doc.topics {
            let marker = if topic.reference.is_some() { " (linked)" } else { "" };
            writeln!(out, "  {:<24} {}{}", topic.name, topic.notes.len(), marker)?;
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
