//! Shared output formatting for query commands.

use notelookup_core::index::IndexedNote;
use notelookup_core::note::{Note, SchemaModule};
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::OutputFormat;

/// Formatted note for JSON output.
#[derive(Debug, Serialize)]
pub struct NoteOutput {
    pub id: String,
    pub fname: String,
    pub title: String,
    pub vault: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub: Option<bool>,
}

impl From<&Note> for NoteOutput {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            fname: note.fname.clone(),
            title: note.title.clone(),
            vault: note.vault.name.clone(),
            stub: Some(note.stub),
        }
    }
}

impl From<&IndexedNote> for NoteOutput {
    fn from(note: &IndexedNote) -> Self {
        Self {
            id: note.id.clone(),
            fname: note.fname.clone(),
            title: note.title.clone(),
            vault: note.vault.name.clone(),
            stub: None,
        }
    }
}

/// Row for the notes table.
#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "Fname")]
    fname: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Vault")]
    vault: String,
    #[tabled(rename = "Stub")]
    stub: String,
}

impl From<&NoteOutput> for NoteRow {
    fn from(note: &NoteOutput) -> Self {
        Self {
            fname: note.fname.clone(),
            title: truncate(&note.title, 40),
            vault: note.vault.clone(),
            stub: match note.stub {
                Some(true) => "yes".to_string(),
                Some(false) => String::new(),
                None => "-".to_string(),
            },
        }
    }
}

/// Print notes in the requested format.
pub fn print_notes(notes: &[NoteOutput], format: OutputFormat) {
    match format {
        OutputFormat::Table => print_notes_table(notes),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(notes).unwrap_or_default());
        }
        OutputFormat::Quiet => {
            for note in notes {
                println!("{}", note.fname);
            }
        }
    }
}

fn print_notes_table(notes: &[NoteOutput]) {
    if notes.is_empty() {
        println!("(no notes found)");
        return;
    }

    let rows: Vec<NoteRow> = notes.iter().map(NoteRow::from).collect();
    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!("\n-- {} notes --", rows.len());
}

/// Formatted schema module for JSON output.
#[derive(Debug, Serialize)]
pub struct SchemaOutput {
    pub root: String,
    pub fname: String,
    pub vault: String,
    pub schemas: Vec<String>,
}

impl From<&SchemaModule> for SchemaOutput {
    fn from(module: &SchemaModule) -> Self {
        Self {
            root: module.root.clone(),
            fname: module.fname.clone(),
            vault: module.vault.name.clone(),
            schemas: module.schemas.keys().cloned().collect(),
        }
    }
}

#[derive(Tabled)]
struct SchemaRow {
    #[tabled(rename = "Root")]
    root: String,
    #[tabled(rename = "Module")]
    fname: String,
    #[tabled(rename = "Vault")]
    vault: String,
    #[tabled(rename = "Schemas")]
    schemas: usize,
}

/// Print schema modules in the requested format.
pub fn print_schemas(modules: &[SchemaOutput], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if modules.is_empty() {
                println!("(no schemas found)");
                return;
            }
            let rows: Vec<SchemaRow> = modules
                .iter()
                .map(|m| SchemaRow {
                    root: m.root.clone(),
                    fname: m.fname.clone(),
                    vault: m.vault.clone(),
                    schemas: m.schemas.len(),
                })
                .collect();
            println!("{}", Table::new(&rows).with(Style::rounded()));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(modules).unwrap_or_default());
        }
        OutputFormat::Quiet => {
            for module in modules {
                println!("{}", module.fname);
            }
        }
    }
}

/// Truncate string with ellipsis if needed.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars > 3 {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_chars).collect()
    }
}
