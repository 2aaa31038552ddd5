use anyhow::Result;
use backstage_store::NoteStore;

use super::print_json;

pub async fn list(notes: &NoteStore) -> Result<()> {
    print_json(&notes.list().await?)
}

/// Print the content stored under `key`, or say there is none.
pub async fn get(notes: &NoteStore, key: &str) -> Result<()> {
    match notes.get(key).await? {
        Some(note) => println!("{}", note.fields.content),
        None => println!("No note stored under {key:?}"),
    }
    Ok(())
}

pub async fn set(notes: &NoteStore, key: &str, content: String) -> Result<()> {
    let note = notes.upsert_by_key(key, content).await?;
    println!("✓ Saved note {:?} ({})", note.fields.key, note.id);
    Ok(())
}
