use anyhow::{Context, Result};
use backstage_core::model::{Contact, Task, TaskPatch};
use backstage_core::summary::{filter_tasks, search_contacts, TaskFilter};
use backstage_core::{parse_fields, parse_patch, Collection, OrderBy, RecordId};
use backstage_store::RecordStore;

use super::{parse_json_arg, print_json};

/// Operations shared by every collection.
#[derive(Debug, clap::Subcommand)]
pub enum RecordAction {
    /// List records (default order depends on the collection)
    List {
        /// Column to order by
        #[arg(long)]
        order: Option<String>,

        /// Descending instead of ascending
        #[arg(long, requires = "order")]
        desc: bool,
    },
    /// Show one record
    Show { id: String },
    /// Add a record from a JSON object of fields
    ///
    /// Example: backstage gigs add '{"venue": "The Loft", "date": "2025-06-01"}'
    Add { fields: String },
    /// Change some fields of a record; `null` clears an optional field
    ///
    /// Example: backstage gigs edit 42 '{"status": "Confirmed"}'
    Edit { id: String, patch: String },
    /// Delete a record
    Rm { id: String },
}

fn order_by(column: Option<String>, desc: bool) -> Option<OrderBy> {
    column.map(|column| {
        if desc {
            OrderBy::desc(column)
        } else {
            OrderBy::asc(column)
        }
    })
}

pub async fn run<C: Collection>(store: &RecordStore<C>, action: RecordAction) -> Result<()> {
    match action {
        RecordAction::List { order, desc } => {
            let records = match order_by(order, desc) {
                Some(order) => store.list_by(order).await?,
                None => store.list().await?,
            };
            log::debug!("Listed {} {}", records.len(), C::NAME);
            print_json(&records)
        }
        RecordAction::Show { id } => print_json(&store.get(&RecordId::new(id)).await?),
        RecordAction::Add { fields } => {
            let fields: C = parse_fields(parse_json_arg(&fields)?)?;
            let record = store.create(fields).await?;
            print_json(&record)
        }
        RecordAction::Edit { id, patch } => {
            let patch = parse_patch::<C>(parse_json_arg(&patch)?)?;
            let record = store.update(&RecordId::new(id), patch).await?;
            print_json(&record)
        }
        RecordAction::Rm { id } => {
            store.delete(&RecordId::new(id.clone())).await?;
            println!("✓ Deleted {} {id}", C::NAME);
            Ok(())
        }
    }
}

/// Task board: all tasks, one status column, or one category.
pub async fn board(store: &RecordStore<Task>, filter: &str) -> Result<()> {
    let filter = TaskFilter::parse(filter).with_context(|| {
        format!("Unknown board filter: {filter}\n\nUse All, a task status, or a task category")
    })?;
    let tasks = store.list().await?;
    print_json(&filter_tasks(&tasks, filter))
}

pub async fn toggle(store: &RecordStore<Task>, id: &str) -> Result<()> {
    let id = RecordId::new(id);
    let task = store.get(&id).await?;
    let record = store.update(&id, TaskPatch::toggle(&task.fields)).await?;
    println!("✓ {}: {}", record.fields.title, record.fields.status);
    Ok(())
}

pub async fn search(store: &RecordStore<Contact>, needle: &str) -> Result<()> {
    let contacts = store.list().await?;
    print_json(&search_contacts(&contacts, needle))
}
