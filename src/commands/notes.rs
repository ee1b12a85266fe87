// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Note;
use crate::store::{NewNote, Store};
use crate::utils::{json_flags, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let note = NewNote {
                title: sub.get_one::<String>("title").unwrap().to_string(),
                content: sub.get_one::<String>("content").cloned().unwrap_or_default(),
                tags: tags_arg(sub),
            };
            let id = store.add_note(&note)?;
            println!("Added note #{}", id);
        }
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("archive", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let archived = store.toggle_archive(id)?;
            if archived {
                println!("Archived note #{}", id);
            } else {
                println!("Restored note #{}", id);
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            store.delete_note(id)?;
            println!("Removed note #{}", id);
        }
        _ => {}
    }
    Ok(())
}

fn tags_arg(sub: &clap::ArgMatches) -> Vec<String> {
    sub.get_many::<String>("tag")
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default()
}

/// Unset fields keep their stored value; `--tag` adds to the existing tags
/// unless `--clear-tags` is given.
fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let current = store.note(id)?;
    let mut tags = if sub.get_flag("clear-tags") {
        Vec::new()
    } else {
        current.tags
    };
    tags.extend(tags_arg(sub));
    let note = NewNote {
        title: sub
            .get_one::<String>("title")
            .cloned()
            .unwrap_or(current.title),
        content: sub
            .get_one::<String>("content")
            .cloned()
            .unwrap_or(current.content),
        tags,
    };
    store.update_note(id, &note)?;
    println!("Updated note #{}", id);
    Ok(())
}

/// Notes on the chosen shelf (archived or active) matching `search`.
pub fn filter_notes(notes: Vec<Note>, search: &str, archived: bool) -> Vec<Note> {
    notes
        .into_iter()
        .filter(|n| n.is_archived == archived && n.matches(search))
        .collect()
}

fn list(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let search = sub.get_one::<String>("search").map(String::as_str).unwrap_or("");
    let archived = sub.get_flag("archived");
    let all = store.notes()?;
    let active_count = all.iter().filter(|n| !n.is_archived).count();
    let archived_count = all.len() - active_count;
    let data = filter_notes(all, search, archived);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|n| {
            vec![
                n.id.to_string(),
                n.title.clone(),
                n.content.lines().next().unwrap_or("").to_string(),
                n.tags.join(", "),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Title", "Content", "Tags"], rows));
    println!("Active: {} | Archived: {}", active_count, archived_count);
    Ok(())
}
