// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::commands::notes::filter_notes;
use dompet::config;
use dompet::db::init_schema;
use dompet::error::Error;
use dompet::store::{NewNote, Store};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    config::login(&conn, "lina").unwrap();
    conn
}

fn note(title: &str, content: &str, tags: &[&str]) -> NewNote {
    NewNote {
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[test]
fn tags_are_trimmed_and_deduplicated() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store
        .add_note(&note("Groceries", "eggs", &[" home ", "home", "", "list"]))
        .unwrap();
    assert_eq!(store.note(id).unwrap().tags, vec!["home", "list"]);
}

#[test]
fn search_matches_title_content_and_tags() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    store.add_note(&note("Tax return", "due in April", &[])).unwrap();
    store.add_note(&note("Ideas", "new blog post", &["Writing"])).unwrap();
    store.add_note(&note("Misc", "nothing", &[])).unwrap();

    let all = store.notes().unwrap();
    assert_eq!(filter_notes(all.clone(), "TAX", false).len(), 1);
    assert_eq!(filter_notes(all.clone(), "april", false).len(), 1);
    assert_eq!(filter_notes(all.clone(), "writ", false).len(), 1);
    assert_eq!(filter_notes(all, "", false).len(), 3);
}

#[test]
fn archive_toggles_between_shelves() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_note(&note("Old plan", "", &[])).unwrap();

    assert!(store.toggle_archive(id).unwrap());
    let all = store.notes().unwrap();
    assert!(filter_notes(all.clone(), "", false).is_empty());
    assert_eq!(filter_notes(all, "", true).len(), 1);

    assert!(!store.toggle_archive(id).unwrap());
    assert!(!store.note(id).unwrap().is_archived);
}

#[test]
fn update_replaces_fields() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    let id = store.add_note(&note("Draft", "v1", &["a"])).unwrap();
    store.update_note(id, &note("Final", "v2", &["b"])).unwrap();
    let n = store.note(id).unwrap();
    assert_eq!(n.title, "Final");
    assert_eq!(n.content, "v2");
    assert_eq!(n.tags, vec!["b"]);
}

#[test]
fn empty_title_and_missing_note_are_errors() {
    let conn = setup();
    let mut store = Store::open(&conn).unwrap();
    assert!(matches!(
        store.add_note(&note("  ", "body", &[])),
        Err(Error::Validation(_))
    ));
    assert!(matches!(store.delete_note(42), Err(Error::NotFound { .. })));
    assert!(matches!(store.toggle_archive(42), Err(Error::NotFound { .. })));
}
