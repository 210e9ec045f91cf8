use chrono::NaiveDate;
use ledger_storage::LedgerStore;
use ledger_types::{NewRecord, Record};
use pretty_assertions::assert_eq;

fn new_record(date: &str, category: &str, amount: f64) -> NewRecord {
    NewRecord {
        date: date.parse().unwrap(),
        category: category.into(),
        payment: "cash".into(),
        amount,
        note: String::new(),
    }
}

// ── Basic CRUD ───────────────────────────────────────────────────

#[test]
fn add_assigns_positive_id_and_round_trips() {
    let store = LedgerStore::open_in_memory().unwrap();
    let id = store
        .add(&new_record("2024-03-01", "food", 120.0))
        .unwrap();
    assert!(id >= 1);

    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    let rec = &records[0];
    assert_eq!(rec.id, id);
    assert_eq!(rec.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(rec.category, "food");
    assert_eq!(rec.payment, "cash");
    assert_eq!(rec.amount, 120.0);
    assert_eq!(rec.note, "");
}

#[test]
fn list_all_empty_store() {
    let store = LedgerStore::open_in_memory().unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn list_all_orders_by_date_descending() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add(&new_record("2024-01-15", "a", 1.0)).unwrap();
    store.add(&new_record("2024-03-01", "b", 2.0)).unwrap();
    store.add(&new_record("2024-02-10", "c", 3.0)).unwrap();

    let dates: Vec<String> = store
        .list_all()
        .unwrap()
        .iter()
        .map(|r| r.date.to_string())
        .collect();
    assert_eq!(dates, vec!["2024-03-01", "2024-02-10", "2024-01-15"]);
}

#[test]
fn list_all_breaks_date_ties_by_insertion_order() {
    let store = LedgerStore::open_in_memory().unwrap();
    let first = store.add(&new_record("2024-03-01", "first", 1.0)).unwrap();
    let second = store.add(&new_record("2024-03-01", "second", 2.0)).unwrap();
    let third = store.add(&new_record("2024-03-01", "third", 3.0)).unwrap();

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[test]
fn delete_removes_record() {
    let store = LedgerStore::open_in_memory().unwrap();
    let id = store.add(&new_record("2024-03-01", "food", 1.0)).unwrap();
    store.delete_by_id(id).unwrap();
    assert!(store.list_all().unwrap().is_empty());
}

#[test]
fn delete_nonexistent_id_is_noop() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add(&new_record("2024-03-01", "food", 1.0)).unwrap();
    let before = store.list_all().unwrap();

    store.delete_by_id(9999).unwrap();

    assert_eq!(store.list_all().unwrap(), before);
}

#[test]
fn ids_are_monotonic_and_never_reused() {
    let store = LedgerStore::open_in_memory().unwrap();
    let a = store.add(&new_record("2024-03-01", "a", 1.0)).unwrap();
    let b = store.add(&new_record("2024-03-02", "b", 2.0)).unwrap();
    assert!(b > a);

    store.delete_by_id(b).unwrap();
    let c = store.add(&new_record("2024-03-03", "c", 3.0)).unwrap();
    assert!(c > b);
}

// ── clear_and_replace ────────────────────────────────────────────

fn foreign(id: i64, date: &str, category: &str) -> Record {
    Record {
        id,
        date: date.parse().unwrap(),
        category: category.into(),
        payment: "card".into(),
        amount: 50.0,
        note: "imported".into(),
    }
}

#[test]
fn clear_and_replace_swaps_contents() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add(&new_record("2024-01-01", "old", 1.0)).unwrap();
    store.add(&new_record("2024-01-02", "old", 2.0)).unwrap();

    store
        .clear_and_replace(&[foreign(777, "2024-05-01", "imported")])
        .unwrap();

    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, "imported");
}

#[test]
fn clear_and_replace_reassigns_fresh_ids() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add(&new_record("2024-01-01", "seed", 1.0)).unwrap();

    store
        .clear_and_replace(&[foreign(777, "2024-05-01", "a"), foreign(778, "2024-05-02", "b")])
        .unwrap();

    let records = store.list_all().unwrap();
    // Foreign ids discarded; AUTOINCREMENT keeps counting past the seed row.
    assert!(records.iter().all(|r| r.id != 777 && r.id != 778));
    assert!(records.iter().all(|r| r.id >= 2));
}

#[test]
fn clear_and_replace_empty_empties_store() {
    let store = LedgerStore::open_in_memory().unwrap();
    store.add(&new_record("2024-01-01", "a", 1.0)).unwrap();
    store.add(&new_record("2024-01-02", "b", 2.0)).unwrap();

    store.clear_and_replace(&[]).unwrap();

    assert!(store.list_all().unwrap().is_empty());
    assert_eq!(store.count().unwrap(), 0);
}

// ── Durability ───────────────────────────────────────────────────

#[test]
fn reopen_preserves_records_and_identity_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");

    let first_id;
    {
        let store = LedgerStore::open(&path).unwrap();
        first_id = store.add(&new_record("2024-03-01", "food", 120.0)).unwrap();
    }

    let store = LedgerStore::open(&path).unwrap();
    let records = store.list_all().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, first_id);

    let next = store.add(&new_record("2024-03-02", "food", 60.0)).unwrap();
    assert!(next > first_id);
}
