mod common;

use common::{descriptions, expense, income, ledger_store, KEY};
use finledger::{
    aggregate, errors::DraftField, KeyValueStore, Ledger, LedgerError, LedgerStore, MemoryStore,
    Money, Totals,
};

fn persisted(storage: &MemoryStore) -> Option<String> {
    storage.get(KEY).expect("read storage")
}

fn reloaded(storage: &MemoryStore) -> Ledger {
    let mut fresh = LedgerStore::new(Box::new(storage.clone()), KEY);
    fresh.load().expect("load").clone()
}

#[test]
fn valid_add_grows_by_one_at_the_front() {
    let mut store = ledger_store(MemoryStore::new());
    let drafts = [
        income("Salary", "5000", "Job"),
        expense("Coffee", "4,50", "Food"),
        income("Refund", "0.01", "Misc"),
    ];
    for draft in &drafts {
        let before = store.ledger().len();
        store.add(draft).unwrap();
        assert_eq!(store.ledger().len(), before + 1);
        assert_eq!(store.transactions()[0].description, draft.description);
    }
    assert_eq!(store.transactions()[1].amount, Money::from_cents(450));
}

#[test]
fn invalid_add_changes_neither_memory_nor_storage() {
    let storage = MemoryStore::new();
    let mut store = ledger_store(storage.clone());
    store.add(&income("Salary", "5000", "Job")).unwrap();
    let snapshot = persisted(&storage);

    let cases = [
        (income("", "10", "Job"), DraftField::Description),
        (income("Gift", "10", "  "), DraftField::Category),
        (income("Gift", "abc", "Job"), DraftField::Amount),
        (expense("Rent", "", "Housing"), DraftField::Amount),
    ];
    for (draft, field) in cases {
        match store.add(&draft) {
            Err(LedgerError::Validation(err)) => assert!(err.has(field), "{err}"),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.ledger().len(), 1);
        assert_eq!(persisted(&storage), snapshot);
    }
}

#[test]
fn rejects_amount_abc_on_empty_ledger() {
    let storage = MemoryStore::new();
    let mut store = ledger_store(storage.clone());
    assert!(store.add(&expense("Rent", "abc", "Housing")).is_err());
    assert!(store.ledger().is_empty());
    assert_eq!(persisted(&storage), None);
}

#[test]
fn remove_existing_and_unknown_ids() {
    let mut store = ledger_store(MemoryStore::new());
    store.add(&income("A", "1", "x")).unwrap();
    store.add(&income("B", "2", "x")).unwrap();
    let id = store.transactions()[1].id;

    store.remove(id).unwrap();
    assert_eq!(store.ledger().len(), 1);
    assert!(!store.ledger().contains(id));

    let before = store.ledger().clone();
    store.remove(id).unwrap();
    assert_eq!(store.ledger(), &before);
}

#[test]
fn removing_the_middle_keeps_relative_order() {
    let mut store = ledger_store(MemoryStore::new());
    for name in ["first", "second", "third"] {
        store.add(&income(name, "10", "x")).unwrap();
    }
    let middle = store.transactions()[1].id;
    store.remove(middle).unwrap();
    assert_eq!(descriptions(&store), ["third", "first"]);
}

#[test]
fn clear_then_fresh_load_is_empty() {
    let storage = MemoryStore::new();
    let mut store = ledger_store(storage.clone());
    store.add(&income("Salary", "5000", "Job")).unwrap();
    store.clear().unwrap();

    assert!(store.ledger().is_empty());
    assert!(reloaded(&storage).is_empty());
}

#[test]
fn aggregate_matches_reference_values() {
    assert_eq!(aggregate(&[]), Totals::default());

    let mut store = ledger_store(MemoryStore::new());
    store.add(&income("Pay", "100", "Job")).unwrap();
    store.add(&expense("Food", "40", "Food")).unwrap();
    let totals = store.totals();
    assert_eq!(totals.income, Money::from_units(100));
    assert_eq!(totals.expense, Money::from_units(40));
    assert_eq!(totals.balance, Money::from_units(60));
}

#[test]
fn load_after_mutations_round_trips() {
    let storage = MemoryStore::new();
    let mut store = ledger_store(storage.clone());
    store.add(&income("Salary", "5000", "Job")).unwrap();
    assert_eq!(&reloaded(&storage), store.ledger());

    store.add(&expense("Rent", "1500.75", "Housing")).unwrap();
    store.add(&income("Bonus", "200", "Job")).unwrap();
    assert_eq!(&reloaded(&storage), store.ledger());

    let id = store.transactions()[1].id;
    store.remove(id).unwrap();
    assert_eq!(&reloaded(&storage), store.ledger());
}

#[test]
fn salary_rent_bonus_scenario() {
    let mut store = ledger_store(MemoryStore::new());
    store.add(&income("Salary", "5000", "Job")).unwrap();
    store.add(&expense("Rent", "1500", "Housing")).unwrap();
    store.add(&income("Bonus", "200", "Job")).unwrap();

    assert_eq!(descriptions(&store), ["Bonus", "Rent", "Salary"]);
    assert_eq!(
        store.totals(),
        Totals {
            income: Money::from_units(5200),
            expense: Money::from_units(1500),
            balance: Money::from_units(3700),
        }
    );
}

#[test]
fn ids_follow_clock_and_stay_unique() {
    let mut store = ledger_store(MemoryStore::new());
    store.add(&income("A", "1", "x")).unwrap();
    store.add(&income("B", "1", "x")).unwrap();

    let [newest, oldest] = [store.transactions()[0].id, store.transactions()[1].id];
    assert_eq!(newest.0 - oldest.0, 1_000);
    assert_eq!(
        store.transactions()[1].date.timestamp_millis() as u64,
        oldest.0
    );
}

#[test]
fn largest_amount_survives_reload() {
    let storage = MemoryStore::new();
    let mut store = ledger_store(storage.clone());
    store.add(&income("Salary", "5000", "Job")).unwrap();
    store
        .add(&income("Windfall", &Money::MAX.to_string(), "Misc"))
        .unwrap();
    store.add(&expense("Fee", "0.01", "Misc")).unwrap();

    let reloaded = reloaded(&storage);
    assert_eq!(reloaded.len(), 3);
    assert_eq!(&reloaded, store.ledger());
    assert_eq!(reloaded.transactions()[1].amount, Money::MAX);
}

#[test]
fn oversized_amount_is_rejected_and_keeps_history() {
    let storage = MemoryStore::new();
    let mut store = ledger_store(storage.clone());
    store.add(&income("Salary", "5000", "Job")).unwrap();

    for amount in ["100000000000000.01", "90000000000000000"] {
        match store.add(&income("Windfall", amount, "Misc")) {
            Err(LedgerError::Validation(err)) => assert!(err.has(DraftField::Amount), "{err}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
    assert_eq!(reloaded(&storage).len(), 1);
}

#[test]
fn totals_of_max_amounts_do_not_panic() {
    let mut store = ledger_store(MemoryStore::new());
    let max = Money::MAX.to_string();
    store.add(&income("A", &max, "x")).unwrap();
    store.add(&income("B", &max, "x")).unwrap();
    store.add(&expense("C", &max, "x")).unwrap();

    let totals = store.totals();
    assert_eq!(totals.income.cents(), 2 * Money::MAX.cents());
    assert_eq!(totals.expense, Money::MAX);
    assert_eq!(totals.balance, Money::MAX);
}
