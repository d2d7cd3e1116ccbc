use once_cell::sync::Lazy;
use precompiled::{Comparator, Condition, GasSchedule, InterfaceOpcode, PrecompiledGas, select_rows};
use storage::{Entry, FailurePolicy, FaultyStorage, Storage, Table};

fn row(status: &str, score: &str) -> Entry {
    Entry::with_fields([("status", status), ("score", score)])
}

static ACTIVE_HIGH: Lazy<Condition> = Lazy::new(|| {
    let mut condition = Condition::new();
    condition.eq("status", "active").ge("score", "50");
    condition
});

#[test]
fn all_triples_must_hold() {
    println!("=== Testing Condition: Conjunction ===");
    let cases = [
        (row("active", "50"), true),
        (row("active", "99"), true),
        (row("active", "49"), false),
        (row("idle", "99"), false),
        (row("idle", "10"), false),
    ];
    for (entry, expected) in cases {
        println!("  {:?} -> {}", entry, expected);
        assert_eq!(ACTIVE_HIGH.filter(&entry), expected);
    }
}

#[test]
fn each_triple_matters_independently() {
    let entry = row("idle", "99");

    let mut status_only = Condition::new();
    status_only.eq("status", "active");
    let mut score_only = Condition::new();
    score_only.ge("score", "50");

    assert!(!ACTIVE_HIGH.filter(&entry));
    assert!(!status_only.filter(&entry));
    assert!(score_only.filter(&entry));
}

#[test]
fn absent_field_excludes_row() {
    let mut condition = Condition::new();
    condition.ne("owner", "root");
    assert!(!condition.filter(&row("active", "1")));

    let with_owner = Entry::with_fields([("owner", "alice")]);
    assert!(condition.filter(&with_owner));
}

#[test]
fn numeric_when_both_sides_parse() {
    let entry = Entry::with_fields([("n", "10"), ("s", "10a")]);

    let mut numeric = Condition::new();
    numeric.gt("n", "9");
    assert!(numeric.filter(&entry));

    // "10a" is not a number, so "10a" < "9" lexically.
    let mut lexical = Condition::new();
    lexical.lt("s", "9");
    assert!(lexical.filter(&entry));

    let mut negative = Condition::new();
    negative.gt("n", "-5").le("n", "10");
    assert!(negative.filter(&entry));
}

#[test]
fn every_comparator() {
    let entry = Entry::with_fields([("v", "5")]);
    let cases = [
        (Comparator::Eq, "5", true),
        (Comparator::Ne, "5", false),
        (Comparator::Gt, "4", true),
        (Comparator::Ge, "5", true),
        (Comparator::Lt, "5", false),
        (Comparator::Le, "5", true),
    ];
    for (cmp, value, expected) in cases {
        let mut condition = Condition::new();
        condition.add_condition("v", value, cmp);
        assert_eq!(condition.filter(&entry), expected, "{:?} {}", cmp, value);
    }
}

#[test]
fn empty_condition_matches_everything() {
    assert!(Condition::new().filter(&Entry::new()));
}

#[test]
fn window_is_clamped() {
    let mut condition = Condition::new();
    assert_eq!(condition.window(4), 0..4);

    condition.limit(2);
    assert_eq!(condition.window(4), 0..2);
    assert_eq!(condition.window(1), 0..1);

    condition.limit_range(1, 3);
    assert_eq!(condition.window(5), 1..3);
    assert_eq!(condition.window(2), 1..2);
    assert_eq!(condition.window(0), 0..0);

    condition.limit_range(4, 2);
    assert_eq!(condition.window(10), 2..2);
}

#[test]
fn select_rows_filters_windows_and_charges() {
    println!("=== Testing Condition: select_rows ===");
    let storage = Storage::new();
    let table = Table::create(&storage, "u_players", "id", &["status", "score"]).unwrap();
    for (id, status, score) in [
        ("p1", "active", "70"),
        ("p2", "idle", "90"),
        ("p3", "active", "55"),
        ("p4", "active", "20"),
        ("p5", "active", "51"),
    ] {
        table.set_row(id, row(status, score)).unwrap();
    }

    let mut condition = ACTIVE_HIGH.clone();
    condition.limit_range(1, 10);
    let mut gas = PrecompiledGas::new(GasSchedule::default());
    let rows = select_rows(&table, &condition, &mut gas);

    let ids: Vec<&str> = rows.iter().map(|(id, _)| id.as_str()).collect();
    println!("  selected {:?}", ids);
    assert_eq!(ids, vec!["p3", "p5"]);

    assert_eq!(gas.count(InterfaceOpcode::Select), 2);
    assert_eq!(gas.count(InterfaceOpcode::Eq), 1);
    assert_eq!(gas.count(InterfaceOpcode::Ge), 1);
    assert_eq!(gas.count(InterfaceOpcode::Limit), 1);
    assert_eq!(gas.total_gas(), 200 * 2 + 3 * 3);
}

#[test]
fn eq_and_ne_builders_append_triples() {
    let mut condition = Condition::new();
    condition.eq("status", "active").ne("owner", "root");

    let triples = condition.triples();
    assert_eq!(triples.len(), 2);
    assert_eq!(
        (triples[0].field.as_str(), triples[0].value.as_str(), triples[0].cmp),
        ("status", "active", Comparator::Eq)
    );
    assert_eq!(
        (triples[1].field.as_str(), triples[1].value.as_str(), triples[1].cmp),
        ("owner", "root", Comparator::Ne)
    );

    let entry = Entry::with_fields([("status", "active"), ("owner", "alice")]);
    assert!(condition.filter(&entry));
    let owned_by_root = Entry::with_fields([("status", "active"), ("owner", "root")]);
    assert!(!condition.filter(&owned_by_root));
}

#[test]
fn select_rows_skips_keys_without_rows() {
    let store = FaultyStorage::new(Storage::new(), FailurePolicy::Never);
    let table = Table::create(&store, "u_players", "id", &["status", "score"]).unwrap();
    for id in ["p1", "p2", "p3"] {
        table.set_row(id, row("active", "60")).unwrap();
    }
    store.hide_row("u_players", "p2");

    let mut gas = PrecompiledGas::new(GasSchedule::default());
    let rows = select_rows(&table, &ACTIVE_HIGH, &mut gas);
    let ids: Vec<&str> = rows.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p3"]);
}
