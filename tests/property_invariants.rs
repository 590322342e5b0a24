use std::collections::BTreeSet;

use proptest::prelude::*;

use rollbook::{
    core::store::{RecordStore, StoreError},
    sort::{quick_sort_by, record_cmp, sort_records},
    student::{StudentPatch, StudentRecord},
    types::{Gpa, RollNo, SortKey, SortOrder},
};

#[derive(Debug, Clone)]
enum Action {
    Add { roll: u8, gpa_centi: u16 },
    Delete { roll: u8 },
    Update { roll: u8, gpa_centi: u16 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..32, 0u16..=400).prop_map(|(roll, gpa_centi)| Action::Add { roll, gpa_centi }),
        (0u8..32).prop_map(|roll| Action::Delete { roll }),
        (0u8..32, 0u16..=400).prop_map(|(roll, gpa_centi)| Action::Update { roll, gpa_centi }),
    ]
}

fn roll(n: u8) -> RollNo {
    RollNo::new(&format!("R{n}")).unwrap()
}

fn gpa(centi: u16) -> Gpa {
    Gpa::new(f64::from(centi) / 100.0).unwrap()
}

fn list_rolls(store: &RecordStore) -> BTreeSet<RollNo> {
    store.iter().map(|r| r.roll.clone()).collect()
}

fn index_rolls(store: &RecordStore) -> BTreeSet<RollNo> {
    store.indexed_rolls().cloned().collect()
}

proptest! {
    #[test]
    fn random_mutations_keep_index_and_list_in_sync(actions in prop::collection::vec(action_strategy(), 1..200)) {
        let mut store = RecordStore::new();
        let mut model: Vec<RollNo> = Vec::new();

        for action in actions {
            match action {
                Action::Add { roll: n, gpa_centi } => {
                    let rec = StudentRecord::new(roll(n), &format!("Student {n}"), gpa(gpa_centi)).unwrap();
                    let before = store.to_vec();
                    match store.add(rec) {
                        Ok(()) => model.push(roll(n)),
                        Err(StoreError::DuplicateKey(dup)) => {
                            prop_assert_eq!(dup, roll(n));
                            prop_assert_eq!(store.to_vec(), before);
                        }
                        Err(other) => prop_assert!(false, "unexpected add error: {other:?}"),
                    }
                }
                Action::Delete { roll: n } => {
                    let before = store.to_vec();
                    match store.delete(&roll(n)) {
                        Ok(removed) => {
                            prop_assert_eq!(&removed.roll, &roll(n));
                            model.retain(|r| *r != roll(n));
                        }
                        Err(StoreError::NotFound(_)) => prop_assert_eq!(store.to_vec(), before),
                        Err(other) => prop_assert!(false, "unexpected delete error: {other:?}"),
                    }
                }
                Action::Update { roll: n, gpa_centi } => {
                    let patch = StudentPatch { gpa: Some(gpa(gpa_centi)), ..StudentPatch::default() };
                    let res = store.update(&roll(n), patch);
                    prop_assert_eq!(res.is_ok(), model.contains(&roll(n)));
                }
            }

            prop_assert_eq!(list_rolls(&store), index_rolls(&store));
            prop_assert!(store.check_consistency().is_ok());
            let order: Vec<RollNo> = store.iter().map(|r| r.roll.clone()).collect();
            prop_assert_eq!(&order, &model);
        }
    }

    #[test]
    fn quick_sort_matches_std_sort(mut values in prop::collection::vec(any::<i32>(), 0..300)) {
        let mut expected = values.clone();
        expected.sort();
        quick_sort_by(&mut values, |a, b| a.cmp(b));
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn sorted_views_respect_order_and_keep_every_record(
        gpas in prop::collection::vec(0u16..=400, 0..60),
        key_idx in 0usize..3,
        desc in any::<bool>(),
    ) {
        let key = [SortKey::Roll, SortKey::Name, SortKey::Gpa][key_idx];
        let order = if desc { SortOrder::Descending } else { SortOrder::Ascending };

        let mut store = RecordStore::new();
        for (i, centi) in gpas.iter().enumerate() {
            let rec = StudentRecord::new(
                RollNo::new(&i.to_string()).unwrap(),
                &format!("name{}", (i * 7) % 11),
                gpa(*centi),
            ).unwrap();
            store.add(rec).unwrap();
        }
        let before = store.to_vec();

        let sorted = sort_records(&store, key, order);
        let cmp = record_cmp(key, order);
        prop_assert!(sorted.windows(2).all(|w| cmp(&w[0], &w[1]) != std::cmp::Ordering::Greater));

        let mut a: Vec<String> = sorted.iter().map(|r| r.roll.to_string()).collect();
        let mut b: Vec<String> = before.iter().map(|r| r.roll.to_string()).collect();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
        prop_assert_eq!(store.to_vec(), before);
    }
}
