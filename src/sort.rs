//! Quick sort and the record comparators used for sorted views.

use std::cmp::Ordering;

use crate::{
    student::StudentRecord,
    types::{SortKey, SortOrder},
};

/// Sorts `items` in place with quick sort. Not stable.
///
/// Hoare partition around the middle element. Recurses into the smaller
/// side and loops on the larger, so stack depth stays `O(log n)`.
pub fn quick_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quick_sort_range(items, &mut cmp);
}

fn quick_sort_range<T, F>(mut items: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while items.len() > 1 {
        let pivot = partition(items, cmp);
        let (left, rest) = std::mem::take(&mut items).split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort_range(left, cmp);
            items = right;
        } else {
            quick_sort_range(right, cmp);
            items = left;
        }
    }
}

/// Moves the middle element to its final position and returns that index.
/// Everything before it compares `<=` and everything after it `>=`.
fn partition<T, F>(items: &mut [T], cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let last = items.len() - 1;
    // Park the pivot at index 0 so it cannot move while scanning.
    items.swap(0, last / 2);

    let mut i = 0usize;
    let mut j = items.len();
    loop {
        loop {
            i += 1;
            if i > last || cmp(&items[i], &items[0]) != Ordering::Less {
                break;
            }
        }
        loop {
            j -= 1;
            if cmp(&items[j], &items[0]) != Ordering::Greater {
                break;
            }
        }
        if i >= j {
            break;
        }
        items.swap(i, j);
    }
    items.swap(0, j);
    j
}

/// Comparator over records for `key` and `order`.
pub fn record_cmp(
    key: SortKey,
    order: SortOrder,
) -> impl Fn(&StudentRecord, &StudentRecord) -> Ordering {
    move |a, b| {
        let ord = match key {
            SortKey::Roll => cmp_roll(a, b),
            SortKey::Name => cmp_name(a, b),
            SortKey::Gpa => a.gpa.value().total_cmp(&b.gpa.value()),
        };
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}

/// Returns a sorted copy of `records`; the source is left untouched.
pub fn sort_records<'a, I>(records: I, key: SortKey, order: SortOrder) -> Vec<StudentRecord>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut out: Vec<StudentRecord> = records.into_iter().cloned().collect();
    quick_sort_by(&mut out, record_cmp(key, order));
    out
}

// All-digit rolls come first in numeric order, then the rest lexicographically.
fn cmp_roll(a: &StudentRecord, b: &StudentRecord) -> Ordering {
    match (a.roll.as_number(), b.roll.as_number()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.roll.cmp(&b.roll)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.roll.cmp(&b.roll),
    }
}

fn cmp_name(a: &StudentRecord, b: &StudentRecord) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}
