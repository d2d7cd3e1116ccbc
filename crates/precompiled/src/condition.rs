//! Conjunctive row filters with an optional result window.

use core::cmp::Ordering;
use core::ops::Range;

use storage::{Entry, Table};
use tracing::{trace, warn};

use crate::metering::{InterfaceOpcode, PrecompiledGas};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparator {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Comparator::Eq => ordering == Ordering::Equal,
            Comparator::Ne => ordering != Ordering::Equal,
            Comparator::Gt => ordering == Ordering::Greater,
            Comparator::Ge => ordering != Ordering::Less,
            Comparator::Lt => ordering == Ordering::Less,
            Comparator::Le => ordering != Ordering::Greater,
        }
    }

    pub fn opcode(self) -> InterfaceOpcode {
        match self {
            Comparator::Eq => InterfaceOpcode::Eq,
            Comparator::Ne => InterfaceOpcode::Ne,
            Comparator::Gt => InterfaceOpcode::Gt,
            Comparator::Ge => InterfaceOpcode::Ge,
            Comparator::Lt => InterfaceOpcode::Lt,
            Comparator::Le => InterfaceOpcode::Le,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompareTriple {
    pub field: String,
    pub value: String,
    pub cmp: Comparator,
}

impl CompareTriple {
    /// Numeric when both sides parse as integers, lexical otherwise.
    fn matches(&self, stored: &str) -> bool {
        let ordering = match (stored.parse::<i128>(), self.value.parse::<i128>()) {
            (Ok(lhs), Ok(rhs)) => lhs.cmp(&rhs),
            _ => stored.cmp(self.value.as_str()),
        };
        self.cmp.accepts(ordering)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Count(usize),
    Range { start: usize, end: usize },
}

/// Ordered comparison triples ANDed together, plus an optional window that
/// the caller applies to the filtered rows.
// No `PartialEq`: its `eq`/`ne` would shadow the builders below.
#[derive(Debug, Clone, Default)]
pub struct Condition {
    triples: Vec<CompareTriple>,
    limit: Option<Limit>,
}

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_condition(&mut self, field: &str, value: &str, cmp: Comparator) -> &mut Self {
        self.triples.push(CompareTriple {
            field: field.to_string(),
            value: value.to_string(),
            cmp,
        });
        self
    }

    pub fn eq(&mut self, field: &str, value: &str) -> &mut Self {
        self.add_condition(field, value, Comparator::Eq)
    }

    pub fn ne(&mut self, field: &str, value: &str) -> &mut Self {
        self.add_condition(field, value, Comparator::Ne)
    }

    pub fn gt(&mut self, field: &str, value: &str) -> &mut Self {
        self.add_condition(field, value, Comparator::Gt)
    }

    pub fn ge(&mut self, field: &str, value: &str) -> &mut Self {
        self.add_condition(field, value, Comparator::Ge)
    }

    pub fn lt(&mut self, field: &str, value: &str) -> &mut Self {
        self.add_condition(field, value, Comparator::Lt)
    }

    pub fn le(&mut self, field: &str, value: &str) -> &mut Self {
        self.add_condition(field, value, Comparator::Le)
    }

    pub fn limit(&mut self, count: usize) -> &mut Self {
        self.limit = Some(Limit::Count(count));
        self
    }

    pub fn limit_range(&mut self, start: usize, end: usize) -> &mut Self {
        self.limit = Some(Limit::Range { start, end });
        self
    }

    pub fn triples(&self) -> &[CompareTriple] {
        &self.triples
    }

    pub fn get_limit(&self) -> Option<Limit> {
        self.limit
    }

    /// True when `entry` satisfies every triple. A field the entry does not
    /// carry fails its triple.
    pub fn filter(&self, entry: &Entry) -> bool {
        self.triples.iter().all(|triple| {
            entry
                .get_field(&triple.field)
                .is_some_and(|stored| triple.matches(stored))
        })
    }

    /// Indices of a `len`-long filtered sequence selected by the limit,
    /// clamped so the range is always in bounds.
    pub fn window(&self, len: usize) -> Range<usize> {
        match self.limit {
            None => 0..len,
            Some(Limit::Count(count)) => 0..count.min(len),
            Some(Limit::Range { start, end }) => {
                let end = end.min(len);
                start.min(end)..end
            }
        }
    }
}

/// Runs `condition` over every row of `table` and returns the matching
/// `(key, entry)` pairs inside the window.
pub fn select_rows(
    table: &Table<'_>,
    condition: &Condition,
    gas: &mut PrecompiledGas,
) -> Vec<(String, Entry)> {
    gas.append_operation(InterfaceOpcode::Select);
    let keys = table.get_primary_keys(None);
    gas.append_operation(InterfaceOpcode::Select);
    let rows = table.get_rows(&keys);

    for triple in condition.triples() {
        gas.append_operation(triple.cmp.opcode());
    }

    let matched: Vec<(String, Entry)> = keys
        .into_iter()
        .zip(rows)
        .filter_map(|(key, row)| match row {
            Some(entry) => Some((key, entry)),
            None => {
                warn!(table = table.name(), key = %key, "selected key has no row, skipped");
                None
            }
        })
        .filter(|(_, entry)| condition.filter(entry))
        .collect();

    if condition.get_limit().is_some() {
        gas.append_operation(InterfaceOpcode::Limit);
    }
    let window = condition.window(matched.len());
    trace!(
        table = table.name(),
        matched = matched.len(),
        start = window.start,
        end = window.end,
        "rows selected"
    );

    matched
        .into_iter()
        .skip(window.start)
        .take(window.end - window.start)
        .collect()
}
