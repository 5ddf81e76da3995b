//! Quasi-identifier frequency accounting: tuple → row-index sets, plus
//! the per-attribute domains and generalization levels the Datafly loop
//! steers by.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};

use veil_core::errors::HierarchyError;
use veil_core::models::Row;
use veil_core::traits::Generalized;

/// Rows sharing one quasi-identifier tuple.
///
/// The occurrence count is the cardinality of the index set, so the two
/// can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyEntry {
    rows: BTreeSet<usize>,
}

impl FrequencyEntry {
    fn singleton(index: usize) -> Self {
        let mut rows = BTreeSet::new();
        rows.insert(index);
        Self { rows }
    }

    /// Number of rows carrying this tuple.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Original indices of the rows carrying this tuple, ascending.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.rows.contains(&index)
    }

    fn insert(&mut self, index: usize) {
        self.rows.insert(index);
    }

    fn absorb(&mut self, other: FrequencyEntry) {
        self.rows.extend(other.rows);
    }
}

/// The engine's working state: one entry per live quasi-identifier tuple,
/// the distinct-value domain per attribute, and the generalization level
/// per attribute.
///
/// Domains and levels are indexed by QI position (the caller's QI list
/// order). Levels start at 0 and never decrease.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    entries: HashMap<Vec<String>, FrequencyEntry>,
    domains: Vec<HashSet<String>>,
    levels: Vec<usize>,
}

impl FrequencyTable {
    /// One pass over `rows`, extracting the values at `qi_columns` from
    /// each row. First occurrence of a tuple creates its entry and seeds
    /// every attribute's domain; repeats only record the row index.
    pub fn build(rows: &[Row], qi_columns: &[usize]) -> Self {
        let mut table = Self {
            entries: HashMap::new(),
            domains: vec![HashSet::new(); qi_columns.len()],
            levels: vec![0; qi_columns.len()],
        };
        for row in rows {
            let tuple: Vec<String> = qi_columns
                .iter()
                .map(|&column| row.values[column].clone())
                .collect();
            match table.entries.entry(tuple) {
                Entry::Occupied(mut entry) => entry.get_mut().insert(row.index),
                Entry::Vacant(slot) => {
                    for (position, value) in slot.key().iter().enumerate() {
                        table.domains[position].insert(value.clone());
                    }
                    slot.insert(FrequencyEntry::singleton(row.index));
                }
            }
        }
        table
    }

    /// Number of live tuples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Vec<String>, &FrequencyEntry)> {
        self.entries.iter()
    }

    pub fn domain_cardinality(&self, position: usize) -> usize {
        self.domains[position].len()
    }

    pub fn level(&self, position: usize) -> usize {
        self.levels[position]
    }

    /// Generalization level per QI position.
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Total rows sitting in groups smaller than `k`.
    pub fn violating_mass(&self, k: usize) -> usize {
        self.entries
            .values()
            .map(FrequencyEntry::count)
            .filter(|&count| count < k)
            .sum()
    }

    /// QI position to generalize next: largest domain cardinality, ties
    /// broken to the earliest position in the caller's QI list.
    pub fn widest_domain(&self) -> usize {
        let mut widest = 0;
        for (position, domain) in self.domains.iter().enumerate() {
            if domain.len() > self.domains[widest].len() {
                widest = position;
            }
        }
        widest
    }

    /// One generalization round at `position`: rewrite every entry with
    /// `lookup`, merging tuples that collide, then advance the level.
    ///
    /// The live map is never mutated while iterated: entries drain into a
    /// fresh map which is swapped in afterwards. Entries whose value is
    /// already a root stay as they are and contribute nothing to the new
    /// domain; rewritten entries contribute their pre-generalization
    /// value. Returns how many entries were rewritten; a round that
    /// rewrites nothing leaves the level unchanged.
    pub fn apply_generalization(
        &mut self,
        position: usize,
        mut lookup: impl FnMut(&str) -> Result<Generalized, HierarchyError>,
    ) -> Result<usize, HierarchyError> {
        self.domains[position].clear();
        let mut rewritten = 0;

        let snapshot = std::mem::take(&mut self.entries);
        let mut rebuilt = HashMap::with_capacity(snapshot.len());
        for (tuple, entry) in snapshot {
            match lookup(&tuple[position])? {
                Generalized::Exhausted => merge(&mut rebuilt, tuple, entry),
                Generalized::Value(parent) => {
                    self.domains[position].insert(tuple[position].clone());
                    let mut generalized = tuple;
                    generalized[position] = parent;
                    merge(&mut rebuilt, generalized, entry);
                    rewritten += 1;
                }
            }
        }
        self.entries = rebuilt;

        if rewritten > 0 {
            self.levels[position] += 1;
        }
        Ok(rewritten)
    }

    /// Drop every entry smaller than `k`. Returns the number of rows
    /// suppressed with them.
    pub fn suppress_below(&mut self, k: usize) -> usize {
        let mut suppressed = 0;
        self.entries.retain(|_, entry| {
            if entry.count() < k {
                suppressed += entry.count();
                false
            } else {
                true
            }
        });
        suppressed
    }

    /// Surviving row index → final tuple, for row reconstruction. Index
    /// sets are disjoint across entries, so each row maps to one tuple.
    pub fn row_assignments(&self) -> HashMap<usize, &[String]> {
        let mut assignments = HashMap::new();
        for (tuple, entry) in &self.entries {
            for index in entry.rows() {
                assignments.insert(index, tuple.as_slice());
            }
        }
        assignments
    }
}

fn merge(
    entries: &mut HashMap<Vec<String>, FrequencyEntry>,
    tuple: Vec<String>,
    entry: FrequencyEntry,
) {
    match entries.entry(tuple) {
        Entry::Occupied(mut existing) => existing.get_mut().absorb(entry),
        Entry::Vacant(slot) => {
            slot.insert(entry);
        }
    }
}
