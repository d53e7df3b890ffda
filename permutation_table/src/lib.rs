mod config;
pub mod builder;
pub mod manual;

use log::{debug, info};

pub use crate::config::*;

/// The number of permutations of a set of `n` elements, or `None` if it does not fit in a `u64`.
///
/// ```
/// assert_eq!(permutation_table::factorial(0), Some(1));
/// assert_eq!(permutation_table::factorial(5), Some(120));
/// assert_eq!(permutation_table::factorial(21), None);
/// ```
pub fn factorial(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |acc, x| acc.checked_mul(x))
}

/// The names of the position columns for a set of `size` elements: `v0`, `v1`, ...
pub fn column_names(size: usize) -> Vec<String> {
    (0..size)
        .map(|idx| format!("{}{}", COLUMN_PREFIX, idx))
        .collect()
}

/// All the permutations of `0..size`, in lexicographic order.
///
/// The first permutation is the identity and the last one is the reversed identity.
/// The empty set has exactly one (empty) permutation.
///
/// ```
/// use permutation_table::Permutations;
///
/// let perms: Vec<Vec<usize>> = Permutations::new(3).collect();
/// assert_eq!(perms[0], vec![0, 1, 2]);
/// assert_eq!(perms[1], vec![0, 2, 1]);
/// assert_eq!(perms[5], vec![2, 1, 0]);
/// ```
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Permutations {
    // None once the last permutation has been returned.
    current: Option<Vec<usize>>,
}

impl Permutations {
    pub fn new(size: usize) -> Permutations {
        Permutations {
            current: Some((0..size).collect()),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.current.take()?;
        let mut next = current.clone();
        if advance_permutation(&mut next) {
            self.current = Some(next);
        }
        Some(current)
    }
}

/// Rearranges `perm` into the next permutation in lexicographic order.
/// Returns false (and leaves `perm` untouched) if it is already the last one.
fn advance_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    // Start of the longest non-increasing suffix.
    let mut pivot = perm.len() - 1;
    while pivot > 0 && perm[pivot - 1] >= perm[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }
    // Rightmost element of the suffix that is larger than the pivot.
    let mut successor = perm.len() - 1;
    while perm[successor] <= perm[pivot - 1] {
        successor -= 1;
    }
    perm.swap(pivot - 1, successor);
    perm[pivot..].reverse();
    true
}

/// The table of all the orderings of a set of texts.
///
/// The rows are not stored: they are generated in order when iterating, so that even
/// the largest tables can be streamed to a file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PermutationTable {
    size: usize,
    row_count: u64,
    first_row_index: u64,
}

impl PermutationTable {
    /// The number of texts (and of position columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of rows, `size!`.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn first_row_index(&self) -> u64 {
        self.first_row_index
    }

    /// The header: the index label, then one column per position.
    pub fn header(&self) -> Vec<String> {
        let mut header = vec![INDEX_LABEL.to_string()];
        header.extend(column_names(self.size));
        header
    }

    /// The rows of the table with their index. Indices are contiguous, starting at
    /// the first row index of the rules.
    pub fn rows(&self) -> impl Iterator<Item = (u64, Vec<usize>)> {
        let first = self.first_row_index;
        Permutations::new(self.size)
            .enumerate()
            .map(move |(idx, perm)| (first + idx as u64, perm))
    }
}

/// Builds the table of all the permutations of `0..size`.
///
/// Arguments:
/// * `size` the number of texts to randomize, at least 1
/// * `rules` the limits that apply to this table
pub fn build_table(size: usize, rules: &TableRules) -> Result<PermutationTable, TableErrors> {
    info!("build_table: size: {:?} rules: {:?}", size, rules);
    if size == 0 {
        return Err(TableErrors::EmptySet);
    }
    let limit = rules.max_size.min(ABSOLUTE_MAX_SIZE);
    if size > limit {
        return Err(TableErrors::TooLarge { size, limit });
    }
    let row_count = factorial(size).ok_or(TableErrors::TooLarge { size, limit })?;
    debug!("build_table: {} rows of {} columns", row_count, size);
    Ok(PermutationTable {
        size,
        row_count,
        first_row_index: rules.first_row_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn factorial_values() {
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(4), Some(24));
        assert_eq!(factorial(10), Some(3_628_800));
        assert_eq!(factorial(20), Some(2_432_902_008_176_640_000));
        assert_eq!(factorial(21), None);
    }

    #[test]
    fn all_permutations_are_distinct() {
        init();
        for size in 1..=6 {
            let perms: Vec<Vec<usize>> = Permutations::new(size).collect();
            assert_eq!(perms.len() as u64, factorial(size).unwrap());
            let unique: HashSet<Vec<usize>> = perms.iter().cloned().collect();
            assert_eq!(unique.len(), perms.len());
            for p in perms.iter() {
                let mut sorted = p.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, (0..size).collect::<Vec<usize>>());
            }
        }
    }

    #[test]
    fn lexicographic_order() {
        let perms: Vec<Vec<usize>> = Permutations::new(5).collect();
        for pair in perms.windows(2) {
            assert!(pair[0] < pair[1], "{:?} >= {:?}", pair[0], pair[1]);
        }
        assert_eq!(perms.first(), Some(&vec![0, 1, 2, 3, 4]));
        assert_eq!(perms.last(), Some(&vec![4, 3, 2, 1, 0]));
    }

    #[test]
    fn small_sets() {
        assert_eq!(
            Permutations::new(0).collect::<Vec<_>>(),
            vec![Vec::<usize>::new()]
        );
        assert_eq!(Permutations::new(1).collect::<Vec<_>>(), vec![vec![0]]);
        assert_eq!(
            Permutations::new(2).collect::<Vec<_>>(),
            vec![vec![0, 1], vec![1, 0]]
        );
    }

    #[test]
    fn table_rows_are_one_based_and_contiguous() {
        init();
        let table = build_table(4, &TableRules::DEFAULT_RULES).unwrap();
        assert_eq!(table.row_count(), 24);
        let indices: Vec<u64> = table.rows().map(|(idx, _)| idx).collect();
        assert_eq!(indices, (1..=24).collect::<Vec<u64>>());
        assert!(table.rows().all(|(_, p)| p.len() == 4));
    }

    #[test]
    fn table_header() {
        let table = build_table(3, &TableRules::DEFAULT_RULES).unwrap();
        assert_eq!(table.header(), vec!["permutation", "v0", "v1", "v2"]);
    }

    #[test]
    fn single_text() {
        let table = build_table(1, &TableRules::DEFAULT_RULES).unwrap();
        assert_eq!(table.rows().collect::<Vec<_>>(), vec![(1, vec![0])]);
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(
            build_table(0, &TableRules::DEFAULT_RULES),
            Err(TableErrors::EmptySet)
        );
    }

    #[test]
    fn too_many_texts() {
        assert_eq!(
            build_table(11, &TableRules::DEFAULT_RULES),
            Err(TableErrors::TooLarge {
                size: 11,
                limit: 10
            })
        );
        let rules = TableRules {
            max_size: 100,
            first_row_index: 1,
        };
        assert_eq!(
            build_table(21, &rules),
            Err(TableErrors::TooLarge {
                size: 21,
                limit: ABSOLUTE_MAX_SIZE
            })
        );
        // Large tables are fine as long as they are not enumerated.
        assert_eq!(build_table(20, &rules).unwrap().row_count(), 2_432_902_008_176_640_000);
    }

    #[test]
    fn enumeration_is_deterministic() {
        let table = build_table(5, &TableRules::DEFAULT_RULES).unwrap();
        let first: Vec<_> = table.rows().collect();
        let second: Vec<_> = table.rows().collect();
        assert_eq!(first, second);
    }
}
