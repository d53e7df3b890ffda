// ********* Table layout **********

use std::error::Error;
use std::fmt::Display;

/// The label of the column that holds the row index.
///
/// The survey looks up a row by matching this column, so the label written in the
/// header and the label used in the lookup formulas must be the same.
pub const INDEX_LABEL: &str = "permutation";

/// Prefix of the position columns (`v0`, `v1`, ...).
///
/// Names of variables in the survey tool have to start with a letter.
pub const COLUMN_PREFIX: &str = "v";

/// The largest set whose number of permutations still fits in a `u64` (20! < 2^64 < 21!).
pub const ABSOLUTE_MAX_SIZE: usize = 20;

/// The largest limit that can be configured. 12! is 479,001,600 rows, about 17GB of CSV:
/// any larger table does not fit on a disk.
pub const MAX_CONFIGURABLE_SIZE: usize = 12;

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct TableRules {
    /// The largest number of texts accepted. The table has `max_size!` rows at most,
    /// so this bounds both the running time and the size of the output file.
    pub max_size: usize,
    /// Index of the first row. The survey tool counts rows from 1.
    pub first_row_index: u64,
}

impl TableRules {
    /// 10 texts is 3,628,800 rows, roughly 80MB of CSV. Anything above is not something
    /// that can be attached to a form.
    pub const DEFAULT_RULES: TableRules = TableRules {
        max_size: 10,
        first_row_index: 1,
    };
}

// ********* Errors **********

/// Errors that prevent a table from being built.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TableErrors {
    /// There is nothing to randomize.
    EmptySet,
    /// The number of permutations is too large to be enumerated under the current rules.
    TooLarge { size: usize, limit: usize },
    /// The limit itself cannot be honored.
    InvalidLimit(usize),
}

impl Error for TableErrors {}

impl Display for TableErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableErrors::EmptySet => write!(f, "at least one text is required"),
            TableErrors::TooLarge { size, limit } => write!(
                f,
                "{} texts would require {}! rows, the limit is {} texts",
                size, size, limit
            ),
            TableErrors::InvalidLimit(limit) => write!(
                f,
                "the limit must be between 1 and {} texts (got {})",
                MAX_CONFIGURABLE_SIZE, limit
            ),
        }
    }
}
