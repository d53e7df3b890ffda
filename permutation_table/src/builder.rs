pub use crate::config::*;

use crate::{build_table, PermutationTable};

/// A builder for the rules of a table.
///
/// ```
/// use permutation_table::builder::Builder;
/// use permutation_table::TableRules;
/// # use permutation_table::TableErrors;
///
/// let table = Builder::new(&TableRules::DEFAULT_RULES)?
///     .max_size(12)?
///     .build(3)?;
///
/// assert_eq!(table.row_count(), 6);
///
/// # Ok::<(), TableErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: TableRules,
}

impl Builder {
    pub fn new(rules: &TableRules) -> Result<Builder, TableErrors> {
        Ok(Builder { _rules: *rules })
    }

    /// Changes the largest number of texts accepted.
    ///
    /// The limit cannot go beyond the size of the largest table that can be written.
    pub fn max_size(self, limit: usize) -> Result<Builder, TableErrors> {
        if limit == 0 || limit > MAX_CONFIGURABLE_SIZE {
            return Err(TableErrors::InvalidLimit(limit));
        }
        Ok(Builder {
            _rules: TableRules {
                max_size: limit,
                ..self._rules
            },
        })
    }

    pub fn rules(&self) -> &TableRules {
        &self._rules
    }

    pub fn build(&self, size: usize) -> Result<PermutationTable, TableErrors> {
        build_table(size, &self._rules)
    }
}
