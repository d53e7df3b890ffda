// Primitives for writing the permutation table as CSV.

use std::io::Write;

use csv::Writer;

use crate::randomization::*;

/// Writes the header and all the rows of the table. Returns the number of rows written.
pub fn write_permutation_table<W: Write>(
    table: &PermutationTable,
    wtr: &mut Writer<W>,
) -> Result<u64, csv::Error> {
    wtr.write_record(table.header())?;
    let mut count: u64 = 0;
    for (idx, perm) in table.rows() {
        let record =
            std::iter::once(idx.to_string()).chain(perm.iter().map(|pos| pos.to_string()));
        wtr.write_record(record)?;
        count += 1;
        if count % 1_000_000 == 0 {
            debug!("write_permutation_table: {} rows", count);
        }
    }
    wtr.flush()?;
    Ok(count)
}

pub fn write_permutation_file(table: &PermutationTable, path: &Path) -> GenResult<u64> {
    let path_s = path.display().to_string();
    info!("Writing permutation table to {:?}", path_s);
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(WritingCsvSnafu {
            path: path_s.clone(),
        })?;
    write_permutation_table(table, &mut wtr).context(WritingCsvSnafu { path: path_s })
}
