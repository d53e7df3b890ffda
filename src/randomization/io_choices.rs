use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use std::io::{Read, Seek};

use crate::randomization::*;

/// Reads the labels of the texts from the 'choices' sheet of a template generated previously.
/// The labels are returned in the order of their codes.
pub fn read_labels(path: &str) -> GenResult<Vec<String>> {
    info!("Reading labels from {:?}", path);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    labels_from_workbook(&mut workbook, path)
}

pub fn labels_from_workbook<RS: Read + Seek>(
    workbook: &mut Xlsx<RS>,
    path: &str,
) -> GenResult<Vec<String>> {
    let wrange = workbook
        .worksheet_range(CHOICES_SHEET)
        .context(MissingWorksheetSnafu {
            name: CHOICES_SHEET,
        })?
        .context(OpeningExcelSnafu { path })?;
    labels_from_range(&wrange)
}

fn column_index(header: &[DataType], name: &str) -> GenResult<usize> {
    header
        .iter()
        .position(|cell| matches!(cell, DataType::String(s) if s.trim() == name))
        .context(MissingColumnSnafu { name })
}

fn read_code(cell: Option<&DataType>, lineno: u64) -> GenResult<Option<u64>> {
    match cell {
        None | Some(DataType::Empty) => Ok(None),
        Some(DataType::Int(i)) if *i > 0 => Ok(Some(*i as u64)),
        Some(DataType::Float(f)) if *f >= 1.0 && f.fract() == 0.0 => Ok(Some(*f as u64)),
        Some(DataType::String(s)) => match s.trim().parse::<u64>() {
            Ok(x) if x > 0 => Ok(Some(x)),
            _ => ExcelWrongCellTypeSnafu {
                lineno,
                content: s.clone(),
            }
            .fail(),
        },
        Some(c) => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", c),
        }
        .fail(),
    }
}

fn read_label(cell: Option<&DataType>, lineno: u64) -> GenResult<String> {
    match cell {
        Some(DataType::String(s)) => Ok(s.clone()),
        Some(DataType::Int(i)) => Ok(i.to_string()),
        Some(DataType::Float(f)) => Ok(f.to_string()),
        c => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", c),
        }
        .fail(),
    }
}

fn labels_from_range(wrange: &Range<DataType>) -> GenResult<Vec<String>> {
    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyExcelSnafu {})?;
    debug!("labels_from_range: header: {:?}", header);
    let value_col = column_index(header, CHOICES_COLUMNS[1])?;
    let label_col = column_index(header, CHOICES_COLUMNS[2])?;

    let mut entries: Vec<(u64, String)> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // Line numbers as displayed in Excel: the header is on line 1.
        let lineno = (idx + 2) as u64;
        let code = match read_code(row.get(value_col), lineno)? {
            Some(code) => code,
            None => {
                debug!("labels_from_range: skipping line {:?}: {:?}", lineno, row);
                continue;
            }
        };
        let label = read_label(row.get(label_col), lineno)?;
        entries.push((code, label));
    }
    entries.sort_by_key(|(code, _)| *code);

    let codes: Vec<u64> = entries.iter().map(|(code, _)| *code).collect();
    let expected: Vec<u64> = (1..=entries.len() as u64).collect();
    if codes != expected {
        whatever!(
            "The codes of the choices should be 1 to {}, found {:?}",
            entries.len(),
            codes
        )
    }
    Ok(entries.into_iter().map(|(_, label)| label).collect())
}
