// Writes the 'survey' and 'choices' sheets.

use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet, XlsxError};

use crate::randomization::*;

fn write_cell(
    sheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &CellValue,
) -> Result<(), XlsxError> {
    match value {
        CellValue::Text(s) => sheet.write_string(row, col, s)?,
        // Factorials up to 20! are exact as f64: their odd part is small.
        CellValue::Number(n) => sheet.write_number(row, col, *n as f64)?,
    };
    Ok(())
}

fn write_header(sheet: &mut Worksheet, columns: &[&str]) -> Result<(), XlsxError> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string(0, col as ColNum, *name)?;
    }
    Ok(())
}

fn write_survey_sheet(sheet: &mut Worksheet, rows: &[SurveyRow]) -> Result<(), XlsxError> {
    sheet.set_name(SURVEY_SHEET)?;
    write_header(sheet, &SURVEY_COLUMNS)?;
    for (idx, survey_row) in rows.iter().enumerate() {
        let row = (idx + 1) as RowNum;
        for (col, cell) in survey_row.cells().iter().enumerate() {
            if let Some(value) = cell {
                write_cell(sheet, row, col as ColNum, value)?;
            }
        }
    }
    sheet.autofit();
    Ok(())
}

fn write_choices_sheet(sheet: &mut Worksheet, rows: &[ChoiceRow]) -> Result<(), XlsxError> {
    sheet.set_name(CHOICES_SHEET)?;
    write_header(sheet, &CHOICES_COLUMNS)?;
    for (idx, choice) in rows.iter().enumerate() {
        let row = (idx + 1) as RowNum;
        for (col, value) in choice.cells().iter().enumerate() {
            write_cell(sheet, row, col as ColNum, value)?;
        }
    }
    sheet.autofit();
    Ok(())
}

/// Assembles the workbook in memory.
pub fn build_workbook(survey: &[SurveyRow], choices: &[ChoiceRow]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    write_survey_sheet(workbook.add_worksheet(), survey)?;
    write_choices_sheet(workbook.add_worksheet(), choices)?;
    Ok(workbook)
}

/// The content of the template file.
pub fn workbook_bytes(survey: &[SurveyRow], choices: &[ChoiceRow]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = build_workbook(survey, choices)?;
    workbook.save_to_buffer()
}

pub fn save_workbook(content: &[u8], path: &Path) -> GenResult<()> {
    let path_s = path.display().to_string();
    info!("Writing template to {:?} ({} bytes)", path_s, content.len());
    fs::write(path, content).context(WritingFileSnafu { path: path_s })
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{DataType, Reader, Xlsx};
    use std::io::Cursor;

    fn round_trip(size: usize, field_type: &str) -> Xlsx<Cursor<Vec<u8>>> {
        let labels: Vec<String> = (1..=size).map(|i| format!("text number {}", i)).collect();
        let texts = TextSet::new(labels).unwrap();
        let spec = TemplateSpec {
            size,
            permutations_max: factorial(size).unwrap(),
            field_type,
            dataset: "randomization",
        };
        let mut workbook = build_workbook(&survey_rows(&spec), &choice_rows(&texts)).unwrap();
        let buf = workbook.save_to_buffer().unwrap();
        Xlsx::new(Cursor::new(buf)).unwrap()
    }

    fn string_at(range: &calamine::Range<DataType>, row: u32, col: u32) -> String {
        match range.get_value((row, col)) {
            Some(DataType::String(s)) => s.clone(),
            other => panic!("not a string at ({}, {}): {:?}", row, col, other),
        }
    }

    fn number_at(range: &calamine::Range<DataType>, row: u32, col: u32) -> f64 {
        match range.get_value((row, col)) {
            Some(DataType::Float(f)) => *f,
            Some(DataType::Int(i)) => *i as f64,
            other => panic!("not a number at ({}, {}): {:?}", row, col, other),
        }
    }

    #[test]
    fn sheet_names() {
        let workbook = round_trip(2, "integer");
        assert_eq!(workbook.sheet_names().to_vec(), vec!["survey", "choices"]);
    }

    #[test]
    fn survey_layout() {
        let mut workbook = round_trip(3, "select_one yesno");
        let range = workbook.worksheet_range("survey").unwrap().unwrap();
        for (col, name) in SURVEY_COLUMNS.iter().enumerate() {
            assert_eq!(string_at(&range, 0, col as u32), *name);
        }
        assert_eq!(string_at(&range, 1, 0), "select_one texts");
        assert_eq!(string_at(&range, 1, 3), "no");
        assert_eq!(string_at(&range, 2, 1), "permutations_max");
        assert_eq!(number_at(&range, 2, 4), 6.0);
        assert_eq!(string_at(&range, 3, 4), "once(random())");
        assert_eq!(string_at(&range, 5, 1), "text_1_code");
        assert_eq!(string_at(&range, 10, 1), "text_3_label");
        assert_eq!(string_at(&range, 11, 0), "begin_group");
        assert_eq!(string_at(&range, 13, 0), "select_one yesno");
        assert_eq!(string_at(&range, 15, 2), "3. ${text_3_label}");
        assert_eq!(string_at(&range, 16, 0), "end_group");
        assert_eq!(range.height(), 17);
    }

    #[test]
    fn maximum_is_factorial() {
        let mut workbook = round_trip(7, "integer");
        let range = workbook.worksheet_range("survey").unwrap().unwrap();
        assert_eq!(number_at(&range, 2, 4), 5040.0);
    }

    #[test]
    fn choices_layout() {
        let mut workbook = round_trip(4, "integer");
        let range = workbook.worksheet_range("choices").unwrap().unwrap();
        assert_eq!(string_at(&range, 0, 0), "list_name");
        assert_eq!(string_at(&range, 0, 1), "value");
        assert_eq!(string_at(&range, 0, 2), "label");
        // Header and one row per text.
        assert_eq!(range.height(), 5);
        for row in 1..=4u32 {
            assert_eq!(string_at(&range, row, 0), "texts");
            assert_eq!(number_at(&range, row, 1), row as f64);
            assert_eq!(string_at(&range, row, 2), format!("text number {}", row));
        }
    }
}
