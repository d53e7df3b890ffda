//! The rows of the `survey` and `choices` sheets.
//!
//! The rows are plain records. Laying them out in a workbook is done by `io_xlsx`.

use crate::randomization::*;

pub const SURVEY_SHEET: &str = "survey";
pub const CHOICES_SHEET: &str = "choices";

pub const SURVEY_COLUMNS: [&str; 5] = ["type", "name", "label", "relevance", "calculation"];
pub const CHOICES_COLUMNS: [&str; 3] = ["list_name", "value", "label"];

/// The list of the texts in the `choices` sheet.
pub const TEXTS_LIST: &str = "texts";

const GROUP_NAME: &str = "randomization_group";
const GROUP_LABEL: &str = "Randomization module";

/// The texts to randomize, in the order in which they were entered.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TextSet(Vec<String>);

impl TextSet {
    pub fn new(texts: Vec<String>) -> GenResult<TextSet> {
        if texts.is_empty() {
            return Err(GenError::Table {
                source: TableErrors::EmptySet,
            });
        }
        Ok(TextSet(texts))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CellValue {
    Text(String),
    Number(u64),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> CellValue {
        CellValue::Text(s)
    }
}

/// One row of the `survey` sheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyRow {
    pub field_type: String,
    pub name: String,
    pub label: String,
    pub relevance: Option<String>,
    pub calculation: Option<CellValue>,
}

impl SurveyRow {
    pub fn new(field_type: &str, name: &str, label: &str) -> SurveyRow {
        SurveyRow {
            field_type: field_type.to_string(),
            name: name.to_string(),
            label: label.to_string(),
            relevance: None,
            calculation: None,
        }
    }

    pub fn relevance(self, relevance: &str) -> SurveyRow {
        SurveyRow {
            relevance: Some(relevance.to_string()),
            ..self
        }
    }

    pub fn calculation(self, calculation: impl Into<CellValue>) -> SurveyRow {
        SurveyRow {
            calculation: Some(calculation.into()),
            ..self
        }
    }

    /// The content of the row, one entry per column of `SURVEY_COLUMNS`.
    pub fn cells(&self) -> [Option<CellValue>; 5] {
        [
            Some(self.field_type.as_str().into()),
            Some(self.name.as_str().into()),
            Some(self.label.as_str().into()),
            self.relevance.clone().map(CellValue::Text),
            self.calculation.clone(),
        ]
    }
}

/// One row of the `choices` sheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChoiceRow {
    pub list_name: String,
    pub value: u64,
    pub label: String,
}

impl ChoiceRow {
    pub fn cells(&self) -> [CellValue; 3] {
        [
            self.list_name.as_str().into(),
            CellValue::Number(self.value),
            self.label.as_str().into(),
        ]
    }
}

/// What the `survey` sheet depends on.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TemplateSpec<'a> {
    pub size: usize,
    /// The number of rows of the permutation table.
    pub permutations_max: u64,
    /// The type of the questions that display the texts.
    pub field_type: &'a str,
    /// The name of the permutation table in the form.
    pub dataset: &'a str,
}

/// The fields that draw a row of the permutation table.
pub fn selection_rows(permutations_max: u64) -> Vec<SurveyRow> {
    vec![
        SurveyRow::new(
            &format!("select_one {}", TEXTS_LIST),
            TEXTS_LIST,
            "Field used to load the reference to the various texts",
        )
        .relevance("no"),
        SurveyRow::new("calculate", "permutations_max", "Maximum number of permutations")
            .calculation(CellValue::Number(permutations_max)),
        SurveyRow::new("calculate", "permutation_number", "Random number generator")
            .calculation("once(random())"),
        SurveyRow::new(
            "calculate",
            "permutation_selection",
            "Selection of permutation based on random number generated",
        )
        .calculation(
            "if(${permutation_number} = 1, ${permutations_max}, int(${permutation_number}*${permutations_max})+1)",
        ),
    ]
}

/// The pair of fields that load the code and the label of the text at position `position` (1-based).
pub fn text_reference_rows(position: usize, dataset: &str) -> [SurveyRow; 2] {
    let code_name = format!("text_{}_code", position);
    [
        SurveyRow::new(
            "calculate",
            &code_name,
            &format!("Text {}: code", position),
        )
        .calculation(format!(
            "pulldata(\"{}\", \"{}{}\", \"{}\", ${{permutation_selection}})",
            dataset, COLUMN_PREFIX, position, INDEX_LABEL
        )),
        SurveyRow::new(
            "calculate_here",
            &format!("text_{}_label", position),
            &format!("Text {}: label", position),
        )
        .calculation(format!(
            "jr:choice-name(${{{}}}, \"${{{}}}\")",
            code_name, TEXTS_LIST
        )),
    ]
}

/// The group that displays the texts in the drawn order.
pub fn display_group_rows(size: usize, field_type: &str) -> Vec<SurveyRow> {
    let mut rows = vec![
        SurveyRow::new("begin_group", GROUP_NAME, GROUP_LABEL),
        SurveyRow::new(
            "note",
            "randomization_note",
            "Note of randomization module",
        ),
    ];
    rows.extend((1..=size).map(|position| {
        SurveyRow::new(
            field_type,
            &format!("text_{}", position),
            &format!("{}. ${{text_{}_label}}", position, position),
        )
    }));
    rows.push(SurveyRow::new("end_group", GROUP_NAME, GROUP_LABEL));
    rows
}

/// All the rows of the `survey` sheet, below the header.
pub fn survey_rows(spec: &TemplateSpec) -> Vec<SurveyRow> {
    let mut rows = selection_rows(spec.permutations_max);
    for position in 1..=spec.size {
        rows.extend(text_reference_rows(position, spec.dataset));
    }
    rows.extend(display_group_rows(spec.size, spec.field_type));
    debug!("survey_rows: {} rows for {} texts", rows.len(), spec.size);
    rows
}

/// The rows of the `choices` sheet, below the header. Codes start at 1.
pub fn choice_rows(texts: &TextSet) -> Vec<ChoiceRow> {
    texts
        .labels()
        .iter()
        .enumerate()
        .map(|(idx, label)| ChoiceRow {
            list_name: TEXTS_LIST.to_string(),
            value: (idx + 1) as u64,
            label: label.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(size: usize) -> TemplateSpec<'static> {
        TemplateSpec {
            size,
            permutations_max: factorial(size).unwrap(),
            field_type: "integer",
            dataset: "randomization",
        }
    }

    fn text(row: &SurveyRow) -> Option<&str> {
        match &row.calculation {
            Some(CellValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    #[test]
    fn empty_text_set() {
        assert!(matches!(
            TextSet::new(vec![]),
            Err(GenError::Table {
                source: TableErrors::EmptySet
            })
        ));
    }

    #[test]
    fn selection_block() {
        let rows = survey_rows(&spec(4));
        assert_eq!(rows[0].field_type, "select_one texts");
        assert_eq!(rows[0].name, "texts");
        assert_eq!(rows[0].relevance.as_deref(), Some("no"));
        assert_eq!(rows[1].name, "permutations_max");
        assert_eq!(rows[1].calculation, Some(CellValue::Number(24)));
        assert_eq!(text(&rows[2]), Some("once(random())"));
        assert_eq!(
            text(&rows[3]),
            Some("if(${permutation_number} = 1, ${permutations_max}, int(${permutation_number}*${permutations_max})+1)")
        );
    }

    #[test]
    fn maximum_is_factorial() {
        for size in 1..=8 {
            let rows = survey_rows(&spec(size));
            assert_eq!(
                rows[1].calculation,
                Some(CellValue::Number(factorial(size).unwrap()))
            );
        }
    }

    #[test]
    fn text_references() {
        let rows = survey_rows(&spec(3));
        let code = &rows[4];
        let label = &rows[5];
        assert_eq!(code.field_type, "calculate");
        assert_eq!(code.name, "text_1_code");
        assert_eq!(code.label, "Text 1: code");
        assert_eq!(
            text(code),
            Some("pulldata(\"randomization\", \"v1\", \"permutation\", ${permutation_selection})")
        );
        assert_eq!(label.field_type, "calculate_here");
        assert_eq!(label.name, "text_1_label");
        assert_eq!(text(label), Some("jr:choice-name(${text_1_code}, \"${texts}\")"));
        assert_eq!(rows[8].name, "text_3_code");
        assert_eq!(rows[9].name, "text_3_label");
    }

    #[test]
    fn display_group() {
        let size = 3;
        let rows = survey_rows(&spec(size));
        assert_eq!(rows.len(), 4 + 2 * size + size + 3);
        let group = &rows[4 + 2 * size..];
        assert_eq!(group[0].field_type, "begin_group");
        assert_eq!(group[0].name, "randomization_group");
        assert_eq!(group[1].field_type, "note");
        assert_eq!(group[2].field_type, "integer");
        assert_eq!(group[2].name, "text_1");
        assert_eq!(group[2].label, "1. ${text_1_label}");
        assert_eq!(group[4].label, "3. ${text_3_label}");
        assert_eq!(group[5].field_type, "end_group");
        assert_eq!(group[5].label, "Randomization module");
    }

    #[test]
    fn cells_follow_columns() {
        let row = SurveyRow::new("calculate", "x", "y").calculation("1 + 1");
        let cells = row.cells();
        assert_eq!(cells.len(), SURVEY_COLUMNS.len());
        assert_eq!(cells[0], Some(CellValue::Text("calculate".to_string())));
        assert_eq!(cells[3], None);
        assert_eq!(cells[4], Some(CellValue::Text("1 + 1".to_string())));
    }

    #[test]
    fn choices_in_input_order() {
        let texts =
            TextSet::new(vec!["b".to_string(), "a".to_string(), "c".to_string()]).unwrap();
        let rows = choice_rows(&texts);
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|r| r.value).collect::<Vec<u64>>(),
            vec![1, 2, 3]
        );
        assert_eq!(rows[0].label, "b");
        assert_eq!(rows[2].label, "c");
        assert!(rows.iter().all(|r| r.list_name == "texts"));
    }
}
