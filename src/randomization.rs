use log::{debug, info, warn};

use permutation_table::builder::Builder;
use permutation_table::*;
use snafu::{prelude::*, Snafu};

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use text_diff::print_diff;

use crate::args::Args;

pub mod config_reader;
pub mod io_choices;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod prompts;
pub mod survey;

use crate::randomization::config_reader::*;
use crate::randomization::io_common::*;
use crate::randomization::survey::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum GenError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the configuration: {source}"))]
    ParsingJson { source: serde_json::Error },

    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Missing worksheet '{name}'"))]
    MissingWorksheet { name: String },
    #[snafu(display("Missing column '{name}' in the header of the worksheet"))]
    MissingColumn { name: String },
    #[snafu(display("The worksheet is empty"))]
    EmptyExcel {},
    #[snafu(display("Could not understand the cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },

    #[snafu(display("Output directory {path:?} does not exist"))]
    MissingOutputDirectory { path: PathBuf },
    #[snafu(display("Please, enter a positive integer (got {input:?})"))]
    InvalidSize { input: String },
    #[snafu(display("Expected {expected} texts but {found} were provided"))]
    TextCountMismatch { expected: usize, found: usize },
    #[snafu(display("Cannot build the permutation table: {source}"))]
    Table { source: TableErrors },

    #[snafu(display("Error writing {path}: {source}"))]
    WritingCsv { source: csv::Error, path: String },
    #[snafu(display("Error writing {path}: {source}"))]
    WritingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Error reading file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid file name {name:?}: expected a name without a directory"))]
    InvalidFileName { name: String },
    #[snafu(display("The table and the template cannot both be named {name:?}"))]
    SameFileNames { name: String },
    #[snafu(display("Error writing {path}: {source}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading the input: {source}"))]
    Prompt { source: dialoguer::Error },
    #[snafu(display("Error reading the input: {source}"))]
    ReadingInput { source: std::io::Error },
    #[snafu(display("The input ended before all the answers were given"))]
    EndOfInput {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type GenResult<T> = Result<T, GenError>;

/// Everything needed to generate the files, once validated.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GeneratorInput {
    pub output_dir: PathBuf,
    pub csv_name: String,
    pub xlsx_name: String,
    pub field_type: String,
    pub texts: TextSet,
    pub rules: TableRules,
}

/// Where the files were written.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct GeneratorOutput {
    pub csv_path: PathBuf,
    pub xlsx_path: PathBuf,
    pub row_count: u64,
}

/// The output files are written directly in the output directory.
fn validate_file_name(name: String) -> GenResult<String> {
    if Path::new(&name).file_name() != Some(OsStr::new(&name)) {
        return InvalidFileNameSnafu { name }.fail();
    }
    Ok(name)
}

fn validate_rules(max_texts: Option<usize>) -> GenResult<TableRules> {
    let builder = Builder::new(&TableRules::DEFAULT_RULES).context(TableSnafu {})?;
    let builder = match max_texts {
        Some(limit) => builder.max_size(limit).context(TableSnafu {})?,
        None => builder,
    };
    Ok(*builder.rules())
}

/// Picks the texts from the first source that provides them: the command line,
/// a previous template, then the configuration file.
///
/// Returns None if the texts have to be asked for.
pub fn resolve_texts(
    size: Option<usize>,
    cli_texts: &[String],
    template_labels: Option<Vec<String>>,
    config_texts: Option<&Vec<String>>,
) -> GenResult<Option<Vec<String>>> {
    let texts: Option<Vec<String>> = if !cli_texts.is_empty() {
        Some(cli_texts.to_vec())
    } else if let Some(labels) = template_labels {
        Some(labels)
    } else {
        config_texts.cloned()
    };
    match (size, texts) {
        (Some(expected), Some(ts)) if ts.len() != expected => TextCountMismatchSnafu {
            expected,
            found: ts.len(),
        }
        .fail(),
        (_, texts) => Ok(texts),
    }
}

/// Gathers all the inputs, prompting for whatever is not provided by the flags or the
/// configuration file. Nothing is written.
pub fn collect_input(args: &Args) -> GenResult<GeneratorInput> {
    let config = match args.config.as_deref() {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    let config_ref = config.as_ref();
    info!("config: {:?}", config);

    let rules = validate_rules(args.max_texts.or(config_ref.and_then(|c| c.max_texts)))?;

    let csv_name = validate_file_name(
        args.csv_name
            .clone()
            .or(config_ref.and_then(|c| c.csv_name.clone()))
            .unwrap_or_else(|| DEFAULT_CSV_NAME.to_string()),
    )?;
    let xlsx_name = validate_file_name(
        args.xlsx_name
            .clone()
            .or(config_ref.and_then(|c| c.xlsx_name.clone()))
            .unwrap_or_else(|| DEFAULT_XLSX_NAME.to_string()),
    )?;
    ensure!(csv_name != xlsx_name, SameFileNamesSnafu { name: csv_name });

    let mut answers = prompts::Answers::from_stdin();

    // The directory is checked before anything else is asked.
    let output_dir = match (args.out.as_deref(), config_ref, args.config.as_deref()) {
        (Some(p), _, _) => prompts::validate_output_dir(p)?,
        (None, Some(c), Some(config_path)) if c.output_directory.is_some() => {
            let p = c.output_directory_from(Path::new(config_path))?;
            prompts::validate_output_dir(&p)?
        }
        _ => prompts::prompt_output_dir(&mut answers)?,
    };
    debug!("collect_input: output_dir: {:?}", output_dir);

    let size = match args.size {
        Some(n) => Some(prompts::check_size(n, &rules)?),
        None => None,
    };

    let template_labels = match args.labels_from.as_deref() {
        Some(p) => Some(io_choices::read_labels(p)?),
        None => None,
    };

    let texts = match resolve_texts(
        size,
        &args.texts,
        template_labels,
        config_ref.and_then(|c| c.texts.as_ref()),
    )? {
        Some(ts) => {
            prompts::check_size(ts.len(), &rules)?;
            ts
        }
        None => {
            let n = match size {
                Some(n) => n,
                None => prompts::prompt_size(&mut answers, &rules)?,
            };
            prompts::prompt_texts(&mut answers, n)?
        }
    };

    let field_type = match args
        .field_type
        .clone()
        .or(config_ref.and_then(|c| c.field_type.clone()))
    {
        Some(ft) => ft,
        None => prompts::prompt_field_type(&mut answers)?,
    };

    Ok(GeneratorInput {
        output_dir,
        csv_name,
        xlsx_name,
        field_type,
        texts: TextSet::new(texts)?,
        rules,
    })
}

/// Writes the permutation table and the template.
///
/// The table is validated and the workbook is serialized in memory before the first file is written.
pub fn run_generator(input: &GeneratorInput) -> GenResult<GeneratorOutput> {
    let table = build_table(input.texts.len(), &input.rules).context(TableSnafu {})?;
    info!(
        "run_generator: {} texts, {} permutations",
        table.size(),
        table.row_count()
    );

    let dataset = dataset_name(&input.csv_name);
    let spec = TemplateSpec {
        size: table.size(),
        permutations_max: table.row_count(),
        field_type: input.field_type.as_str(),
        dataset: dataset.as_str(),
    };
    let survey = survey_rows(&spec);
    let choices = choice_rows(&input.texts);
    let xlsx_path = output_path(&input.output_dir, &input.xlsx_name);
    let workbook = io_xlsx::workbook_bytes(&survey, &choices).context(WritingExcelSnafu {
        path: xlsx_path.display().to_string(),
    })?;

    let csv_path = output_path(&input.output_dir, &input.csv_name);
    let row_count = io_csv::write_permutation_file(&table, &csv_path)?;
    info!("Wrote {} rows to {:?}", row_count, csv_path);

    io_xlsx::save_workbook(&workbook, &xlsx_path)?;
    info!(
        "Wrote {} survey rows and {} choices to {:?}",
        survey.len(),
        choices.len(),
        xlsx_path
    );

    Ok(GeneratorOutput {
        csv_path,
        xlsx_path,
        row_count,
    })
}

/// Compares a generated table with a reference. Differences are printed as a diff.
pub fn check_reference(generated: &str, reference: &str) -> GenResult<()> {
    if generated != reference {
        warn!("Found differences with the reference table");
        print_diff(reference, generated, "\n");
        whatever!("Difference detected between the generated table and the reference table")
    }
    Ok(())
}

pub fn run(args: Args) -> GenResult<()> {
    // The reference table, if provided for comparison. It is read before anything is written.
    let reference = match args.reference.as_deref() {
        Some(reference_p) => Some((
            reference_p,
            fs::read_to_string(reference_p).context(OpeningReferenceSnafu { path: reference_p })?,
        )),
        None => None,
    };

    let input = collect_input(&args)?;
    info!("input: {:?}", input);
    let output = run_generator(&input)?;

    if let Some((reference_p, reference)) = reference {
        let generated =
            fs::read_to_string(&output.csv_path).context(OpeningReferenceSnafu {
                path: output.csv_path.display().to_string(),
            })?;
        check_reference(&generated, &reference)?;
        info!("The table matches the reference {:?}", reference_p);
    }

    println!(
        "Success! The files have been saved in \"{}\".",
        input.output_dir.display()
    );
    Ok(())
}
