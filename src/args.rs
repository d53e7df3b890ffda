use clap::Parser;

/// Generates the permutation table and the form rows that randomize the order of a set of texts in SurveyCTO.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings of the generator.
    /// For more information about the file format, read the documentation of the `manual` module.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (directory, optional) The directory in which both files are written. It must exist.
    /// Setting this option overrides the directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (positive integer, optional) The number of texts to randomize.
    #[clap(short = 'n', long, value_parser)]
    pub size: Option<usize>,

    /// (repeated, optional) The texts to randomize, in order. Each occurence of the flag is one text.
    #[clap(short = 't', long = "text", value_parser)]
    pub texts: Vec<String>,

    /// (string, optional) The field type of the questions displaying the texts, for example "integer".
    /// With "select_one" or "select_multiple", the name of the list must be included.
    #[clap(long, value_parser)]
    pub field_type: Option<String>,

    /// (file path, optional) An Excel file generated previously. The texts are read from its 'choices' sheet.
    #[clap(long, value_parser)]
    pub labels_from: Option<String>,

    /// (default randomization.csv) The name of the permutation table.
    #[clap(long, value_parser)]
    pub csv_name: Option<String>,

    /// (default randomization.xlsx) The name of the Excel file with the 'survey' and 'choices' sheets.
    #[clap(long, value_parser)]
    pub xlsx_name: Option<String>,

    /// (default 10) The largest number of texts accepted. It cannot be more than 12.
    #[clap(long, value_parser)]
    pub max_texts: Option<usize>,

    /// (file path) A reference permutation table. If provided, surveyrand will
    /// check that the generated table matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
