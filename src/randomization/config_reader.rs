use crate::randomization::*;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CSV_NAME: &str = "randomization.csv";
pub const DEFAULT_XLSX_NAME: &str = "randomization.xlsx";

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenConfig {
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "csvName")]
    pub csv_name: Option<String>,
    #[serde(rename = "xlsxName")]
    pub xlsx_name: Option<String>,
    #[serde(rename = "fieldType")]
    pub field_type: Option<String>,
    pub texts: Option<Vec<String>>,
    #[serde(rename = "maxTexts")]
    pub max_texts: Option<usize>,
}

impl GenConfig {
    /// The output directory. A relative path is resolved against the directory of the
    /// configuration file.
    pub fn output_directory_from(&self, config_path: &Path) -> GenResult<PathBuf> {
        let dir = match self.output_directory.as_deref() {
            Some(d) => Path::new(d),
            None => whatever!("No output directory in the configuration"),
        };
        if dir.is_absolute() {
            return Ok(dir.to_path_buf());
        }
        let root = config_path.parent().unwrap_or_else(|| Path::new(""));
        Ok(root.join(dir))
    }
}

pub fn parse_config(contents: &str) -> GenResult<GenConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

pub fn read_config(path: &str) -> GenResult<GenConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: {:?}", contents);
    parse_config(&contents)
}
