use std::path::{Path, PathBuf};

/// The name under which the table is attached to the form: the file name without its extension.
/// It is the first argument of `pulldata`.
pub fn dataset_name(csv_name: &str) -> String {
    let path = Path::new(csv_name);
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| csv_name.to_string())
}

pub fn output_path(dir: &Path, file_name: &str) -> PathBuf {
    dir.join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_names() {
        assert_eq!(dataset_name("randomization.csv"), "randomization");
        assert_eq!(dataset_name("my.order.csv"), "my.order");
        assert_eq!(dataset_name("order"), "order");
    }

    #[test]
    fn output_paths() {
        assert_eq!(
            output_path(Path::new("/tmp/forms"), "randomization.csv"),
            PathBuf::from("/tmp/forms/randomization.csv")
        );
    }
}
