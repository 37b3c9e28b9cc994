use std::path::Path;

use log::{ debug, info };

use crate::errors::DocCompareResult;
use crate::implementations::config::DocCompareConfig;

/// Picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "doccompare.yaml";

/// Load the configuration from `path`, or from `doccompare.yaml` in the
/// working directory if present. Otherwise the defaults apply.
pub fn load_config(path: Option<&Path>) -> DocCompareResult<DocCompareConfig> {
    if let Some(path) = path {
        info!("Loading configuration from {}", path.display());
        return Ok(DocCompareConfig::from_file(path)?);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        info!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
        return Ok(DocCompareConfig::from_file(default_path)?);
    }

    debug!("No configuration file, using defaults");
    Ok(DocCompareConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DocCompareError;
    use std::io::Write;

    #[test]
    fn test_explicit_path_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "data_dir: /srv/deals\nai_explanations: false").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.data_dir, Path::new("/srv/deals"));
        assert!(!config.ai_explanations);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/doccompare.yaml")));
        assert!(matches!(result, Err(DocCompareError::ConfigError(_))));
    }
}
