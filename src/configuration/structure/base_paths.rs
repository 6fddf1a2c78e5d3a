use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

use crate::configuration::traits::ResolvableConfigurationWithContext;


#[derive(Deserialize, Debug)]
pub(super) struct UnresolvedBasePathsConfiguration {
    base_data_directory_path: String,
}

#[derive(Debug, Clone)]
pub struct BasePathsConfiguration {
    /// Canonical path of the data directory. Available as `{BASE_DATA_DIRECTORY}`
    /// in the other path fields.
    pub base_data_directory_path: PathBuf,
}

impl ResolvableConfigurationWithContext for UnresolvedBasePathsConfiguration {
    type Resolved = BasePathsConfiguration;
    /// Directory of the configuration file. Relative paths are resolved against it.
    type Context = PathBuf;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        let base_data_directory_path = resolve_relative_to(&context, &self.base_data_directory_path);

        if base_data_directory_path.exists() && !base_data_directory_path.is_dir() {
            return Err(miette!(
                "Base data directory path {} exists, but is not a directory!",
                base_data_directory_path.display()
            ));
        }

        if !base_data_directory_path.is_dir() {
            std::fs::create_dir_all(&base_data_directory_path)
                .into_diagnostic()
                .wrap_err("Failed to create missing base data directory.")?;
        }


        let base_data_directory_path = dunce::canonicalize(base_data_directory_path)
            .into_diagnostic()
            .wrap_err("Failed to canonicalize base data directory path.")?;


        Ok(BasePathsConfiguration {
            base_data_directory_path,
        })
    }
}

fn resolve_relative_to(directory: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);

    if path.is_absolute() {
        path
    } else {
        directory.join(path)
    }
}


impl BasePathsConfiguration {
    pub fn placeholders_map(&self) -> HashMap<&'static str, String> {
        let mut placeholders_map = HashMap::with_capacity(1);

        placeholders_map.insert(
            "{BASE_DATA_DIRECTORY}",
            self.base_data_directory_path.to_string_lossy().to_string(),
        );

        placeholders_map
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_follow_the_configuration_file() {
        let directory = tempfile::tempdir().unwrap();
        let unresolved = UnresolvedBasePathsConfiguration {
            base_data_directory_path: "server-data".to_string(),
        };

        let resolved = unresolved.resolve(directory.path().to_path_buf()).unwrap();

        assert!(resolved.base_data_directory_path.is_dir());
        assert!(resolved.base_data_directory_path.ends_with("server-data"));
    }

    #[test]
    fn files_are_not_directories() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(directory.path().join("data"), "").unwrap();

        let unresolved = UnresolvedBasePathsConfiguration {
            base_data_directory_path: "data".to_string(),
        };
        assert!(unresolved.resolve(directory.path().to_path_buf()).is_err());
    }
}
