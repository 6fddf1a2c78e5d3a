use std::path::PathBuf;

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

use super::BasePathsConfiguration;
use crate::configuration::{
    traits::ResolvableConfigurationWithContext,
    utilities::replace_placeholders_in_path,
};
use crate::weapon::WeaponLoader;


#[derive(Deserialize, Clone, Debug)]
pub(super) struct UnresolvedWeaponsConfiguration {
    weapon_directory_path: String,

    defaults_file_path: Option<String>,
}

#[derive(Clone, Debug)]
pub struct WeaponsConfiguration {
    /// Every `*.toml` file in this directory (recursively) is loaded as a weapon file.
    pub weapon_directory_path: PathBuf,

    /// Optional file with values every weapon falls back to.
    pub defaults_file_path: Option<PathBuf>,
}


impl ResolvableConfigurationWithContext for UnresolvedWeaponsConfiguration {
    type Resolved = WeaponsConfiguration;
    type Context = BasePathsConfiguration;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        // Relative paths are relative to the base data directory.
        let resolve_path = |path: String| {
            let path = replace_placeholders_in_path(path, context.placeholders_map());
            context.base_data_directory_path.join(path)
        };

        let weapon_directory_path = resolve_path(self.weapon_directory_path);
        let defaults_file_path = self.defaults_file_path.map(resolve_path);

        if let Some(defaults_file_path) = defaults_file_path.as_ref() {
            if !defaults_file_path.is_file() {
                return Err(miette!(
                    "Weapon defaults file {} does not exist.",
                    defaults_file_path.display()
                ));
            }
        }


        Ok(Self::Resolved {
            weapon_directory_path,
            defaults_file_path,
        })
    }
}

impl WeaponsConfiguration {
    /// Creates the weapon directory if it does not already exist.
    pub fn create_weapon_directory_if_not_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.weapon_directory_path)
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Failed to create missing weapon directory at {}.",
                    self.weapon_directory_path.display()
                )
            })
    }

    /// Returns a loader that applies the configured defaults file, if any.
    pub fn weapon_loader(&self) -> Result<WeaponLoader> {
        match self.defaults_file_path.as_ref() {
            Some(defaults_file_path) => WeaponLoader::new().with_defaults_from_path(defaults_file_path),
            None => Ok(WeaponLoader::new()),
        }
    }
}
