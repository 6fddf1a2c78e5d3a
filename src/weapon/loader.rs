use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Report, Result};
use tracing::{debug, info, warn};

use super::{Weapon, WeaponSerializer};
use crate::file::{
    ConfigPath,
    ConfigurationDocument,
    SerializeData,
    Serializer,
    SerializerError,
    Table,
    TomlDocument,
    Value,
};


/// The outcome of loading one or more weapon files.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully loaded weapons, in load order.
    pub weapons: Vec<Weapon>,
    /// One error per weapon that could not be loaded.
    pub failures: Vec<SerializerError>,
    /// Files that could not be read or parsed at all.
    pub file_failures: Vec<Report>,
    pub files_loaded: usize,
}

impl LoadReport {
    pub fn weapon(&self, title: &str) -> Option<&Weapon> {
        self.weapons.iter().find(|weapon| weapon.title == title)
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Failed weapons plus failed files.
    pub fn failure_count(&self) -> usize {
        self.failures.len() + self.file_failures.len()
    }

    /// Appends everything from `other`.
    pub fn merge(&mut self, other: LoadReport) {
        self.weapons.extend(other.weapons);
        self.failures.extend(other.failures);
        self.file_failures.extend(other.file_failures);
        self.files_loaded += other.files_loaded;
    }
}


/// Loads weapon files. A weapon with a mistake in it is reported and skipped,
/// the rest of the file keeps loading.
#[derive(Debug, Default)]
pub struct WeaponLoader {
    /// Values every weapon falls back to, keyed relative to the weapon.
    defaults: Option<Table>,
    /// Where each loaded title was first defined.
    titles: HashMap<String, PathBuf>,
}

impl WeaponLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the values in `defaults` for any key a weapon does not set itself.
    /// Required keys still have to be set by every weapon.
    #[must_use = "function returns the modified loader"]
    pub fn with_defaults(mut self, defaults: Table) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Reads the defaults from a TOML file.
    pub fn with_defaults_from_path<P: AsRef<Path>>(self, defaults_file_path: P) -> Result<Self> {
        let defaults = TomlDocument::load_from_path(defaults_file_path.as_ref())
            .wrap_err("Failed to load weapon defaults.")?;

        Ok(self.with_defaults(defaults.root().clone()))
    }

    fn prepare(&self, document: TomlDocument) -> TomlDocument {
        let Some(defaults) = &self.defaults else {
            return document;
        };

        let per_weapon: Table = document
            .root()
            .keys()
            .map(|title| (title.clone(), Value::Table(defaults.clone())))
            .collect();

        document.with_defaults(per_weapon)
    }

    /// Loads every weapon defined in `document`.
    pub fn load_document(&mut self, document: TomlDocument) -> LoadReport {
        let document = self.prepare(document);
        let mut report = LoadReport {
            files_loaded: 1,
            ..LoadReport::default()
        };

        for title in document.get_keys(&ConfigPath::root()) {
            let data = SerializeData::for_serializer(&WeaponSerializer, &document, ConfigPath::segment(title.as_str()));

            if let Some(first_source) = self.titles.get(&title) {
                warn!("Duplicate weapon title {} in {}.", title, document.source().display());
                report.failures.push(data.exception(
                    "",
                    [
                        format!("The weapon title '{title}' is already used."),
                        format!("It was first defined in {}.", first_source.display()),
                        "Weapon titles must be unique across all weapon files.".to_string(),
                    ],
                ));
                continue;
            }

            match WeaponSerializer.serialize(&data) {
                Ok(weapon) => {
                    debug!("Loaded weapon {}.", weapon.title);
                    self.titles
                        .insert(title, document.source().to_path_buf());
                    report.weapons.push(weapon);
                }
                Err(error) => {
                    warn!("Failed to load weapon {}: {}", title, error);
                    report.failures.push(error);
                }
            }
        }

        report
    }

    /// Loads every weapon in the TOML file at `file_path`.
    ///
    /// File system and TOML syntax errors fail the whole file.
    pub fn load_file<P: AsRef<Path>>(&mut self, file_path: P) -> Result<LoadReport> {
        let file_path = file_path.as_ref();
        let document = TomlDocument::load_from_path(file_path)?;

        let report = self.load_document(document);
        info!(
            "Loaded {} weapon(s) from {} ({} failed).",
            report.weapons.len(),
            file_path.display(),
            report.failures.len()
        );

        Ok(report)
    }

    /// Loads every `*.toml` file in `directory_path` and its subdirectories,
    /// in file name order.
    ///
    /// A file that cannot be read or parsed is recorded in
    /// [`LoadReport::file_failures`] and the remaining files are still loaded.
    /// Only failing to list the directory itself is an error.
    pub fn load_directory<P: AsRef<Path>>(&mut self, directory_path: P) -> Result<LoadReport> {
        let directory_path = directory_path.as_ref();

        let mut file_paths = Vec::new();
        collect_toml_files(directory_path, &mut file_paths).wrap_err_with(|| {
            miette!(
                "Failed to list weapon files in {}.",
                directory_path.display()
            )
        })?;
        file_paths.sort();

        let mut report = LoadReport::default();
        for file_path in file_paths {
            match self.load_file(&file_path) {
                Ok(file_report) => report.merge(file_report),
                Err(error) => {
                    warn!("Skipping weapon file {}: {}", file_path.display(), error);
                    report.file_failures.push(error);
                }
            }
        }

        Ok(report)
    }
}

fn collect_toml_files(directory_path: &Path, file_paths: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(directory_path)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not read directory {}.", directory_path.display()))?;

    for entry in entries {
        let entry_path = entry.into_diagnostic()?.path();

        if entry_path.is_dir() {
            collect_toml_files(&entry_path, file_paths)?;
        } else if entry_path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("toml"))
        {
            file_paths.push(entry_path);
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::file::SerializerErrorKind;

    const WEAPONS: &str = r#"
        [AK47.Info]
        Display_Name = "&6AK-47"

        [AK47.Reload]
        Magazine_Size = 30
        Reload_Duration = 40

        [Broken.Reload]
        Magazine_Size = -1
        Reload_Duration = 40

        [Knife]
        Info = { Display_Name = "Knife" }
    "#;

    #[test]
    fn failing_weapons_do_not_stop_the_file() {
        let document = TomlDocument::parse("weapons.toml", WEAPONS).unwrap();
        let report = WeaponLoader::new().load_document(document);

        let titles: Vec<_> = report.weapons.iter().map(|weapon| weapon.title.as_str()).collect();
        assert_eq!(titles, ["AK47", "Knife"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind(), SerializerErrorKind::OutOfRange);
        assert!(report.failures[0].location().ends_with("Broken.Reload.Magazine_Size"));
    }

    #[test]
    fn duplicate_titles_are_reported() {
        let mut loader = WeaponLoader::new();
        loader.load_document(TomlDocument::parse("first.toml", "[Knife]\nInfo = {}").unwrap());
        let report = loader.load_document(TomlDocument::parse("second.toml", "[Knife]\nInfo = {}").unwrap());

        assert!(report.weapons.is_empty());
        assert_eq!(report.failures[0].kind(), SerializerErrorKind::General);
        assert!(report.failures[0].messages()[1].contains("first.toml"));
    }

    #[test]
    fn defaults_fill_optional_keys_only() {
        let defaults = toml::from_str::<Table>("[Reload]\nReload_Duration = 20\nAmmo_Per_Reload = 1").unwrap();
        let document = TomlDocument::parse(
            "weapons.toml",
            "[Shotgun.Reload]\nMagazine_Size = 6\nReload_Duration = 10\n\n[Pistol.Reload]\nMagazine_Size = 8",
        )
        .unwrap();

        let report = WeaponLoader::new().with_defaults(defaults).load_document(document);

        let shotgun = report.weapon("Shotgun").unwrap().reload.as_ref().unwrap();
        assert_eq!(shotgun.reload_duration, 10);
        assert_eq!(shotgun.ammo_per_reload, Some(1));

        // Reload_Duration is required, so a default does not count.
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind(), SerializerErrorKind::MissingKey);
    }

    #[test]
    fn directories_are_walked_recursively() {
        let directory = tempfile::tempdir().unwrap();
        fs::create_dir(directory.path().join("rifles")).unwrap();
        fs::write(directory.path().join("axe.toml"), "[Axe]\nInfo = {}").unwrap();
        fs::write(directory.path().join("rifles/ak47.toml"), WEAPONS).unwrap();
        fs::write(directory.path().join("notes.txt"), "not a weapon").unwrap();

        let report = WeaponLoader::new().load_directory(directory.path()).unwrap();

        assert_eq!(report.files_loaded, 2);
        assert_eq!(report.weapons.len(), 3);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn syntax_errors_fail_the_file() {
        let directory = tempfile::tempdir().unwrap();
        let file_path = directory.path().join("broken.toml");
        fs::write(&file_path, "[Knife\nInfo = {}").unwrap();

        assert!(WeaponLoader::new().load_file(&file_path).is_err());
    }

    #[test]
    fn broken_files_do_not_stop_the_directory() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(directory.path().join("a_good.toml"), "[Axe]\nInfo = {}").unwrap();
        fs::write(directory.path().join("b_broken.toml"), "[Knife\nInfo = {}").unwrap();
        fs::write(directory.path().join("c_good.toml"), "[Sword]\nInfo = {}").unwrap();

        let report = WeaponLoader::new().load_directory(directory.path()).unwrap();

        let titles: Vec<_> = report.weapons.iter().map(|weapon| weapon.title.as_str()).collect();
        assert_eq!(titles, ["Axe", "Sword"]);
        assert_eq!(report.files_loaded, 2);
        assert_eq!(report.file_failures.len(), 1);
        assert!(format!("{:?}", report.file_failures[0]).contains("b_broken.toml"));
        assert!(report.has_failures());
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn bundled_weapons_load_cleanly() {
        let data_directory = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");

        let report = WeaponLoader::new()
            .with_defaults_from_path(data_directory.join("weapon-defaults.toml"))
            .unwrap()
            .load_directory(data_directory.join("weapons"))
            .unwrap();

        assert!(!report.has_failures(), "{:?} {:?}", report.failures, report.file_failures);
        assert_eq!(report.weapons.len(), 2);

        let ak47 = report.weapon("AK47").unwrap();
        assert_eq!(ak47.display_name, "<gold>AK-47");

        let reload = ak47.reload.as_ref().unwrap();
        assert_eq!(reload.start_mechanics.as_ref().unwrap().units().len(), 3);
        // The finish sound comes from the defaults file.
        assert_eq!(reload.finish_mechanics.as_ref().unwrap().units().len(), 2);
    }
}
