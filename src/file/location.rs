use std::path::Path;

use super::path::ConfigPath;


/// Returns the English ordinal for `number` (`1st`, `2nd`, `3rd`, `4th`, `11th`, `22nd`, ...).
pub fn ordinal(number: usize) -> String {
    let suffix = match (number % 10, number % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };

    format!("{number}{suffix}")
}

/// Builds the human-readable location of a configuration value.
///
/// `element_number` is the 1-based index of a list element, if the problem
/// is inside a list.
pub fn found_at(source: &Path, path: &ConfigPath, element_number: Option<usize>) -> String {
    let key = if path.is_root() {
        "<root>".to_string()
    } else {
        path.to_string()
    };

    match element_number {
        Some(number) => format!(
            "Located at file {} in {} ({} list element)",
            source.display(),
            key,
            ordinal(number)
        ),
        None => format!("Located at file {} in {}", source.display(), key),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 103, 111]
            .into_iter()
            .map(ordinal)
            .collect();

        assert_eq!(
            rendered,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "103rd", "111th"]
        );
    }

    #[test]
    fn list_locations_include_the_element() {
        let location = found_at(
            Path::new("weapons/ak47.toml"),
            &ConfigPath::from("AK47.Sounds"),
            Some(2),
        );

        assert_eq!(
            location,
            "Located at file weapons/ak47.toml in AK47.Sounds (2nd list element)"
        );
    }
}
