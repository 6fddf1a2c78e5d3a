//! Forgiving enum matching for configuration values.
//!
//! Configuration authors write enum constants in whatever style they like
//! (`dual wielding`, `Dual-Wielding`, `DUAL_WIELDING`), so names are normalized
//! before they are compared. A leading `$` turns the input into a wildcard that
//! matches every constant containing the rest of the input; wildcards are only
//! meaningful where a list of constants is expected.

use strum::IntoEnumIterator;


/// An enum that can be read from configuration.
///
/// Implemented for every enum deriving strum's `EnumIter` and `IntoStaticStr`.
pub trait ConfigEnum: IntoEnumIterator + Into<&'static str> + Copy + 'static {
    /// The name shown to configuration authors, e.g. `PotionEffectType`.
    fn enum_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// The configuration name of this constant.
    fn config_name(self) -> &'static str {
        Into::<&'static str>::into(self)
    }

    fn config_names() -> Vec<&'static str> {
        Self::iter().map(ConfigEnum::config_name).collect()
    }
}

impl<T> ConfigEnum for T where T: IntoEnumIterator + Into<&'static str> + Copy + 'static {}


/// Returns the last path segment of a fully qualified type name.
pub fn short_type_name(full_name: &str) -> &str {
    let without_generics = full_name.split('<').next().unwrap_or(full_name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|character| match character {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Returns every constant of `E` that `input` names.
///
/// Without a wildcard the result has zero or one element. With a leading `$`
/// the result holds every constant whose name contains the rest of the input.
pub fn parse_enums<E: ConfigEnum>(input: &str) -> Vec<E> {
    let trimmed = input.trim();

    if let Some(pattern) = trimmed.strip_prefix('$') {
        let pattern = normalize(pattern);

        return E::iter()
            .filter(|constant| normalize(constant.config_name()).contains(&pattern))
            .collect();
    }

    let normalized = normalize(trimmed);
    E::iter()
        .find(|constant| normalize(constant.config_name()) == normalized)
        .into_iter()
        .collect()
}
