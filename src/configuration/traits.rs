use miette::Result;

/// A configuration table as deserialized from disk, before it is validated.
/// Resolving it needs some context, e.g. the already resolved base paths.
pub trait ResolvableConfigurationWithContext {
    type Context;
    type Resolved;

    /// Validates the table and turns it into its `Resolved` form
    /// (e.g. with placeholders replaced and paths canonicalized).
    /// Returns `Err` if the table is invalid.
    fn resolve(self, context: Self::Context) -> Result<Self::Resolved>;
}
