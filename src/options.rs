use serde::{Deserialize, Serialize};

/// Which fields end up in an object's `required` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequiredPolicy {
    /// Only fields reached through a pointer to a named type. Plain scalar
    /// fields are never required. This is what existing schemas were built
    /// with.
    #[default]
    IndirectOnly,
    /// Every field that made it into `properties`.
    AllClassified,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Options {
    pub required_policy: RequiredPolicy,
    /// Recurse into fields whose type is another struct in the same module.
    pub expand_nested: bool,
    /// Drop fields that are not exported.
    pub exported_only: bool,
}
