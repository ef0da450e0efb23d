use serde::Deserialize;

const GROUPING_DEFAULT_MAX_GROUPS: u64 = 10_000;

///
/// GroupingConfig
///
/// Hard limits for one grouping pass. Missing fields take the defaults, so a
/// partial document deserializes.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct GroupingConfig {
    max_groups: u64,
}

impl GroupingConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_groups: GROUPING_DEFAULT_MAX_GROUPS,
        }
    }

    #[must_use]
    pub const fn with_max_groups(mut self, max_groups: u64) -> Self {
        self.max_groups = max_groups;
        self
    }

    #[must_use]
    pub const fn max_groups(self) -> u64 {
        self.max_groups
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self::new()
    }
}
