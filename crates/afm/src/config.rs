use serde::{Deserialize, Serialize};

/// What the loader does with a recognized line it cannot parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Fail the whole load on the first malformed line.
    #[default]
    Strict,
    /// Log the line at `warn` level and carry on.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoadOptions {
    /// Handling of malformed `FontName`, `Underline*`, `C` and `KPX` lines.
    /// Lines of any other kind are never inspected and cannot be malformed.
    ///
    /// A truncated final line counts as malformed. A `C` line is complete
    /// once its last field is closed by `;`. The other kinds have no closing
    /// delimiter, so when one of them is the last line it must end with a
    /// newline.
    ///
    /// Defaults to [`MalformedLinePolicy::Strict`].
    pub malformed_lines: MalformedLinePolicy,
}

impl LoadOptions {
    pub fn lenient() -> Self {
        Self {
            malformed_lines: MalformedLinePolicy::Lenient,
        }
    }
}
