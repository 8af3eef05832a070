use clap::ValueEnum;
use serde::Deserialize;

#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Leave colouring to `NO_COLOR`/`CLICOLOR` and terminal detection.
    #[default]
    Auto,
    /// Always colour priority badges.
    Always,
    /// Never colour priority badges.
    Never,
}

impl ColorMode {
    /// The forced colour setting, or `None` to keep `colored`'s own detection
    /// (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, terminal check).
    pub fn override_value(self) -> Option<bool> {
        match self {
            ColorMode::Auto => None,
            ColorMode::Always => Some(true),
            ColorMode::Never => Some(false),
        }
    }

    pub fn apply(self) {
        match self.override_value() {
            Some(enabled) => colored::control::set_override(enabled),
            None => colored::control::unset_override(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn auto_leaves_detection_to_the_environment() {
        assert_eq!(ColorMode::Auto.override_value(), None);
        assert_eq!(ColorMode::Always.override_value(), Some(true));
        assert_eq!(ColorMode::Never.override_value(), Some(false));
    }
}
