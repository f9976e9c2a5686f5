//
// Copyright (c) Memfault, Inc.
// See License.txt for details
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Hint to gmond about how a metric is expected to evolve.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Slope {
    Zero,
    Positive,
    Negative,
    #[default]
    Both,
}

impl Slope {
    /// Never fails: any name that isn't a known slope resolves to `Both`.
    pub fn from_name(name: &str) -> Self {
        Slope::from_str(name).unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case("zero", Slope::Zero)]
    #[case("POSITIVE", Slope::Positive)]
    #[case("negative", Slope::Negative)]
    #[case("Negative", Slope::Negative)]
    #[case("both", Slope::Both)]
    fn matches_names_ignoring_case(#[case] name: &str, #[case] expected: Slope) {
        assert_eq!(Slope::from_name(name), expected);
    }

    #[rstest]
    #[case("bogus")]
    #[case("")]
    #[case("positive-ish")]
    #[case(" zero ")]
    fn unknown_names_fall_back_to_both(#[case] name: &str) {
        assert_eq!(Slope::from_name(name), Slope::Both);
    }

    #[test]
    fn names_are_uppercase() {
        let names: Vec<&str> = Slope::iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["ZERO", "POSITIVE", "NEGATIVE", "BOTH"]);
    }

    #[test]
    fn every_name_round_trips() {
        for slope in Slope::iter() {
            assert_eq!(Slope::from_name(&slope.to_string()), slope);
        }
    }
}
