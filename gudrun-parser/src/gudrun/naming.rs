//! Derived file names
//!
//! Gudrun's outputs are named after inputs: a sample's result file shares the stem of
//! its first data file, and the per-sample parameter files are named after the sample.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Characters that cannot appear in generated file names.
static UNWANTED_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[/\\!*~,&|\[\]()<>:"?']"#).unwrap());

/// Make `name` usable as a file stem: unwanted characters are dropped and runs of
/// whitespace become a single underscore.
pub fn sanitise_name(name: &str) -> String {
    UNWANTED_CHARS
        .replace_all(name, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// `data_file` with its extension replaced by `extension`.
pub fn derive_file_name(data_file: &str, extension: &str) -> String {
    Path::new(data_file)
        .with_extension(extension)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("water", "water")]
    #[case("H2O, 298K", "H2O_298K")]
    #[case("  Ti/Zr  [null]  ", "TiZr_null")]
    fn sanitised_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(sanitise_name(name), expected);
    }

    #[rstest]
    #[case("NIMROD00016608_H2O_in_N9.raw", "gud", "NIMROD00016608_H2O_in_N9.gud")]
    #[case("GEM72345.nxs", "mint01", "GEM72345.mint01")]
    #[case("noextension", "gud", "noextension.gud")]
    fn derived_names(#[case] data_file: &str, #[case] extension: &str, #[case] expected: &str) {
        assert_eq!(derive_file_name(data_file, extension), expected);
    }
}
