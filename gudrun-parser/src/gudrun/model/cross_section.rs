use serde::{Deserialize, Serialize};

/// Where total cross sections come from: built-in tables, the transmission monitor, or a
/// user file.
///
/// Structured formats store the same single token as the positional format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CrossSectionSource {
    #[default]
    Tables,
    Transmission,
    File(String),
}

impl CrossSectionSource {
    /// Keywords map to their variant; every other token is a file name.
    pub fn from_token(token: &str) -> Self {
        match token {
            "TABLES" => CrossSectionSource::Tables,
            "TRANSMISSION" => CrossSectionSource::Transmission,
            file => CrossSectionSource::File(file.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            CrossSectionSource::Tables => "TABLES",
            CrossSectionSource::Transmission => "TRANSMISSION",
            CrossSectionSource::File(file) => file,
        }
    }
}

impl From<String> for CrossSectionSource {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl From<CrossSectionSource> for String {
    fn from(source: CrossSectionSource) -> Self {
        source.token().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("TABLES", CrossSectionSource::Tables)]
    #[case("TRANSMISSION", CrossSectionSource::Transmission)]
    #[case("mydata.dcs", CrossSectionSource::File("mydata.dcs".into()))]
    #[case("tables", CrossSectionSource::File("tables".into()))]
    fn token_dispatch(#[case] token: &str, #[case] expected: CrossSectionSource) {
        let source = CrossSectionSource::from_token(token);
        assert_eq!(source, expected);
        assert_eq!(source.token(), token);
    }
}
