//! Citation model shared by the citation sources and formatters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a citation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationOrigin {
    SemanticScholar,
    CrossRef,
    Offline,
}

impl CitationOrigin {
    /// Returns the display name of the origin
    pub fn name(&self) -> &'static str {
        match self {
            CitationOrigin::SemanticScholar => "Semantic Scholar",
            CitationOrigin::CrossRef => "CrossRef",
            CitationOrigin::Offline => "Offline",
        }
    }
}

impl fmt::Display for CitationOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A bibliographic record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    /// Work title
    pub title: String,

    /// Author names, in order ("Given Family" or "Family, G.")
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication year
    #[serde(default)]
    pub year: Option<i32>,

    /// Digital Object Identifier, without the resolver prefix
    #[serde(default)]
    pub doi: Option<String>,

    /// Journal or venue name
    #[serde(default)]
    pub journal: Option<String>,

    #[serde(default = "default_origin")]
    pub origin: CitationOrigin,
}

fn default_origin() -> CitationOrigin {
    CitationOrigin::Offline
}

impl Citation {
    /// Create a citation with a title and authors
    pub fn new<I, S>(title: impl Into<String>, authors: I, origin: CitationOrigin) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            authors: authors.into_iter().map(Into::into).collect(),
            year: None,
            doi: None,
            journal: None,
            origin,
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn doi(mut self, doi: impl Into<String>) -> Self {
        let doi = doi.into();
        self.doi = if doi.trim().is_empty() {
            None
        } else {
            Some(doi.trim().to_string())
        };
        self
    }

    pub fn journal(mut self, journal: impl Into<String>) -> Self {
        self.journal = Some(journal.into());
        self
    }

    /// Year as text, "n.d." when unknown
    pub fn year_text(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "n.d.".to_string())
    }

    /// Journal name, "Unknown Journal" when absent
    pub fn journal_text(&self) -> &str {
        self.journal
            .as_deref()
            .filter(|j| !j.trim().is_empty())
            .unwrap_or("Unknown Journal")
    }

    /// DOI when present and non-empty
    pub fn doi_text(&self) -> Option<&str> {
        self.doi.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// Supported citation styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CitationStyle {
    /// APA 7th edition
    #[default]
    Apa,
    /// MLA 9th edition
    Mla,
    /// IEEE numbered references
    Ieee,
    /// Chicago 17th edition (author-date)
    Chicago,
    /// BibTeX
    Bibtex,
}

impl CitationStyle {
    pub const ALL: [CitationStyle; 5] = [
        CitationStyle::Apa,
        CitationStyle::Mla,
        CitationStyle::Ieee,
        CitationStyle::Chicago,
        CitationStyle::Bibtex,
    ];

    /// Short code used in requests ("APA", "MLA", ...)
    pub fn code(&self) -> &'static str {
        match self {
            CitationStyle::Apa => "APA",
            CitationStyle::Mla => "MLA",
            CitationStyle::Ieee => "IEEE",
            CitationStyle::Chicago => "Chicago",
            CitationStyle::Bibtex => "BibTeX",
        }
    }
}

impl FromStr for CitationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apa" => Ok(CitationStyle::Apa),
            "mla" => Ok(CitationStyle::Mla),
            "ieee" => Ok(CitationStyle::Ieee),
            "chicago" => Ok(CitationStyle::Chicago),
            "bibtex" | "bib" => Ok(CitationStyle::Bibtex),
            other => Err(format!(
                "Unsupported citation style '{}' (expected one of: {})",
                other,
                CitationStyle::ALL
                    .iter()
                    .map(|s| s.code())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitationStyle::Apa => write!(f, "APA 7th"),
            CitationStyle::Mla => write!(f, "MLA 9th"),
            CitationStyle::Ieee => write!(f, "IEEE"),
            CitationStyle::Chicago => write!(f, "Chicago 17th"),
            CitationStyle::Bibtex => write!(f, "BibTeX"),
        }
    }
}

impl Serialize for CitationStyle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for CitationStyle {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
