//! Element kinds
//!
//! A closed set of the kinds the checks care about, with everything else
//! carried by name in [`Tag::Other`].

use std::fmt;

/// Element tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    P,
    Img,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Table,
    Thead,
    Tbody,
    Tr,
    Td,
    Th,
    Del,
    /// Any element without a dedicated kind
    Other(String),
}

impl Tag {
    /// Parse from a tag name (ASCII case-insensitive)
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "div" => Self::Div,
            "p" => Self::P,
            "img" => Self::Img,
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h3" => Self::H3,
            "h4" => Self::H4,
            "h5" => Self::H5,
            "h6" => Self::H6,
            "table" => Self::Table,
            "thead" => Self::Thead,
            "tbody" => Self::Tbody,
            "tr" => Self::Tr,
            "td" => Self::Td,
            "th" => Self::Th,
            "del" => Self::Del,
            other => Self::Other(other.to_string()),
        }
    }

    /// Heading tag for a level in `1..=6`
    pub fn heading(level: u8) -> Option<Self> {
        Some(match level {
            1 => Self::H1,
            2 => Self::H2,
            3 => Self::H3,
            4 => Self::H4,
            5 => Self::H5,
            6 => Self::H6,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Div => "div",
            Self::P => "p",
            Self::Img => "img",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::Table => "table",
            Self::Thead => "thead",
            Self::Tbody => "tbody",
            Self::Tr => "tr",
            Self::Td => "td",
            Self::Th => "th",
            Self::Del => "del",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
