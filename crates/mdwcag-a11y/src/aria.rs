//! ARIA Support
//!
//! Role vocabularies the passes are allowed to write.

/// `role` attribute
pub const ROLE: &str = "role";
/// `aria-rowcount` attribute
pub const ARIA_ROWCOUNT: &str = "aria-rowcount";
/// `aria-rowindex` attribute
pub const ARIA_ROWINDEX: &str = "aria-rowindex";

/// Roles accepted from a heading's `==role==` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkRole {
    Article,
    Banner,
    Complementary,
    ContentInfo,
    Definition,
    Document,
    Feed,
    Figure,
    Form,
    Main,
    Navigation,
    Region,
    Search,
    Section,
    Table,
}

impl LandmarkRole {
    pub const ALL: [LandmarkRole; 15] = [
        Self::Article,
        Self::Banner,
        Self::Complementary,
        Self::ContentInfo,
        Self::Definition,
        Self::Document,
        Self::Feed,
        Self::Figure,
        Self::Form,
        Self::Main,
        Self::Navigation,
        Self::Region,
        Self::Search,
        Self::Section,
        Self::Table,
    ];

    /// Parse a role token. Tokens are matched exactly, lowercase only.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == s)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Banner => "banner",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Definition => "definition",
            Self::Document => "document",
            Self::Feed => "feed",
            Self::Figure => "figure",
            Self::Form => "form",
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Region => "region",
            Self::Search => "search",
            Self::Section => "section",
            Self::Table => "table",
        }
    }
}

/// Implicit table roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableRole {
    Table,
    RowGroup,
    Row,
    Cell,
    ColumnHeader,
}

impl TableRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::RowGroup => "rowgroup",
            Self::Row => "row",
            Self::Cell => "cell",
            Self::ColumnHeader => "columnheader",
        }
    }
}
