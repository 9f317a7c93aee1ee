use serde::{Deserialize, Serialize};

/// A retrieved source document shown in the sidebar.
///
/// The proxy is loose about which fields it fills in, so everything except
/// the title falls back to an empty value when missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document title.
    pub title: String,

    /// Author names in citation order.
    #[serde(default)]
    pub authors: Vec<String>,

    /// Publication year as delivered; not validated.
    #[serde(rename = "yearPublished", default)]
    pub year_published: String,

    /// Free-text abstract; empty when the source has none.
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,

    /// Link to the full text.
    #[serde(rename = "downloadUrl", default)]
    pub download_url: String,
}

impl Document {
    /// Creates a document with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the authors.
    pub fn with_authors(mut self, authors: Vec<String>) -> Self {
        self.authors = authors;
        self
    }

    /// Sets the publication year.
    pub fn with_year_published(mut self, year: impl Into<String>) -> Self {
        self.year_published = year.into();
        self
    }

    /// Sets the abstract.
    pub fn with_abstract(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = abstract_text.into();
        self
    }

    /// Sets the download URL.
    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = url.into();
        self
    }

    /// Returns true if the document carries a non-empty abstract.
    pub fn has_abstract(&self) -> bool {
        !self.abstract_text.is_empty()
    }
}
