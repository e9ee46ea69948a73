use crate::error::{ModelError, Result};

/// One server-returned batch of results plus pagination metadata.
///
/// Wire shape: `{page, results, total_pages, total_results}`. Page numbers
/// are 1-based.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn new(
        page: u32,
        results: Vec<T>,
        total_pages: u32,
        total_results: u64,
    ) -> Self {
        Self {
            page,
            results,
            total_pages,
            total_results,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page
    }

    pub fn items(&self) -> &[T] {
        &self.results
    }

    pub fn into_items(self) -> Vec<T> {
        self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True when no page follows this one. An empty catalog reports
    /// `total_pages == 0`, which counts as last as well.
    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }

    pub fn next_page_number(&self) -> Option<u32> {
        if self.is_last() {
            None
        } else {
            Some(self.page + 1)
        }
    }

    /// Check the page against the page number that was asked for.
    pub fn validate(&self, requested: u32) -> Result<()> {
        if self.page == 0 {
            return Err(ModelError::ZeroPage);
        }
        if self.page != requested {
            return Err(ModelError::InvalidPage {
                requested,
                reported: self.page,
            });
        }
        Ok(())
    }
}

/// Non-paginated list response (`{results: [...]}`); extra fields ignored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListResponse<T> {
    pub results: Vec<T>,
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}
