use crate::domain::record::Record;
use crate::domain::sorting::{sort_records, SortDirection};
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of page buttons the table shows at once
pub const DEFAULT_PAGE_WINDOW: usize = 5;

/// Search, sort and paging parameters for a record list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawViewConfig")]
pub struct ViewConfig {
    pub query: String,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    pub page_size: usize,
    pub page_number: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            query: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Ascending,
            page_size: 10,
            page_number: 1,
        }
    }
}

/// Unvalidated config as it arrives from JSON
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawViewConfig {
    query: String,
    sort_key: Option<String>,
    sort_direction: Option<String>,
    page_size: Option<i64>,
    page_number: Option<i64>,
}

impl TryFrom<RawViewConfig> for ViewConfig {
    type Error = DashboardError;

    fn try_from(raw: RawViewConfig) -> Result<Self> {
        let defaults = ViewConfig::default();

        let sort_direction = match raw.sort_direction {
            Some(direction) => direction.parse()?,
            None => defaults.sort_direction,
        };

        let page_size = match raw.page_size {
            Some(size) if size <= 0 => {
                return Err(DashboardError::InvalidConfiguration(format!(
                    "page size must be greater than zero, got {}",
                    size
                )))
            }
            Some(size) => usize::try_from(size).map_err(|_| {
                DashboardError::InvalidConfiguration(format!("page size {} is too large", size))
            })?,
            None => defaults.page_size,
        };

        // Out-of-range page numbers are clamped, never rejected
        let page_number = match raw.page_number {
            Some(number) => usize::try_from(number.max(1)).unwrap_or(usize::MAX),
            None => defaults.page_number,
        };

        Ok(Self {
            query: raw.query,
            sort_key: raw.sort_key,
            sort_direction,
            page_size,
            page_number,
        })
    }
}

impl ViewConfig {
    /// Sets the search text and jumps back to the first page
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self.page_number = 1;
        self
    }

    pub fn with_sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(key.into());
        self.sort_direction = direction;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    /// Moves one page forward, stopping at `total_pages`
    pub fn next_page(&self, total_pages: usize) -> Self {
        let mut next = self.clone();
        next.page_number = self
            .page_number
            .saturating_add(1)
            .clamp(1, total_pages.max(1));
        next
    }

    /// Moves one page back, stopping at page 1
    pub fn prev_page(&self) -> Self {
        let mut next = self.clone();
        next.page_number = self.page_number.saturating_sub(1).max(1);
        next
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(DashboardError::InvalidConfiguration(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a config from JSON; missing fields take defaults
    ///
    /// # Errors
    /// Malformed JSON is a `SerializationError`; a bad direction or a
    /// non-positive page size is `InvalidConfiguration`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawViewConfig = serde_json::from_str(json)?;
        let config = Self::try_from(raw)?;
        config.validate()?;
        Ok(config)
    }
}

/// One page of results plus what the page controls need
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub total_pages: usize,
    /// Clamped page number the items were taken from
    pub page_number: usize,
    /// 1-based inclusive bounds of `items`, both 0 when there are no results
    pub range_start: usize,
    pub range_end: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Footer text shown under the table
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.range_start, self.range_end, self.total_count
        )
    }

    /// Page-number buttons to render around the current page
    pub fn window(&self) -> Vec<usize> {
        page_window(self.page_number, self.total_pages, DEFAULT_PAGE_WINDOW)
    }
}

/// Keeps rows where any field, as text, contains `query` ignoring case.
///
/// An empty query keeps everything.
pub fn filter<R: AsRef<Record> + Clone>(rows: &[R], query: &str) -> Vec<R> {
    if query.is_empty() {
        return rows.to_vec();
    }

    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.as_ref()
                .values()
                .any(|value| value.to_text().to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Slices one page out of `ordered`, clamping the page number first.
///
/// # Errors
/// Returns `InvalidConfiguration` when `page_size` is zero.
pub fn paginate<T: Clone>(
    ordered: &[T],
    page_size: usize,
    page_number: usize,
) -> Result<Page<T>> {
    if page_size == 0 {
        return Err(DashboardError::InvalidConfiguration(
            "page size must be greater than zero".to_string(),
        ));
    }

    let total_count = ordered.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    let page_number = page_number.clamp(1, total_pages);

    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(total_count);
    let items = ordered[start..end].to_vec();

    let (range_start, range_end) = if items.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    Ok(Page {
        items,
        total_count,
        total_pages,
        page_number,
        range_start,
        range_end,
    })
}

/// Runs the full filter, sort and paginate pipeline over `records`
///
/// The returned page borrows from `records`; nothing is mutated.
pub fn view<'a>(records: &'a [Record], config: &ViewConfig) -> Result<Page<&'a Record>> {
    config.validate()?;

    let refs: Vec<&Record> = records.iter().collect();
    let mut matches = filter(&refs, &config.query);
    sort_records(&mut matches, config.sort_key.as_deref(), config.sort_direction);
    let page = paginate(&matches, config.page_size, config.page_number)?;

    debug!(
        records = records.len(),
        matches = page.total_count,
        page = page.page_number,
        total_pages = page.total_pages,
        "derived collection view"
    );

    Ok(page)
}

/// Picks at most `max_buttons` consecutive page numbers to display.
///
/// Near the start the first pages are shown, near the end the last ones,
/// otherwise the window is centred on `current`.
pub fn page_window(current: usize, total_pages: usize, max_buttons: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let count = max_buttons.min(total_pages);
    if count == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let half = count / 2;
    let first = if current <= half + 1 {
        1
    } else if current + (count - half - 1) >= total_pages {
        total_pages - count + 1
    } else {
        current - half
    };

    (first..first + count).collect()
}
