use thiserror::Error;

/// Number of survey pages, including the summary page.
pub const TOTAL_PAGES: u8 = 4;

/// One screen of the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Page {
    BasicInfo,
    Dietary,
    Cuisine,
    Summary,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PageError {
    #[error("page {0} is outside 1..={TOTAL_PAGES}")]
    OutOfRange(u8),
}

impl Page {
    pub const ALL: [Self; TOTAL_PAGES as usize] =
        [Self::BasicInfo, Self::Dietary, Self::Cuisine, Self::Summary];

    pub const FIRST: Self = Self::BasicInfo;
    pub const LAST: Self = Self::Summary;

    /// 1-based page number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::Dietary => 2,
            Self::Cuisine => 3,
            Self::Summary => 4,
        }
    }

    /// # Errors
    ///
    /// Returns `PageError::OutOfRange` for numbers outside `1..=TOTAL_PAGES`.
    pub fn from_number(number: u8) -> Result<Self, PageError> {
        match number {
            1 => Ok(Self::BasicInfo),
            2 => Ok(Self::Dietary),
            3 => Ok(Self::Cuisine),
            4 => Ok(Self::Summary),
            other => Err(PageError::OutOfRange(other)),
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::BasicInfo => Some(Self::Dietary),
            Self::Dietary => Some(Self::Cuisine),
            Self::Cuisine => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::BasicInfo => None,
            Self::Dietary => Some(Self::BasicInfo),
            Self::Cuisine => Some(Self::Dietary),
            Self::Summary => Some(Self::Cuisine),
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::Dietary => "Dietary Restrictions",
            Self::Cuisine => "Cuisine Preferences",
            Self::Summary => "Summary",
        }
    }

    /// Element identifier of the page container (`page1` .. `page4`).
    #[must_use]
    pub fn container_id(self) -> String {
        format!("page{}", self.number())
    }
}

/// Pagination cursor. Never persisted; a fresh state always starts on page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    current: Page,
}

/// A single-step page change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTransition {
    pub from: Page,
    pub to: Page,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: Page::FIRST,
        }
    }

    #[must_use]
    pub const fn current(&self) -> Page {
        self.current
    }

    #[must_use]
    pub const fn current_number(&self) -> u8 {
        self.current.number()
    }

    #[must_use]
    pub const fn total_pages(&self) -> u8 {
        TOTAL_PAGES
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current == Page::LAST
    }

    /// Move one page forward. Returns `None` on the last page.
    pub fn advance(&mut self) -> Option<PageTransition> {
        let from = self.current;
        let to = from.next()?;
        self.current = to;
        Some(PageTransition { from, to })
    }

    /// Move one page back. Returns `None` on the first page.
    pub fn retreat(&mut self) -> Option<PageTransition> {
        let from = self.current;
        let to = from.previous()?;
        self.current = to;
        Some(PageTransition { from, to })
    }

    /// Completion percentage: 0 on the first page, 100 on the last.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        f64::from(self.current.number() - 1) / f64::from(TOTAL_PAGES - 1) * 100.0
    }
}
