//! Viewport-driven text pagination.
//!
//! A book's full text is mapped to a sequence of page-sized substrings
//! using a monospaced-equivalent capacity estimate. Page boundaries are
//! word-aware: the splitter looks for the last space in the trailing 20%
//! of a page and only breaks mid-word when a whitespace-free run exceeds
//! that margin. The current position is tracked as a normalized ratio in
//! [0, 1] so it survives re-pagination at a different viewport size.

/// Viewport and font metrics driving capacity estimation.
///
/// Zero values (layout transients often report degenerate sizes) are
/// clamped so the estimate never reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportMetrics {
    /// Viewport width in pixels.
    pub width: u32,
    /// Viewport height in pixels.
    pub height: u32,
    /// Average character width in pixels.
    pub char_width: u32,
    /// Line height in pixels.
    pub line_height: u32,
}

impl ViewportMetrics {
    /// Create metrics for a viewport.
    pub fn new(width: u32, height: u32, char_width: u32, line_height: u32) -> Self {
        Self {
            width,
            height,
            char_width,
            line_height,
        }
    }

    /// Estimated characters per line, floored at 20.
    pub fn chars_per_line(&self) -> usize {
        (self.width / self.char_width.max(1)).max(20) as usize
    }

    /// Estimated lines per page, floored at 3.
    pub fn lines_per_page(&self) -> usize {
        (self.height / self.line_height.max(1)).max(3) as usize
    }

    /// Estimated page capacity in characters. Always positive.
    pub fn capacity(&self) -> usize {
        self.chars_per_line() * self.lines_per_page()
    }
}

/// Split text into page-sized chunks of at most `capacity` characters.
///
/// Pages are cut at the last space within the trailing 20% of the window
/// when one exists past the page start; otherwise at the hard capacity
/// boundary (forced break). Each page is emitted trimmed, and a page that
/// trims to empty is still emitted. Empty input yields exactly one empty
/// page, so the result is never empty.
pub fn split_pages(text: &str, capacity: usize) -> Vec<String> {
    let capacity = capacity.max(1);
    // Code points, not bytes: mirrors how the capacity estimate counts
    // characters and keeps cuts off UTF-8 boundaries.
    let chars: Vec<char> = text.chars().collect();
    let total = chars.len();

    let mut pages = Vec::new();
    let mut i = 0;

    while i < total {
        let end = (i + capacity).min(total);
        let window_start = (i + capacity * 4 / 5).min(total);

        let mut split = end;
        if let Some(pos) = (window_start..end).rev().find(|&p| chars[p] == ' ')
            && pos > i
        {
            split = pos;
        }

        let page: String = chars[i..split].iter().collect();
        pages.push(page.trim().to_string());
        i = split;
    }

    if pages.is_empty() {
        pages.push(String::new());
    }
    pages
}

/// Map a progress ratio to a page index.
///
/// Rounds half away from zero (`0.5` on a 10-page set lands on index 5)
/// and clamps both ratio and result. A single-page set always maps to 0.
pub fn index_for_ratio(page_count: usize, ratio: f64) -> usize {
    if page_count <= 1 {
        return 0;
    }
    let ratio = ratio.clamp(0.0, 1.0);
    let index = (ratio * (page_count - 1) as f64).round() as usize;
    index.min(page_count - 1)
}

/// Inverse of [`index_for_ratio`]: a single-page set always reports 0.0.
pub fn ratio_for_index(page_count: usize, index: usize) -> f64 {
    if page_count <= 1 {
        0.0
    } else {
        index.min(page_count - 1) as f64 / (page_count - 1) as f64
    }
}

/// An ordered set of pages plus the current position.
///
/// The page sequence is never empty, and the current index stays within
/// bounds through every operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSet {
    pages: Vec<String>,
    current: usize,
}

impl PageSet {
    /// Paginate text for a viewport, landing on the page a stored progress
    /// ratio points at.
    pub fn paginate(text: &str, metrics: ViewportMetrics, ratio: f64) -> Self {
        let pages = split_pages(text, metrics.capacity());
        let current = index_for_ratio(pages.len(), ratio);
        Self { pages, current }
    }

    /// Number of pages (always at least 1).
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All pages in order.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Current page index.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Text of the current page.
    pub fn current_page(&self) -> &str {
        &self.pages[self.current]
    }

    /// Progress ratio of the current position.
    pub fn ratio(&self) -> f64 {
        ratio_for_index(self.pages.len(), self.current)
    }

    /// Jump to a page, clamped to the valid range.
    pub fn go_to(&mut self, index: usize) {
        self.current = index.min(self.pages.len() - 1);
    }

    /// Advance one page; no-op on the last page.
    pub fn next(&mut self) {
        if self.has_next() {
            self.current += 1;
        }
    }

    /// Go back one page; no-op on the first page.
    pub fn previous(&mut self) {
        if self.has_previous() {
            self.current -= 1;
        }
    }

    /// Whether a next page exists (drives the UI affordance).
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.pages.len()
    }

    /// Whether a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// Current page as a 1-based display number.
    pub fn current_display_page(&self) -> usize {
        self.current + 1
    }

    /// Jump to a 1-based page number, clamped to `[1, page_count]`.
    pub fn go_to_display_page(&mut self, page: usize) {
        self.go_to(page.max(1) - 1);
    }
}
