//! Building/date filtering and page windowing for the delivery table.

use chrono::{NaiveDate, TimeZone};

use super::aggregate::{Building, Delivery};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildingFilter {
    #[default]
    All,
    Only(Building),
}

impl BuildingFilter {
    pub fn matches(&self, building: Building) -> bool {
        match self {
            BuildingFilter::All => true,
            BuildingFilter::Only(b) => *b == building,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BuildingFilter::All => "All",
            BuildingFilter::Only(b) => b.as_str(),
        }
    }

    /// Chip order in the filter bar: "All" first, then every building
    pub fn options() -> Vec<BuildingFilter> {
        std::iter::once(BuildingFilter::All)
            .chain(Building::ALL.into_iter().map(BuildingFilter::Only))
            .collect()
    }
}

/// Current filter selection plus the 1-based page being viewed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryListQuery {
    building: BuildingFilter,
    date: NaiveDate,
    page: usize,
    page_size: usize,
}

impl DeliveryListQuery {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            building: BuildingFilter::All,
            date,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn building(&self) -> BuildingFilter {
        self.building
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_building(&mut self, building: BuildingFilter) {
        self.building = building;
        self.page = 1;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.page = 1;
    }

    /// Called whenever the underlying record set changes
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Building matches and the record falls on the selected date in `tz`.
    /// Records carrying no timestamp at all never match.
    pub fn matches<Tz: TimeZone>(&self, record: &Delivery, tz: &Tz) -> bool {
        if !self.building.matches(record.building) {
            return false;
        }
        record
            .effective_time()
            .map(|t| t.with_timezone(tz).date_naive() == self.date)
            .unwrap_or(false)
    }

    pub fn apply<Tz: TimeZone>(&self, records: &[Delivery], tz: &Tz) -> DeliveryPage {
        let matched: Vec<&Delivery> = records.iter().filter(|r| self.matches(r, tz)).collect();
        let total_matches = matched.len();
        let total_pages = total_pages(total_matches, self.page_size);
        let page = self.page.clamp(1, total_pages);

        let items = matched
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .cloned()
            .collect();

        DeliveryPage {
            items,
            page,
            total_pages,
            total_matches,
        }
    }
}

/// One window of matching records
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryPage {
    pub items: Vec<Delivery>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

impl DeliveryPage {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

/// Never less than one page, even with nothing to show
pub fn total_pages(matches: usize, page_size: usize) -> usize {
    matches.div_ceil(page_size.max(1)).max(1)
}
