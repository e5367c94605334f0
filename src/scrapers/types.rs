use crate::models::ListingType;

/// Inclusive numeric filter bounds; either side may be left open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeFilter {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl RangeFilter {
    /// Render as the site's URL segment: `2,00-5,00`, or `-1000,00` when
    /// only the upper bound is set.
    pub fn url_segment(&self) -> String {
        format!("{}-{}", Self::bound(self.min), Self::bound(self.max))
    }

    fn bound(value: Option<u32>) -> String {
        match value {
            Some(n) => format!("{},00", n),
            None => String::new(),
        }
    }
}

/// The filter parameters that determine which listings a result page
/// shows and how its URL is built.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub listing_type: ListingType,
    /// Bundesland as spelled in the URL, e.g. `Nordrhein-Westfalen`.
    pub region: String,
    /// City as spelled in the URL, e.g. `Koeln`.
    pub city: String,
    pub rooms: Option<RangeFilter>,
    pub size: Option<RangeFilter>,
    pub price: Option<RangeFilter>,
}

impl SearchQuery {
    /// Any numeric filter present selects the longer URL template.
    pub fn has_filters(&self) -> bool {
        self.rooms.is_some() || self.size.is_some() || self.price.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_segment_both_bounds() {
        let range = RangeFilter { min: Some(2), max: Some(5) };
        assert_eq!(range.url_segment(), "2,00-5,00");
    }

    #[test]
    fn range_segment_open_ends() {
        let upper_only = RangeFilter { min: None, max: Some(1000) };
        assert_eq!(upper_only.url_segment(), "-1000,00");

        let lower_only = RangeFilter { min: Some(500), max: None };
        assert_eq!(lower_only.url_segment(), "500,00-");
    }
}
