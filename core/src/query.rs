use crate::record::{StyleTag, Sweetness, WineCatalog, WineRecord};

/// Sort order for the result set. Anything unrecognized is Default
/// (dataset order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    PointsDesc,
    #[default]
    Default,
}

impl SortKey {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "price_asc" => SortKey::PriceAsc,
            "price_desc" => SortKey::PriceDesc,
            "points_desc" => SortKey::PointsDesc,
            _ => SortKey::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::PointsDesc => "points_desc",
            SortKey::Default => "",
        }
    }
}

/// One request's filter/sort/page values. Nothing here persists beyond
/// the request.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub country: Option<String>,
    pub variety: Option<String>,
    /// Raw text; a value that fails to parse as a number disables the filter.
    pub max_price: Option<String>,
    pub sweetness: Option<Sweetness>,
    pub style: Option<StyleTag>,
    pub sort: SortKey,
    pub page: i64,
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone)]
pub struct QueryPage {
    pub records: Vec<WineRecord>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

// Sort sentinels: records without a usable price sort last in either
// direction; unrated records sort last under points_desc.
const PRICE_ASC_SENTINEL: f64 = 1e9;
const PRICE_DESC_SENTINEL: f64 = -1.0;

/// Filter, sort, and slice the catalog for one request.
pub fn run_query(catalog: &WineCatalog, params: &QueryParams, page_size: usize) -> QueryPage {
    let mut filtered: Vec<&WineRecord> = catalog.records().iter().collect();

    if let Some(country) = non_empty(&params.country) {
        let needle = country.to_lowercase();
        filtered.retain(|w| {
            w.country
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
        });
    }

    if let Some(variety) = non_empty(&params.variety) {
        // Substring so a broad term ("sparkling") matches longer labels.
        let needle = variety.to_lowercase();
        filtered.retain(|w| {
            w.variety
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(&needle))
        });
    }

    if let Some(raw) = non_empty(&params.max_price) {
        // Unparseable bound: filter is skipped, not an error.
        if let Ok(bound) = raw.trim().parse::<f64>() {
            filtered.retain(|w| w.price_f64().is_some_and(|p| p <= bound));
        }
    }

    if let Some(sweetness) = params.sweetness {
        filtered.retain(|w| w.sweetness == sweetness);
    }

    if let Some(tag) = params.style {
        filtered.retain(|w| w.style_tags.contains(&tag));
    }

    match params.sort {
        SortKey::PriceAsc => filtered.sort_by(|a, b| {
            let pa = a.price_f64().unwrap_or(PRICE_ASC_SENTINEL);
            let pb = b.price_f64().unwrap_or(PRICE_ASC_SENTINEL);
            pa.partial_cmp(&pb).unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortKey::PriceDesc => filtered.sort_by(|a, b| {
            let pa = a.price_f64().unwrap_or(PRICE_DESC_SENTINEL);
            let pb = b.price_f64().unwrap_or(PRICE_DESC_SENTINEL);
            pb.partial_cmp(&pa).unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortKey::PointsDesc => filtered.sort_by(|a, b| {
            let pa = a.points_f64().unwrap_or(0.0);
            let pb = b.points_f64().unwrap_or(0.0);
            pb.partial_cmp(&pa).unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortKey::Default => {}
    }

    let total = filtered.len();
    let page_size = page_size.max(1);
    let total_pages = (total.div_ceil(page_size)).max(1);
    let page = params.page.clamp(1, total_pages as i64) as usize;

    let start = (page - 1) * page_size;
    let records = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    QueryPage {
        records,
        total,
        page,
        total_pages,
    }
}

fn non_empty(opt: &Option<String>) -> Option<&str> {
    opt.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{StyleTag, Sweetness, WineRecord};
    use std::collections::BTreeSet;

    fn rec(title: &str, country: &str, variety: &str, price: &str, points: &str) -> WineRecord {
        WineRecord {
            title: title.into(),
            description: String::new(),
            country: if country.is_empty() { None } else { Some(country.into()) },
            variety: if variety.is_empty() { None } else { Some(variety.into()) },
            province: None,
            winery: None,
            price: price.into(),
            points: points.into(),
            sweetness: Sweetness::Medium,
            style_tags: BTreeSet::new(),
        }
    }

    fn catalog() -> WineCatalog {
        WineCatalog::new(vec![
            rec("a", "Italy", "White Blend", "17.0", "87"),
            rec("b", "Portugal", "Portuguese Red", "30.0", "92"),
            rec("c", "US", "Pinot Gris", "", "86"),
            rec("d", "France", "Sparkling Rosé", "19.99", "90"),
            rec("e", "Italy", "Pinot Grigio", "12.5", "85"),
        ])
    }

    fn params() -> QueryParams {
        QueryParams {
            page: 1,
            ..Default::default()
        }
    }

    #[test]
    fn country_filter_is_substring_and_case_insensitive() {
        let mut p = params();
        p.country = Some("ita".into());
        let page = run_query(&catalog(), &p, 12);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn variety_partial_term_matches_longer_labels() {
        let mut p = params();
        p.variety = Some("sparkling".into());
        let page = run_query(&catalog(), &p, 12);
        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].title, "d");
    }

    #[test]
    fn records_without_country_are_excluded_by_country_filter() {
        let cat = WineCatalog::new(vec![rec("x", "", "Blend", "5", "80")]);
        let mut p = params();
        p.country = Some("italy".into());
        assert_eq!(run_query(&cat, &p, 12).total, 0);
    }

    #[test]
    fn max_price_boundary() {
        let mut p = params();
        p.max_price = Some("20".into());
        let titles: Vec<String> = run_query(&catalog(), &p, 12)
            .records
            .iter()
            .map(|r| r.title.clone())
            .collect();
        assert!(titles.contains(&"d".to_string())); // 19.99 <= 20
        assert!(!titles.contains(&"b".to_string()));
        assert!(!titles.contains(&"c".to_string())); // no price -> excluded

        p.max_price = Some("19".into());
        let page = run_query(&catalog(), &p, 12);
        assert!(page.records.iter().all(|r| r.title != "d"));
    }

    #[test]
    fn malformed_max_price_skips_the_filter() {
        let mut p = params();
        p.max_price = Some("cheap".into());
        assert_eq!(run_query(&catalog(), &p, 12).total, 5);
    }

    #[test]
    fn filters_are_monotonic() {
        let base = run_query(&catalog(), &params(), 12).total;
        let mut p = params();
        p.country = Some("italy".into());
        let one = run_query(&catalog(), &p, 12).total;
        p.max_price = Some("15".into());
        let two = run_query(&catalog(), &p, 12).total;
        assert!(one <= base);
        assert!(two <= one);
    }

    #[test]
    fn price_sorts_reverse_each_other_over_valid_prices() {
        let mut p = params();
        p.sort = SortKey::PriceAsc;
        let asc: Vec<String> = run_query(&catalog(), &p, 12)
            .records
            .iter()
            .filter(|r| r.price_f64().is_some())
            .map(|r| r.title.clone())
            .collect();
        p.sort = SortKey::PriceDesc;
        let mut desc: Vec<String> = run_query(&catalog(), &p, 12)
            .records
            .iter()
            .filter(|r| r.price_f64().is_some())
            .map(|r| r.title.clone())
            .collect();
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn missing_price_sorts_last_both_directions() {
        let mut p = params();
        p.sort = SortKey::PriceAsc;
        assert_eq!(run_query(&catalog(), &p, 12).records.last().unwrap().title, "c");
        p.sort = SortKey::PriceDesc;
        assert_eq!(run_query(&catalog(), &p, 12).records.last().unwrap().title, "c");
    }

    #[test]
    fn points_desc_orders_by_rating() {
        let mut p = params();
        p.sort = SortKey::PointsDesc;
        let page = run_query(&catalog(), &p, 12);
        assert_eq!(page.records[0].title, "b");
        assert_eq!(page.records[1].title, "d");
    }

    #[test]
    fn style_filter_is_exact_tag_membership() {
        let mut tagged = rec("t", "Italy", "Syrah", "20", "90");
        tagged.style_tags = [StyleTag::Fruity, StyleTag::Spicy].into_iter().collect();
        let cat = WineCatalog::new(vec![tagged]);

        let mut p = params();
        p.style = Some(StyleTag::Spicy);
        assert_eq!(run_query(&cat, &p, 12).total, 1);
        p.style = Some(StyleTag::Floral);
        assert_eq!(run_query(&cat, &p, 12).total, 0);
    }

    #[test]
    fn sweetness_filter_exact_match() {
        let mut sweet = rec("s", "Italy", "Moscato", "15", "88");
        sweet.sweetness = Sweetness::Sweet;
        let cat = WineCatalog::new(vec![sweet, rec("m", "Italy", "Blend", "10", "84")]);
        let mut p = params();
        p.sweetness = Some(Sweetness::Sweet);
        let page = run_query(&cat, &p, 12);
        assert_eq!(page.total, 1);
        assert_eq!(page.records[0].title, "s");
    }

    #[test]
    fn pagination_math_and_clamping() {
        let cat = catalog(); // 5 records
        let mut p = params();

        p.page = 1;
        let page = run_query(&cat, &p, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.records.len(), 2);

        p.page = 0;
        assert_eq!(run_query(&cat, &p, 2).page, 1);

        p.page = 99;
        let last = run_query(&cat, &p, 2);
        assert_eq!(last.page, 3);
        assert_eq!(last.records.len(), 1);

        p.page = -3;
        assert_eq!(run_query(&cat, &p, 2).page, 1);
    }

    #[test]
    fn empty_catalog_yields_one_empty_page() {
        let page = run_query(&WineCatalog::default(), &params(), 12);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.records.is_empty());
    }
}
