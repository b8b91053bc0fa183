// Static sample market data and the filters used by the market view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEntry {
    pub crop: &'static str,
    pub current_price: u32,
    pub previous_price: u32,
    pub change: f32,
    pub trend: Trend,
    pub unit: &'static str,
    pub market: &'static str,
    pub last_updated: &'static str,
    pub category: &'static str,
}

const fn entry(
    crop: &'static str,
    current_price: u32,
    previous_price: u32,
    change: f32,
    trend: Trend,
    market: &'static str,
    last_updated: &'static str,
    category: &'static str,
) -> MarketEntry {
    MarketEntry {
        crop,
        current_price,
        previous_price,
        change,
        trend,
        unit: "quintal",
        market,
        last_updated,
        category,
    }
}

pub const MARKET_DATA: &[MarketEntry] = &[
    entry("Wheat", 2150, 1920, 12.0, Trend::Up, "Delhi Mandi", "2 hours ago", "cereals"),
    entry("Rice", 3200, 3300, -3.0, Trend::Down, "Mumbai APMC", "1 hour ago", "cereals"),
    entry("Cotton", 5800, 5370, 8.0, Trend::Up, "Ahmedabad", "3 hours ago", "cash-crops"),
    entry("Sugarcane", 350, 340, 2.9, Trend::Up, "Pune Mandi", "4 hours ago", "cash-crops"),
    entry("Tomato", 2500, 2800, -10.7, Trend::Down, "Bangalore", "1 hour ago", "vegetables"),
    entry("Onion", 1800, 1650, 9.1, Trend::Up, "Nashik", "2 hours ago", "vegetables"),
    entry("Potato", 1200, 1150, 4.3, Trend::Up, "Agra Mandi", "5 hours ago", "vegetables"),
    entry("Soybean", 4200, 4100, 2.4, Trend::Up, "Indore", "3 hours ago", "pulses"),
];

pub const CATEGORIES: &[&str] = &["cereals", "cash-crops", "vegetables", "pulses"];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PricePoint {
    pub date: &'static str,
    pub wheat: u32,
    pub rice: u32,
    pub cotton: u32,
}

pub const PRICE_HISTORY: &[PricePoint] = &[
    PricePoint { date: "Jan", wheat: 1800, rice: 3100, cotton: 5200 },
    PricePoint { date: "Feb", wheat: 1850, rice: 3150, cotton: 5300 },
    PricePoint { date: "Mar", wheat: 1900, rice: 3200, cotton: 5400 },
    PricePoint { date: "Apr", wheat: 1950, rice: 3250, cotton: 5500 },
    PricePoint { date: "May", wheat: 2000, rice: 3300, cotton: 5600 },
    PricePoint { date: "Jun", wheat: 2100, rice: 3200, cotton: 5700 },
    PricePoint { date: "Jul", wheat: 2150, rice: 3200, cotton: 5800 },
];

const ALL: &str = "all";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketFilter {
    pub category: Option<String>,
    pub market: Option<String>,
    pub search: Option<String>,
}

impl MarketFilter {
    pub fn matches(&self, item: &MarketEntry) -> bool {
        let category = selected(&self.category);
        let market = selected(&self.market).map(str::to_lowercase);
        let search = self.search.as_deref().unwrap_or("").to_lowercase();

        let matches_category = category.map_or(true, |c| item.category == c);
        let matches_market =
            market.map_or(true, |m| item.market.to_lowercase().contains(&m));
        let matches_search = item.crop.to_lowercase().contains(&search);
        matches_category && matches_market && matches_search
    }

    pub fn apply(&self) -> Vec<MarketEntry> {
        MARKET_DATA.iter().filter(|item| self.matches(item)).copied().collect()
    }
}

// `None`, empty and "all" all mean no restriction.
fn selected(value: &Option<String>) -> Option<&str> {
    match value.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(v) if v.eq_ignore_ascii_case(ALL) => None,
        Some(v) => Some(v),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Movers {
    pub gainers: Vec<MarketEntry>,
    pub losers: Vec<MarketEntry>,
}

pub fn top_movers() -> Movers {
    let by_trend = |trend: Trend| -> Vec<MarketEntry> {
        MARKET_DATA
            .iter()
            .filter(|item| item.trend == trend)
            .take(3)
            .copied()
            .collect()
    };
    Movers {
        gainers: by_trend(Trend::Up),
        losers: by_trend(Trend::Down),
    }
}

/// Rupee amount with Indian digit grouping, e.g. `₹1,25,000`.
pub fn format_price(amount: u32) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }
    let (head, last3) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();
    format!("₹{},{}", groups.join(","), last3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crops(entries: &[MarketEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.crop).collect()
    }

    #[test]
    fn default_filter_returns_everything() {
        assert_eq!(MarketFilter::default().apply().len(), MARKET_DATA.len());
        let all = MarketFilter {
            category: Some("all".into()),
            market: Some("all".into()),
            search: Some(String::new()),
        };
        assert_eq!(all.apply().len(), 8);
    }

    #[test]
    fn predicates_combine() {
        let filter = MarketFilter {
            category: Some("vegetables".into()),
            market: Some("NASH".into()),
            search: None,
        };
        assert_eq!(crops(&filter.apply()), vec!["Onion"]);

        let filter = MarketFilter {
            category: Some("cereals".into()),
            market: None,
            search: Some("RI".into()),
        };
        assert_eq!(crops(&filter.apply()), vec!["Rice"]);

        let filter = MarketFilter {
            category: Some("pulses".into()),
            market: Some("delhi".into()),
            search: None,
        };
        assert!(filter.apply().is_empty());
    }

    #[test]
    fn movers_keep_declaration_order() {
        let movers = top_movers();
        assert_eq!(crops(&movers.gainers), vec!["Wheat", "Cotton", "Sugarcane"]);
        assert_eq!(crops(&movers.losers), vec!["Rice", "Tomato"]);
    }

    #[test]
    fn rupee_formatting() {
        assert_eq!(format_price(350), "₹350");
        assert_eq!(format_price(2150), "₹2,150");
        assert_eq!(format_price(125000), "₹1,25,000");
        assert_eq!(format_price(12345678), "₹1,23,45,678");
    }
}
