//! Display model for search results.
//!
//! Everything here is a pure function of a [`DomainSearchResult`] (plus the
//! clock for the time-left label), so re-rendering the same result always
//! yields the same rows and footer.

use chrono::{DateTime, Utc};

use crate::models::{DomainSearchResult, Listing, Skeleton};

const SECONDS_PER_DAY: i64 = 3600 * 24;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub uuid: String,
    pub summary: String,
    pub edit_href: String,
    pub unlock_action: String,
    /// The unlock dialog is offered only while the result is locked.
    pub show_unlock: bool,
    pub rows: Vec<TableRow>,
    pub footer: Footer,
}

/// One table row. Redacted rows have `revealed == None` and render
/// placeholders in the url and auction columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub rank: u32,
    pub score: String,
    pub price: String,
    pub valuation: String,
    pub revealed: Option<RevealedCells>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealedCells {
    pub url: String,
    pub link: String,
    pub auction_type: String,
    pub is_bid: bool,
    pub auction_end: String,
    pub time_left: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    pub range_label: String,
    pub total: u32,
    pub hidden: Option<usize>,
}

impl Footer {
    pub fn for_result(result: &DomainSearchResult) -> Self {
        Self {
            range_label: format!("{}-{}", result.skeletons.len() + 1, result.total_domains),
            total: result.total_domains,
            hidden: (!result.is_unlocked).then_some(result.skeletons.len()),
        }
    }

    pub fn text(&self) -> String {
        let mut text = format!(
            "Showing {} of {} domain listings",
            self.range_label, self.total
        );
        if let Some(hidden) = self.hidden {
            text.push_str(&format!(" ({hidden} hidden)"));
        }
        text
    }
}

impl ResultView {
    pub fn build(result: &DomainSearchResult, now: DateTime<Utc>) -> Self {
        let mut rows = Vec::with_capacity(result.skeletons.len() + result.domains.len());

        if !result.is_unlocked {
            let mut skeletons: Vec<&Skeleton> = result.skeletons.iter().collect();
            skeletons.sort_by_key(|s| s.rank);
            rows.extend(skeletons.into_iter().map(redacted_row));
        }

        let mut listings: Vec<&Listing> = result.domains.iter().collect();
        listings.sort_by_key(|l| l.rank);
        rows.extend(listings.into_iter().map(|l| revealed_row(l, now)));

        Self {
            uuid: result.uuid.clone(),
            summary: display_summary(result),
            edit_href: format!("/requests/{}/edit", result.uuid),
            unlock_action: format!("/requests/{}/unlock", result.uuid),
            show_unlock: !result.is_unlocked,
            rows,
            footer: Footer::for_result(result),
        }
    }

    pub fn redacted_count(&self) -> usize {
        self.rows.iter().filter(|r| r.revealed.is_none()).count()
    }
}

/// Row of the public collection page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub href: String,
    pub summary: String,
    pub is_example: bool,
}

impl SummaryRow {
    pub fn from_result(result: &DomainSearchResult) -> Self {
        Self {
            href: format!("/requests/{}", result.uuid),
            summary: display_summary(result),
            is_example: result.is_example,
        }
    }
}

fn display_summary(result: &DomainSearchResult) -> String {
    match result.summary.as_deref().map(str::trim) {
        Some(summary) if !summary.is_empty() => summary.to_string(),
        _ if !result.prompt.trim().is_empty() => result.prompt.trim().to_string(),
        _ => result.uuid.clone(),
    }
}

fn redacted_row(skeleton: &Skeleton) -> TableRow {
    TableRow {
        rank: skeleton.rank,
        score: format_score(skeleton.score),
        price: amount_cell(skeleton.price),
        valuation: amount_cell(skeleton.valuation),
        revealed: None,
    }
}

fn revealed_row(listing: &Listing, now: DateTime<Utc>) -> TableRow {
    let auction_type = listing.auction_type.clone().unwrap_or_default();
    let (auction_end, time_left) = match listing.auction_end_time_epoch {
        Some(epoch) => match format_epoch(epoch) {
            Some(end) => (end, time_left(epoch, now)),
            None => ("-".to_string(), String::new()),
        },
        None => (
            listing
                .auction_end_time
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            String::new(),
        ),
    };

    TableRow {
        rank: listing.rank,
        score: format_score(listing.score),
        price: amount_cell(listing.price),
        valuation: amount_cell(listing.valuation),
        revealed: Some(RevealedCells {
            url: listing.url.clone(),
            link: listing.link.clone(),
            is_bid: auction_type == "Bid",
            auction_type,
            auction_end,
            time_left,
        }),
    }
}

pub fn format_score(score: f64) -> String {
    format!("{score:.4}")
}

/// Dollar amount; integral values print without a fractional part.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("${}", value as i64)
    } else {
        format!("${value}")
    }
}

fn amount_cell(value: Option<f64>) -> String {
    value.map(format_amount).unwrap_or_else(|| "-".to_string())
}

fn format_epoch(epoch: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(epoch, 0).map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
}

/// Whole days and hours until `epoch`, floored like the auction widgets show them.
pub fn time_left(epoch: i64, now: DateTime<Utc>) -> String {
    let seconds_left = epoch.saturating_sub(now.timestamp());
    let days = seconds_left.div_euclid(SECONDS_PER_DAY);
    let hours = (seconds_left % SECONDS_PER_DAY).div_euclid(3600);
    format!("{days} days, {hours} hours")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{listing, locked, skeleton};

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_792_400_000, 0).unwrap()
    }

    #[test]
    fn locked_rows_start_with_skeletons() {
        let view = ResultView::build(&locked(5, 3), now());

        assert_eq!(view.rows.len(), 8);
        assert_eq!(view.redacted_count(), 5);
        assert!(view.rows[..5].iter().all(|r| r.revealed.is_none()));
        assert!(view.rows[5..].iter().all(|r| r.revealed.is_some()));
        assert!(view.show_unlock);
    }

    #[test]
    fn footer_reports_hidden_range() {
        let result = locked(5, 3);
        let view = ResultView::build(&result, now());

        assert_eq!(
            result.skeletons.len() + result.domains.len(),
            result.total_domains as usize
        );
        assert_eq!(view.footer.range_label, "6-8");
        assert_eq!(
            view.footer.text(),
            "Showing 6-8 of 8 domain listings (5 hidden)"
        );
    }

    #[test]
    fn unlocked_result_ignores_skeletons() {
        let mut result = locked(2, 2);
        result.is_unlocked = true;

        let view = ResultView::build(&result, now());
        assert_eq!(view.redacted_count(), 0);
        assert_eq!(view.rows.len(), 2);
        assert!(!view.show_unlock);
        assert_eq!(view.footer.hidden, None);
        assert!(!view.footer.text().contains("hidden"));
    }

    #[test]
    fn rows_sorted_by_rank_within_each_group() {
        let mut result = locked(3, 3);
        result.skeletons.reverse();
        result.domains = vec![listing(6), listing(4), listing(5)];

        let view = ResultView::build(&result, now());
        let ranks: Vec<u32> = view.rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn build_is_deterministic_and_leaves_input_alone() {
        let result = locked(4, 2);
        let before = result.clone();

        let first = ResultView::build(&result, now());
        let second = ResultView::build(&result, now());
        assert_eq!(first, second);
        assert_eq!(first.footer.text(), second.footer.text());
        assert_eq!(result, before);
    }

    #[test]
    fn redacted_row_keeps_numeric_facts() {
        let row = redacted_row(&skeleton(1));
        assert_eq!(row.score, "0.9500");
        assert_eq!(row.price, "$99.5");
        assert_eq!(row.valuation, "$2000");
    }

    #[test]
    fn missing_amounts_render_as_dash() {
        let mut s = skeleton(1);
        s.price = None;
        s.valuation = None;
        let row = redacted_row(&s);
        assert_eq!(row.price, "-");
        assert_eq!(row.valuation, "-");

        let mut l = listing(2);
        l.price = None;
        l.valuation = None;
        let row = revealed_row(&l, now());
        assert_eq!(row.price, "-");
        assert_eq!(row.valuation, "-");
        assert_eq!(row.score, "0.9123");
    }

    #[test]
    fn revealed_row_formats_auction_cells() {
        let row = revealed_row(&listing(1), now());
        let cells = row.revealed.unwrap();

        assert_eq!(row.score, "0.9123");
        assert!(cells.is_bid);
        assert_eq!(cells.auction_end, "2026-10-20 12:00 UTC");
        assert_eq!(cells.time_left, "1 days, 3 hours");
    }

    #[test]
    fn missing_epoch_falls_back_to_iso_time() {
        let mut l = listing(1);
        l.auction_end_time_epoch = None;
        l.auction_type = Some("BuyNow".to_string());

        let cells = revealed_row(&l, now()).revealed.unwrap();
        assert!(!cells.is_bid);
        assert_eq!(cells.auction_end, "2026-10-20T12:00:00+00:00");
        assert!(cells.time_left.is_empty());
    }

    #[test]
    fn time_left_floors_past_deadlines() {
        let now = now();
        assert_eq!(time_left(now.timestamp() - 100, now), "-1 days, -1 hours");
        assert_eq!(time_left(now.timestamp() + 3 * 3600, now), "0 days, 3 hours");
    }

    #[test]
    fn out_of_range_epoch_renders_without_label() {
        let mut l = listing(1);
        l.auction_end_time_epoch = Some(i64::MAX);

        let cells = revealed_row(&l, now()).revealed.unwrap();
        assert_eq!(cells.auction_end, "-");
        assert!(cells.time_left.is_empty());
    }

    #[test]
    fn time_left_saturates_on_extreme_epochs() {
        let now = now();
        assert!(time_left(i64::MIN, now).starts_with('-'));
        assert!(!time_left(i64::MAX, now).starts_with('-'));
    }

    #[test]
    fn summary_row_falls_back_to_uuid() {
        let result = DomainSearchResult {
            uuid: "u-1".to_string(),
            is_example: true,
            ..Default::default()
        };
        let row = SummaryRow::from_result(&result);
        assert_eq!(row.href, "/requests/u-1");
        assert_eq!(row.summary, "u-1");
        assert!(row.is_example);
    }
}
