use std::time::Duration;

use anyhow::{
    anyhow,
    Context,
    Result,
};
use hot100_core::{
    ChartDate,
    ChartSource,
};
use log::{
    debug,
    info,
};

const CHART_URL: &str = "https://www.billboard.com/charts/hot-100";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// The number one entry is rendered with its own, larger title style
const TOP_ENTRY_SELECTOR: &str = r#"h3#title-of-a-story[class="c-title a-no-trucate a-font-primary-bold-s u-letter-spacing-0021 u-font-size-23@tablet lrv-u-font-size-16 u-line-height-125 u-line-height-normal@mobile-max a-truncate-ellipsis u-max-width-245 u-max-width-230@tablet-only u-letter-spacing-0028@tablet"]"#;
const ENTRY_SELECTOR: &str = r#"h3#title-of-a-story[class="c-title a-no-trucate a-font-primary-bold-s u-letter-spacing-0021 lrv-u-font-size-18@tablet lrv-u-font-size-16 u-line-height-125 u-line-height-normal@mobile-max a-truncate-ellipsis u-max-width-330 u-max-width-230@tablet-only"]"#;


/// Billboard Hot 100 chart pages
pub struct BillboardChart {
    agent: ureq::Agent,
    base_url: String,
}

impl BillboardChart {
    pub fn new() -> Self { Self::with_base_url(CHART_URL) }

    /// Reads chart pages from `{base_url}/{date}/` instead of billboard.com
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(FETCH_TIMEOUT).build(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    pub fn chart_url(&self, date: &ChartDate) -> String { format!("{}/{date}/", self.base_url) }

    fn fetch_html(&self, url: &str) -> Result<String> {
        let resp = self.agent.get(url).call().with_context(|| format!("Failed to fetch {url}"))?;
        resp.into_string().context("Failed to read chart page")
    }
}

impl Default for BillboardChart {
    fn default() -> Self { Self::new() }
}

impl ChartSource for BillboardChart {
    fn chart_titles(&self, date: &ChartDate) -> Result<Vec<String>> {
        let url = self.chart_url(date);
        info!("Getting chart data from {url}...");

        let html = self.fetch_html(&url)?;
        debug!("Received {} bytes of chart markup", html.len());

        let titles = parse_chart(&html)?;
        info!("Extracted {} songs from the chart", titles.len());
        Ok(titles)
    }
}


/// Extracts song titles in rank order, top entry first
///
/// # Errors
///
/// Returns an error when no titles are found, which usually means the page
/// layout has changed.
pub fn parse_chart(html: &str) -> Result<Vec<String>> {
    let soup = scrape_core::Soup::parse(html);

    let mut titles = Vec::new();
    for (selector, limit) in [(TOP_ENTRY_SELECTOR, 1), (ENTRY_SELECTOR, usize::MAX)] {
        let tags = soup.find_all(selector).map_err(|e| anyhow!("invalid selector: {e}"))?;
        titles.extend(
            tags.into_iter()
                .take(limit)
                .map(|tag| tag.text().trim().to_owned())
                .filter(|title| !title.is_empty()),
        );
    }

    if titles.is_empty() {
        Err(anyhow!("No songs found; the chart page layout may have changed"))
    } else {
        Ok(titles)
    }
}
