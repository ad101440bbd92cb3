/// Markup extraction for the transcript site
///
/// Pure functions over page HTML. Each returns a `Parse` error when the
/// structure it relies on is absent, leaving the fallback policy to callers.
use super::CatalogEntry;
use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Html, Selector};

/// Fields found on a movie page; `None` where the element is missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    pub title: Option<String>,
    pub plot: Option<String>,
    pub transcript: Option<String>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::parse(format!("bad selector {}: {}", css, e)))
}

fn main_article(document: &Html) -> Result<ElementRef<'_>> {
    let article = selector("article.main-article")?;
    document
        .select(&article)
        .next()
        .ok_or_else(|| ScrapeError::parse("main article not found"))
}

/// Total listing pages, read from the pagination widget.
///
/// The last item is the "next" arrow, so the page count is the
/// second-to-last item.
pub fn extract_last_page(html: &str) -> Result<u32> {
    let document = Html::parse_document(html);
    let pagination = selector("ul.pagination")?;
    let page_item = selector("li.page-item")?;

    let widget = document
        .select(&pagination)
        .next()
        .ok_or_else(|| ScrapeError::parse("pagination not found"))?;

    let items: Vec<ElementRef> = widget.select(&page_item).collect();
    if items.len() < 2 {
        return Err(ScrapeError::parse(format!("expected at least 2 page items, found {}", items.len())));
    }

    let text = items[items.len() - 2].text().collect::<String>();
    text.trim()
        .parse()
        .map_err(|_| ScrapeError::parse(format!("page count is not a number: {:?}", text.trim())))
}

/// Every linked movie in the listing, in document order
pub fn extract_listing(html: &str) -> Result<Vec<CatalogEntry>> {
    let document = Html::parse_document(html);
    let article = main_article(&document)?;
    let anchor = selector("a[href]")?;

    Ok(article
        .select(&anchor)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let title = a.text().collect::<String>();
            Some(CatalogEntry::new(title.trim(), href))
        })
        .collect())
}

/// Title, plot and transcript from a movie page.
///
/// Fails only when the main article is missing; each field is looked up
/// independently inside it.
pub fn extract_detail(html: &str) -> Result<DetailFields> {
    let document = Html::parse_document(html);
    let article = main_article(&document)?;

    let heading = selector("h1")?;
    let plot = selector("p.plot")?;
    let script = selector("div.full-script")?;

    Ok(DetailFields {
        title: article
            .select(&heading)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string()),
        plot: article
            .select(&plot)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string()),
        transcript: article.select(&script).next().map(joined_lines),
    })
}

/// Text nodes of an element, trimmed, blanks dropped, one per line
fn joined_lines(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
