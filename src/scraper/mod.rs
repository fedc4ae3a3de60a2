mod doc_scraper;

pub use doc_scraper::{workspace_slug, DocScraper};
