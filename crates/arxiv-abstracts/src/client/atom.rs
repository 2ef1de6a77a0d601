//! arXiv Atom feed parsing.
//!
//! The query API answers with an Atom document; each `<entry>` becomes one
//! [`PaperRecord`]. Namespaced elements are matched both with and without their
//! prefix.

use chrono::DateTime;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::{ClientError, ClientResult};
use crate::models::PaperRecord;

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "opensearch:totalResults", alias = "totalResults")]
    total_results: Option<usize>,
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    published: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<AtomAuthor>,
    #[serde(rename = "arxiv:primary_category", alias = "primary_category")]
    primary_category: Option<AtomCategory>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
}

#[derive(Debug, Deserialize)]
struct AtomAuthor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AtomCategory {
    #[serde(rename = "@term")]
    term: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@title")]
    title: Option<String>,
    #[serde(rename = "@type")]
    link_type: Option<String>,
}

/// One page of query results.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    /// Total matches the index reports for the query, if present.
    pub total_results: Option<usize>,

    /// Records on this page, in feed order.
    pub records: Vec<PaperRecord>,
}

/// Parse an Atom response body into a page of records.
///
/// # Errors
///
/// Returns [`ClientError::Feed`] for unparseable XML, [`ClientError::BadRequest`]
/// when the feed carries an API error entry and [`ClientError::MalformedEntry`]
/// when an entry lacks a required field.
pub fn parse_feed(xml: &str) -> ClientResult<FeedPage> {
    let feed: AtomFeed = from_str(xml)?;

    if let Some(error) = feed.entries.iter().find(|e| is_error_entry(e)) {
        let message = error.summary.as_deref().map_or_else(|| error.id.clone(), clean_text);
        return Err(ClientError::bad_request(message));
    }

    let records = feed.entries.into_iter().map(into_record).collect::<ClientResult<Vec<_>>>()?;

    Ok(FeedPage { total_results: feed.total_results, records })
}

fn is_error_entry(entry: &AtomEntry) -> bool {
    entry.id.contains("/api/errors")
}

fn into_record(entry: AtomEntry) -> ClientResult<PaperRecord> {
    let id = entry.id.trim().to_string();

    let published = entry
        .published
        .as_deref()
        .ok_or_else(|| ClientError::malformed(&id, "missing published date"))?;
    let published = DateTime::parse_from_rfc3339(published.trim())
        .map_err(|e| ClientError::malformed(&id, format!("invalid published date: {e}")))?
        .timestamp() as f64;

    let title = entry
        .title
        .as_deref()
        .map(clean_text)
        .ok_or_else(|| ClientError::malformed(&id, "missing title"))?;

    let summary = entry
        .summary
        .map(|s| s.trim().to_string())
        .ok_or_else(|| ClientError::malformed(&id, "missing summary"))?;

    let primary_category = entry
        .primary_category
        .and_then(|c| c.term)
        .map(|term| term.trim().to_string())
        .filter(|term| !term.is_empty())
        .ok_or_else(|| ClientError::malformed(&id, "missing primary category"))?;

    let authors = entry.authors.iter().map(|a| clean_text(&a.name)).collect();

    let pdf_url = entry
        .links
        .iter()
        .find(|link| {
            link.title.as_deref() == Some("pdf")
                || link.link_type.as_deref() == Some("application/pdf")
        })
        .and_then(|link| link.href.clone())
        .unwrap_or_else(|| id.replacen("/abs/", "/pdf/", 1));

    Ok(PaperRecord {
        id,
        primary_category,
        title,
        authors,
        published,
        r#abstract: summary,
        pdf_url,
    })
}

fn clean_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query?search_query%3Dcat%3Acs.CL" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=cat:cs.CL</title>
  <id>http://arxiv.org/api/abc</id>
  <updated>2024-01-01T00:00:00-05:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">2</opensearch:totalResults>
  <opensearch:startIndex xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">0</opensearch:startIndex>
  <opensearch:itemsPerPage xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">2</opensearch:itemsPerPage>
  <entry>
    <id>http://arxiv.org/abs/1706.03762v7</id>
    <updated>2023-08-02T17:54:37Z</updated>
    <published>2017-06-12T17:57:40Z</published>
    <title>Attention Is All
  You Need</title>
    <summary>  The dominant sequence transduction models are based on $x$ and
recurrent networks.
</summary>
    <author>
      <name>Ashish Vaswani</name>
    </author>
    <author>
      <name>Noam Shazeer</name>
    </author>
    <arxiv:comment xmlns:arxiv="http://arxiv.org/schemas/atom">15 pages</arxiv:comment>
    <link href="http://arxiv.org/abs/1706.03762v7" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/1706.03762v7" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.CL" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2101.00001v1</id>
    <updated>2021-01-01T00:00:00Z</updated>
    <published>2021-01-01T00:00:00Z</published>
    <title>No PDF Link</title>
    <summary>Short.</summary>
    <author>
      <name>Solo Author</name>
    </author>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="math.AG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>
"#;

    #[test]
    fn parses_page() {
        let page = parse_feed(PAGE_XML).unwrap();
        assert_eq!(page.total_results, Some(2));
        assert_eq!(page.records.len(), 2);

        let first = &page.records[0];
        assert_eq!(first.id, "http://arxiv.org/abs/1706.03762v7");
        assert_eq!(first.title, "Attention Is All You Need");
        assert_eq!(first.primary_category, "cs.CL");
        assert_eq!(first.authors, vec!["Ashish Vaswani", "Noam Shazeer"]);
        assert_eq!(first.pdf_url, "http://arxiv.org/pdf/1706.03762v7");
        assert!((first.published - 1_497_290_260.0).abs() < f64::EPSILON);
        assert!(first.r#abstract.starts_with("The dominant"));
        assert!(first.r#abstract.contains("$x$ and\nrecurrent"));
    }

    #[test]
    fn derives_pdf_url_when_link_missing() {
        let page = parse_feed(PAGE_XML).unwrap();
        assert_eq!(page.records[1].pdf_url, "http://arxiv.org/pdf/2101.00001v1");
        assert_eq!(page.records[1].primary_category, "math.AG");
    }

    #[test]
    fn empty_feed_has_no_records() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">0</opensearch:totalResults>
</feed>"#;
        let page = parse_feed(xml).unwrap();
        assert_eq!(page.total_results, Some(0));
        assert!(page.records.is_empty());
    }

    #[test]
    fn error_entry_is_bad_request() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">1</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/api/errors#incorrect_id_format_for_cat:zz</id>
    <title>Error</title>
    <summary>incorrect id format for cat:zz</summary>
    <updated>2024-01-01T00:00:00-05:00</updated>
    <author>
      <name>arXiv api core</name>
    </author>
  </entry>
</feed>"#;
        let err = parse_feed(xml).unwrap_err();
        assert!(matches!(err, ClientError::BadRequest { .. }));
        assert!(err.to_string().contains("incorrect id format"));
    }

    #[test]
    fn missing_published_is_malformed() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/abs/1234.5678v1</id>
    <title>T</title>
    <summary>S</summary>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cs.AI"/>
  </entry>
</feed>"#;
        let err = parse_feed(xml).unwrap_err();
        assert!(matches!(err, ClientError::MalformedEntry { .. }));
        assert!(err.to_string().contains("1234.5678"));
    }

    #[test]
    fn parses_entry_with_doi_between_links() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">1</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/cond-mat/0402024v2</id>
    <updated>2004-07-12T19:26:43Z</updated>
    <published>2004-02-01T18:07:15Z</published>
    <title>Chiral Fermions and Dynamic Matter</title>
    <summary>  We study a lattice model.
</summary>
    <author>
      <name>F. Author</name>
    </author>
    <arxiv:doi xmlns:arxiv="http://arxiv.org/schemas/atom">10.1529/biophysj.104.047340</arxiv:doi>
    <link title="doi" href="http://dx.doi.org/10.1529/biophysj.104.047340" rel="related"/>
    <arxiv:comment xmlns:arxiv="http://arxiv.org/schemas/atom">9 pages, 5 figures</arxiv:comment>
    <arxiv:journal_ref xmlns:arxiv="http://arxiv.org/schemas/atom">Biophys. J. 87 (2004) 2113</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/cond-mat/0402024v2" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/cond-mat/0402024v2" rel="related" type="application/pdf"/>
    <arxiv:primary_category xmlns:arxiv="http://arxiv.org/schemas/atom" term="cond-mat.soft" scheme="http://arxiv.org/schemas/atom"/>
    <category term="cond-mat.soft" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;
        let page = parse_feed(xml).unwrap();
        assert_eq!(page.records.len(), 1);

        let record = &page.records[0];
        assert_eq!(record.primary_category, "cond-mat.soft");
        assert_eq!(record.pdf_url, "http://arxiv.org/pdf/cond-mat/0402024v2");
        assert_eq!(record.r#abstract, "We study a lattice model.");
    }

    #[test]
    fn garbage_is_feed_error() {
        assert!(parse_feed("<feed><entry><id>").is_err());
    }
}
