//! Article and cross-reference extraction.
//!
//! An article starts at a heading such as `Artículo 3.` or `ARTICULO 3:` and
//! runs until the next blank line pair or the end of the text. Because the
//! scan resumes at that boundary, an `artículo 5.` mentioned inside an
//! article body does not start a new article.

use std::collections::BTreeSet;

use crate::patterns::{
    AMENDMENT_KEYWORD, ARTICLE_HEADING_PATTERN, ARTICLE_KEYWORD, REFERENCE_PATTERN,
};
use crate::types::Article;

const BLANK_LINE_PAIR: &str = "\n\n";

/// Find where article content starting at `start` ends.
///
/// The end is the first blank line pair at or after `start`. Without one the
/// content runs to the end of the text, leaving out a single trailing newline.
fn content_end(text: &str, start: usize) -> usize {
    if let Some(offset) = text[start..].find(BLANK_LINE_PAIR) {
        return start + offset;
    }
    if text.ends_with('\n') && text.len() > start {
        text.len() - 1
    } else {
        text.len()
    }
}

fn build_article(number: &str, block: &str, content: &str) -> Article {
    let text = block.trim().to_string();
    let paragraphs = content
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    Article {
        number: number.to_string(),
        is_amendment: text.to_lowercase().contains(AMENDMENT_KEYWORD),
        text,
        paragraphs,
    }
}

/// Extract articles in the order they appear in the text.
///
/// Numbers are kept as written; they may repeat or skip.
///
/// # Examples
/// ```
/// use legal_extractor::articles::extract_articles;
///
/// let articles = extract_articles("Artículo 2. Segundo.\n\nArtículo 1. Primero.");
/// let numbers: Vec<_> = articles.iter().map(|a| a.number.as_str()).collect();
/// assert_eq!(numbers, ["2", "1"]);
/// ```
#[must_use]
pub fn extract_articles(text: &str) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut cursor = 0;

    loop {
        let Some(caps) = ARTICLE_HEADING_PATTERN.captures_at(text, cursor) else {
            break;
        };
        let (Some(heading), Some(number)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let end = content_end(text, heading.end());
        articles.push(build_article(
            number.as_str(),
            &text[heading.start()..end],
            &text[heading.end()..end],
        ));

        // Headings are never empty, so the cursor always advances.
        cursor = end;
    }

    articles
}

/// Collect every article reference, normalized to `artículo <number>`.
///
/// # Examples
/// ```
/// use legal_extractor::articles::extract_references;
///
/// let refs = extract_references("Art. 4 y el ARTÍCULO 4, según el articulo 10");
/// assert_eq!(
///     refs.into_iter().collect::<Vec<_>>(),
///     ["artículo 10", "artículo 4"]
/// );
/// ```
#[must_use]
pub fn extract_references(text: &str) -> BTreeSet<String> {
    REFERENCE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|number| format!("{ARTICLE_KEYWORD} {}", number.as_str()))
        .collect()
}
