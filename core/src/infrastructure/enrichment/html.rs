use std::sync::LazyLock;

use regex::Regex;

use crate::domain::enrichment::entities::LookupPage;

static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1>").expect("valid regex"));
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").expect("valid regex"));
static META_NAME_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s[^>]*name\s*=\s*["']description["'][^>]*content\s*=\s*["']([^"']*)["']"#)
        .expect("valid regex")
});
static META_CONTENT_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s[^>]*content\s*=\s*["']([^"']*)["'][^>]*name\s*=\s*["']description["']"#)
        .expect("valid regex")
});
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("valid regex"));
static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").expect("valid regex")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Extracts the ingredient title and description from a reference page.
///
/// Returns `None` unless both fragments are present and non-empty.
pub fn parse_page(html: &str) -> Option<LookupPage> {
    let html = SCRIPT_OR_STYLE.replace_all(html, " ");

    let title = extract_title(&html)?;
    let description = extract_description(&html)?;

    Some(LookupPage::new(title, description))
}

fn extract_title(html: &str) -> Option<String> {
    if let Some(title) = first_capture(&H1, html) {
        return Some(title);
    }

    // Document titles usually carry a site suffix: "Glycerin - Site".
    let title = first_capture(&TITLE, html)?;
    let cut = [" | ", " - "]
        .iter()
        .filter_map(|separator| title.find(separator))
        .min()
        .unwrap_or(title.len());
    let title = title[..cut].trim();

    (!title.is_empty()).then(|| title.to_string())
}

fn extract_description(html: &str) -> Option<String> {
    first_capture(&META_NAME_FIRST, html)
        .or_else(|| first_capture(&META_CONTENT_FIRST, html))
        .or_else(|| {
            PARAGRAPH
                .captures_iter(html)
                .filter_map(|captures| captures.get(1))
                .map(|m| clean_text(m.as_str()))
                .find(|text| !text.is_empty())
        })
}

fn first_capture(pattern: &Regex, html: &str) -> Option<String> {
    let text = clean_text(pattern.captures(html)?.get(1)?.as_str());
    (!text.is_empty()).then_some(text)
}

/// Strips markup, decodes common entities and collapses whitespace.
pub fn clean_text(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE.replace_all(&decoded, " ").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_prefers_h1_and_meta_description() {
        let html = r#"
            <html><head>
              <title>Glycerin - Ingredient reference</title>
              <meta name="description" content="Glycerin is a humectant &amp; skin-identical ingredient.">
            </head><body>
              <h1 class="klavikab"> Glycerin </h1>
              <p>Body paragraph.</p>
            </body></html>
        "#;

        let page = parse_page(html).unwrap();

        assert_eq!(page.title, "Glycerin");
        assert_eq!(
            page.description,
            "Glycerin is a humectant & skin-identical ingredient."
        );
    }

    #[test]
    fn test_parse_page_handles_content_before_name() {
        let html = r#"<h1>Limonene</h1><meta content="A fragrant, potentially irritant terpene." name="description">"#;

        let page = parse_page(html).unwrap();

        assert_eq!(page.description, "A fragrant, potentially irritant terpene.");
    }

    #[test]
    fn test_parse_page_falls_back_to_title_and_paragraph() {
        let html = r#"
            <head><title>Sodium Laureth Sulfate | Reference</title></head>
            <body>
              <p>   </p>
              <p>A <b>cleansing</b> agent that can be an irritant.</p>
            </body>
        "#;

        let page = parse_page(html).unwrap();

        assert_eq!(page.title, "Sodium Laureth Sulfate");
        assert_eq!(page.description, "A cleansing agent that can be an irritant.");
    }

    #[test]
    fn test_parse_page_ignores_scripts() {
        let html = r#"<script>var p = "<p>fake</p>";</script><h1>Water</h1><p>Solvent.</p>"#;

        let page = parse_page(html).unwrap();

        assert_eq!(page.description, "Solvent.");
    }

    #[test]
    fn test_parse_page_requires_both_fragments() {
        assert!(parse_page("<h1>Water</h1>").is_none());
        assert!(parse_page("<p>Only a paragraph.</p>").is_none());
        assert!(parse_page("").is_none());
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  a\n<br/>b&nbsp;&lt;c&gt; "), "a b <c>");
    }
}
