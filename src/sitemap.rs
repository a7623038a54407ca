// src/sitemap.rs
// =============================================================================
// This module renders the crawl result as a sitemap document.
//
// Output looks like:
//
//   <?xml version="1.0" encoding="UTF-8"?>
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9/">
//     <url>
//       <loc>http://example.com/a</loc>
//     </url>
//   </urlset>
//
// We describe the document with serde structs and let quick-xml write it,
// so characters like '&' in URLs are escaped for us.
// =============================================================================

use quick_xml::se::Serializer;
use serde::Serialize;

use crate::error::{CrawlError, Result};

/// Namespace of the <urlset> element
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9/";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Serialize)]
#[serde(rename = "urlset")]
struct UrlSet<'a> {
    // The '@' prefix makes quick-xml write this as an attribute
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    #[serde(rename = "url")]
    urls: Vec<UrlEntry<'a>>,
}

#[derive(Serialize)]
struct UrlEntry<'a> {
    loc: &'a str,
}

// Renders URLs as a sitemap XML document
//
// Entries appear in the same order as `urls`. The result ends with a
// newline, ready to print.
pub fn render(urls: &[String]) -> Result<String> {
    let document = UrlSet {
        xmlns: SITEMAP_NAMESPACE,
        urls: urls.iter().map(|url| UrlEntry { loc: url }).collect(),
    };

    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');

    let mut serializer = Serializer::new(&mut xml);
    serializer.indent(' ', 2);
    document
        .serialize(serializer)
        .map_err(|e| CrawlError::Serialization(e.to_string()))?;

    xml.push('\n');
    Ok(xml)
}

// Renders URLs as a pretty-printed JSON array (for --json)
pub fn render_json(urls: &[String]) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(urls).map_err(|e| CrawlError::Serialization(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // Reads the <loc> values back out of a rendered sitemap
    fn read_locs(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut locs = Vec::new();
        let mut in_loc = false;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"loc" => in_loc = true,
                Event::End(e) if e.name().as_ref() == b"loc" => in_loc = false,
                Event::Text(t) if in_loc => locs.push(t.unescape().unwrap().into_owned()),
                Event::Eof => break,
                _ => {}
            }
        }
        locs
    }

    #[test]
    fn test_render_layout() {
        let xml = render(&urls(&["http://example.com/a", "http://example.com/b"])).unwrap();

        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9/">
  <url>
    <loc>http://example.com/a</loc>
  </url>
  <url>
    <loc>http://example.com/b</loc>
  </url>
</urlset>
"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_render_keeps_order_and_count() {
        let input = urls(&[
            "http://example.com/z",
            "http://example.com/a",
            "http://example.com/m",
        ]);
        let xml = render(&input).unwrap();
        assert_eq!(read_locs(&xml), input);
    }

    #[test]
    fn test_render_escapes_reserved_characters() {
        let input = urls(&["http://example.com/search?a=1&b=2"]);
        let xml = render(&input).unwrap();

        assert!(xml.contains("<loc>http://example.com/search?a=1&amp;b=2</loc>"));
        assert_eq!(read_locs(&xml), input);
    }

    #[test]
    fn test_render_empty() {
        let xml = render(&[]).unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(SITEMAP_NAMESPACE));
        assert!(xml.ends_with('\n'));
        assert!(read_locs(&xml).is_empty());
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&urls(&["http://example.com/a"])).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec!["http://example.com/a"]);
    }
}
