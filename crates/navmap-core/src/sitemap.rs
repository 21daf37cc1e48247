//! Sitemap protocol 0.9 rendering.
//!
//! Output layout:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://docs.example.com/guide</loc>
//!   </url>
//! </urlset>
//! ```
//!
//! No timestamps are embedded, so unchanged input renders byte-identical
//! output.

use std::io;

use navmap_config::ChangeFreq;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Sitemap XML namespace.
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Map identifiers to `/<id>` paths, preserving order.
#[must_use]
pub fn sitemap_paths(ids: &[String]) -> Vec<String> {
    ids.iter().map(|id| format!("/{id}")).collect()
}

/// Renders site paths as a sitemap document for one host.
#[derive(Debug, Clone)]
pub struct SitemapWriter {
    host: String,
    changefreq: Option<ChangeFreq>,
}

impl SitemapWriter {
    /// Create a writer prefixing every path with `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            changefreq: None,
        }
    }

    /// Add a `<changefreq>` hint to every entry.
    #[must_use]
    pub fn with_changefreq(mut self, changefreq: Option<ChangeFreq>) -> Self {
        self.changefreq = changefreq;
        self
    }

    /// Render `paths` into a complete sitemap document.
    pub fn render<I, S>(&self, paths: I) -> io::Result<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        writer.write_event(Event::Start(
            BytesStart::new("urlset").with_attributes([("xmlns", SITEMAP_NS)]),
        ))?;

        for path in paths {
            let loc = format!("{}{}", self.host, path.as_ref());
            writer.write_event(Event::Start(BytesStart::new("url")))?;
            write_text_element(&mut writer, "loc", &loc)?;
            if let Some(changefreq) = self.changefreq {
                write_text_element(&mut writer, "changefreq", changefreq.as_str())?;
            }
            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;

        let mut buf = writer.into_inner();
        buf.push(b'\n');
        Ok(buf)
    }
}

/// Write `<name>text</name>` with the text escaped.
fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}
