//! Sorted XML properties encoding.
//!
//! The document layout is the conventional properties DTD:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8" standalone="no"?>
//! <!DOCTYPE properties SYSTEM "http://java.sun.com/dtd/properties.dtd">
//! <properties>
//! <entry key="global.transport.clusterName">ISPN</entry>
//! </properties>
//! ```
//!
//! XML 1.0 cannot carry C0 control characters other than tab, line feed and
//! carriage return, not even as character references. Those are written as
//! U+FFFD, so such values do not survive a round trip through this encoding.

use std::fmt::Write as _;

use confnorm_model::FlatConfig;

const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
<!DOCTYPE properties SYSTEM \"http://java.sun.com/dtd/properties.dtd\">\n";

/// Render `map` as a sorted XML properties document.
pub fn render(map: &FlatConfig) -> String {
    let mut out = String::from(HEADER);
    out.push_str("<properties>\n");
    for (key, value) in map.sorted() {
        out.push_str("<entry key=\"");
        escape_into(&mut out, key);
        out.push_str("\">");
        escape_into(&mut out, value);
        out.push_str("</entry>\n");
    }
    out.push_str("</properties>\n");
    out
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => {
                let _ = write!(out, "&#x{:X};", ch as u32);
            }
            '\x7f' => out.push_str("&#x7F;"),
            c if c.is_ascii_control() => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document() {
        let doc = render(&FlatConfig::new());
        assert_eq!(doc, format!("{HEADER}<properties>\n</properties>\n"));
    }

    #[test]
    fn entries_sorted_and_wrapped() {
        let map: FlatConfig = [("b", "2"), ("a", "1")].into_iter().collect();
        let doc = render(&map);
        let body: Vec<&str> = doc.lines().skip(2).collect();
        assert_eq!(
            body,
            [
                "<properties>",
                "<entry key=\"a\">1</entry>",
                "<entry key=\"b\">2</entry>",
                "</properties>",
            ]
        );
    }

    #[test]
    fn declares_utf8() {
        let doc = render(&FlatConfig::new());
        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\""));
    }

    #[test]
    fn markup_is_escaped() {
        let map: FlatConfig = [("k\"<", "a & b > 'c'\n")].into_iter().collect();
        let doc = render(&map);
        assert!(doc.contains("<entry key=\"k&quot;&lt;\">a &amp; b &gt; &apos;c&apos;&#xA;</entry>"));
    }

    #[test]
    fn forbidden_control_characters_are_replaced() {
        let map: FlatConfig = [("k\u{1}", "a\tb\u{0}c\u{1b}\r\u{7f}")].into_iter().collect();
        let doc = render(&map);
        assert!(doc.contains("<entry key=\"k\u{fffd}\">a&#x9;b\u{fffd}c\u{fffd}&#xD;&#x7F;</entry>"));
        assert!(!doc.contains("&#x0;"));
        assert!(!doc.contains("&#x1;"));
        assert!(!doc.contains("&#x1B;"));
    }
}
