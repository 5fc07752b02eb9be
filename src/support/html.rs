//! HTML entity decoding for values echoed back by the billing platform API.
//!
//! The platform HTML-encodes some string fields (notably transfer codes), so
//! a code like `a&amp;b` must be turned back into `a&b` before use.

/// Decode named (full HTML5 table) and numeric entities.
pub fn decode_entities(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(decode_entities("Xy7#kP2!"), "Xy7#kP2!");
        assert_eq!(decode_entities("a & b"), "a & b");
    }

    #[test]
    fn basic_named_entities() {
        assert_eq!(decode_entities("a&amp;b&lt;c&gt;&quot;d&quot;"), "a&b<c>\"d\"");
    }

    #[test]
    fn html5_named_entities() {
        let decoded = decode_entities("&eacute;x&hellip;");
        assert_eq!(decoded, "éx…");
        assert_eq!(decoded.len(), 6);
    }

    #[test]
    fn numeric_entities() {
        assert_eq!(decode_entities("it&#39;s &#x41;"), "it's A");
    }
}
