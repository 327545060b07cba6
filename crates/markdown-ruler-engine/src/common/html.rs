use std::sync::OnceLock;

use regex::Regex;

/// Element names that start a type 6 HTML block.
pub const BLOCK_NAMES: &[&str] = &[
    "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption", "center",
    "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link", "main", "menu",
    "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param", "search", "section",
    "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "track", "ul",
];

const ATTR_NAME: &str = r"[a-zA-Z_:][a-zA-Z0-9:._-]*";
const UNQUOTED: &str = r#"[^"'=<>`\x00-\x20]+"#;
const SINGLE_QUOTED: &str = r"'[^']*'";
const DOUBLE_QUOTED: &str = r#""[^"]*""#;
const CLOSE_TAG: &str = r"</[A-Za-z][A-Za-z0-9\-]*\s*>";
const COMMENT: &str = r"<!---?>|<!--(?:[^-]|-[^-]|--[^>])*-->";
const PROCESSING: &str = r"<[?][\s\S]*?[?]>";
const DECLARATION: &str = r"<![A-Za-z][^>]*>";
const CDATA: &str = r"<!\[CDATA\[[\s\S]*?\]\]>";

fn open_tag() -> String {
    let attr_value = format!("(?:{UNQUOTED}|{SINGLE_QUOTED}|{DOUBLE_QUOTED})");
    let attribute = format!(r"(?:\s+{ATTR_NAME}(?:\s*=\s*{attr_value})?)");
    format!(r"<[A-Za-z][A-Za-z0-9\-]*{attribute}*\s*/?>")
}

/// Source of the open-or-close tag alternation, unanchored.
pub fn open_close_tag_source() -> String {
    format!("(?:{}|{CLOSE_TAG})", open_tag())
}

/// Any inline HTML construct, anchored at the start.
pub fn html_tag_re() -> &'static Regex {
    static HTML_TAG_RE: OnceLock<Regex> = OnceLock::new();
    HTML_TAG_RE.get_or_init(|| {
        Regex::new(&format!(
            "^(?:{}|{CLOSE_TAG}|{COMMENT}|{PROCESSING}|{DECLARATION}|{CDATA})",
            open_tag()
        ))
        .expect("Invalid HTML tag regex")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<a href=\"x\">", true)]
    #[case("<img src='x' alt=y />", true)]
    #[case("</div >", true)]
    #[case("<!-- c -->", true)]
    #[case("<!-->", true)]
    #[case("<?php echo 1; ?>", true)]
    #[case("<!DOCTYPE html>", true)]
    #[case("<![CDATA[x]]>", true)]
    #[case("<33>", false)]
    #[case("<a href=\"x>", false)]
    #[case("< a>", false)]
    fn recognises_inline_html(#[case] src: &str, #[case] expected: bool) {
        assert_eq!(html_tag_re().is_match(src), expected);
    }
}
