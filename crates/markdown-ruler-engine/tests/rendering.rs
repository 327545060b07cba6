use markdown_ruler_engine::{Env, Markdown, Options, Preset, RulerError, snapshot};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn render(src: &str) -> String {
    Markdown::new().render(src)
}

fn render_with(options: Options, src: &str) -> String {
    let mut md = Markdown::new();
    md.set(options);
    md.render(src)
}

#[rstest]
#[case::emphasis("*a*", "<p><em>a</em></p>\n")]
#[case::strong("**a**", "<p><strong>a</strong></p>\n")]
#[case::strong_in_emphasis("***a***", "<p><em><strong>a</strong></em></p>\n")]
#[case::strikethrough("~~a~~", "<p><s>a</s></p>\n")]
#[case::strikethrough_odd_run("~~~a~~~", "<p>~<s>a</s>~</p>\n")]
#[case::strikethrough_unmatched_run("a~~~~b", "<p>a~~~~b</p>\n")]
#[case::single_tilde("~a~", "<p>~a~</p>\n")]
#[case::escaped_emphasis("\\*a\\*", "<p>*a*</p>\n")]
#[case::intraword_underscore("snake_case_name", "<p>snake_case_name</p>\n")]
#[case::too_many_hashes("####### heading", "<p>####### heading</p>\n")]
#[case::atx_heading("## Title ##", "<h2>Title</h2>\n")]
#[case::setext_h1("Title\n===", "<h1>Title</h1>\n")]
#[case::setext_h2("Sub\n---", "<h2>Sub</h2>\n")]
#[case::thematic_break("* * *", "<hr>\n")]
#[case::indented_code("    code", "<pre><code>code\n</code></pre>\n")]
#[case::fence(
    "```rust\nfn main() {}\n```",
    "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
)]
#[case::blockquote("> quote", "<blockquote>\n<p>quote</p>\n</blockquote>\n")]
#[case::lazy_blockquote("> a\nb", "<blockquote>\n<p>a\nb</p>\n</blockquote>\n")]
#[case::bullet_list("- a\n- b", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n")]
#[case::ordered_list("1. a\n2. b", "<ol>\n<li>a</li>\n<li>b</li>\n</ol>\n")]
#[case::ordered_start("3. a", "<ol start=\"3\">\n<li>a</li>\n</ol>\n")]
#[case::loose_list(
    "- a\n\n- b",
    "<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ul>\n"
)]
#[case::nested_list(
    "- a\n  - b",
    "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>\n"
)]
#[case::inline_link("[a](/u \"t\")", "<p><a href=\"/u\" title=\"t\">a</a></p>\n")]
#[case::reference_link("[a]\n\n[a]: /u", "<p><a href=\"/u\">a</a></p>\n")]
#[case::reference_case_folded("[Foo]: /url\n\n[foo]", "<p><a href=\"/url\">foo</a></p>\n")]
#[case::image_alt_is_plain_text(
    "![alt *x*](/i.png)",
    "<p><img src=\"/i.png\" alt=\"alt x\"></p>\n"
)]
#[case::autolink("<https://x.org>", "<p><a href=\"https://x.org\">https://x.org</a></p>\n")]
#[case::email_autolink("<me@x.org>", "<p><a href=\"mailto:me@x.org\">me@x.org</a></p>\n")]
#[case::code_span("`a  b`", "<p><code>a  b</code></p>\n")]
#[case::code_span_padding("`` `x` ``", "<p><code>`x`</code></p>\n")]
#[case::hard_break("a  \nb", "<p>a<br>\nb</p>\n")]
#[case::backslash_break("a\\\nb", "<p>a<br>\nb</p>\n")]
#[case::soft_break("a\nb", "<p>a\nb</p>\n")]
#[case::entities("&amp; &copy; &#35;", "<p>&amp; © #</p>\n")]
#[case::invalid_code_point("&#0;", "<p>\u{FFFD}</p>\n")]
#[case::unsafe_link_stays_text(
    "[a](javascript:alert(1))",
    "<p>[a](javascript:alert(1))</p>\n"
)]
#[case::attribute_escaping(
    "[a](/u \"x\\\"&\")",
    "<p><a href=\"/u\" title=\"x&quot;&amp;\">a</a></p>\n"
)]
#[case::destination_encoding("[a](<b c>)", "<p><a href=\"b%20c\">a</a></p>\n")]
#[case::raw_html_escaped_by_default("<div>", "<p>&lt;div&gt;</p>\n")]
fn renders_default_preset(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(render(src), expected);
}

#[test]
fn typographer_replaces_symbols_and_quotes() {
    let options = Options {
        typographer: true,
        ..Options::default()
    };
    assert_eq!(
        render_with(options, "(c) -- \"q\""),
        "<p>\u{a9} \u{2013} \u{201C}q\u{201D}</p>\n"
    );
}

#[test]
fn custom_quotes_are_used() {
    let options = Options {
        typographer: true,
        quotes: ["«", "»", "‹", "›"].map(str::to_string),
        ..Options::default()
    };
    assert_eq!(render_with(options, "\"a\""), "<p>«a»</p>\n");
}

#[test]
fn linkify_turns_bare_urls_into_links() {
    let options = Options {
        linkify: true,
        ..Options::default()
    };
    assert_eq!(
        render_with(options, "see https://x.org."),
        "<p>see <a href=\"https://x.org\">https://x.org</a>.</p>\n"
    );
}

#[rstest]
#[case::www_host(
    "visit www.example.com now",
    "<p>visit <a href=\"http://www.example.com\">www.example.com</a> now</p>\n"
)]
#[case::email("mail me at a@b.com", "<p>mail me at <a href=\"mailto:a@b.com\">a@b.com</a></p>\n")]
#[case::host_with_path(
    "see example.org/docs.",
    "<p>see <a href=\"http://example.org/docs\">example.org/docs</a>.</p>\n"
)]
#[case::unknown_tld_stays_text("open notes.txt", "<p>open notes.txt</p>\n")]
#[case::inside_markdown_link("[www.a.com](/b)", "<p><a href=\"/b\">www.a.com</a></p>\n")]
#[case::inside_code_span("`www.a.com`", "<p><code>www.a.com</code></p>\n")]
fn linkify_finds_hosts_and_emails(#[case] src: &str, #[case] expected: &str) {
    let options = Options {
        linkify: true,
        ..Options::default()
    };
    assert_eq!(render_with(options, src), expected);
}

#[test]
fn linkify_skips_hosts_without_option() {
    assert_eq!(
        render("visit www.example.com"),
        "<p>visit www.example.com</p>\n"
    );
}

#[test]
fn linkify_leaves_existing_links_alone() {
    let options = Options {
        linkify: true,
        ..Options::default()
    };
    assert_eq!(
        render_with(options, "[https://a.org](/b)"),
        "<p><a href=\"/b\">https://a.org</a></p>\n"
    );
}

#[test]
fn breaks_option_renders_soft_breaks_as_br() {
    let options = Options {
        breaks: true,
        ..Options::default()
    };
    assert_eq!(render_with(options, "a\nb"), "<p>a<br>\nb</p>\n");
}

#[test]
fn commonmark_preset_uses_xhtml_and_no_strikethrough() {
    let md = Markdown::with_preset(Preset::CommonMark);
    assert_eq!(md.render("a  \nb"), "<p>a<br />\nb</p>\n");
    assert_eq!(md.render("~~a~~"), "<p>~~a~~</p>\n");
}

#[test]
fn commonmark_preset_passes_raw_html() {
    let md = Markdown::with_preset(Preset::CommonMark);
    assert_eq!(
        md.render("<div>\n*a*\n</div>\n"),
        "<div>\n*a*\n</div>\n"
    );
    assert_eq!(md.render("a <b>c</b>"), "<p>a <b>c</b></p>\n");
}

#[test]
fn zero_preset_renders_plain_paragraphs() {
    let md = Markdown::with_preset(Preset::Zero);
    assert_eq!(md.render("# a\n\n*b*"), "<p># a</p>\n<p>*b*</p>\n");
}

#[test]
fn disabled_rule_falls_back_to_text() {
    let mut md = Markdown::new();
    md.disable(&["emphasis"], false).unwrap();
    assert_eq!(md.render("*a*"), "<p>*a*</p>\n");
}

#[test]
fn unknown_rule_names_are_reported() {
    let mut md = Markdown::new();
    let err = md.enable(&["emphasis", "nope"], false).unwrap_err();
    assert_eq!(err, RulerError::InvalidRuleNames(vec!["nope".to_string()]));
    assert_eq!(
        err.to_string(),
        "Rule manager is unable to find rule(s): nope"
    );
}

#[test]
fn ignore_invalid_returns_found_names() {
    let mut md = Markdown::new();
    let found = md.disable(&["heading", "nope"], true).unwrap();
    assert_eq!(found, vec!["heading".to_string()]);
    assert_eq!(md.render("# a"), "<p># a</p>\n");
}

#[test]
fn enable_only_keeps_named_rules() {
    let mut md = Markdown::new();
    md.enable_only(
        &[
            "normalize",
            "block",
            "inline",
            "text_join",
            "paragraph",
            "text",
            "backticks",
        ],
        false,
    )
    .unwrap();
    assert_eq!(md.render("`a` *b*"), "<p><code>a</code> *b*</p>\n");
}

#[test]
fn brackets_beyond_nesting_limit_stay_text() {
    let md = Markdown::new();
    let depth = md.options.max_nesting + 1;
    let src = format!("{}a{}", "[".repeat(depth), "]".repeat(depth));
    assert_eq!(md.render(&src), format!("<p>{src}</p>\n"));
}

#[test]
fn deeply_nested_quotes_terminate() {
    let md = Markdown::with_preset(Preset::CommonMark);
    let src = format!("{} a\n", ">".repeat(200));
    let mut env = Env::default();
    let tokens = md.parse(&src, &mut env);
    snapshot::invariants(&tokens);
}

#[test]
fn parse_inline_renders_without_paragraph() {
    let md = Markdown::new();
    assert_eq!(md.render_inline("a **b**"), "a <strong>b</strong>");
}

#[test]
fn env_is_shared_between_parse_and_render() {
    let md = Markdown::new();
    let mut env = Env::default();
    let html = md.render_with_env("[x][id]\n\n[id]: /target\n", &mut env);
    assert_eq!(html, "<p><a href=\"/target\">x</a></p>\n");
    assert!(env.references.contains_key("ID"));
}
