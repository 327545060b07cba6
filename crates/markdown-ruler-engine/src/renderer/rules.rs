use crate::common::{escape_html, unescape_all};
use crate::markdown::Env;
use crate::options::Options;
use crate::renderer::Renderer;
use crate::token::{Nesting, Token};

pub fn code_inline(
    tokens: &[Token],
    idx: usize,
    _options: &Options,
    _env: &Env,
    renderer: &Renderer,
) -> String {
    let token = &tokens[idx];
    format!(
        "<code{}>{}</code>",
        renderer.render_attrs(token),
        escape_html(&token.content)
    )
}

pub fn code_block(
    tokens: &[Token],
    idx: usize,
    _options: &Options,
    _env: &Env,
    renderer: &Renderer,
) -> String {
    let token = &tokens[idx];
    format!(
        "<pre{}><code>{}</code></pre>\n",
        renderer.render_attrs(token),
        escape_html(&token.content)
    )
}

/// Fenced code. The first word of the info string names the language and
/// becomes a class; the rest is passed to the highlighter.
pub fn fence(
    tokens: &[Token],
    idx: usize,
    options: &Options,
    _env: &Env,
    renderer: &Renderer,
) -> String {
    let token = &tokens[idx];
    let info = unescape_all(&token.info).trim().to_string();

    let (lang_name, lang_attrs) = match info.find(char::is_whitespace) {
        Some(split) => (&info[..split], info[split..].trim_start()),
        None => (info.as_str(), ""),
    };

    let highlighted = options
        .highlight
        .as_ref()
        .map(|highlight| highlight(&token.content, lang_name, lang_attrs))
        .filter(|html| !html.is_empty())
        .unwrap_or_else(|| escape_html(&token.content).into_owned());

    if highlighted.starts_with("<pre") {
        return format!("{highlighted}\n");
    }

    if info.is_empty() {
        return format!(
            "<pre><code{}>{highlighted}</code></pre>\n",
            renderer.render_attrs(token)
        );
    }

    // Add the class on a scratch token so the stream stays untouched.
    let mut tmp = Token::new("", "", Nesting::SelfClosing);
    tmp.attrs = token.attrs.clone();
    tmp.attr_join("class", &format!("{}{lang_name}", options.lang_prefix));
    format!(
        "<pre><code{}>{highlighted}</code></pre>\n",
        renderer.render_attrs(&tmp)
    )
}

/// `<img>` with `alt` taken from the plain text of the description.
pub fn image(
    tokens: &[Token],
    idx: usize,
    options: &Options,
    env: &Env,
    renderer: &Renderer,
) -> String {
    let token = &tokens[idx];
    let alt = token
        .children
        .as_deref()
        .map(|children| renderer.render_inline_as_text(children, options, env))
        .unwrap_or_default();

    let mut tmp = Token::new(token.kind.as_str(), token.tag.as_str(), token.nesting);
    tmp.attrs = token.attrs.clone();
    tmp.attr_set("alt", alt);
    renderer.render_token(std::slice::from_ref(&tmp), 0, options)
}

pub fn hardbreak(
    _tokens: &[Token],
    _idx: usize,
    options: &Options,
    _env: &Env,
    _renderer: &Renderer,
) -> String {
    if options.xhtml_out { "<br />\n" } else { "<br>\n" }.to_string()
}

pub fn softbreak(
    _tokens: &[Token],
    _idx: usize,
    options: &Options,
    _env: &Env,
    _renderer: &Renderer,
) -> String {
    match (options.breaks, options.xhtml_out) {
        (true, true) => "<br />\n",
        (true, false) => "<br>\n",
        (false, _) => "\n",
    }
    .to_string()
}

pub fn text(
    tokens: &[Token],
    idx: usize,
    _options: &Options,
    _env: &Env,
    _renderer: &Renderer,
) -> String {
    escape_html(&tokens[idx].content).into_owned()
}

pub fn html_block(
    tokens: &[Token],
    idx: usize,
    _options: &Options,
    _env: &Env,
    _renderer: &Renderer,
) -> String {
    tokens[idx].content.clone()
}

pub fn html_inline(
    tokens: &[Token],
    idx: usize,
    _options: &Options,
    _env: &Env,
    _renderer: &Renderer,
) -> String {
    tokens[idx].content.clone()
}
