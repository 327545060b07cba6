//! Default link hooks installed on [`crate::Markdown`], and the finder
//! behind the linkify rules.

use std::sync::OnceLock;

use linkify::{LinkFinder, LinkKind};

/// Characters left untouched when percent-encoding a destination.
const ENCODE_KEEP: &str = ";/?:@&=+$,-_.!~*'()#";
/// Characters kept percent-encoded when decoding for display.
const DECODE_KEEP: &str = ";/?:@&=+$,#%";

/// Percent-encodes everything outside the URL-safe set, leaving valid
/// existing `%XX` escapes alone.
pub fn normalize_link(url: &str) -> String {
    let bytes = url.as_bytes();
    let mut out = String::with_capacity(url.len());
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            out.push_str(&url[i..i + 3]);
            i += 3;
            continue;
        }
        if b.is_ascii_alphanumeric() || (b.is_ascii() && ENCODE_KEEP.contains(b as char)) {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
        i += 1;
    }
    out
}

/// Decodes percent escapes for display, keeping reserved characters
/// encoded and leaving bytes that form no valid UTF-8 sequence as written.
pub fn normalize_link_text(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    let mut rest = url;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let run = &rest[start..];
        let run_len = percent_run_len(run);
        if run_len == 0 {
            out.push('%');
            rest = &run[1..];
            continue;
        }
        decode_escapes(&run[..run_len], &mut out);
        rest = &run[run_len..];
    }
    out.push_str(rest);
    out
}

/// Length of the leading run of `%XX` escapes.
fn percent_run_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut len = 0;
    while len + 2 < bytes.len()
        && bytes[len] == b'%'
        && bytes[len + 1].is_ascii_hexdigit()
        && bytes[len + 2].is_ascii_hexdigit()
    {
        len += 3;
    }
    len
}

/// Byte length of the UTF-8 sequence starting with `lead`, 0 if `lead`
/// can't start one.
fn utf8_sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Decodes a run of `%XX` escapes one UTF-8 sequence at a time, so a bad
/// byte only keeps its own escape.
fn decode_escapes(encoded: &str, out: &mut String) {
    let bytes = urlencoding::decode_binary(encoded.as_bytes());
    let mut i = 0;
    while i < bytes.len() {
        let len = utf8_sequence_len(bytes[i]);
        let decoded = bytes
            .get(i..i + len)
            .filter(|seq| !seq.is_empty())
            .and_then(|seq| std::str::from_utf8(seq).ok())
            .and_then(|s| s.chars().next());

        match decoded {
            Some(c) if DECODE_KEEP.contains(c) => out.push_str(&encoded[i * 3..(i + len) * 3]),
            Some(c) => out.push(c),
            None => {
                out.push_str(&encoded[i * 3..i * 3 + 3]);
                i += 1;
                continue;
            }
        }
        i += len;
    }
}

/// URLs (with or without a scheme) and email addresses in plain text.
pub fn link_finder() -> &'static LinkFinder {
    static FINDER: OnceLock<LinkFinder> = OnceLock::new();
    FINDER.get_or_init(|| {
        let mut finder = LinkFinder::new();
        finder.kinds(&[LinkKind::Url, LinkKind::Email]);
        finder.url_must_have_scheme(false);
        finder
    })
}

/// Rejects script-capable protocols. `data:` is allowed only for a few
/// image types.
pub fn validate_link(url: &str) -> bool {
    let s = url.trim().to_ascii_lowercase();
    let bad = ["vbscript:", "javascript:", "file:", "data:"]
        .iter()
        .any(|proto| s.starts_with(proto));
    if !bad {
        return true;
    }
    ["gif", "png", "jpeg", "webp"]
        .iter()
        .any(|kind| s.starts_with(&format!("data:image/{kind};")))
}
