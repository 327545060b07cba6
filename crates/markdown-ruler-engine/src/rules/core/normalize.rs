use crate::state::StateCore;

/// Normalises line endings to `\n` and replaces NUL with U+FFFD.
pub fn normalize(state: &mut StateCore<'_>) {
    if state.src.contains(['\r', '\0']) {
        state.src = normalize_source(&state.src);
    }
}

pub fn normalize_source(src: &str) -> String {
    src.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\0', "\u{FFFD}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_line_endings() {
        assert_eq!(normalize_source("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn replaces_nul() {
        assert_eq!(normalize_source("a\0b"), "a\u{FFFD}b");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_source("x\r\r\n\0y");
        assert_eq!(normalize_source(&once), once);
    }
}
