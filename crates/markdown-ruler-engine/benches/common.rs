// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* **content** and a [link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another item\n\n> Quoted `code` text\n> continues here\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

/// Input that stresses delimiter pairing: long runs of unmatched openers.
#[allow(dead_code)]
pub fn generate_pathological_emphasis(size: usize) -> String {
    let mut content = "*a _b ".repeat(size);
    content.push_str(&"**".repeat(size));
    content
}

/// `size` nested link brackets, deeper than any nesting limit.
#[allow(dead_code)]
pub fn generate_nested_brackets(size: usize) -> String {
    format!("{}a{}", "[".repeat(size), "]".repeat(size))
}

#[allow(dead_code)]
pub fn generate_nested_quotes(depth: usize) -> String {
    let mut content = String::new();
    for level in 1..=depth {
        content.push_str(&">".repeat(level));
        content.push_str(" line\n");
    }
    content
}
