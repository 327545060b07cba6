use markdown_ruler_engine::{Env, Markdown, snapshot};

#[test]
fn fixture_inline_mix() {
    assert_fixture("inline_mix");
}

#[test]
fn fixture_quoted_list() {
    assert_fixture("quoted_list");
}

#[test]
fn fixture_references() {
    assert_fixture("references");
}

#[test]
fn fixture_code_blocks() {
    assert_fixture("code_blocks");
}

/// Parses `tests/fixtures/{name}.md` and snapshots the token dump followed
/// by the rendered HTML.
fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let src = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();

    let md = Markdown::new();
    let mut env = Env::default();
    let tokens = md.parse(&src, &mut env);
    snapshot::invariants(&tokens);

    let html = md.renderer.render(&tokens, &md.options, &env);
    let output = format!("{}\n{}", snapshot::dump(&tokens), html);

    insta::with_settings!({
        snapshot_path => fixtures_dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_snapshot!(name, output);
    });
}
