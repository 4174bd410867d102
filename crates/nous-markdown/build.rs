//! Writes `$OUT_DIR/fixture_tests.rs`: a `render_fixtures` module with one
//! test per note in `src/fixtures/`, comparing `{name}.md` rendered against
//! `{name}.html`.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

const FIXTURE_DIR: &str = "src/fixtures";

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed={FIXTURE_DIR}");

    let out_dir = env::var_os("OUT_DIR")
        .map(PathBuf::from)
        .ok_or_else(|| io::Error::other("OUT_DIR is not set"))?;
    let notes = fixture_notes(Path::new(FIXTURE_DIR))?;

    fs::write(out_dir.join("fixture_tests.rs"), fixture_module(&notes))
}

/// File stems of the `.md` notes in `dir`, sorted so the output is stable.
fn fixture_notes(dir: &Path) -> io::Result<Vec<String>> {
    let mut notes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => notes.push(stem.to_owned()),
            None => {
                return Err(io::Error::other(format!(
                    "fixture name is not UTF-8: {}",
                    path.display()
                )));
            }
        }
    }
    notes.sort();
    Ok(notes)
}

fn fixture_module(notes: &[String]) -> String {
    let tests: String = notes
        .iter()
        .map(|name| {
            format!(
                "
    #[test]
    fn {name}() {{
        fixture_test(\"{name}\");
    }}
"
            )
        })
        .collect();

    format!("mod render_fixtures {{\n    use super::fixture_test;\n{tests}}}\n")
}
