//! Hygiene — source budgets for the editor crate.
//!
//! Scans `src/` (test files excluded) for patterns the crate keeps out of
//! production code. Each budget only ever goes down: fix an existing hit
//! before adding a new one.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    /// Files allowed to contain the pattern without counting against `max`.
    exempt: &'static [&'static str],
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, exempt: &[], why: "propagate with `?`" },
    Budget { pattern: ".expect(", max: 0, exempt: &[], why: "propagate with `?`" },
    Budget { pattern: "panic!(", max: 0, exempt: &[], why: "return an EditorError" },
    Budget { pattern: "unreachable!(", max: 0, exempt: &[], why: "model the state instead" },
    Budget { pattern: "todo!(", max: 0, exempt: &[], why: "unfinished code" },
    Budget { pattern: "unimplemented!(", max: 0, exempt: &[], why: "unfinished code" },
    Budget { pattern: "let _ =", max: 0, exempt: &[], why: "errors must be inspected or logged" },
    // Hex channel parsing in `color`.
    Budget { pattern: ".ok()", max: 1, exempt: &[], why: "errors must be inspected or logged" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, exempt: &[], why: "delete unused code" },
    Budget { pattern: "println!", max: 0, exempt: &[], why: "use the log facade" },
    Budget { pattern: "eprintln!", max: 0, exempt: &[], why: "use the log facade" },
    // The core stays browser-independent; the client owns DOM access.
    Budget { pattern: "web_sys", max: 0, exempt: &[], why: "DOM access belongs to the client" },
    Budget { pattern: "wasm_bindgen", max: 0, exempt: &[], why: "DOM access belongs to the client" },
    // Time flows through the Clock seam so tests can pin it.
    Budget { pattern: "SystemTime", max: 0, exempt: &["clock.rs"], why: "read time through Clock" },
    Budget { pattern: "Date::now", max: 0, exempt: &["clock.rs"], why: "read time through Clock" },
];

struct SourceFile {
    path: PathBuf,
    content: String,
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_rs || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path, content });
        }
    }
}

fn hits(files: &[SourceFile], budget: &Budget) -> Vec<(String, usize)> {
    files
        .iter()
        .filter(|f| {
            let name = f.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            !budget.exempt.contains(&name.as_str())
        })
        .filter_map(|f| {
            let count = f.content.lines().filter(|line| line.contains(budget.pattern)).count();
            (count > 0).then(|| (f.path.display().to_string(), count))
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("editor.rs")), "run from the editor crate root");
}

#[test]
fn budgets_hold() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            let detail = found.iter().map(|(p, c)| format!("    {p}: {c}")).collect::<Vec<_>>().join("\n");
            failures.push(format!(
                "`{}` budget exceeded: found {count}, max {} ({})\n{detail}",
                budget.pattern, budget.max, budget.why
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn exempt_files_exist() {
    let files = source_files();
    for budget in BUDGETS {
        for name in budget.exempt {
            assert!(
                files.iter().any(|f| f.path.file_name().is_some_and(|n| n == *name)),
                "exemption for `{}` names missing file {name}",
                budget.pattern
            );
        }
    }
}
