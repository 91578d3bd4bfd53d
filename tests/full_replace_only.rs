// tests/full_replace_only.rs
// Fails if runtime code writes to a remote store outside the sync engine.
// Full-replace saves belong to src/sheets/sync.rs; the resolver may append the
// header once to a sheet it just created. Store implementations are exempt.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn normalized(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn is_store_impl(path: &str) -> bool {
    path.contains("/sheets/remote/")
}

/// Drops everything from the first `#[cfg(test)]` on; tests may poke stores directly.
fn runtime_part(content: &str) -> &str {
    match content.find("#[cfg(test)]") {
        Some(idx) => &content[..idx],
        None => content,
    }
}

fn offenders(pattern: &str, allowed: &[&str]) -> Vec<String> {
    let src_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);

    let mut found = Vec::new();
    for file in files {
        let path = normalized(&file);
        if is_store_impl(&path) || allowed.iter().any(|a| path.ends_with(a)) {
            continue;
        }
        let Ok(content) = fs::read_to_string(&file) else { continue };
        if runtime_part(&content).contains(pattern) {
            found.push(path);
        }
    }
    found
}

#[test]
fn full_replace_only_from_sync_engine() {
    let found = offenders(".replace_all(", &["src/sheets/sync.rs"]);
    assert!(
        found.is_empty(),
        "replace_all called outside the sync engine:\n  {}",
        found.join("\n  ")
    );
}

#[test]
fn store_appends_only_from_resolver() {
    // Store appends take the handle by reference; Table::append_row takes owned values.
    let found = offenders(".append_row(&", &["src/sheets/resolver.rs"]);
    assert!(
        found.is_empty(),
        "store append outside the resolver:\n  {}",
        found.join("\n  ")
    );
}
