//! Walks and parses over a real directory tree, symlinks included.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::json;

use tmpltree::{
    parse_dir, parse_dir_with, walk, DirStore, Error, TextEngine, WalkOptions,
};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = env::temp_dir().join(format!("tmpltree-test-{}-{}", std::process::id(), id));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn parse_dir_loads_a_real_tree() {
    let dir = temp_dir();
    fs::write(dir.join("data.txt"), "super simple {{value}}").unwrap();
    fs::create_dir_all(dir.join("some/deep")).unwrap();
    fs::write(dir.join("some/deep/file.txt"), "other simple {{value}}").unwrap();

    let ns = parse_dir::<TextEngine>(None, &dir, "*.txt").unwrap();

    assert_eq!(ns.root_name(), "data.txt");
    assert_eq!(
        ns.render("some/deep/file.txt", &json!({ "value": "bar" })).unwrap(),
        "other simple bar"
    );

    cleanup(&dir);
}

#[test]
fn missing_root_fails_with_resolve_error() {
    let dir = temp_dir();
    let gone = dir.join("does-not-exist");

    let err = parse_dir::<TextEngine>(None, &gone, "*.txt").unwrap_err();
    match err {
        Error::Resolve { ref path, .. } => assert!(path.contains("does-not-exist")),
        ref other => panic!("expected resolve error, got {other}"),
    }

    cleanup(&dir);
}

#[cfg(unix)]
mod unix {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn symlinked_directory_matches_under_both_names() {
        let dir = temp_dir();
        fs::write(dir.join("1.html"), "one").unwrap();
        fs::write(dir.join("3.html"), "three").unwrap();
        fs::create_dir(dir.join("first")).unwrap();
        fs::write(dir.join("first/4.html"), "four {{value}}").unwrap();
        symlink(dir.join("first"), dir.join("second")).unwrap();

        let store = DirStore::new(&dir);
        let matched = walk(&store, "*.html").unwrap();
        assert_eq!(
            matched,
            vec!["1.html", "3.html", "first/4.html", "second/4.html"]
        );

        let ns = parse_dir::<TextEngine>(None, &dir, "*.html").unwrap();
        assert_eq!(
            ns.render("second/4.html", &json!({ "value": "bar" })).unwrap(),
            "four bar"
        );

        cleanup(&dir);
    }

    #[test]
    fn symlinks_on_the_root_path_are_resolved_first() {
        let dir = temp_dir();
        fs::create_dir(dir.join("real")).unwrap();
        fs::write(dir.join("real/page.txt"), "page {{value}}").unwrap();
        symlink(dir.join("real"), dir.join("alias")).unwrap();

        let ns = parse_dir::<TextEngine>(None, dir.join("alias"), "*.txt").unwrap();
        assert_eq!(ns.unit_names(), vec!["page.txt"]);
        assert_eq!(
            ns.render("page.txt", &json!({ "value": 1 })).unwrap(),
            "page 1"
        );

        cleanup(&dir);
    }

    #[test]
    fn dangling_symlink_is_skipped() {
        let dir = temp_dir();
        fs::write(dir.join("ok.txt"), "ok {{value}}").unwrap();
        symlink(dir.join("nowhere"), dir.join("broken")).unwrap();

        let ns = parse_dir::<TextEngine>(None, &dir, "*.txt").unwrap();
        assert_eq!(ns.unit_names(), vec!["ok.txt"]);

        cleanup(&dir);
    }

    #[test]
    fn matching_file_symlink_is_read_through_the_link() {
        let dir = temp_dir();
        fs::write(dir.join("real.html"), "real {{value}}").unwrap();
        symlink(dir.join("real.html"), dir.join("alias.html")).unwrap();

        let ns = parse_dir::<TextEngine>(None, &dir, "*.html").unwrap();
        assert_eq!(ns.unit_names(), vec!["alias.html", "real.html"]);
        assert_eq!(
            ns.render("alias.html", &json!({ "value": 2 })).unwrap(),
            "real 2"
        );

        cleanup(&dir);
    }

    #[test]
    fn depth_guard_turns_a_cycle_into_an_error() {
        let dir = temp_dir();
        fs::create_dir(dir.join("a")).unwrap();
        fs::write(dir.join("a/page.html"), "page").unwrap();
        // a/loop -> a, a cycle the default walk would chase forever
        symlink(dir.join("a"), dir.join("a/loop")).unwrap();

        let err = parse_dir_with::<TextEngine>(
            None,
            &dir,
            "*.html",
            &WalkOptions { max_depth: Some(8) },
        )
        .unwrap_err();
        assert!(matches!(err, Error::DepthExceeded { depth: 8, .. }));

        cleanup(&dir);
    }
}
