use std::path::Path;

use pollwatch::config::FilterSection;
use pollwatch::errors::PollwatchError;
use pollwatch::filter::{self, DEFAULT_IGNORED_DIRS};
use pollwatch::types::FilterKind;
use pollwatch::{DefaultFilter, LanguageFilter, PathFilter, PatternFilter, Unfiltered};

fn p(s: &str) -> &Path {
    Path::new(s)
}

#[test]
fn unfiltered_admits_everything() {
    let f = Unfiltered;
    assert!(f.admit_dir(p("/x/.git")));
    assert!(f.admit_file(p("/x/a.pyc")));
}

#[test]
fn default_filter_skips_known_directories() {
    let f = DefaultFilter::new();
    for name in DEFAULT_IGNORED_DIRS {
        assert!(!f.admit_dir(&Path::new("/proj").join(name)), "{name} should be skipped");
    }
    assert!(f.admit_dir(p("/proj/src")));
    assert!(f.admit_dir(p("/proj/.github")));
    // Only the final component counts.
    assert!(f.admit_dir(p("/proj/.git/objects")));
}

#[test]
fn default_filter_skips_throwaway_files() {
    let f = DefaultFilter::new();
    for name in [
        "spam.pyc",
        "spam.pyo",
        "spam.pyd",
        "main.rs.___jb_tmp___",
        ".main.rs.swp",
        ".main.rs.swx",
        "notes.txt~",
        ".#notes.txt",
        "#notes.txt#",
        "flycheck_main.rs",
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        ".~lock.report.odt#",
    ] {
        assert!(!f.admit_file(&Path::new("/proj").join(name)), "{name} should be skipped");
    }
    for name in ["spam.py", "main.rs", "README.md", "swap.rs", "Thumbs.dbx"] {
        assert!(f.admit_file(&Path::new("/proj").join(name)), "{name} should be admitted");
    }
}

#[test]
fn default_filter_is_total_over_odd_names() {
    let f = DefaultFilter::new();
    for name in ["", "/", "..", "a\u{0}b", "ünïcödé.txt", "\\"] {
        let _ = f.admit_dir(p(name));
        let _ = f.admit_file(p(name));
    }
}

#[test]
fn default_filter_with_extra_entries() {
    let f = DefaultFilter::with_extra(&["target".to_string()], &[r"\.log$".to_string()]).unwrap();
    assert!(!f.admit_dir(p("/proj/target")));
    assert!(!f.admit_dir(p("/proj/.git")));
    assert!(!f.admit_file(p("/proj/build.log")));
    assert!(!f.admit_file(p("/proj/a.pyc")));
    assert!(f.admit_file(p("/proj/a.rs")));
}

#[test]
fn default_filter_rejects_invalid_extra_regex() {
    let err = DefaultFilter::with_extra(&[], &["(unclosed".to_string()]).unwrap_err();
    assert!(matches!(err, PollwatchError::ConfigError(_)), "got {err:?}");
}

#[test]
fn python_filter_composes_default_exclusions() {
    let f = LanguageFilter::python();
    assert!(f.admit_file(p("/proj/a.py")));
    assert!(f.admit_file(p("/proj/a.pyx")));
    assert!(f.admit_file(p("/proj/A.PY")));
    assert!(!f.admit_file(p("/proj/a.pyc")));
    assert!(!f.admit_file(p("/proj/a.txt")));
    assert!(!f.admit_file(p("/proj/Makefile")));
    assert!(!f.admit_dir(p("/proj/__pycache__")));
    assert!(f.admit_dir(p("/proj/pkg")));
}

#[test]
fn rust_filter_only_admits_rs() {
    let f = LanguageFilter::rust();
    assert_eq!(f.extensions(), ["rs"]);
    assert!(f.admit_file(p("/proj/src/main.rs")));
    assert!(!f.admit_file(p("/proj/Cargo.toml")));
    assert!(!f.admit_dir(p("/proj/.git")));
}

#[test]
fn language_filter_normalises_extensions() {
    let f = LanguageFilter::new(DefaultFilter::new(), [".TS", "tsx", " ", ""]);
    assert_eq!(f.extensions(), ["ts", "tsx"]);
    assert!(f.admit_file(p("/proj/app.ts")));
    assert!(f.admit_file(p("/proj/app.tsx")));
    assert!(!f.admit_file(p("/proj/app.js")));
}

#[test]
fn language_filter_over_unfiltered_keeps_vcs_dirs() {
    let f = LanguageFilter::new(Unfiltered, ["rs"]);
    assert!(f.admit_dir(p("/proj/.git")));
}

#[test]
fn pattern_filter_include_and_exclude() {
    let root = p("/proj");
    let f = PatternFilter::new(
        root,
        Unfiltered,
        &["src/**/*.rs".to_string(), "Cargo.toml".to_string()],
        &["**/generated/**".to_string(), "target".to_string()],
    )
    .unwrap();

    assert!(f.admit_file(p("/proj/src/main.rs")));
    assert!(f.admit_file(p("/proj/src/bin/tool.rs")));
    assert!(f.admit_file(p("/proj/Cargo.toml")));
    assert!(!f.admit_file(p("/proj/README.md")));
    assert!(!f.admit_file(p("/proj/src/generated/out.rs")));

    assert!(!f.admit_dir(p("/proj/target")));
    assert!(f.admit_dir(p("/proj/src")));
}

#[test]
fn pattern_filter_outside_root() {
    let open = PatternFilter::new("/proj", Unfiltered, &[], &["*.tmp".to_string()]).unwrap();
    assert!(open.admit_file(p("/elsewhere/a.rs")));

    let closed = PatternFilter::new("/proj", Unfiltered, &["*.rs".to_string()], &[]).unwrap();
    assert!(!closed.admit_file(p("/elsewhere/a.rs")));
}

#[test]
fn pattern_filter_consults_inner_first() {
    let f = PatternFilter::new(
        "/proj",
        DefaultFilter::new(),
        &["**/*.pyc".to_string()],
        &[],
    )
    .unwrap();
    assert!(!f.admit_file(p("/proj/a.pyc")));
    assert!(!f.admit_dir(p("/proj/.git")));
}

#[test]
fn pattern_filter_rejects_bad_glob() {
    let err = PatternFilter::new("/proj", Unfiltered, &["a[".to_string()], &[]).unwrap_err();
    assert!(matches!(err, PollwatchError::ConfigError(_)), "got {err:?}");
}

#[test]
fn from_config_builds_each_kind() {
    let root = p("/proj");
    let mut section = FilterSection::default();

    section.kind = FilterKind::All;
    let f = filter::from_config(root, &section).unwrap();
    assert!(f.admit_file(p("/proj/a.pyc")));

    section.kind = FilterKind::Default;
    let f = filter::from_config(root, &section).unwrap();
    assert!(!f.admit_file(p("/proj/a.pyc")));
    assert!(f.admit_file(p("/proj/a.txt")));

    section.kind = FilterKind::Python;
    let f = filter::from_config(root, &section).unwrap();
    assert!(f.admit_file(p("/proj/a.py")));
    assert!(!f.admit_file(p("/proj/a.txt")));

    section.kind = FilterKind::Rust;
    let f = filter::from_config(root, &section).unwrap();
    assert!(f.admit_file(p("/proj/a.rs")));
    assert!(!f.admit_file(p("/proj/a.py")));

    section.kind = FilterKind::Extensions;
    section.extensions = vec!["md".to_string()];
    let f = filter::from_config(root, &section).unwrap();
    assert!(f.admit_file(p("/proj/README.md")));
    assert!(!f.admit_file(p("/proj/a.rs")));
}

#[test]
fn from_config_layers_patterns_and_extra_ignores() {
    let section = FilterSection {
        kind: FilterKind::Default,
        ignore_dirs: vec!["vendor".to_string()],
        exclude: vec!["docs".to_string()],
        ..FilterSection::default()
    };
    let f = filter::from_config(p("/proj"), &section).unwrap();
    assert!(!f.admit_dir(p("/proj/vendor")));
    assert!(!f.admit_dir(p("/proj/docs")));
    assert!(!f.admit_dir(p("/proj/.git")));
    assert!(f.admit_dir(p("/proj/src")));
}

#[test]
fn relative_paths_are_lexical() {
    use pollwatch::filter::path_utils::relative_str;

    assert_eq!(relative_str(p("/proj"), p("/proj/src/main.rs")).as_deref(), Some("src/main.rs"));
    assert_eq!(relative_str(p("/proj"), p("/proj")).as_deref(), Some(""));
    assert_eq!(relative_str(p("/proj"), p("/project/a.rs")), None);
    // A sibling reached through `..` is not resolved against the filesystem.
    assert_eq!(relative_str(p("/proj"), p("/other/../proj/a.rs")), None);
}
