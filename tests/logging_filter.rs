use pollwatch::cli::LogLevel;
use pollwatch::logging::build_filter;
use tracing::level_filters::LevelFilter;

#[test]
fn cli_level_beats_environment() {
    let filter = build_filter(Some(LogLevel::Warn), Some("trace"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
}

#[test]
fn environment_directives_are_used() {
    let filter = build_filter(None, Some("pollwatch=trace"));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

    let filter = build_filter(None, Some(" debug "));
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
}

#[test]
fn missing_or_blank_environment_defaults_to_info() {
    assert_eq!(build_filter(None, None).max_level_hint(), Some(LevelFilter::INFO));
    assert_eq!(build_filter(None, Some("")).max_level_hint(), Some(LevelFilter::INFO));
}
