mod common;
use crate::common::builders::write_tree;
use crate::common::{describe_relative, init_tracing};

use std::error::Error;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pollwatch::engine::LoopState;
use pollwatch::errors::PollwatchError;
use pollwatch::{
    awatch, AsyncWatch, CancelToken, ChangeSet, DefaultFilter, SnapshotWatcherFactory,
    WatchOptions,
};
use pollwatch_test_utils::detector::added;
use pollwatch_test_utils::{with_timeout, ScriptedDetector};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn awatch_reports_a_new_file() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    write_tree(
        dir.path(),
        &[("src/main.rs", "fn main() {}"), (".git/HEAD", "ref: main")],
    )?;

    let mut stream = awatch(
        dir.path(),
        Arc::new(DefaultFilter::new()),
        &WatchOptions::from_millis(100, 10),
        &SnapshotWatcherFactory::default(),
        CancelToken::new(),
    )?;
    let root = std::fs::canonicalize(dir.path())?;

    let writer_root = dir.path().to_path_buf();
    let writer = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            write_tree(&writer_root, &[(".git/new.rs", "// new")])?;
            std::fs::rename(writer_root.join(".git/new.rs"), writer_root.join("src/new.rs"))
        })
        .await
    });

    let batch = with_timeout(stream.next()).await.expect("a batch")?;
    writer.await???;
    assert_eq!(describe_relative(&batch, &root), vec!["added src/new.rs"]);
    Ok(())
}

#[tokio::test]
async fn awatch_rejects_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let err = awatch(
        dir.path().join("missing"),
        Arc::new(DefaultFilter::new()),
        &WatchOptions::default(),
        &SnapshotWatcherFactory::default(),
        CancelToken::new(),
    )
    .unwrap_err();
    assert!(matches!(err, PollwatchError::ConfigError(_)), "got {err:?}");
}

#[tokio::test]
async fn changes_across_polls_are_coalesced() {
    init_tracing();
    let detector =
        ScriptedDetector::new([added(&["/r/a"]), added(&["/r/b"])]).idle_when_exhausted();
    let mut stream = AsyncWatch::new(
        detector,
        &WatchOptions::from_millis(100, 10),
        CancelToken::new(),
    );

    let started = Instant::now();
    let batch = with_timeout(stream.next()).await.unwrap().unwrap();
    assert_eq!(batch, added(&["/r/a", "/r/b"]));
    assert!(started.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn cancel_interrupts_a_long_sleep() {
    init_tracing();
    let detector = ScriptedDetector::new(Vec::<ChangeSet>::new()).idle_when_exhausted();
    let counter = detector.check_counter();
    let token = CancelToken::new();
    // A ten second floor between polls: only cancellation can end this quickly.
    let mut stream = AsyncWatch::new(detector, &WatchOptions::from_millis(100, 10_000), token.clone());

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = Instant::now();
    assert!(with_timeout(stream.next()).await.is_none());
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert_eq!(stream.state(), LoopState::Cancelled);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn interrupt_ends_the_stream() {
    let detector = ScriptedDetector::new([added(&["/r/a"])]);
    let mut stream = AsyncWatch::new(
        detector,
        &WatchOptions::from_millis(100, 10),
        CancelToken::new(),
    );

    assert!(with_timeout(stream.next()).await.is_none());
}

#[tokio::test]
async fn fatal_error_is_yielded_once() {
    let detector = ScriptedDetector::from_results([Err(PollwatchError::Other(
        anyhow::anyhow!("disk went away"),
    ))]);
    let mut stream = AsyncWatch::new(
        detector,
        &WatchOptions::from_millis(100, 10),
        CancelToken::new(),
    );

    let err = with_timeout(stream.next()).await.unwrap().unwrap_err();
    assert!(err.to_string().contains("disk went away"));
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn dropping_next_mid_check_resumes_the_check() {
    init_tracing();
    let detector = ScriptedDetector::new([added(&["/r/a"])])
        .idle_when_exhausted()
        .with_check_delay(Duration::from_millis(60));
    let counter = detector.check_counter();
    let token = CancelToken::new();
    let mut stream = AsyncWatch::new(detector, &WatchOptions::from_millis(50, 10), token.clone());

    let first = tokio::time::timeout(Duration::from_millis(20), stream.next()).await;
    assert!(first.is_err(), "first call should still be checking");

    let batch = with_timeout(stream.next()).await;
    assert_eq!(batch.unwrap().unwrap(), added(&["/r/a"]));
    assert!(!token.is_cancelled());
    // The interrupted check was awaited again, not restarted.
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn dropping_next_mid_sleep_keeps_the_deadline() {
    let detector = ScriptedDetector::new([added(&["/r/a"])]).idle_when_exhausted();
    let counter = detector.check_counter();
    let mut stream = AsyncWatch::new(
        detector,
        &WatchOptions::from_millis(100, 300),
        CancelToken::new(),
    );

    // First poll finds the change, then the loop sleeps 300ms.
    let first = tokio::time::timeout(Duration::from_millis(50), stream.next()).await;
    assert!(first.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    let batch = with_timeout(stream.next()).await.unwrap().unwrap();
    assert_eq!(batch, added(&["/r/a"]));
    // One sleep, then one poll past the window: no extra poll from a lost sleep.
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}
