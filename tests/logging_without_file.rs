use std::{fs, thread::sleep, time::Duration};

use tempfile::tempdir;
use tracing::Level;

#[test]
fn init_without_file_creates_no_log() {
    let dir = tempdir().unwrap();
    std::env::set_var("RUST_LOG", "debug");

    scribble_pad::logging::init(false, None);
    tracing::info!("test");

    sleep(Duration::from_millis(100));

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    assert!(tracing::enabled!(Level::INFO));
    assert!(
        !tracing::enabled!(Level::DEBUG),
        "RUST_LOG must not raise the level without debug logging"
    );
}
