//! Status provider tests
//!
//! Exercises `RbdMirrorStatus` against small stand-in executables instead of
//! the real `rbd` binary.

#![cfg(unix)]

use rbd_mirror_exporter::config::RbdConfig;
use rbd_mirror_exporter::error::ExporterError;
use rbd_mirror_exporter::rbd::{PoolStatusProvider, RbdMirrorStatus};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

/// A throwaway shell script standing in for the `rbd` binary.
struct Script {
    path: PathBuf,
}

impl Script {
    fn new(name: &str, body: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "rbd-mirror-exporter-{}-{}",
            name,
            std::process::id()
        ));
        std::fs::write(&path, body).expect("Failed to write script");
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        Self { path }
    }

    fn provider(&self, timeout_seconds: u64) -> RbdMirrorStatus {
        RbdMirrorStatus::new(&RbdConfig {
            pools: Vec::new(),
            program: self.path.to_string_lossy().into_owned(),
            command_timeout_seconds: timeout_seconds,
        })
    }
}

impl Drop for Script {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[tokio::test]
async fn test_successful_query_decodes_status() {
    // Given: A command that emits a well-formed status document
    let script = Script::new(
        "ok",
        "#!/bin/sh\necho '{\"summary\": {\"health\": \"OK\", \"states\": {\"replaying\": 7}}}'\n",
    );

    // When: Querying a pool
    let status = script
        .provider(5)
        .pool_status("pool1")
        .await
        .expect("query should succeed");

    // Then: The document decodes into a status snapshot
    assert_eq!(status.summary.health, "OK");
    assert_eq!(status.summary.states.get("replaying"), Some(&7));
}

#[tokio::test]
async fn test_nonzero_exit_reports_execution_error_with_stderr() {
    // Given: A command that fails the way rbd does for a missing pool
    let script = Script::new(
        "fail",
        "#!/bin/sh\necho \"rbd: error opening pool\" >&2\nexit 2\n",
    );

    // When: Querying a pool
    let err = script.provider(5).pool_status("pool1").await.unwrap_err();

    // Then: The execution error names the pool and carries stderr
    match &err {
        ExporterError::Execution { pool, detail } => {
            assert_eq!(pool, "pool1");
            assert!(detail.contains("error opening pool"));
        }
        other => panic!("expected execution error, got {other}"),
    }
}

#[tokio::test]
async fn test_malformed_output_reports_decode_error() {
    // Given: A command that exits cleanly but prints garbage
    let script = Script::new("garbage", "#!/bin/sh\necho 'not json'\n");

    // When: Querying a pool
    let err = script.provider(5).pool_status("pool1").await.unwrap_err();

    // Then: The failure is a decode error, not an execution error
    match &err {
        ExporterError::Decode { pool, .. } => assert_eq!(pool, "pool1"),
        other => panic!("expected decode error, got {other}"),
    }
}

#[tokio::test]
async fn test_timed_out_command_is_killed() {
    // Given: A command that outlives the timeout and would leave a flag
    // file behind if it kept running
    let flag = std::env::temp_dir().join(format!(
        "rbd-mirror-exporter-flag-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&flag);
    let script = Script::new(
        "hang",
        &format!("#!/bin/sh\nsleep 2\ntouch {}\n", flag.display()),
    );

    // When: The query exceeds a 1s timeout
    let err = script.provider(1).pool_status("pool1").await.unwrap_err();

    // Then: The timeout reports as an execution error
    match &err {
        ExporterError::Execution { pool, detail } => {
            assert_eq!(pool, "pool1");
            assert!(detail.contains("timed out"));
        }
        other => panic!("expected execution error, got {other}"),
    }

    // And: The child is gone; give it past the point it would have
    // touched the flag if it had survived
    tokio::time::sleep(Duration::from_millis(1800)).await;
    assert!(
        !flag.exists(),
        "child survived the timeout and kept running"
    );
    let _ = std::fs::remove_file(&flag);
}
