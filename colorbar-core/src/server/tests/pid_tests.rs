use crate::server::{PidFile, remove_pid};
use pretty_assertions::assert_eq;

#[test]
fn pid_file_is_removed_on_drop() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run").join("colorbar.pid");

    // Act
    let pid = PidFile::create(&path).unwrap();
    let written = std::fs::read_to_string(pid.path()).unwrap();
    drop(pid);

    // Assert
    assert_eq!(written, format!("{}\n", std::process::id()));
    assert!(!path.exists());
}

#[test]
fn create_reports_unwritable_path() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "").unwrap();

    // Act
    let err = PidFile::create(blocker.join("colorbar.pid")).unwrap_err();

    // Assert
    assert!(err.to_string().contains("failed to create pid directory"));
}

#[test]
fn removing_a_missing_pid_file_is_quiet() {
    let dir = tempfile::tempdir().unwrap();
    remove_pid(&dir.path().join("absent.pid"));
}
