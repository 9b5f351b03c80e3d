use std::fs;

use super::super::*;

#[test]
fn happy_path() {
    let tempdir = tempfile::tempdir().unwrap();
    let work_dir = tempdir.path();
    Repository::init(work_dir).unwrap();

    let r = Repository::open(work_dir).unwrap();
    assert_eq!(r.work_dir(), work_dir);
    assert_eq!(r.got_dir(), work_dir.join(".got"));
    assert_eq!(r.config(), &Config::default());
}

#[test]
fn error_no_got_dir() {
    let tempdir = tempfile::tempdir().unwrap();
    let work_dir = tempdir.path();

    let err = Repository::open(work_dir).unwrap_err();
    if let Error::RepositoryDoesNotExist(path) = err {
        assert_eq!(path, work_dir.join(".got"));
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_got_dir_is_a_file() {
    let tempdir = tempfile::tempdir().unwrap();
    fs::write(tempdir.path().join(".got"), "sand in the gears").unwrap();

    let err = Repository::open(tempdir.path()).unwrap_err();
    if let Error::RepositoryDoesNotExist(_) = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_no_config() {
    let tempdir = tempfile::tempdir().unwrap();
    fs::create_dir(tempdir.path().join(".got")).unwrap();

    let err = Repository::open(tempdir.path()).unwrap_err();
    if let Error::ConfigMissing(_) = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_unsupported_version() {
    let tempdir = tempfile::tempdir().unwrap();
    let work_dir = tempdir.path();
    Repository::init(work_dir).unwrap();

    fs::write(
        work_dir.join(".got/config"),
        "[core]\nrepositoryformatversion = 1\nfilemode = false\nbare = false\n",
    )
    .unwrap();

    let err = Repository::open(work_dir).unwrap_err();
    if let Error::ConfigUnsupportedVersion(1) = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_malformed_config() {
    let tempdir = tempfile::tempdir().unwrap();
    let work_dir = tempdir.path();
    Repository::init(work_dir).unwrap();

    fs::write(work_dir.join(".got/config"), "repositoryformatversion = 0\n").unwrap();

    let err = Repository::open(work_dir).unwrap_err();
    if let Error::ConfigParseError { .. } = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn relative_path_is_made_absolute() {
    let r = Repository::bootstrap("some/where").unwrap();
    assert!(r.work_dir().is_absolute());
    assert!(r.work_dir().ends_with("some/where"));
}

#[test]
fn bootstrap_without_got_dir() {
    let tempdir = tempfile::tempdir().unwrap();

    let r = Repository::bootstrap(tempdir.path()).unwrap();
    assert_eq!(r.work_dir(), tempdir.path());
    assert_eq!(r.config(), &Config::default());
    assert!(!r.got_dir().exists());
}

#[test]
fn bootstrap_tolerates_bad_config() {
    let tempdir = tempfile::tempdir().unwrap();
    let got_dir = tempdir.path().join(".got");
    fs::create_dir(&got_dir).unwrap();
    fs::write(
        got_dir.join("config"),
        "[core]\nrepositoryformatversion = 7\nbare = true\n",
    )
    .unwrap();

    let r = Repository::bootstrap(tempdir.path()).unwrap();
    assert_eq!(r.config(), &Config::default());
}

#[test]
fn bootstrap_reads_existing_config() {
    let tempdir = tempfile::tempdir().unwrap();
    let got_dir = tempdir.path().join(".got");
    fs::create_dir(&got_dir).unwrap();
    fs::write(got_dir.join("config"), "[core]\nfilemode = true\n").unwrap();

    let r = Repository::bootstrap(tempdir.path()).unwrap();
    assert!(r.config().core.file_mode);
}

#[test]
fn path_helpers() {
    let tempdir = tempfile::tempdir().unwrap();
    let r = Repository::init(tempdir.path()).unwrap();
    let got_dir = tempdir.path().join(".got");

    assert_eq!(r.path("refs/heads"), got_dir.join("refs/heads"));
    assert_eq!(r.dir("refs/heads", false).unwrap(), got_dir.join("refs/heads"));

    if let PathError::Missing(_) = r.dir("info", false).unwrap_err() {
        // expected
    } else {
        panic!("info should not exist yet");
    }

    let info = r.dir("info", true).unwrap();
    assert!(info.is_dir());

    let file = r.file("logs/refs/heads/master").unwrap();
    assert_eq!(file, got_dir.join("logs/refs/heads/master"));
    assert!(got_dir.join("logs/refs/heads").is_dir());

    if let PathError::NotADirectory(_) = r.dir("HEAD", true).unwrap_err() {
        // expected
    } else {
        panic!("HEAD is a file");
    }
}

#[test]
fn parent_dir_is_folded() {
    let tempdir = tempfile::tempdir().unwrap();
    Repository::init(tempdir.path()).unwrap();
    fs::create_dir(tempdir.path().join("child")).unwrap();

    let r = Repository::open(tempdir.path().join("child/./..")).unwrap();
    assert_eq!(r.work_dir(), tempdir.path());
    assert_eq!(r.got_dir(), tempdir.path().join(".got"));
}
