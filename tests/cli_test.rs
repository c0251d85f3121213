use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn srcnotes() -> Command {
    Command::cargo_bin("srcnotes").unwrap()
}

/// The interactive flow: the directory name arrives on stdin.
#[test]
fn test_prompted_run() {
    let temp_dir = tempdir().unwrap();
    let foo = temp_dir.path().join("src/foo");
    fs::create_dir_all(&foo).unwrap();
    fs::write(foo.join("a.h"), "int x;").unwrap();
    fs::write(foo.join("a.cpp"), "x=1;").unwrap();
    fs::write(foo.join("readme.txt"), "ignore me").unwrap();

    srcnotes()
        .current_dir(temp_dir.path())
        .write_stdin("foo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the directory to search within 'src/': "))
        .stdout(predicate::str::contains("  -> Copying 'src/foo/a.h'..."))
        .stdout(predicate::str::contains("  -> Copying 'src/foo/a.cpp'..."))
        .stdout(predicate::str::contains("Success! Found and aggregated 2 files."))
        .stdout(predicate::str::contains("project_notes.txt"));

    let output = fs::read_to_string(temp_dir.path().join("project_notes.txt")).unwrap();
    assert!(output.contains("// Filename:    src/foo/a.h\n"));
    assert!(output.contains("// Filename:    src/foo/a.cpp\n"));
    assert!(output.contains("int x;\n\n"));
    assert!(output.contains("x=1;\n\n"));
    assert!(!output.contains("ignore me"));
}

/// A missing directory is reported but is not a failure.
#[test]
fn test_missing_directory() {
    let temp_dir = tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();

    srcnotes()
        .current_dir(temp_dir.path())
        .write_stdin("missing\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Directory not found: 'src/missing'"));

    assert!(!temp_dir.path().join("project_notes.txt").exists());
}

/// Passing the directory as an argument skips the prompt.
#[test]
fn test_subdir_argument() {
    let temp_dir = tempdir().unwrap();
    let math = temp_dir.path().join("src/math");
    fs::create_dir_all(&math).unwrap();
    fs::write(math.join("Color.h"), "struct Color;").unwrap();

    srcnotes()
        .current_dir(temp_dir.path())
        .arg("math")
        .arg("-o")
        .arg("math_notes.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter the directory").not())
        .stdout(predicate::str::contains("Found and aggregated 1 files."));

    let output = fs::read_to_string(temp_dir.path().join("math_notes.txt")).unwrap();
    assert!(output.contains("// Filename:    src/math/Color.h\n"));
    assert!(!temp_dir.path().join("project_notes.txt").exists());
}

/// An output path that can't be created fails the run with a clear message.
#[test]
fn test_unwritable_output() {
    let temp_dir = tempdir().unwrap();
    let foo = temp_dir.path().join("src/foo");
    fs::create_dir_all(&foo).unwrap();
    fs::write(foo.join("a.h"), "int x;").unwrap();

    srcnotes()
        .current_dir(temp_dir.path())
        .args(["foo", "-o", "no_such_dir/notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not write to output file"));
}

/// Closed stdin without an answer is an input error.
#[test]
fn test_empty_stdin() {
    let temp_dir = tempdir().unwrap();

    srcnotes()
        .current_dir(temp_dir.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("\n[ERROR] No directory name"));
}

/// An unreadable source is announced on the console and the run continues.
#[cfg(unix)]
#[test]
fn test_unreadable_file_warning() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = tempdir().unwrap();
    let locked = temp_dir.path().join("src/locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("a.h"), "int a;").unwrap();
    fs::write(locked.join("b.h"), "int b;").unwrap();
    fs::set_permissions(locked.join("a.h"), fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users read through permission bits; nothing to observe then.
    if fs::read(locked.join("a.h")).is_ok() {
        return;
    }

    srcnotes()
        .current_dir(temp_dir.path())
        .write_stdin("locked\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "  [WARNING] Could not read file 'src/locked/a.h': ",
        ))
        .stdout(predicate::str::contains("[WARNING] Could not read file 'src/locked/b.h'").not())
        .stdout(predicate::str::contains("Success! Found and aggregated 2 files."));
}

#[test]
fn test_invalid_arguments() {
    srcnotes().arg("--invalid-arg").assert().failure();
}
