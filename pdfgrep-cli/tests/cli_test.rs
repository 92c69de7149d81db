use anyhow::Result;
use assert_cmd::Command;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Writes a PDF where every page is a list of lines, one text object per line
fn write_pdf(path: &Path, pages: &[&[&str]]) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new(
                "Td",
                vec![72.into(), (720 - 20 * i as i64).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path)?;
    Ok(())
}

fn pdfgrep() -> Result<Command> {
    let mut cmd = Command::cargo_bin("pdfgrep")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_basic_search() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Hello World"], &["Hello", "World"]])?;

    let output = pdfgrep()?
        .current_dir(dir.path())
        .args(["Hello", "a.pdf"])
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "a.pdf:  Hello World");
    assert!(lines[1].starts_with("a.pdf:  Hello"));
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn test_line_numbers() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Hello World"], &["Hello", "World"]])?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["-n", "Hello", "a.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.pdf: page:1, line:1 Hello World"))
        .stdout(predicate::str::contains("a.pdf: page:2, line:1 Hello"));
    Ok(())
}

#[test]
fn test_list_files() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Hello World"], &["Hello", "World"]])?;
    write_pdf(&dir.path().join("b.pdf"), &[&["nothing to see"]])?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["-l", "Hello", "a.pdf", "b.pdf"])
        .assert()
        .success()
        .stdout("a.pdf\n");
    Ok(())
}

#[test]
fn test_ignore_case() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Quarterly REPORT"]])?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["report", "a.pdf"])
        .assert()
        .success()
        .stdout("");

    pdfgrep()?
        .current_dir(dir.path())
        .args(["-i", "report", "a.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quarterly REPORT"));
    Ok(())
}

#[test]
fn test_color_highlights_pattern() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Hello World"]])?;

    for flag in ["-c", "--color", "--colour"] {
        pdfgrep()?
            .current_dir(dir.path())
            .args([flag, "World", "a.pdf"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Hello \x1b[31mWorld\x1b[0m"));
    }
    Ok(())
}

#[test]
fn test_missing_file_reports_and_continues() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Hello World"]])?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["Hello", "missing.pdf", "a.pdf"])
        .assert()
        .success()
        .stdout("a.pdf:  Hello World\n")
        .stderr(predicate::str::contains(
            "missing.pdf: No such file or directory",
        ));
    Ok(())
}

#[test]
fn test_not_a_pdf_and_unreadable() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("notes.txt"), "Hello there")?;
    fs::write(dir.path().join("broken.pdf"), "%PDF-1.4\nHello, no body")?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["Hello", "notes.txt", "broken.pdf"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Not a pdf file: notes.txt"))
        .stderr(predicate::str::contains("Unable to read file: broken.pdf"));
    Ok(())
}

#[test]
fn test_quiet_suppresses_errors() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("notes.txt"), "Hello there")?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["-q", "Hello", "notes.txt", "missing.pdf"])
        .assert()
        .success()
        .stdout("")
        .stderr("");
    Ok(())
}

#[test]
fn test_dependency_logs_stay_off_stderr() -> Result<()> {
    // The Courier font has no /Encoding entry, which lopdf logs about
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Hello World"]])?;

    for args in [&["-q", "Hello", "a.pdf"][..], &["Hello", "a.pdf"][..]] {
        pdfgrep()?
            .current_dir(dir.path())
            .args(args)
            .assert()
            .success()
            .stdout("a.pdf:  Hello World\n")
            .stderr("");
    }

    pdfgrep()?
        .current_dir(dir.path())
        .args(["--log-level", "warn", "-q", "Hello", "a.pdf"])
        .assert()
        .success()
        .stderr("");
    Ok(())
}

#[test]
fn test_directory_needs_recursive() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("docs/deep"))?;
    write_pdf(&dir.path().join("docs/a.pdf"), &[&["Hello World"]])?;
    write_pdf(&dir.path().join("docs/deep/b.pdf"), &[&["Hello again"]])?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["Hello", "docs"])
        .assert()
        .success()
        .stdout("")
        .stderr("");

    pdfgrep()?
        .current_dir(dir.path())
        .args(["-rl", "Hello", "docs"])
        .assert()
        .success()
        .stdout("docs/a.pdf\ndocs/deep/b.pdf\n");
    Ok(())
}

#[test]
fn test_defaults_to_current_directory() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("b.pdf"), &[&["Hello"]])?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Hello"]])?;
    write_pdf(&dir.path().join(".hidden.pdf"), &[&["Hello"]])?;
    fs::create_dir_all(dir.path().join("sub"))?;
    write_pdf(&dir.path().join("sub/c.pdf"), &[&["Hello"]])?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["-l", "Hello"])
        .assert()
        .success()
        .stdout("a.pdf\nb.pdf\n");

    pdfgrep()?
        .current_dir(dir.path())
        .args(["-lr", "Hello"])
        .assert()
        .success()
        .stdout("a.pdf\nb.pdf\nsub/c.pdf\n");
    Ok(())
}

#[test]
fn test_output_is_repeatable() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["one Hello", "two Hello"], &["Hello three"]])?;

    let run = || -> Result<Vec<u8>> {
        Ok(pdfgrep()?
            .current_dir(dir.path())
            .args(["-n", "Hello", "a.pdf"])
            .output()?
            .stdout)
    };
    let first = run()?;
    assert!(!first.is_empty());
    assert_eq!(first, run()?);
    Ok(())
}

#[test]
fn test_invalid_pattern_is_fatal() -> Result<()> {
    let dir = tempdir()?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["(unclosed", "a.pdf"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid pattern"));
    Ok(())
}

#[test]
fn test_config_file_defaults() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("a.pdf"), &[&["Hello World"]])?;
    fs::write(dir.path().join("custom.yaml"), "ignore_case: true\nline_numbers: true\n")?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["--config", "custom.yaml", "hello", "a.pdf"])
        .assert()
        .success()
        .stdout("a.pdf: page:1, line:1 Hello World\n");
    Ok(())
}

#[test]
fn test_missing_config_file_is_fatal() -> Result<()> {
    let dir = tempdir()?;

    pdfgrep()?
        .current_dir(dir.path())
        .args(["--config", "nope.yaml", "x", "a.pdf"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
    Ok(())
}

#[test]
fn test_pdfcheck() -> Result<()> {
    let dir = tempdir()?;
    write_pdf(&dir.path().join("text.pdf"), &[&["Some text"]])?;
    write_pdf(&dir.path().join("blank.pdf"), &[&[]])?;
    fs::write(dir.path().join("notes.txt"), "plain")?;

    Command::cargo_bin("pdfcheck")?
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["text.pdf", "blank.pdf", "notes.txt", "missing.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text.pdf: valid OCR PDF"))
        .stdout(predicate::str::contains("blank.pdf: No readable text content"))
        .stdout(predicate::str::contains("notes.txt: Not a pdf file"))
        .stdout(predicate::str::contains("missing.pdf: No such file or directory"))
        .stdout(predicate::str::contains("OK").count(1))
        .stdout(predicate::str::contains("FAILED").count(3));
    Ok(())
}
