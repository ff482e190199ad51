//! Integration tests for the markspell binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A command whose config and data directories live inside `home`
fn markspell_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_markspell"));
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env_remove("MARKSPELL_PERSONAL_DICT")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn write_doc(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

mod help_command {
    use super::*;

    #[test]
    fn shows_usage() {
        let temp_dir = TempDir::new().unwrap();

        markspell_cmd(temp_dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Spellcheck markdown documents"))
            .stdout(predicate::str::contains("--fix"))
            .stdout(predicate::str::contains("dict"));
    }

    #[test]
    fn shows_version() {
        let temp_dir = TempDir::new().unwrap();

        markspell_cmd(temp_dir.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("markspell"));
    }

    #[test]
    fn interactive_requires_fix() {
        let temp_dir = TempDir::new().unwrap();

        markspell_cmd(temp_dir.path())
            .args(["--interactive", "doc.md"])
            .assert()
            .failure();
    }
}

mod check_command {
    use super::*;

    #[test]
    fn clean_document_passes() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "# This\n\nThis is received.\n");

        markspell_cmd(temp_dir.path())
            .arg("doc.md")
            .assert()
            .success()
            .stdout(predicate::str::contains("No spelling errors found"));
    }

    #[test]
    fn misspelling_fails_with_location() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "This is recieved.\n");

        markspell_cmd(temp_dir.path())
            .arg("doc.md")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("1:9 recieved"))
            .stdout(predicate::str::contains("1 error found in 1 file"));
    }

    #[test]
    fn code_blocks_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(
            &temp_dir,
            "doc.md",
            "This is received.\n\n```\nzzxq qqwv\n```\n\nUse `zzxq` here.\n",
        );

        markspell_cmd(temp_dir.path()).arg("doc.md").assert().success();
    }

    #[test]
    fn no_fail_exits_zero() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "This is recieved.\n");

        markspell_cmd(temp_dir.path())
            .args(["--no-fail", "doc.md"])
            .assert()
            .success()
            .stdout(predicate::str::contains("recieved"));
    }

    #[test]
    fn suggest_lists_corrections() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "This is recieved.\n");

        markspell_cmd(temp_dir.path())
            .args(["--suggest", "--no-fail", "doc.md"])
            .assert()
            .success()
            .stdout(predicate::str::contains("→ received"));
    }

    #[test]
    fn walks_directories_for_markdown() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        write_doc(&temp_dir, "docs/a.md", "This is recieved.\n");
        write_doc(&temp_dir, "docs/b.txt", "zzxq\n");

        markspell_cmd(temp_dir.path())
            .arg("docs")
            .assert()
            .code(1)
            .stdout(predicate::str::contains("a.md"))
            .stdout(predicate::str::contains("b.txt").not());
    }

    #[test]
    fn json_output() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "Some text.\n\nThis is recieved.\n");

        let output = markspell_cmd(temp_dir.path())
            .args(["--format", "json", "--no-fail", "doc.md"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["files_checked"], 1);
        assert_eq!(json["total_errors"], 1);
        assert_eq!(json["errors"][0]["word"], "recieved");
        assert_eq!(json["errors"][0]["line"], 3);
        assert_eq!(json["errors"][0]["column"], 9);
        assert_eq!(json["errors"][0]["from"], 20);
        assert_eq!(json["errors"][0]["to"], 28);
    }

    #[test]
    fn autocorrect_values_from_local_config_pass() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "This is recieved.\n");
        fs::write(
            temp_dir.path().join(".markspell.toml"),
            "[[autocorrect]]\nkey = \"recv\"\nvalue = \"recieved\"\n",
        )
        .unwrap();

        markspell_cmd(temp_dir.path()).arg("doc.md").assert().success();
    }

    #[test]
    fn missing_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();

        markspell_cmd(temp_dir.path())
            .arg("missing.md")
            .assert()
            .success()
            .stderr(predicate::str::contains("File not found"));
    }
}

mod fix_command {
    use super::*;

    #[test]
    fn applies_top_suggestion() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_doc(&temp_dir, "doc.md", "# Word\n\nThis is recieved.\n");

        markspell_cmd(temp_dir.path())
            .args(["--fix", "doc.md"])
            .assert()
            .success()
            .stdout(predicate::str::contains("correction applied"));

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("This is received."));
    }
}

mod dict_command {
    use super::*;

    #[test]
    fn added_words_are_accepted() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "This is recieved.\n");

        markspell_cmd(temp_dir.path())
            .args(["dict", "add", "recieved"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added 1 word(s)"));

        markspell_cmd(temp_dir.path()).arg("doc.md").assert().success();
    }

    #[test]
    fn explicit_personal_dictionary() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "This is recieved.\n");
        let dict = write_doc(&temp_dir, "words.txt", "# project words\nrecieved\n");

        markspell_cmd(temp_dir.path())
            .arg("--personal-dict")
            .arg(&dict)
            .arg("doc.md")
            .assert()
            .success();
    }

    #[test]
    fn built_dictionary_replaces_builtin_list() {
        let temp_dir = TempDir::new().unwrap();
        write_doc(&temp_dir, "doc.md", "Hello world\n");
        write_doc(&temp_dir, "words.txt", "hello\nworld\n");

        markspell_cmd(temp_dir.path())
            .arg("doc.md")
            .assert()
            .code(1);

        markspell_cmd(temp_dir.path())
            .args(["dict", "build", "words.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("with 2 words"));

        markspell_cmd(temp_dir.path()).arg("doc.md").assert().success();
    }

    #[test]
    fn path_reports_locations() {
        let temp_dir = TempDir::new().unwrap();

        markspell_cmd(temp_dir.path())
            .args(["dict", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("en_US.dict"))
            .stdout(predicate::str::contains("personal.txt"));
    }
}
