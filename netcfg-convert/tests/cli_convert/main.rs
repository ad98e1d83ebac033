use std::path::PathBuf;
use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn path_as_str(path: &Path) -> &str {
    path.to_str().expect("path should be valid utf-8")
}

fn netcfg() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("netcfg-convert"))
}

/// Convert `text` with the given extra arguments and return the output file contents.
fn convert_text(text: &str, args: &[&str]) -> String {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("input.cfg");
    let output = dir.path().join("output.cfg");
    fs::write(&input, text).expect("write input");

    netcfg()
        .arg("convert")
        .arg(path_as_str(&input))
        .arg("--output")
        .arg(path_as_str(&output))
        .args(args)
        .assert()
        .success();

    fs::read_to_string(&output).expect("read output")
}

mod basics;
mod mappings;
mod scenarios;
