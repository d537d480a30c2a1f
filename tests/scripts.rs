use std::{fs, path::Path};

use seriesview::{interpreter::series::SeriesConfig, run_command};
use walkdir::WalkDir;

/// Collects the command lines of every `.sv` file under `dir`, skipping blank
/// lines and `#` comments.
fn script_lines(dir: &str) -> Vec<(String, usize, String)> {
    let mut lines = Vec::new();

    for entry in
        WalkDir::new(dir).sort_by_file_name()
                         .into_iter()
                         .filter_map(Result::ok)
                         .filter(|e| e.path().extension().is_some_and(|ext| ext == "sv"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            lines.push((display(path), i + 1, trimmed.to_string()));
        }
    }

    lines
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn valid_scripts_run() {
    let lines = script_lines("tests/scripts/valid");
    assert!(!lines.is_empty(), "No commands found in tests/scripts/valid");

    for (path, line_number, line) in lines {
        if let Err(e) = run_command(&line, &SeriesConfig::default()) {
            panic!("{path}:{line_number}: '{line}' failed:\n{e}");
        }
    }
}

#[test]
fn invalid_scripts_fail() {
    let lines = script_lines("tests/scripts/invalid");
    assert!(!lines.is_empty(), "No commands found in tests/scripts/invalid");

    for (path, line_number, line) in lines {
        if let Ok(outcome) = run_command(&line, &SeriesConfig::default()) {
            panic!("{path}:{line_number}: '{line}' succeeded with {outcome:?} but was expected to fail");
        }
    }
}
