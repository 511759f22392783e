use std::fs::{self};

use addyscript::{error::Message, parse};
use walkdir::WalkDir;

#[test]
fn sample_scripts_parse() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "addy"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err(e) = parse(&content, &path.to_string_lossy()) {
            panic!("Script {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No scripts found in scripts/");
}

#[test]
fn broken_sample_reports_its_line() {
    let content = fs::read_to_string("scripts/control_flow.addy").unwrap();
    let broken = content.replace("goto outer;", "goto inner;");
    let line = broken.lines().position(|line| line == "goto inner;").unwrap() + 1;

    let error = parse(&broken, "control_flow.addy").unwrap_err();
    assert_eq!(error.message, Message::UndeclaredLabel { name: "inner".to_string() });
    assert_eq!((error.span.start.line, error.span.start.column()), (line, 1));
}
