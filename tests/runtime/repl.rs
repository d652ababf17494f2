//! The shell driven by a scripted editor

use cards_foundation::Result;
use cards_names::NameSet;
use cards_runtime::{CommandSession, LineEditor, ReadResult, Repl, demo};

/// Replays fixed input, then reports EOF.
struct ScriptedEditor {
    lines: std::vec::IntoIter<ReadResult>,
    history: Vec<String>,
    names: Vec<String>,
}

impl ScriptedEditor {
    fn new(lines: Vec<ReadResult>) -> Self {
        Self {
            lines: lines.into_iter(),
            history: Vec::new(),
            names: Vec::new(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.next().unwrap_or(ReadResult::Eof))
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_owned());
    }

    fn set_names(&mut self, names: Vec<String>) {
        self.names = names;
    }
}

fn line(text: &str) -> ReadResult {
    ReadResult::Line(text.to_owned())
}

fn run(names: &NameSet, script: Vec<ReadResult>) -> String {
    let session = CommandSession::new(names);
    let mut repl = Repl::with_editor(ScriptedEditor::new(script), session).without_banner();
    let mut out = Vec::new();
    repl.run_with(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn matched_name_prints_its_display_spelling() {
    let names = demo::names().unwrap();
    let out = run(&names, vec![line("say \"BERRIES\"")]);
    assert_eq!(
        out,
        "KEYWORD<SAY>\nNAME<Berries>\n'\\n'\nconsumed 14 bytes\n"
    );
}

#[test]
fn interrupt_drops_the_open_token() {
    let names = demo::names().unwrap();
    let out = run(
        &names,
        vec![line("\"unfinished"), ReadResult::Interrupted, line("LOOK")],
    );
    assert_eq!(
        out,
        "consumed 0 bytes\n\nKEYWORD<LOOK>\n'\\n'\nconsumed 5 bytes\n"
    );
}

#[test]
fn shutdown_ends_the_session() {
    let names = demo::names().unwrap();
    let out = run(&names, vec![line("Shutdown now"), line("LOOK")]);
    assert!(out.starts_with("KEYWORD<SHUTDOWN>\nKEYWORD<now>\n"));
    assert!(!out.contains("LOOK"));
}

#[test]
fn lex_line_reports_without_running() {
    let names = demo::names().unwrap();
    let editor = ScriptedEditor::new(Vec::new());
    let mut repl = Repl::with_editor(editor, CommandSession::new(&names));
    let report = repl.lex_line("(42) \u{1f600}").unwrap();
    assert!(!report.exit);
    assert_eq!(report.lines[0], "'('");
    assert_eq!(report.lines[1], "NUMBER<42>");
    assert_eq!(report.lines[2], "')'");
    assert!(report.lines[3].starts_with("ERROR<"));
    assert_eq!(report.lines.last().map(String::as_str), Some("consumed 10 bytes"));
}
