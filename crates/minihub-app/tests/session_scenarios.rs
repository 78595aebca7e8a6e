//! Scripted sessions covering the documented scenarios end to end.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use minihub_app::{SessionOptions, ShellService, run_session};
use minihub_core::Actor;

fn run_script(script: &str) -> (ShellService, String) {
    let mut service = ShellService::new(Actor::new("Shiwani", "shiwani@example.invalid"));
    let mut out = Vec::new();
    run_session(&mut service, script.as_bytes(), &mut out, &SessionOptions::default())
        .expect("session should run");
    (service, String::from_utf8(out).expect("utf8 output"))
}

#[test]
fn recreate_after_delete_and_undo_chain() {
    let script = "\
repo create proj
file create proj a.txt hi
file edit proj a.txt bye
undo
file show proj a.txt
repo delete proj
repo create proj
undo
undo
file list proj
redo
repo list
";
    let (service, out) = run_script(script);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Repository 'proj' created.",
            "File created successfully.",
            "File edited successfully.",
            "Undo performed: edit file proj/a.txt",
            "hi",
            "Repository deleted.",
            "Repository 'proj' created.",
            "Undo performed: delete repository proj",
            "Undo performed: create repository proj",
            "Files in proj:",
            "- a.txt",
            "Redo performed: delete repository proj",
            "No repositories.",
        ]
    );
    assert!(service.workspace().command_log().can_redo());
}

#[test]
fn task_queue_underflow_is_reported() {
    let (service, out) = run_script("repo create proj\ntask add proj t1\ntask add proj t2\ntask remove proj\ntask remove proj\ntask remove proj\n");
    assert!(out.contains("Task removed: t1\nTask removed: t2\nNo tasks."));
    assert_eq!(service.workspace().activity().len(), 5);
}
