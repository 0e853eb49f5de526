use std::fs;

use tempfile::TempDir;
use triage_core::{
    CatalogProvider, Controller, DeletionExecutor, Effect, Event, ExitReason, FsCatalog, Input,
    ItemStatus, Screen, spawn_load,
};

fn load(controller: &mut Controller, temp: &TempDir) {
    let rx = spawn_load(FsCatalog::default(), temp.path().to_path_buf());
    let msg = rx.recv().unwrap();
    assert!(controller.handle(Event::from(msg)).is_none());
}

/// Run a started deletion to completion, feeding every message back in
fn drive_deletion(controller: &mut Controller, effect: Option<Effect>) {
    let plan = match effect {
        Some(Effect::StartDeletion(plan)) => plan,
        other => panic!("expected deletion to start, got {:?}", other),
    };
    let (rx, handle) = DeletionExecutor::new().spawn(plan);
    for msg in rx {
        controller.handle(Event::from(msg));
    }
    handle.join().unwrap();
}

#[test]
fn delete_single_file_and_confirm() {
    let temp = TempDir::new().unwrap();
    let file_a = temp.path().join("fileA.txt");
    fs::write(&file_a, "remove me").unwrap();

    let mut controller = Controller::new();
    load(&mut controller, &temp);
    assert_eq!(controller.screen(), Screen::Review);

    controller.handle(Event::Input(Input::Delete));
    assert_eq!(controller.screen(), Screen::Confirm);

    let effect = controller.handle(Event::Input(Input::ConfirmYes));
    assert_eq!(controller.screen(), Screen::Progress);
    drive_deletion(&mut controller, effect);

    assert_eq!(controller.screen(), Screen::Complete);
    let report = controller.report().unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 0);
    assert!(!file_a.exists());

    assert_eq!(
        controller.handle(Event::Input(Input::Quit)).map(|e| match e {
            Effect::Exit(reason) => reason,
            Effect::StartDeletion(_) => panic!("unexpected deletion"),
        }),
        Some(ExitReason::Finished)
    );
}

#[test]
fn skip_first_delete_second() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("fileA"), "a").unwrap();
    fs::write(temp.path().join("fileB"), "b").unwrap();

    let mut controller = Controller::new();
    load(&mut controller, &temp);

    controller.handle(Event::Input(Input::Skip));
    controller.handle(Event::Input(Input::Delete));

    let session = controller.session();
    assert_eq!(session.cursor(), 2);
    assert_eq!(controller.screen(), Screen::Confirm);

    let pending = controller.pending().unwrap();
    let deleted: Vec<_> = pending.delete.iter().map(|i| i.name.as_str()).collect();
    let deferred: Vec<_> = pending.deferred.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(deleted, vec!["fileB"]);
    assert_eq!(deferred, vec!["fileA"]);
}

#[test]
fn keep_then_undo() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("fileA"), "a").unwrap();
    fs::write(temp.path().join("fileB"), "b").unwrap();

    let mut controller = Controller::new();
    load(&mut controller, &temp);

    controller.handle(Event::Input(Input::Keep));
    controller.handle(Event::Input(Input::Undo));

    assert_eq!(controller.screen(), Screen::Review);
    assert_eq!(controller.session().cursor(), 0);
    assert_eq!(
        controller.session().items()[0].status(),
        ItemStatus::Undecided
    );
}

#[test]
fn empty_directory_completes_immediately() {
    let temp = TempDir::new().unwrap();

    let mut controller = Controller::new();
    load(&mut controller, &temp);

    assert_eq!(controller.screen(), Screen::Complete);
    let report = controller.report().unwrap();
    assert_eq!(report.succeeded, 0);
    assert_eq!(report.failed, 0);
}

#[test]
fn decline_leaves_files_in_place() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("precious.txt");
    fs::write(&file, "keep").unwrap();

    let mut controller = Controller::new();
    load(&mut controller, &temp);
    controller.handle(Event::Input(Input::Delete));

    let effect = controller.handle(Event::Input(Input::ConfirmNo));
    assert!(matches!(effect, Some(Effect::Exit(ExitReason::Cancelled))));
    assert!(file.exists());
}

#[test]
fn missing_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let err = FsCatalog::default().list(&missing).unwrap_err();
    let mut controller = Controller::new();
    let effect = controller.handle(Event::CatalogFailed(err));

    match effect {
        Some(Effect::Exit(reason)) => assert_eq!(reason.exit_code(), 1),
        other => panic!("unexpected {:?}", other),
    }
}
