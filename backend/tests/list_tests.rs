use backend::{filter_records, list_processes, ProcError, RESULT_CAP};
use nix::unistd::{Uid, User};
use std::process::Command;
use std::thread;
use std::time::Duration;

fn current_username() -> String {
    User::from_uid(Uid::current()).unwrap().unwrap().name
}

#[test]
fn spawned_child_of_current_user_is_listed() {
    let mut child = Command::new("sleep").arg("300").spawn().unwrap();
    let child_pid = child.id() as i32;
    thread::sleep(Duration::from_millis(50));

    let processes = list_processes(&current_username()).unwrap();
    let found = processes.iter().find(|p| p.pid == child_pid);
    assert!(found.is_some(), "sleep child should be in the list");
    let record = found.unwrap();
    assert_eq!(record.name, "sleep");
    assert!(record.cmdline.contains("sleep"));
    assert!(record.cmdline.contains("300"));

    child.kill().unwrap();
    child.wait().unwrap();
}

#[test]
fn own_process_is_excluded_from_the_listing() {
    let processes = list_processes(&current_username()).unwrap();
    let own_pid = std::process::id() as i32;
    assert!(processes.iter().all(|p| p.pid != own_pid));
}

#[test]
fn filter_narrows_listing_to_the_sleeping_child() {
    let mut child = Command::new("sleep").arg("301").spawn().unwrap();
    let child_pid = child.id() as i32;
    thread::sleep(Duration::from_millis(50));

    let processes = list_processes(&current_username()).unwrap();
    let filtered = filter_records(processes, Some("slee"), RESULT_CAP);
    assert!(filtered.iter().all(|p| p.name.contains("slee")));
    assert!(filtered.iter().any(|p| p.pid == child_pid));
    assert!(filtered.len() <= RESULT_CAP);

    child.kill().unwrap();
    child.wait().unwrap();
}

#[test]
fn unknown_user_is_a_distinct_error() {
    let err = list_processes("no-such-user-zzz").unwrap_err();
    assert!(matches!(err, ProcError::UnknownUser(_)));
}

#[test]
fn listing_survives_processes_exiting_mid_scan() {
    // Keep short-lived children churning while the lister walks /proc.
    let user = current_username();
    for _ in 0..5 {
        let mut children: Vec<_> = (0..4)
            .map(|_| Command::new("sleep").arg("0.01").spawn().unwrap())
            .collect();
        let result = list_processes(&user);
        assert!(result.is_ok());
        for child in &mut children {
            child.wait().unwrap();
        }
    }
}
