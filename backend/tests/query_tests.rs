use backend::{filter_records, signal_menu, ProcessRecord, Signal, RESULT_CAP};

fn record(pid: i32, name: &str) -> ProcessRecord {
    ProcessRecord {
        pid,
        cpu_percent: None,
        mem_percent: None,
        name: name.to_string(),
        cmdline: format!("/usr/bin/{}", name),
    }
}

#[test]
fn filter_returns_exactly_the_matching_subset_in_order() {
    let records = vec![
        record(1001, "sleep"),
        record(1002, "bash"),
        record(1003, "sleepwalker"),
        record(1004, "firefox"),
    ];
    let filtered = filter_records(records, Some("slee"), RESULT_CAP);
    let pids: Vec<i32> = filtered.iter().map(|r| r.pid).collect();
    assert_eq!(pids, vec![1001, 1003]);
}

#[test]
fn filter_is_case_sensitive() {
    let records = vec![record(1, "Xorg"), record(2, "xterm")];
    let filtered = filter_records(records, Some("X"), RESULT_CAP);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].pid, 1);
}

#[test]
fn no_filter_keeps_everything_up_to_cap() {
    let records: Vec<_> = (0..40).map(|i| record(i, "proc")).collect();
    let filtered = filter_records(records, None, RESULT_CAP);
    assert_eq!(filtered.len(), RESULT_CAP);
    assert_eq!(filtered[0].pid, 0);
}

#[test]
fn cap_is_never_exceeded_even_with_more_matches() {
    let records: Vec<_> = (0..100).map(|i| record(i, "sleep")).collect();
    let filtered = filter_records(records, Some("sleep"), 10);
    assert_eq!(filtered.len(), 10);
}

#[test]
fn menu_is_exactly_three_fixed_options() {
    let menu = signal_menu(4242, "firefox");
    assert_eq!(menu.len(), 3);

    let signals: Vec<Signal> = menu.iter().map(|o| o.signal).collect();
    assert_eq!(signals, vec![Signal::Term, Signal::Kill, Signal::Hup]);

    let labels: Vec<&str> = menu.iter().map(|o| o.label).collect();
    assert_eq!(labels, vec!["15 TERM (default)", "9 KILL", "1 HUP"]);

    for option in &menu {
        assert_eq!(option.pid, 4242);
        assert_eq!(option.name, "firefox");
    }
}

#[test]
fn menu_is_independent_of_the_record() {
    let a = signal_menu(1, "a");
    let b = signal_menu(2, "b");
    assert_eq!(a.len(), b.len());
    assert_eq!(
        a.iter().map(|o| o.signal).collect::<Vec<_>>(),
        b.iter().map(|o| o.signal).collect::<Vec<_>>()
    );
}
