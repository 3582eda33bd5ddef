// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    reserve = { Command::Reserve, "reserve" },
    reserve_timeout = { Command::ReserveWithTimeout { timeout: 5 }, "reserve-with-timeout 5" },
    reserve_job = { Command::ReserveJob { id: 3 }, "reserve-job 3" },
    use_tube = { Command::Use { tube: "jobs" }, "use jobs" },
    delete = { Command::Delete { id: 42 }, "delete 42" },
    release = { Command::Release { id: 42, priority: 10, delay: 5 }, "release 42 10 5" },
    bury = { Command::Bury { id: 42, priority: 7 }, "bury 42 7" },
    touch = { Command::Touch { id: 1 }, "touch 1" },
    watch = { Command::Watch { tube: "urgent" }, "watch urgent" },
    ignore = { Command::Ignore { tube: "default" }, "ignore default" },
    peek = { Command::Peek { id: 8 }, "peek 8" },
    peek_ready = { Command::PeekReady, "peek-ready" },
    peek_delayed = { Command::PeekDelayed, "peek-delayed" },
    peek_buried = { Command::PeekBuried, "peek-buried" },
    kick = { Command::Kick { bound: 100 }, "kick 100" },
    kick_job = { Command::KickJob { id: 9 }, "kick-job 9" },
    stats_job = { Command::StatsJob { id: 9 }, "stats-job 9" },
    stats_tube = { Command::StatsTube { tube: "jobs" }, "stats-tube jobs" },
    stats = { Command::Stats, "stats" },
    list_tubes = { Command::ListTubes, "list-tubes" },
    list_tube_used = { Command::ListTubeUsed, "list-tube-used" },
    list_tubes_watched = { Command::ListTubesWatched, "list-tubes-watched" },
    pause_tube = { Command::PauseTube { tube: "jobs", delay: 30 }, "pause-tube jobs 30" },
)]
fn command_lines(command: Command<'static>, expected: &str) {
    assert_eq!(command.encode(), expected.as_bytes());
}

#[test]
fn put_declares_body_length_and_appends_body() {
    let command = Command::Put { priority: 65536, delay: 0, ttr: 60, body: b"hello" };
    assert_eq!(command.encode(), b"put 65536 0 60 5\r\nhello");
}

#[test]
fn put_length_counts_bytes_not_chars() {
    let body = "héllo".as_bytes();
    let command = Command::Put { priority: 0, delay: 0, ttr: 1, body };
    assert_eq!(command.encode(), b"put 0 0 1 6\r\nh\xc3\xa9llo");
}

#[test]
fn put_with_empty_body() {
    let command = Command::Put { priority: 1, delay: 2, ttr: 3, body: b"" };
    assert_eq!(command.encode(), b"put 1 2 3 0\r\n");
}

#[yare::parameterized(
    put = { Command::Put { priority: 0, delay: 0, ttr: 1, body: b"" }, Status::Inserted },
    use_tube = { Command::Use { tube: "a" },              Status::Using },
    using = { Command::ListTubeUsed,                   Status::Using },
    reserve = { Command::Reserve,                        Status::Reserved },
    reserve_job = { Command::ReserveJob { id: 1 },           Status::Reserved },
    delete = { Command::Delete { id: 1 },               Status::Deleted },
    release = { Command::Release { id: 1, priority: 0, delay: 0 }, Status::Released },
    bury = { Command::Bury { id: 1, priority: 0 },    Status::Buried },
    touch = { Command::Touch { id: 1 },                Status::Touched },
    watch = { Command::Watch { tube: "a" },            Status::Watching },
    ignore = { Command::Ignore { tube: "a" },           Status::Watching },
    peek = { Command::PeekReady,                      Status::Found },
    kick = { Command::Kick { bound: 1 },              Status::Kicked },
    kick_job = { Command::KickJob { id: 1 },              Status::Kicked },
    stats = { Command::Stats,                          Status::Ok },
    list = { Command::ListTubesWatched,               Status::Ok },
    pause = { Command::PauseTube { tube: "a", delay: 1 }, Status::Paused },
)]
fn expected_success_words(command: Command<'static>, expected: Status) {
    assert_eq!(command.expected(), expected);
}

#[test]
fn only_bounded_reserve_can_time_out() {
    assert!(!Command::Reserve.rejections().contains(&Status::TimedOut));
    assert!(Command::ReserveWithTimeout { timeout: 0 }.rejections().contains(&Status::TimedOut));
}

#[test]
fn reserve_job_can_be_not_found() {
    assert!(Command::ReserveJob { id: 1 }.rejections().contains(&Status::NotFound));
}

#[test]
fn only_ignore_can_be_not_ignored() {
    for command in [Command::Watch { tube: "a" }, Command::Use { tube: "a" }, Command::Stats] {
        assert!(!command.rejections().contains(&Status::NotIgnored));
    }
    assert_eq!(Command::Ignore { tube: "a" }.rejections(), &[Status::NotIgnored]);
}

#[test]
fn expected_word_is_never_a_rejection() {
    let commands = [
        Command::Put { priority: 0, delay: 0, ttr: 1, body: b"" },
        Command::Reserve,
        Command::Release { id: 1, priority: 0, delay: 0 },
        Command::Bury { id: 1, priority: 0 },
        Command::Ignore { tube: "a" },
        Command::PauseTube { tube: "a", delay: 0 },
    ];
    for command in commands {
        assert!(!command.rejections().contains(&command.expected()), "{}", command.name());
    }
}
