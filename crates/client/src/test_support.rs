// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fake of the queue server for tests.
//!
//! Implements the server side of every command the client issues, with
//! ready/delayed/reserved/buried job states, TTR expiry, tube pausing, and
//! a transcript of received command lines. Serves over `tokio::io::duplex`
//! or a loopback TCP listener.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use parking_lot::Mutex;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufStream, DuplexStream,
};
use tokio::net::TcpListener;
use tokio::sync::Notify;

use stalk_wire::DEFAULT_TUBE;

/// How often a waiting reserve rechecks delayed jobs and paused tubes.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Ready jobs below this priority count as urgent.
const URGENT_PRIORITY: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobState {
    Ready,
    Delayed { until: Instant },
    Reserved { conn: u64, deadline: Instant },
    Buried,
}

impl JobState {
    fn name(self) -> &'static str {
        match self {
            JobState::Ready => "ready",
            JobState::Delayed { .. } => "delayed",
            JobState::Reserved { .. } => "reserved",
            JobState::Buried => "buried",
        }
    }
}

#[derive(Debug)]
struct FakeJob {
    tube: String,
    priority: u32,
    delay: u32,
    ttr: u32,
    body: Vec<u8>,
    state: JobState,
    created: Instant,
    reserves: u64,
    timeouts: u64,
    releases: u64,
    buries: u64,
    kicks: u64,
}

#[derive(Debug, Default)]
struct TubeInfo {
    pause: Option<(u32, Instant)>,
    total_jobs: u64,
    cmd_delete: u64,
    cmd_pause: u64,
}

#[derive(Debug)]
struct Conn {
    used: String,
    watched: Vec<String>,
}

#[derive(Debug)]
struct State {
    next_job: u64,
    next_conn: u64,
    jobs: BTreeMap<u64, FakeJob>,
    tubes: IndexMap<String, TubeInfo>,
    conns: HashMap<u64, Conn>,
    total_connections: u64,
    draining: bool,
    max_job_size: usize,
}

struct Shared {
    state: Mutex<State>,
    changed: Notify,
    transcript: Mutex<Vec<String>>,
}

/// Fake queue server shared by any number of connections.
#[derive(Clone)]
pub struct FakeServer {
    shared: Arc<Shared>,
}

impl Default for FakeServer {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeServer {
    pub fn new() -> Self {
        let mut tubes = IndexMap::new();
        tubes.insert(DEFAULT_TUBE.to_string(), TubeInfo::default());
        let state = State {
            next_job: 1,
            next_conn: 1,
            jobs: BTreeMap::new(),
            tubes,
            conns: HashMap::new(),
            total_connections: 0,
            draining: false,
            max_job_size: 65535,
        };
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                changed: Notify::new(),
                transcript: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Open an in-memory connection; returns the client's end.
    pub fn connect(&self) -> DuplexStream {
        let (client, server) = tokio::io::duplex(64 * 1024);
        tokio::spawn(serve(Arc::clone(&self.shared), server));
        client
    }

    /// Accept TCP connections on a loopback port until the runtime stops.
    pub async fn listen(&self) -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(Arc::clone(&shared), stream));
            }
        });
        Ok(addr)
    }

    /// Command lines received so far, across all connections, without bodies.
    pub fn transcript(&self) -> Vec<String> {
        self.shared.transcript.lock().clone()
    }

    pub fn clear_transcript(&self) {
        self.shared.transcript.lock().clear();
    }

    /// Make `put` answer `DRAINING`.
    pub fn set_draining(&self, draining: bool) {
        self.shared.state.lock().draining = draining;
    }

    /// Bodies larger than this are refused with `JOB_TOO_BIG`.
    pub fn set_max_job_size(&self, bytes: usize) {
        self.shared.state.lock().max_job_size = bytes;
    }

    /// Number of jobs currently held, in any state.
    pub fn job_count(&self) -> usize {
        self.shared.state.lock().jobs.len()
    }
}

async fn serve<S: AsyncRead + AsyncWrite + Unpin>(shared: Arc<Shared>, stream: S) {
    let conn = shared.state.lock().open_conn();
    let mut stream = BufStream::new(stream);
    loop {
        let mut line = Vec::new();
        match stream.read_until(b'\n', &mut line).await {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let Some(text) = line.strip_suffix(b"\r\n").and_then(|l| std::str::from_utf8(l).ok())
        else {
            if reply(&mut stream, b"BAD_FORMAT\r\n").await.is_err() {
                break;
            }
            continue;
        };
        shared.transcript.lock().push(text.to_string());

        let response = match handle(&shared, conn, text, &mut stream).await {
            Some(response) => response,
            None => break,
        };
        if reply(&mut stream, &response).await.is_err() {
            break;
        }
    }
    shared.state.lock().close_conn(conn);
    shared.changed.notify_waiters();
}

async fn reply<S: AsyncWrite + Unpin>(stream: &mut S, bytes: &[u8]) -> std::io::Result<()> {
    stream.write_all(bytes).await?;
    stream.flush().await
}

/// Handle one command line. `None` ends the connection.
async fn handle<S: AsyncRead + AsyncWrite + Unpin>(
    shared: &Shared,
    conn: u64,
    text: &str,
    stream: &mut BufStream<S>,
) -> Option<Vec<u8>> {
    let tokens: Vec<&str> = text.split(' ').collect();
    let response = match tokens.as_slice() {
        ["quit"] => return None,
        ["put", pri, delay, ttr, size] => {
            let (Ok(pri), Ok(delay), Ok(ttr), Ok(size)) =
                (pri.parse(), delay.parse(), ttr.parse(), size.parse::<usize>())
            else {
                return Some(line("BAD_FORMAT"));
            };
            let mut body = vec![0u8; size.checked_add(2)?];
            stream.read_exact(&mut body).await.ok()?;
            if !body.ends_with(b"\r\n") {
                return Some(line("EXPECTED_CRLF"));
            }
            body.truncate(size);
            shared.state.lock().put(conn, pri, delay, ttr, body)
        }
        ["reserve"] => return reserve_or_disconnect(shared, conn, None, stream).await,
        ["reserve-with-timeout", secs] => match secs.parse::<u64>() {
            Ok(secs) => {
                let deadline = Instant::now() + Duration::from_secs(secs);
                return reserve_or_disconnect(shared, conn, Some(deadline), stream).await;
            }
            Err(_) => line("BAD_FORMAT"),
        },
        [cmd, id] if is_job_command(cmd) => match id.parse::<u64>() {
            Ok(id) => shared.state.lock().job_command(conn, cmd, id),
            Err(_) => line("BAD_FORMAT"),
        },
        ["release", id, pri, delay] => match (id.parse(), pri.parse(), delay.parse()) {
            (Ok(id), Ok(pri), Ok(delay)) => shared.state.lock().release(conn, id, pri, delay),
            _ => line("BAD_FORMAT"),
        },
        ["bury", id, pri] => match (id.parse(), pri.parse()) {
            (Ok(id), Ok(pri)) => shared.state.lock().bury(conn, id, pri),
            _ => line("BAD_FORMAT"),
        },
        ["kick", bound] => match bound.parse() {
            Ok(bound) => shared.state.lock().kick(conn, bound),
            Err(_) => line("BAD_FORMAT"),
        },
        ["pause-tube", tube, delay] => match delay.parse() {
            Ok(delay) => shared.state.lock().pause_tube(tube, delay),
            Err(_) => line("BAD_FORMAT"),
        },
        ["use", tube] => shared.state.lock().use_tube(conn, tube),
        ["watch", tube] => shared.state.lock().watch(conn, tube),
        ["ignore", tube] => shared.state.lock().ignore(conn, tube),
        ["stats-tube", tube] => shared.state.lock().stats_tube(tube),
        ["stats"] => shared.state.lock().stats(),
        ["list-tubes"] => {
            let state = shared.state.lock();
            list_block(state.tubes.keys())
        }
        ["list-tube-used"] => {
            let state = shared.state.lock();
            line(format!("USING {}", state.conn(conn).used))
        }
        ["list-tubes-watched"] => {
            let state = shared.state.lock();
            list_block(state.conn(conn).watched.iter())
        }
        ["peek-ready"] | ["peek-delayed"] | ["peek-buried"] => {
            shared.state.lock().peek_state(conn, tokens[0])
        }
        _ => line("UNKNOWN_COMMAND"),
    };
    shared.changed.notify_waiters();
    Some(response)
}

fn is_job_command(cmd: &str) -> bool {
    matches!(
        cmd,
        "reserve-job" | "delete" | "touch" | "peek" | "kick-job" | "stats-job"
    )
}

/// Wait for a reservation, giving up if the client hangs up meanwhile so a
/// dead connection never takes a job.
async fn reserve_or_disconnect<S: AsyncRead + AsyncWrite + Unpin>(
    shared: &Shared,
    conn: u64,
    deadline: Option<Instant>,
    stream: &mut BufStream<S>,
) -> Option<Vec<u8>> {
    tokio::select! {
        response = wait_for_job(shared, conn, deadline) => Some(response),
        _ = detect_client_disconnect(stream) => None,
    }
}

async fn wait_for_job(shared: &Shared, conn: u64, deadline: Option<Instant>) -> Vec<u8> {
    loop {
        let notified = shared.changed.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if let Some(response) = shared.state.lock().try_reserve(conn) {
            return response;
        }
        let now = Instant::now();
        let wait = match deadline {
            Some(deadline) if now >= deadline => return line("TIMED_OUT"),
            Some(deadline) => (deadline - now).min(POLL_INTERVAL),
            None => POLL_INTERVAL,
        };
        let _ = tokio::time::timeout(wait, notified).await;
    }
}

/// Resolves once the client closes its end. A well-behaved client sends
/// nothing while its reserve is outstanding.
async fn detect_client_disconnect<S: AsyncRead + AsyncWrite + Unpin>(stream: &mut BufStream<S>) {
    match stream.fill_buf().await {
        Ok([]) | Err(_) => {}
        Ok(_) => std::future::pending::<()>().await,
    }
}

fn in_state(state: &'static str) -> impl Fn(&FakeJob) -> bool {
    move |job| job.state.name() == state
}

fn line(text: impl AsRef<str>) -> Vec<u8> {
    let mut bytes = text.as_ref().as_bytes().to_vec();
    bytes.extend_from_slice(b"\r\n");
    bytes
}

fn chunk(header: String, body: &[u8]) -> Vec<u8> {
    let mut bytes = line(header);
    bytes.extend_from_slice(body);
    bytes.extend_from_slice(b"\r\n");
    bytes
}

fn job_reply(word: &str, id: u64, body: &[u8]) -> Vec<u8> {
    chunk(format!("{word} {id} {}", body.len()), body)
}

fn stats_block(pairs: &[(&str, String)]) -> Vec<u8> {
    let mut yaml = String::from("---\n");
    for (key, value) in pairs {
        yaml.push_str(&format!("{key}: {value}\n"));
    }
    chunk(format!("OK {}", yaml.len()), yaml.as_bytes())
}

fn list_block<'a>(items: impl Iterator<Item = &'a String>) -> Vec<u8> {
    let mut yaml = String::from("---\n");
    for item in items {
        yaml.push_str(&format!("- {item}\n"));
    }
    chunk(format!("OK {}", yaml.len()), yaml.as_bytes())
}

impl State {
    fn open_conn(&mut self) -> u64 {
        let id = self.next_conn;
        self.next_conn += 1;
        self.total_connections += 1;
        self.conns.insert(
            id,
            Conn { used: DEFAULT_TUBE.to_string(), watched: vec![DEFAULT_TUBE.to_string()] },
        );
        id
    }

    /// Drop a connection, returning its reserved jobs to ready.
    fn close_conn(&mut self, conn: u64) {
        self.conns.remove(&conn);
        for job in self.jobs.values_mut() {
            if matches!(job.state, JobState::Reserved { conn: c, .. } if c == conn) {
                job.state = JobState::Ready;
            }
        }
    }

    fn conn(&self, conn: u64) -> &Conn {
        // Connections live as long as their serve task
        &self.conns[&conn]
    }

    fn conn_mut(&mut self, conn: u64) -> &mut Conn {
        self.conns.entry(conn).or_insert_with(|| Conn {
            used: DEFAULT_TUBE.to_string(),
            watched: vec![DEFAULT_TUBE.to_string()],
        })
    }

    fn ensure_tube(&mut self, tube: &str) -> &mut TubeInfo {
        self.tubes.entry(tube.to_string()).or_default()
    }

    /// Promote due delayed jobs, expire reservations, and lift pauses.
    fn tick(&mut self) {
        let now = Instant::now();
        for job in self.jobs.values_mut() {
            match job.state {
                JobState::Delayed { until } if until <= now => job.state = JobState::Ready,
                JobState::Reserved { deadline, .. } if deadline <= now => {
                    job.state = JobState::Ready;
                    job.timeouts += 1;
                }
                _ => {}
            }
        }
        for info in self.tubes.values_mut() {
            if matches!(info.pause, Some((_, until)) if until <= now) {
                info.pause = None;
            }
        }
    }

    fn delayed_or_ready(delay: u32) -> JobState {
        if delay == 0 {
            JobState::Ready
        } else {
            JobState::Delayed { until: Instant::now() + Duration::from_secs(u64::from(delay)) }
        }
    }

    fn put(&mut self, conn: u64, priority: u32, delay: u32, ttr: u32, body: Vec<u8>) -> Vec<u8> {
        if self.draining {
            return line("DRAINING");
        }
        if body.len() > self.max_job_size {
            return line("JOB_TOO_BIG");
        }
        let id = self.next_job;
        self.next_job += 1;
        let tube = self.conn(conn).used.clone();
        self.ensure_tube(&tube).total_jobs += 1;
        self.jobs.insert(
            id,
            FakeJob {
                tube,
                priority,
                delay,
                ttr: ttr.max(1),
                body,
                state: Self::delayed_or_ready(delay),
                created: Instant::now(),
                reserves: 0,
                timeouts: 0,
                releases: 0,
                buries: 0,
                kicks: 0,
            },
        );
        line(format!("INSERTED {id}"))
    }

    fn reserve(&mut self, conn: u64, id: u64) -> Vec<u8> {
        let Some(job) = self.jobs.get_mut(&id) else {
            return line("NOT_FOUND");
        };
        job.state = JobState::Reserved {
            conn,
            deadline: Instant::now() + Duration::from_secs(u64::from(job.ttr)),
        };
        job.reserves += 1;
        job_reply("RESERVED", id, &job.body)
    }

    fn is_paused(&self, tube: &str) -> bool {
        self.tubes.get(tube).is_some_and(|info| info.pause.is_some())
    }

    fn try_reserve(&mut self, conn: u64) -> Option<Vec<u8>> {
        self.tick();
        let watched = self.conn(conn).watched.clone();
        let id = self
            .jobs
            .iter()
            .filter(|(_, job)| job.state == JobState::Ready)
            .filter(|(_, job)| watched.contains(&job.tube) && !self.is_paused(&job.tube))
            .min_by_key(|(id, job)| (job.priority, **id))
            .map(|(id, _)| *id)?;
        Some(self.reserve(conn, id))
    }

    fn reserved_by(&self, conn: u64, id: u64) -> bool {
        self.jobs
            .get(&id)
            .is_some_and(|job| matches!(job.state, JobState::Reserved { conn: c, .. } if c == conn))
    }

    fn job_command(&mut self, conn: u64, cmd: &str, id: u64) -> Vec<u8> {
        self.tick();
        match cmd {
            "reserve-job" => match self.jobs.get(&id).map(|job| job.state) {
                Some(JobState::Reserved { .. }) | None => line("NOT_FOUND"),
                Some(_) => self.reserve(conn, id),
            },
            "delete" => {
                let deletable = match self.jobs.get(&id).map(|job| job.state) {
                    Some(JobState::Reserved { conn: c, .. }) => c == conn,
                    Some(_) => true,
                    None => false,
                };
                match deletable.then(|| self.jobs.remove(&id)).flatten() {
                    Some(job) => {
                        self.ensure_tube(&job.tube).cmd_delete += 1;
                        line("DELETED")
                    }
                    None => line("NOT_FOUND"),
                }
            }
            "touch" => {
                if !self.reserved_by(conn, id) {
                    return line("NOT_FOUND");
                }
                if let Some(job) = self.jobs.get_mut(&id) {
                    job.state = JobState::Reserved {
                        conn,
                        deadline: Instant::now() + Duration::from_secs(u64::from(job.ttr)),
                    };
                }
                line("TOUCHED")
            }
            "peek" => match self.jobs.get(&id) {
                Some(job) => job_reply("FOUND", id, &job.body),
                None => line("NOT_FOUND"),
            },
            "kick-job" => match self.jobs.get_mut(&id) {
                Some(job) if matches!(job.state, JobState::Buried | JobState::Delayed { .. }) => {
                    job.state = JobState::Ready;
                    job.kicks += 1;
                    line("KICKED")
                }
                _ => line("NOT_FOUND"),
            },
            "stats-job" => self.stats_job(id),
            _ => line("UNKNOWN_COMMAND"),
        }
    }

    fn release(&mut self, conn: u64, id: u64, priority: u32, delay: u32) -> Vec<u8> {
        if !self.reserved_by(conn, id) {
            return line("NOT_FOUND");
        }
        if let Some(job) = self.jobs.get_mut(&id) {
            job.priority = priority;
            job.delay = delay;
            job.state = Self::delayed_or_ready(delay);
            job.releases += 1;
        }
        line("RELEASED")
    }

    fn bury(&mut self, conn: u64, id: u64, priority: u32) -> Vec<u8> {
        if !self.reserved_by(conn, id) {
            return line("NOT_FOUND");
        }
        if let Some(job) = self.jobs.get_mut(&id) {
            job.priority = priority;
            job.state = JobState::Buried;
            job.buries += 1;
        }
        line("BURIED")
    }

    fn ids_in(&self, tube: &str, pred: fn(&JobState) -> bool) -> Vec<u64> {
        self.jobs
            .iter()
            .filter(|(_, job)| job.tube == tube && pred(&job.state))
            .map(|(id, _)| *id)
            .collect()
    }

    fn kick(&mut self, conn: u64, bound: u64) -> Vec<u8> {
        self.tick();
        let tube = self.conn(conn).used.clone();
        let mut ids = self.ids_in(&tube, |state| *state == JobState::Buried);
        if ids.is_empty() {
            ids = self.ids_in(&tube, |state| matches!(state, JobState::Delayed { .. }));
        }
        let mut kicked = 0u64;
        for id in ids.into_iter().take(usize::try_from(bound).unwrap_or(usize::MAX)) {
            if let Some(job) = self.jobs.get_mut(&id) {
                job.state = JobState::Ready;
                job.kicks += 1;
                kicked += 1;
            }
        }
        line(format!("KICKED {kicked}"))
    }

    fn use_tube(&mut self, conn: u64, tube: &str) -> Vec<u8> {
        self.ensure_tube(tube);
        self.conn_mut(conn).used = tube.to_string();
        line(format!("USING {tube}"))
    }

    fn watch(&mut self, conn: u64, tube: &str) -> Vec<u8> {
        self.ensure_tube(tube);
        let watched = &mut self.conn_mut(conn).watched;
        if !watched.iter().any(|t| t == tube) {
            watched.push(tube.to_string());
        }
        line(format!("WATCHING {}", watched.len()))
    }

    fn ignore(&mut self, conn: u64, tube: &str) -> Vec<u8> {
        let watched = &mut self.conn_mut(conn).watched;
        if watched.len() == 1 && watched[0] == tube {
            return line("NOT_IGNORED");
        }
        watched.retain(|t| t != tube);
        line(format!("WATCHING {}", watched.len()))
    }

    fn peek_state(&mut self, conn: u64, cmd: &str) -> Vec<u8> {
        self.tick();
        let tube = &self.conn(conn).used;
        let mut in_tube = self.jobs.iter().filter(|(_, job)| &job.tube == tube);
        let found = match cmd {
            "peek-ready" => in_tube
                .filter(|(_, job)| job.state == JobState::Ready)
                .min_by_key(|(id, job)| (job.priority, **id)),
            "peek-delayed" => in_tube
                .filter_map(|(id, job)| match job.state {
                    JobState::Delayed { until } => Some((until, id, job)),
                    _ => None,
                })
                .min_by_key(|(until, id, _)| (*until, **id))
                .map(|(_, id, job)| (id, job)),
            _ => in_tube.find(|(_, job)| job.state == JobState::Buried),
        };
        match found {
            Some((id, job)) => job_reply("FOUND", *id, &job.body),
            None => line("NOT_FOUND"),
        }
    }

    fn stats_job(&self, id: u64) -> Vec<u8> {
        let Some(job) = self.jobs.get(&id) else {
            return line("NOT_FOUND");
        };
        let now = Instant::now();
        let time_left = match job.state {
            JobState::Delayed { until } => until.saturating_duration_since(now).as_secs(),
            JobState::Reserved { deadline, .. } => {
                deadline.saturating_duration_since(now).as_secs()
            }
            _ => 0,
        };
        stats_block(&[
            ("id", id.to_string()),
            ("tube", job.tube.clone()),
            ("state", job.state.name().to_string()),
            ("pri", job.priority.to_string()),
            ("age", now.duration_since(job.created).as_secs().to_string()),
            ("delay", job.delay.to_string()),
            ("ttr", job.ttr.to_string()),
            ("time-left", time_left.to_string()),
            ("file", "0".to_string()),
            ("reserves", job.reserves.to_string()),
            ("timeouts", job.timeouts.to_string()),
            ("releases", job.releases.to_string()),
            ("buries", job.buries.to_string()),
            ("kicks", job.kicks.to_string()),
        ])
    }

    fn count(&self, tube: Option<&str>, pred: impl Fn(&FakeJob) -> bool) -> usize {
        self.jobs
            .values()
            .filter(|job| match tube {
                Some(tube) => job.tube == tube,
                None => true,
            })
            .filter(|job| pred(job))
            .count()
    }

    fn job_counts(&self, tube: Option<&str>) -> Vec<(&'static str, String)> {
        vec![
            (
                "current-jobs-urgent",
                self.count(tube, |job| {
                    job.state == JobState::Ready && job.priority < URGENT_PRIORITY
                })
                .to_string(),
            ),
            ("current-jobs-ready", self.count(tube, in_state("ready")).to_string()),
            ("current-jobs-reserved", self.count(tube, in_state("reserved")).to_string()),
            ("current-jobs-delayed", self.count(tube, in_state("delayed")).to_string()),
            ("current-jobs-buried", self.count(tube, in_state("buried")).to_string()),
        ]
    }

    fn stats_tube(&mut self, tube: &str) -> Vec<u8> {
        self.tick();
        let Some(info) = self.tubes.get(tube) else {
            return line("NOT_FOUND");
        };
        let now = Instant::now();
        let (pause, pause_left) = match info.pause {
            Some((secs, until)) => (secs, until.saturating_duration_since(now).as_secs()),
            None => (0, 0),
        };
        let using = self.conns.values().filter(|c| c.used == tube).count();
        let watching = self.conns.values().filter(|c| c.watched.iter().any(|t| t == tube)).count();
        let mut pairs = vec![("name", tube.to_string())];
        pairs.extend(self.job_counts(Some(tube)));
        pairs.extend([
            ("total-jobs", info.total_jobs.to_string()),
            ("current-using", using.to_string()),
            ("current-watching", watching.to_string()),
            ("current-waiting", "0".to_string()),
            ("cmd-delete", info.cmd_delete.to_string()),
            ("cmd-pause-tube", info.cmd_pause.to_string()),
            ("pause", pause.to_string()),
            ("pause-time-left", pause_left.to_string()),
        ]);
        stats_block(&pairs)
    }

    fn stats(&mut self) -> Vec<u8> {
        self.tick();
        let mut pairs = self.job_counts(None);
        pairs.extend([
            ("total-jobs", self.tubes.values().map(|t| t.total_jobs).sum::<u64>().to_string()),
            ("current-tubes", self.tubes.len().to_string()),
            ("current-connections", self.conns.len().to_string()),
            ("total-connections", self.total_connections.to_string()),
            ("max-job-size", self.max_job_size.to_string()),
            ("draining", self.draining.to_string()),
            ("version", "\"fake\"".to_string()),
        ]);
        stats_block(&pairs)
    }

    fn pause_tube(&mut self, tube: &str, delay: u32) -> Vec<u8> {
        let Some(info) = self.tubes.get_mut(tube) else {
            return line("NOT_FOUND");
        };
        info.pause = Some((delay, Instant::now() + Duration::from_secs(u64::from(delay))));
        info.cmd_pause += 1;
        line("PAUSED")
    }
}
