//! Line-oriented JSON front end for the tracker.
//!
//! Each input line is a [`Request`]: either an event to feed the tracker or
//! a query to answer. Each output line is a [`Reply`]. Removal timers run on
//! a [`DelayQueue`] inside the same `select!` loop that reads input, so the
//! tracker is only ever touched from one task.
//!
//! ```text
//! -> {"event": {"type": "names", "channel": "#rust", "entries": ["@ferris"]}}
//! <- {"send": "WHO #rust"}
//! -> {"query": {"type": "by_modes", "channel": "#rust", "modes": "o"}}
//! <- {"result": ["ferris"]}
//! ```

use crate::error::{TrackerError, TrackerResult};
use crate::state::{TimerId, Token};
use crate::tracker::{Info, InfoField, Subject, Tracker, TrackerAction, TrackerEvent};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::time::DelayQueue;
use tokio_util::time::delay_queue::Key;
use tracing::{debug, info, warn};

/// One input line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Request {
    Event(TrackerEvent),
    Query(Query),
}

/// A token number or a nickname.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SubjectRef {
    Token(Token),
    Nick(String),
}

impl SubjectRef {
    fn as_subject(&self) -> Subject<'_> {
        match self {
            SubjectRef::Token(token) => Subject::Token(*token),
            SubjectRef::Nick(nick) => Subject::Nick(nick),
        }
    }
}

/// Questions the daemon answers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    /// Token of whoever holds `nick` now.
    Track { nick: String },
    Info { subject: SubjectRef, field: String },
    IsOn {
        channel: String,
        #[serde(default)]
        nick: Option<String>,
    },
    CommonChans { subject: SubjectRef },
    Ial {
        mask: String,
        #[serde(default)]
        channel: Option<String>,
    },
    Privileges { channel: String, subject: SubjectRef },
    /// `modes` is a string of mode letters, e.g. `"ov"`.
    ByModes {
        channel: String,
        #[serde(default)]
        modes: String,
        #[serde(default)]
        negate: bool,
    },
}

impl Query {
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Track { .. } => "track",
            Query::Info { .. } => "info",
            Query::IsOn { .. } => "is_on",
            Query::CommonChans { .. } => "common_chans",
            Query::Ial { .. } => "ial",
            Query::Privileges { .. } => "privileges",
            Query::ByModes { .. } => "by_modes",
        }
    }
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    /// A raw line for the server connection.
    Send(String),
    /// Answer to a query.
    Result(Value),
    Error { code: &'static str, message: String },
}

impl From<TrackerError> for Reply {
    fn from(error: TrackerError) -> Self {
        Reply::Error {
            code: error.error_code(),
            message: error.to_string(),
        }
    }
}

/// Answer a query against the current state.
pub fn answer(tracker: &Tracker, query: &Query) -> TrackerResult<Value> {
    let span = crate::telemetry::spans::query(query.kind());
    let _enter = span.enter();

    match query {
        Query::Track { nick } => {
            let handle = tracker.start_tracking(nick)?;
            Ok(Value::from(handle.token().get()))
        }
        Query::Info { subject, field } => {
            let field: InfoField = field.parse()?;
            let info = tracker.info(subject.as_subject(), field)?;
            Ok(info_value(info))
        }
        Query::IsOn { channel, nick } => Ok(Value::from(tracker.is_on(channel, nick.as_deref()))),
        Query::CommonChans { subject } => {
            Ok(Value::from(tracker.common_channels(subject.as_subject())?))
        }
        Query::Ial { mask, channel } => Ok(Value::from(tracker.ial(mask, channel.as_deref())?)),
        Query::Privileges { channel, subject } => {
            let modes: String = tracker
                .user_privileges(channel, subject.as_subject())?
                .iter()
                .collect();
            Ok(Value::from(modes))
        }
        Query::ByModes {
            channel,
            modes,
            negate,
        } => {
            let modes: Vec<char> = modes.chars().collect();
            Ok(Value::from(tracker.by_channel_modes(channel, &modes, *negate)?))
        }
    }
}

fn info_value(info: Info) -> Value {
    match info {
        Info::Nick(text) | Info::Mask(text) => Value::String(text),
        Info::Ident(part) | Info::Host(part) => part.map_or(Value::Null, Value::String),
        Info::IsOn(on) => Value::Bool(on),
    }
}

/// Removal timers armed on behalf of the tracker.
struct Timers {
    queue: DelayQueue<TimerId>,
    keys: HashMap<TimerId, Key>,
}

impl Timers {
    fn new() -> Self {
        Self {
            queue: DelayQueue::new(),
            keys: HashMap::new(),
        }
    }

    fn schedule(&mut self, timer: TimerId, delay: Duration) {
        let key = self.queue.insert(timer, delay);
        if let Some(previous) = self.keys.insert(timer, key) {
            self.queue.remove(&previous);
        }
    }

    fn cancel(&mut self, timer: TimerId) {
        if let Some(key) = self.keys.remove(&timer) {
            self.queue.remove(&key);
        }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

enum Step {
    Line(String),
    Expired(TimerId),
    Eof,
}

/// Owns a tracker and its timers.
pub struct Driver {
    tracker: Tracker,
    timers: Timers,
}

impl Driver {
    pub fn new(tracker: Tracker) -> Self {
        Self {
            tracker,
            timers: Timers::new(),
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Number of armed removal timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Process one input line and return the replies it produced.
    pub fn handle_line(&mut self, line: &str) -> Vec<Reply> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Request>(line) {
            Ok(Request::Event(event)) => {
                let actions = self.tracker.feed(event);
                self.apply(actions)
            }
            Ok(Request::Query(query)) => {
                let reply = match answer(&self.tracker, &query) {
                    Ok(value) => Reply::Result(value),
                    Err(error) => {
                        debug!(query = query.kind(), %error, "query failed");
                        error.into()
                    }
                };
                vec![reply]
            }
            Err(error) => {
                warn!(%error, "malformed request");
                vec![Reply::Error {
                    code: "bad_request",
                    message: error.to_string(),
                }]
            }
        }
    }

    fn handle_expired(&mut self, timer: TimerId) -> Vec<Reply> {
        self.timers.keys.remove(&timer);
        if self.tracker.expire(timer) {
            debug!(%timer, "offline user expired");
        }
        let actions = self.tracker.take_actions();
        self.apply(actions)
    }

    fn apply(&mut self, actions: Vec<TrackerAction>) -> Vec<Reply> {
        let mut replies = Vec::new();
        for action in actions {
            match action {
                TrackerAction::Send(line) => replies.push(Reply::Send(line)),
                TrackerAction::Schedule { timer, delay } => self.timers.schedule(timer, delay),
                TrackerAction::Cancel(timer) => self.timers.cancel(timer),
            }
        }
        replies
    }

    /// Serve requests from `input` until it closes, then cancel every
    /// pending timer and hand the tracker back.
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> io::Result<Tracker>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        info!("presence tracker ready");

        loop {
            let step = tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => Step::Line(line),
                    None => Step::Eof,
                },
                Some(expired) = self.timers.queue.next() => Step::Expired(expired.into_inner()),
            };

            let replies = match step {
                Step::Line(line) => self.handle_line(&line),
                Step::Expired(timer) => self.handle_expired(timer),
                Step::Eof => break,
            };
            write_replies(&mut output, &replies).await?;
        }

        let actions = self.tracker.shutdown();
        let replies = self.apply(actions);
        write_replies(&mut output, &replies).await?;
        info!(tracked = self.tracker.len(), "input closed, shutting down");
        Ok(self.tracker)
    }
}

async fn write_replies<W: AsyncWrite + Unpin>(output: &mut W, replies: &[Reply]) -> io::Result<()> {
    if replies.is_empty() {
        return Ok(());
    }
    let mut buf = Vec::new();
    for reply in replies {
        serde_json::to_writer(&mut buf, reply)?;
        buf.push(b'\n');
    }
    output.write_all(&buf).await?;
    output.flush().await
}
