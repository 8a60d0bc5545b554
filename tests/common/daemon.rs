//! Test daemon management.
//!
//! Spawns the `slirc-presence` binary with a temporary config and talks to
//! it over stdin/stdout.

use serde_json::Value;
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;

/// A running daemon.
pub struct TestDaemon {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: Lines<BufReader<ChildStdout>>,
    _dir: TempDir,
}

impl TestDaemon {
    /// Spawn the daemon with the given grace period in seconds.
    pub async fn spawn(expire_delay: i64) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("presence.toml");
        let config = format!(
            r#"
[tracker]
expire_delay = {expire_delay}
casemapping = "rfc1459"
prefix = "(qaohv)~&@%+"

[log]
level = "warn"
"#
        );
        std::fs::write(&config_path, config)?;

        let mut child = Command::new(env!("CARGO_BIN_EXE_slirc-presence"))
            .arg(&config_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child.stdin.take();
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("daemon stdout not captured"))?;

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout).lines(),
            _dir: dir,
        })
    }

    /// Write one raw request line.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("stdin already closed"))?;
        stdin.write_all(line.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await?;
        Ok(())
    }

    /// Feed an event (the inner object of `{"event": ...}`).
    pub async fn event(&mut self, event: Value) -> anyhow::Result<()> {
        self.send_raw(&serde_json::json!({ "event": event }).to_string())
            .await
    }

    /// Ask a query and wait for its reply.
    pub async fn query(&mut self, query: Value) -> anyhow::Result<Value> {
        self.send_raw(&serde_json::json!({ "query": query }).to_string())
            .await?;
        self.recv().await
    }

    /// Receive one reply line.
    pub async fn recv(&mut self) -> anyhow::Result<Value> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Value> {
        let line = timeout(dur, self.stdout.next_line())
            .await??
            .ok_or_else(|| anyhow::anyhow!("daemon closed stdout"))?;
        Ok(serde_json::from_str(&line)?)
    }

    /// Close stdin and wait for the daemon to exit.
    pub async fn shutdown(mut self) -> anyhow::Result<std::process::ExitStatus> {
        drop(self.stdin.take());
        Ok(timeout(Duration::from_secs(5), self.child.wait()).await??)
    }
}
