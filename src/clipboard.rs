// Clipboard writer used once at the end of a run.
//
// On Linux the clipboard is owned by a process: when it exits the content
// is gone. The binary therefore re-launches itself with `HOLDER_FLAG`, feeds
// the text through stdin, and the child keeps ownership in the background.

use anyhow::Result;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;
use log::debug;

/// Hidden argument that turns the process into a clipboard holder.
pub const HOLDER_FLAG: &str = "__ompload_clipboard_holder";

/// Receives the collected URLs as a single text blob.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

impl<T: ClipboardWriter + ?Sized> ClipboardWriter for &mut T {
    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }
}

/// The desktop clipboard, reached through arboard.
pub struct SystemClipboard {
    _private: (),
}

impl SystemClipboard {
    /// Returns a writer when a clipboard can be opened in this session
    /// (no display server means no clipboard).
    pub fn probe() -> Option<Self> {
        match Clipboard::new() {
            Ok(_) => Some(SystemClipboard { _private: () }),
            Err(e) => {
                debug!("clipboard unavailable: {}", e);
                None
            }
        }
    }
}

impl ClipboardWriter for SystemClipboard {
    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text.to_string())?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<()> {
        use anyhow::{anyhow, Context};
        use std::io::{BufRead, BufReader, Write};
        use std::process::{Command, Stdio};

        let exe = std::env::current_exe().context("locating own executable")?;
        let mut child = Command::new(exe)
            .arg(HOLDER_FLAG)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()
            .context("spawning clipboard holder")?;

        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| anyhow!("clipboard holder has no stdin"))?;
            stdin.write_all(text.as_bytes())?;
            stdin.flush()?;
        }

        // The holder answers with one line once it has the clipboard open.
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("clipboard holder has no stdout"))?;
        let mut line = String::new();
        BufReader::new(stdout)
            .read_line(&mut line)
            .context("waiting for clipboard holder")?;

        if line.is_empty() {
            let status = child.wait().context("waiting for clipboard holder")?;
            return Err(anyhow!("clipboard holder exited early ({})", status));
        }
        holder_reply(&line)?;
        debug!("handed {} bytes to clipboard holder {}", text.len(), child.id());
        Ok(())
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
const HOLDER_READY: &str = "ready";

/// Interpret the holder's status line.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn holder_reply(line: &str) -> Result<()> {
    let line = line.trim();
    if line == HOLDER_READY {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{}",
            line.strip_prefix("error: ").unwrap_or(line)
        ))
    }
}

/// The holder flag only counts as the first argument, so a file with the
/// same name elsewhere on the command line is still just a file.
fn is_holder_invocation<I>(args: I) -> bool
where
    I: IntoIterator<Item = String>,
{
    args.into_iter().nth(1).as_deref() == Some(HOLDER_FLAG)
}

/// If this process was launched as a clipboard holder, take ownership of
/// the clipboard and return `Ok(true)`; the caller should then exit.
pub fn run_holder_if_requested() -> Result<bool> {
    if !is_holder_invocation(std::env::args()) {
        return Ok(false);
    }
    #[cfg(target_os = "linux")]
    {
        use std::io::Write;

        let text = std::io::read_to_string(std::io::stdin())?;
        let mut stdout = std::io::stdout();
        let mut clipboard = match Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                writeln!(stdout, "error: {}", e)?;
                return Err(e.into());
            }
        };
        writeln!(stdout, "{}", HOLDER_READY)?;
        stdout.flush()?;
        // `wait` blocks until another program takes the clipboard over.
        clipboard.set().wait().text(text)?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn holder_flag_must_come_first() {
        assert!(is_holder_invocation(args(&["ompload", HOLDER_FLAG])));
        assert!(!is_holder_invocation(args(&["ompload", "-n", HOLDER_FLAG])));
        assert!(!is_holder_invocation(args(&["ompload"])));
    }

    #[test]
    fn ready_line_is_success() {
        assert!(holder_reply("ready\n").is_ok());
    }

    #[test]
    fn error_line_carries_the_cause() {
        let err = holder_reply("error: no display available\n").unwrap_err();
        assert_eq!(err.to_string(), "no display available");
    }
}
