//! Logger module
//!
//! Plain-line logging for the dev server: lifecycle messages, errors, and
//! an Apache-combined-style access log. Targets are stdout/stderr by
//! default, or files when configured.

use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use crate::config::UpstreamConfig;

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    Stdout,
    Stderr,
    File(Mutex<File>),
}

impl LogTarget {
    fn from_path(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_log_file(p)?))),
            None => Ok(fallback),
        }
    }

    fn write_line(&self, message: &str) {
        match self {
            Self::Stdout => println!("{message}"),
            Self::Stderr => eprintln!("{message}"),
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{message}");
                }
            }
        }
    }
}

struct LogWriter {
    access: LogTarget,
    error: LogTarget,
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Initialize the global logger
///
/// Should be called once at startup. Before initialization all helpers
/// fall back to stdout/stderr, which is what the tests rely on.
pub fn init(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<()> {
    let writer = LogWriter {
        access: LogTarget::from_path(access_log_file, LogTarget::Stdout)?,
        error: LogTarget::from_path(error_log_file, LogTarget::Stderr)?,
    };
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(io::ErrorKind::AlreadyExists, "Logger already initialized")
    })
}

fn write_info(message: &str) {
    match LOG_WRITER.get() {
        Some(w) => w.access.write_line(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match LOG_WRITER.get() {
        Some(w) => w.error.write_line(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, upstream: &UpstreamConfig) {
    write_info("======================================");
    write_info(&format!("Serving HTTP on http://{addr}"));
    write_info(&format!(
        "Booking API proxy: POST {} -> {}",
        upstream.route, upstream.url
    ));
    write_info("======================================");
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

/// Log one request in Apache combined-ish form:
/// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
pub fn log_access(
    remote_addr: &SocketAddr,
    method: &str,
    path: &str,
    query: Option<&str>,
    status: u16,
    body_bytes: u64,
) {
    let line = format_access_line(&remote_addr.to_string(), method, path, query, status, body_bytes);
    write_info(&line);
}

fn format_access_line(
    remote_addr: &str,
    method: &str,
    path: &str,
    query: Option<&str>,
    status: u16,
    body_bytes: u64,
) -> String {
    format!(
        "{} - - [{}] \"{} {}{}\" {} {}",
        remote_addr,
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        path,
        query.map(|q| format!("?{q}")).unwrap_or_default(),
        status,
        body_bytes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_line_fields() {
        let line = format_access_line("127.0.0.1:51000", "GET", "/style.css", None, 200, 1234);
        assert!(line.starts_with("127.0.0.1:51000 - - ["));
        assert!(line.contains("\"GET /style.css\""));
        assert!(line.ends_with("200 1234"));
    }

    #[test]
    fn test_access_line_includes_query() {
        let line = format_access_line("127.0.0.1:51000", "GET", "/widget.js", Some("v=2"), 200, 7);
        assert!(line.contains("\"GET /widget.js?v=2\""));
    }
}
