// Copyright (c) 2022 Huawei Technologies Co.,Ltd. All rights reserved.
//
// sysMaster is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan
// PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//         http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY
// KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO
// NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//!
use log::{Level, Log, Metadata, Record};
use std::{
    fmt,
    io::Write,
    os::unix::net::UnixDatagram,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, RwLock,
    },
};

const SYSLOG_PATH: &str = "/dev/log";

/// Where log records are written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    /// standard output
    Console,
    /// the local syslog socket
    Syslog,
}

impl FromStr for LogTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(LogTarget::Console),
            "syslog" => Ok(LogTarget::Syslog),
            _ => Err(format!("unknown log target: {}", s)),
        }
    }
}

impl fmt::Display for LogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogTarget::Console => write!(f, "console"),
            LogTarget::Syslog => write!(f, "syslog"),
        }
    }
}

/// Parse a level name like "info" or "DEBUG", fall back to Info.
pub fn parse_level(s: &str) -> Level {
    Level::from_str(s).unwrap_or(Level::Info)
}

fn local_time() -> String {
    let time: libc::time_t = unsafe { libc::time(std::ptr::null_mut()) };
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };
    if unsafe { libc::localtime_r(&time, &mut tm) }.is_null() {
        return String::from("0000-00-00 00:00:00");
    }
    format!(
        "{:0>4}-{:0>2}-{:0>2} {:0>2}:{:0>2}:{:0>2}",
        tm.tm_year + 1900, /* tm_year is years since 1900 */
        tm.tm_mon + 1,     /* tm_mon is months since Jan: [0, 11] */
        tm.tm_mday,
        tm.tm_hour,
        tm.tm_min,
        tm.tm_sec
    )
}

fn format_record(name: &str, record: &Record) -> String {
    format!(
        "{} {} {} {}: {}",
        local_time(),
        name,
        record.level(),
        record.module_path().unwrap_or("unknown"),
        record.args()
    )
}

struct ConsoleLogger;

impl ConsoleLogger {
    fn write(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", line) {
            eprintln!("Failed to log message: {}", e);
        }
    }
}

struct SysLogger {
    dgram: Mutex<Option<UnixDatagram>>,
    warned: AtomicBool,
}

impl SysLogger {
    fn new() -> Self {
        SysLogger {
            dgram: Mutex::new(Self::connect().ok()),
            warned: AtomicBool::new(false),
        }
    }

    fn connect() -> Result<UnixDatagram, std::io::Error> {
        let sock = UnixDatagram::unbound()?;
        sock.connect(SYSLOG_PATH)?;
        Ok(sock)
    }

    fn warn_once(&self, e: &dyn fmt::Display) {
        if !self.warned.swap(true, Ordering::SeqCst) {
            eprintln!("Failed to send message to syslog: {}", e);
        }
    }

    fn write(&self, level: Level, line: &str) {
        let mut dgram = match self.dgram.lock() {
            Ok(v) => v,
            Err(_) => return,
        };
        if dgram.is_none() {
            match Self::connect() {
                Ok(sock) => *dgram = Some(sock),
                Err(e) => {
                    self.warn_once(&e);
                    return;
                }
            }
        }

        /* <PRI>: facility daemon (3) */
        let msg = format!("<{}>{}", (3 << 3) | syslog_severity(level), line);
        if let Some(sock) = dgram.as_ref() {
            if let Err(e) = sock.send(msg.as_bytes()) {
                self.warn_once(&e);
                *dgram = None;
            }
        }
    }
}

fn syslog_severity(level: Level) -> u8 {
    match level {
        Level::Error => 3,
        Level::Warn => 4,
        Level::Info => 6,
        Level::Debug | Level::Trace => 7,
    }
}

struct Dispatch {
    name: RwLock<String>,
    console: AtomicBool,
    syslog: RwLock<Option<SysLogger>>,
}

static LOGGER: Dispatch = Dispatch {
    name: RwLock::new(String::new()),
    console: AtomicBool::new(false),
    syslog: RwLock::new(None),
};

impl Log for Dispatch {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = match self.name.read() {
            Ok(name) => format_record(&name, record),
            Err(_) => return,
        };

        if self.console.load(Ordering::SeqCst) {
            ConsoleLogger.write(&line);
        }
        if let Ok(syslog) = self.syslog.read() {
            if let Some(syslog) = syslog.as_ref() {
                syslog.write(record.level(), &line);
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Initialize the global logger.
///
/// May be called more than once: later calls replace the name, level and
/// targets of the logger installed by the first call.
pub fn init_log(name: &str, level: Level, targets: &[LogTarget]) {
    if let Ok(mut n) = LOGGER.name.write() {
        *n = name.to_string();
    }
    LOGGER
        .console
        .store(targets.contains(&LogTarget::Console), Ordering::SeqCst);
    if let Ok(mut syslog) = LOGGER.syslog.write() {
        *syslog = if targets.contains(&LogTarget::Syslog) {
            Some(SysLogger::new())
        } else {
            None
        };
    }

    /* only the first call installs the logger, later ones just reconfigure it */
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level.to_level_filter());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Level::Debug);
        assert_eq!(parse_level("WARN"), Level::Warn);
        assert_eq!(parse_level("nonsense"), Level::Info);
    }

    #[test]
    fn test_log_target_from_str() {
        assert_eq!("console".parse::<LogTarget>(), Ok(LogTarget::Console));
        assert_eq!("syslog".parse::<LogTarget>(), Ok(LogTarget::Syslog));
        assert!("kmsg".parse::<LogTarget>().is_err());
    }

    #[test]
    fn test_format_record() {
        let line = format_record(
            "sysjob",
            &Record::builder()
                .args(format_args!("hello"))
                .level(Level::Info)
                .module_path(Some("sysjob::job"))
                .build(),
        );
        assert!(line.ends_with("sysjob INFO sysjob::job: hello"));
    }
}
