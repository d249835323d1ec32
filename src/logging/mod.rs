use std::{
    env,
    fmt::Display,
    io::{self, Write as _},
    os::fd::AsFd as _,
    time::SystemTime,
};

use anstyle::{AnsiColor, Effects, Style};
use env_logger::Env;
use log::Level;

/// Sets up `env_logger`, prefixing every line with `account`.
///
/// Lines go to the systemd journal format when stderr is attached to it,
/// otherwise they are styled for a terminal. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init(account: Option<&str>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    let account = account.map_or_else(String::new, |account| format!("{account} "));

    if stderr_is_journal() {
        builder.format(move |buf, record| {
            writeln!(
                buf,
                "<{}>{account}{}: {}",
                journal_priority(record.level()),
                record.target(),
                record.args()
            )
        });
    } else {
        let subtle = AnsiColor::BrightBlack.on_default();
        builder.format(move |buf, record| {
            write!(buf, "{subtle}[{subtle:#}")?;
            match jiff::Timestamp::try_from(SystemTime::now()) {
                Ok(now) => write!(buf, "{now:.3} ")?,
                Err(_) => write!(buf, "timestamp_error ")?,
            }
            let level_style = level_style(record.level());
            write!(
                buf,
                "{level_style}{}{level_style:#} {account}{}",
                record.level(),
                record.target(),
            )?;
            if let Some(line) = record.line() {
                write!(buf, ":{line}")?;
            }
            write!(buf, "{subtle}]{subtle:#} ")?;
            writeln!(buf, "{}", record.args())
        });
    }
    builder.init();
}

/// syslog priority understood by journald's stream parser (`sd-daemon(3)`).
fn journal_priority(level: Level) -> u8 {
    match level {
        Level::Error => 3,
        Level::Warn => 4,
        Level::Info => 6,
        Level::Debug | Level::Trace => 7,
    }
}

fn level_style(level: Level) -> Style {
    match level {
        Level::Error => AnsiColor::Red.on_default().effects(Effects::BOLD),
        Level::Warn => AnsiColor::Yellow.on_default(),
        Level::Info => AnsiColor::Green.on_default(),
        Level::Debug => AnsiColor::Blue.on_default(),
        Level::Trace => AnsiColor::Cyan.on_default(),
    }
}

/// systemd sets `$JOURNAL_STREAM` to `<device>:<inode>` of the stream it
/// connected to stderr (see `systemd.exec(5)`).
fn stderr_is_journal() -> bool {
    let Some(stream) = env::var_os("JOURNAL_STREAM") else {
        return false;
    };
    let Ok(stat) = rustix::fs::fstat(io::stderr().as_fd()) else {
        return false;
    };

    names_stream(&stream.to_string_lossy(), stat.st_dev, stat.st_ino)
}

fn names_stream(journal_stream: &str, device: impl Display, inode: impl Display) -> bool {
    journal_stream == format!("{device}:{inode}")
}
