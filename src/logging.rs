use anyhow::Context;
use env_logger::{Builder, Env, Target, WriteStyle};
use std::fmt::Display;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Environment variable holding the log filter (env_logger syntax).
pub const LOG_ENV: &str = "BOXCROP_LOG";

/// Duplicates every write to two sinks.
struct Tee<A, B> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

/// `name | timestamp | level | message`
fn write_line(
    out: &mut impl Write,
    name: &str,
    timestamp: impl Display,
    level: log::Level,
    message: impl Display,
) -> io::Result<()> {
    writeln!(out, "{} | {} | {} | {}", name, timestamp, level, message)
}

/// Install the global logger, writing to stdout and appending to
/// `log_file`. The file's parent directory is created if missing.
pub fn init(log_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("opening log file {}", log_file.display()))?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .format(|buf, record| {
            let ts = buf.timestamp_millis();
            write_line(buf, record.target(), ts, record.level(), record.args())
        })
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(Tee {
            first: io::stdout(),
            second: file,
        })))
        .try_init()
        .context("installing logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tee_writes_both_sides() {
        let mut tee = Tee {
            first: Vec::new(),
            second: Vec::new(),
        };
        tee.write_all(b"hello\n").unwrap();
        tee.flush().unwrap();
        assert_eq!(tee.first, b"hello\n");
        assert_eq!(tee.second, b"hello\n");
    }

    #[test]
    fn line_has_four_pipe_separated_fields() {
        let mut out = Vec::new();
        write_line(
            &mut out,
            "boxcrop_extract::extractor",
            "2026-10-18T12:00:00.000Z",
            log::Level::Warn,
            "Box 4 contains no points",
        )
        .unwrap();
        let line = String::from_utf8(out).unwrap();
        assert_eq!(
            line,
            "boxcrop_extract::extractor | 2026-10-18T12:00:00.000Z | WARN | Box 4 contains no points\n"
        );
    }
}
