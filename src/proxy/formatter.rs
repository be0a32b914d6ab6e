//! Rewrites `host:port:user:pass` lines into `user:pass@host:port` URLs

use crate::proxy::parser::ProxyParser;
use crate::Result;
use anyhow::Context;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Output style of the formatter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    Socks5,
    Http,
    /// `user:pass@host:port` with no scheme
    Plain,
}

impl FormatStyle {
    fn prefix(self) -> &'static str {
        match self {
            FormatStyle::Socks5 => "socks5://",
            FormatStyle::Http => "http://",
            FormatStyle::Plain => "",
        }
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatStyle::Socks5 => write!(f, "socks5"),
            FormatStyle::Http => write!(f, "http"),
            FormatStyle::Plain => write!(f, "plain"),
        }
    }
}

impl FromStr for FormatStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "socks5" | "1" => Ok(FormatStyle::Socks5),
            "http" | "2" => Ok(FormatStyle::Http),
            "plain" | "none" | "3" => Ok(FormatStyle::Plain),
            _ => Err(anyhow::anyhow!(
                "Invalid format style: {}. Use: socks5, http, plain",
                s
            )),
        }
    }
}

/// Format one line; anything that is not a credentialed proxy is reported inline
pub fn format_line(line: &str, style: FormatStyle) -> String {
    match ProxyParser::parse_line(line) {
        Ok(record) => match &record.auth {
            Some(auth) => format!(
                "{}{}:{}@{}:{}",
                style.prefix(),
                auth.username,
                auth.password,
                record.host,
                record.port
            ),
            None => format!("Invalid proxy format: {line}"),
        },
        Err(_) => format!("Invalid proxy format: {line}"),
    }
}

/// Format every line of `input` into `output`, overwriting it.
///
/// Returns the number of lines written.
pub fn format_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    style: FormatStyle,
) -> Result<usize> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let content = fs::read_to_string(input)
        .with_context(|| format!("Error opening file {}", input.display()))?;
    let file = File::create(output)
        .with_context(|| format!("Error creating output file {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let mut written = 0;
    for line in content.lines() {
        writeln!(writer, "{}", format_line(line, style))
            .with_context(|| format!("Error writing to file {}", output.display()))?;
        written += 1;
    }
    writer.flush()?;

    Ok(written)
}
