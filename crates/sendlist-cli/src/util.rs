use anyhow::{Context as _, Result};
use chrono::{DateTime, Local, Utc};
use sendlist_core::domain::{parse_country_code, OwnerName};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::commands::Context;
use crate::error::invalid_input;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => ts.to_string(),
    }
}

/// Parses one of the uuid newtypes, naming `what` in the error.
pub fn parse_id<T: FromStr>(raw: &str, what: &str) -> Result<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input(format!("{what} id cannot be empty")));
    }
    T::from_str(trimmed).map_err(|_| invalid_input(format!("invalid {what} id: {trimmed}")))
}

pub fn resolve_owner(ctx: &Context<'_>, arg: Option<&str>) -> Result<OwnerName> {
    let raw = arg.unwrap_or(ctx.config.default_owner.as_str());
    Ok(OwnerName::new(raw)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryCodeSource {
    Flag,
    Owner,
    Config,
    Unset,
}

impl CountryCodeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            CountryCodeSource::Flag => "flag",
            CountryCodeSource::Owner => "owner",
            CountryCodeSource::Config => "config",
            CountryCodeSource::Unset => "unset",
        }
    }
}

/// Picks the default country code: explicit flag, then the owner's stored
/// preference, then the config file.
pub fn resolve_country_code(
    ctx: &Context<'_>,
    owner: &OwnerName,
    flag: Option<&str>,
) -> Result<Option<String>> {
    let (code, source) = if let Some(raw) = flag {
        (Some(parse_country_code(raw)?), CountryCodeSource::Flag)
    } else if let Some(code) = ctx.store.owners().default_country_code(owner)? {
        (Some(code), CountryCodeSource::Owner)
    } else if let Some(code) = ctx.config.default_country_code.clone() {
        (Some(code), CountryCodeSource::Config)
    } else {
        (None, CountryCodeSource::Unset)
    };
    debug!(
        owner = %owner,
        code = code.as_deref().unwrap_or("-"),
        source = source.as_str(),
        "default country code resolved"
    );
    Ok(code)
}

/// Reads one raw recipient per line from `path` (`-` is stdin). Blank lines
/// are kept so they are reported like any other unusable entry.
pub fn read_recipients_file(path: &Path) -> Result<Vec<String>> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .lock()
            .read_to_string(&mut buf)
            .with_context(|| "read recipients from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("read recipients file {}", path.display()))?
    };
    Ok(split_recipient_lines(&contents))
}

fn split_recipient_lines(contents: &str) -> Vec<String> {
    contents.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_id, split_recipient_lines};
    use sendlist_core::domain::TemplateId;

    #[test]
    fn split_recipient_lines_keeps_interior_blank_lines() {
        let lines = split_recipient_lines("0300 1234567\r\n\n  \n+1 415 555 1234\n");
        assert_eq!(lines, vec!["0300 1234567", "", "  ", "+1 415 555 1234"]);
    }

    #[test]
    fn split_recipient_lines_ignores_final_newline() {
        assert_eq!(split_recipient_lines("+14155551234\n"), vec!["+14155551234"]);
        assert!(split_recipient_lines("").is_empty());
    }

    #[test]
    fn parse_id_rejects_empty_and_garbage() {
        assert!(parse_id::<TemplateId>("  ", "template").is_err());
        assert!(parse_id::<TemplateId>("nope", "template").is_err());
        let id = TemplateId::new();
        let parsed: TemplateId = parse_id(&id.to_string(), "template").expect("parse");
        assert_eq!(parsed, id);
    }
}
