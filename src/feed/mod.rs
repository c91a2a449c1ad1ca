use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use thiserror::Error;

mod models;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Io error: {0}")]
    Io(#[from] io::Error),
    #[error("Record on line {line} is not valid JSON: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
    #[error("Record on line {line} has an unparsable timestamp: {value}")]
    Timestamp { line: usize, value: String },
    #[error("Record on line {line} is missing required field `{field}`")]
    MissingField { line: usize, field: &'static str },
}

#[derive(Default)]
pub enum Source {
    #[default]
    None,
    Jsonl(PathBuf),
    Memory(String),
}

/// Reads newline-delimited JSON ping records from a file or an
/// in-memory buffer. The load is batch-or-nothing: a single malformed
/// record fails the whole stream, since a partially corrupt history is
/// not self-consistent enough to analyze.
#[derive(Default)]
pub struct FeedReader {
    source: Source,
}

impl FeedReader {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_jsonl(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Source::Jsonl(path.into());
        self
    }

    pub fn from_memory(mut self, data: impl Into<String>) -> Self {
        self.source = Source::Memory(data.into());
        self
    }

    pub fn stream_pings<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, Ping)),
    {
        match &self.source {
            Source::None => Ok(()),
            Source::Jsonl(path) => {
                let file = File::open(path)?;
                let reader = BufReader::new(file);
                stream_lines(reader.lines(), f)
            }
            Source::Memory(data) => {
                stream_lines(data.lines().map(|line| Ok(line.to_string())), f)
            }
        }
    }
}

fn stream_lines<I, F>(lines: I, mut f: F) -> Result<(), self::Error>
where
    I: Iterator<Item = io::Result<String>>,
    F: FnMut((usize, Ping)),
{
    for (i, line) in lines.enumerate() {
        let line = line?;
        let number = i + 1;
        let raw: RawPing =
            serde_json::from_str(&line).map_err(|source| Error::Json {
                line: number,
                source,
            })?;
        let ping = raw.validate(number)?;
        f((i, ping));
    }
    Ok(())
}
