use std::{fs, path::Path};

use serde_json::Value;

use crate::err::{Error, Result};
use crate::json::canonicalize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CompareMode {
    /// Exact byte equality
    #[default]
    Bytes,
    /// Compare compact re-serializations when both files parse as JSON,
    /// otherwise the decoded text. Object keys are sorted and integral
    /// numbers lose their fraction, so `{"b":1.0,"a":2}` matches `{"a":2,"b":1}`
    PreformatJson,
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(Error::read(path))
}

fn compact_json(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    serde_json::to_string(&canonicalize(&value)).ok()
}

/// Whether both files hold the same content, read fully into memory.
///
/// With [`CompareMode::PreformatJson`], formatting differences (whitespace,
/// key order, `1.0` written for `1`) between two JSON documents are ignored. If either file is not
/// valid JSON the texts are compared as they are.
pub fn files_identical<P: AsRef<Path>, Q: AsRef<Path>>(
    path1: P,
    path2: Q,
    mode: CompareMode,
) -> Result<bool> {
    let data1 = read(path1.as_ref())?;
    let data2 = read(path2.as_ref())?;
    match mode {
        CompareMode::Bytes => Ok(data1 == data2),
        CompareMode::PreformatJson => {
            let text1 = String::from_utf8_lossy(&data1);
            let text2 = String::from_utf8_lossy(&data2);
            match (compact_json(&text1), compact_json(&text2)) {
                (Some(json1), Some(json2)) => Ok(json1 == json2),
                _ => {
                    log::debug!(
                        "{} or {} is not JSON, comparing text",
                        path1.as_ref().display(),
                        path2.as_ref().display()
                    );
                    Ok(text1 == text2)
                }
            }
        }
    }
}
