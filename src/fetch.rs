use std::io;
use std::io::ErrorKind;

use serde::de::DeserializeOwned;
use serde_json::Value;
use spdlog::{debug, trace};

/// Retrieves a JSON document from a path. The blog data lives in flat
/// static files, so the default implementation reads from disk; tests use
/// an in-memory map instead.
///
/// No retry, no timeout: a failed read or a malformed body surfaces as the
/// error of the returned future.
#[allow(async_fn_in_trait)]
pub trait JsonFetcher {
    async fn fetch_json(&self, path: &str) -> io::Result<Value>;
}

/// Reads JSON documents from the local filesystem.
pub struct FileFetcher;

impl JsonFetcher for FileFetcher {
    async fn fetch_json(&self, path: &str) -> io::Result<Value> {
        debug!("Fetching {}", path);
        let body = match tokio::fs::read_to_string(path).await {
            Ok(body) => body,
            Err(e) => return Err(io::Error::new(e.kind(), format!("Error reading {}: {}", path, e))),
        };
        parse_json(path, &body)
    }
}

fn parse_json(path: &str, body: &str) -> io::Result<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            trace!("Fetched {}: {}", path, value);
            Ok(value)
        }
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing {}: {}", path, e))),
    }
}

/// Fetches a document and decodes it into a typed record. All field access
/// happens here, at the decoding boundary: a missing or malformed field is
/// one InvalidData error naming the path, not a failure deep in a caller.
pub async fn fetch_doc<T: DeserializeOwned>(fetcher: &impl JsonFetcher, path: &str) -> io::Result<T> {
    let value = fetcher.fetch_json(path).await?;
    match serde_json::from_value::<T>(value) {
        Ok(doc) => Ok(doc),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error decoding {}: {}", path, e))),
    }
}
