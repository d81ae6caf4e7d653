//! Parsing of the Gradio `call/{api}/{event_id}` event stream.

use serde_json::Value;

/// Terminal state of a queued Gradio job.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum JobOutcome {
    /// `event: complete`, with the decoded `data` payload
    Complete(Value),
    /// `event: error`, with whatever message the app sent
    Failed(String),
}

/// Location of a file returned by the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileRef {
    Url(String),
    Path(String),
}

/// Scan a server-sent event body for the first terminal event.
///
/// `generating` and `heartbeat` events are skipped. Returns `None` when the
/// stream ended without a terminal event.
pub(crate) fn parse_event_stream(body: &str) -> Option<JobOutcome> {
    let mut event: Option<&str> = None;
    let mut data: Vec<&str> = Vec::new();

    for line in body.lines().chain(std::iter::once("")) {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            if let Some(outcome) = finish_event(event.take(), &data) {
                return Some(outcome);
            }
            data.clear();
            continue;
        }

        if let Some(value) = line.strip_prefix("event:") {
            event = Some(value.trim());
        } else if let Some(value) = line.strip_prefix("data:") {
            data.push(value.trim_start());
        }
    }

    None
}

fn finish_event(event: Option<&str>, data: &[&str]) -> Option<JobOutcome> {
    let payload = data.join("\n");
    match event? {
        "complete" => Some(JobOutcome::Complete(
            serde_json::from_str(&payload).unwrap_or(Value::String(payload)),
        )),
        "error" => {
            let message = match serde_json::from_str::<Value>(&payload) {
                Ok(Value::String(s)) => s,
                Ok(Value::Null) => "the space reported an error without details".to_string(),
                _ if payload.trim().is_empty() => {
                    "the space reported an error without details".to_string()
                }
                _ => payload,
            };
            Some(JobOutcome::Failed(message))
        }
        _ => None,
    }
}

/// First output file of a `complete` payload.
///
/// Gradio 4+ sends `[{"url": ..., "path": ...}]`; older apps send a bare
/// path string.
pub(crate) fn first_file(data: &Value) -> Option<FileRef> {
    let first = match data {
        Value::Array(items) => items.first()?,
        other => other,
    };

    match first {
        Value::String(path) => Some(FileRef::Path(path.clone())),
        Value::Object(map) => {
            if let Some(url) = map.get("url").and_then(Value::as_str) {
                return Some(FileRef::Url(url.to_string()));
            }
            map.get("path")
                .and_then(Value::as_str)
                .map(|p| FileRef::Path(p.to_string()))
        }
        _ => None,
    }
}
