//! Message body rendering
//!
//! Turns emit arguments into the text placed on the queue:
//! `[<file>:<line>] [<Level>] arg1 arg2 ...`, optionally followed by a
//! stack trace on the next line.

use super::caller::CallSite;
use super::cause::StackTraced;
use super::severity::Severity;
use serde::Serialize;
use std::fmt::{self, Write};

/// Join `args` with single spaces behind the severity tag
pub fn render_body(severity: Severity, args: &[&dyn fmt::Display]) -> String {
    let mut body = String::with_capacity(16 + args.len() * 8);
    body.push_str(severity.tag());
    body.push(' ');
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            body.push(' ');
        }
        // Writing into a String cannot fail
        let _ = write!(body, "{}", arg);
    }
    body
}

/// Body plus the stack trace of `cause`, if any, on the following line
pub fn render(
    severity: Severity,
    args: &[&dyn fmt::Display],
    cause: Option<&dyn StackTraced>,
) -> String {
    let mut text = render_body(severity, args);

    if let Some(cause) = cause {
        let trace = cause.stack_trace();
        if !trace.is_empty() {
            text.push('\n');
            text.push_str(&trace);
        }
    }

    text
}

/// Prepend the `[<basename>:<line>] ` prefix of `site` to `text`
pub fn annotate(text: String, site: Option<&CallSite>) -> String {
    match site {
        Some(site) => {
            let mut annotated = site.prefix();
            annotated.push_str(&text);
            annotated
        }
        None => text,
    }
}

/// Body of a pretty-print message: `[Pretty]\n<header>\n<json>`.
///
/// The header is `message`, or the type name of `value` when `message` is
/// empty. Serialization errors are returned alongside a body with an empty
/// JSON section.
pub fn render_pretty<T: Serialize + ?Sized>(
    message: &str,
    value: &T,
) -> (String, Option<serde_json::Error>) {
    let header = if message.is_empty() {
        std::any::type_name::<T>()
    } else {
        message
    };

    let (serialized, err) = match serde_json::to_string_pretty(value) {
        Ok(json) => (json, None),
        Err(e) => (String::new(), Some(e)),
    };

    (format!("[Pretty]\n{}\n{}", header, serialized), err)
}
