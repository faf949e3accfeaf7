//! Output-name collision resolution.
//!
//! Policy:
//! - Overwrite: return the requested name; the caller replaces whatever exists.
//! - AppendCounter: bump a counter embedded in the name until it is free.
//!
//! The counter lives at the end of the second-to-last dot segment (the last one is treated
//! as the extension), or of the only segment when the name has no dot:
//! - "a.txt"           -> "a0.txt" -> "a1.txt" -> ...
//! - "a9.txt"          -> "a10.txt"
//! - "file"            -> "file0"
//! - "report.v007.csv" -> "report.v8.csv" (leading zeros are not kept)
//!
//! Resolution is pure: it only looks at the name set it is given, never the filesystem.

use std::collections::HashSet;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Use the requested name and overwrite if it already exists.
    Overwrite,
    /// Pick a free name by incrementing the trailing counter of the stem segment.
    #[default]
    AppendCounter,
}

/// Compute the output filename according to the collision policy.
pub fn resolve_output_name(
    desired: &str,
    existing: &HashSet<String>,
    policy: CollisionPolicy,
) -> String {
    match policy {
        CollisionPolicy::Overwrite => desired.to_string(),
        CollisionPolicy::AppendCounter => {
            let mut candidate = desired.to_string();
            let mut steps = 0u64;
            // Every step yields a strictly larger counter, so candidates never repeat and the
            // loop ends after at most existing.len() + 1 iterations.
            while existing.contains(&candidate) {
                candidate = next_candidate(&candidate);
                steps += 1;
            }
            if steps > 0 {
                trace!(name = desired, resolved = %candidate, steps, "collision resolved");
            }
            candidate
        }
    }
}

/// Produce the next counter-bumped candidate for `name`.
pub fn next_candidate(name: &str) -> String {
    let segments: Vec<&str> = name.split('.').collect();
    let idx = if segments.len() > 1 { segments.len() - 2 } else { 0 };

    let segment = segments[idx];
    let prefix = segment.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &segment[prefix.len()..];
    let counter = if digits.is_empty() {
        "0".to_string()
    } else {
        increment_decimal(digits)
    };

    let bumped = format!("{prefix}{counter}");
    segments
        .iter()
        .enumerate()
        .map(|(i, s)| if i == idx { bumped.as_str() } else { *s })
        .collect::<Vec<_>>()
        .join(".")
}

/// Add one to a string of ASCII digits, without a width limit and dropping leading zeros.
fn increment_decimal(digits: &str) -> String {
    let significant = digits.trim_start_matches('0');
    let mut out: Vec<u8> = significant.bytes().collect();
    let mut i = out.len();
    loop {
        if i == 0 {
            out.insert(0, b'1');
            break;
        }
        i -= 1;
        if out[i] == b'9' {
            out[i] = b'0';
        } else {
            out[i] += 1;
            break;
        }
    }
    // Only ASCII digits were pushed.
    String::from_utf8(out).unwrap_or_default()
}
