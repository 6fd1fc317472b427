//! Line-oriented funnel definition parsing.
//!
//! One quoted label per stage, in order. The first line's number is the entry
//! volume; every later line's number is the conversion rate (percent) *into*
//! that stage. An optional `revenue:` statement sets the per-conversion
//! amount.
//!
//! ```text
//! funnel title Signup flow
//! "Visitors" : 1000
//! "Leads" : 20
//! "Customers" : 50
//! revenue: 49.99
//! ```
//!
//! Unlike the interactive edit surface, definition parsing is strict: range
//! violations and malformed statements are errors rather than clamps.

use tracing::trace;

use crate::error::{Error, Result};
use crate::funnel::Funnel;
use crate::model::{Amount, MAX_STAGES, MIN_STAGES, Rate, Stage, Volume};

pub fn parse_funnel(code: &str) -> Result<Funnel> {
    let mut raw_lines = code.lines();

    let mut header: Option<String> = None;
    for line in &mut raw_lines {
        let t = strip_inline_comment(line).trim();
        if !t.is_empty() {
            header = Some(t.to_string());
            break;
        }
    }

    let Some(header) = header else {
        return Err(Error::DefinitionParse {
            message: "empty funnel definition".to_string(),
        });
    };

    let mut it0 = header.split_whitespace();
    if it0.next() != Some("funnel") {
        return Err(Error::DefinitionParse {
            message: "expected funnel".to_string(),
        });
    }

    let mut title: Option<String> = None;
    let header_after = header
        .trim_start_matches(|c: char| c.is_whitespace())
        .strip_prefix("funnel")
        .unwrap_or("");
    let rest = header_after.trim_start();
    if !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("title") {
            title = Some(after.trim_start().to_string()).filter(|t| !t.is_empty());
        } else {
            let tok = rest.split_whitespace().next().unwrap_or(rest);
            return Err(Error::DefinitionParse {
                message: format!("unexpected funnel header token: {tok}"),
            });
        }
    }

    let mut acc_title = None;
    let mut acc_descr = None;
    let mut revenue: Option<Amount> = None;
    let mut entries: Vec<(String, Option<f64>)> = Vec::new();

    let mut lines = raw_lines.peekable();
    while let Some(line) = lines.next() {
        let t = strip_inline_comment(line).trim();
        if t.is_empty() {
            continue;
        }

        if let Some(v) = parse_key_value(t, "accTitle") {
            acc_title = Some(v);
            continue;
        }

        if let Some(v) = parse_acc_descr_inline(t) {
            acc_descr = Some(v);
            continue;
        }

        if starts_acc_descr_block(t) {
            let mut parts: Vec<String> = Vec::new();
            for next_line in lines.by_ref() {
                let s = strip_inline_comment(next_line);
                if s.contains('}') {
                    let before = s.split('}').next().unwrap_or("").trim();
                    if !before.is_empty() {
                        parts.push(before.to_string());
                    }
                    break;
                }
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    continue;
                }
                parts.push(trimmed.to_string());
            }
            acc_descr = Some(parts.join("\n"));
            continue;
        }

        if let Some(v) = parse_key_value(t, "revenue") {
            let amount: f64 = v.trim().parse().map_err(|_| Error::DefinitionParse {
                message: format!("invalid revenue amount: {v}"),
            })?;
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::DefinitionParse {
                    message: format!(
                        "invalid revenue amount: {v}. Revenue per conversion must be >= 0."
                    ),
                });
            }
            revenue = Some(Amount::Value(amount));
            continue;
        }

        if let Some((label, value)) = parse_stage_line(t) {
            entries.push((label, value));
            continue;
        }

        return Err(Error::DefinitionParse {
            message: format!("unexpected funnel statement: {t}"),
        });
    }

    if entries.len() < MIN_STAGES {
        return Err(Error::DefinitionParse {
            message: format!(
                "a funnel needs at least {MIN_STAGES} stages, got {}",
                entries.len()
            ),
        });
    }
    if entries.len() > MAX_STAGES {
        return Err(Error::DefinitionParse {
            message: format!(
                "a funnel supports at most {MAX_STAGES} stages, got {}",
                entries.len()
            ),
        });
    }

    // Each line after the first carries the rate *into* its stage, which is
    // the outgoing rate of the stage above it.
    let terminal = entries.len() - 1;
    let mut stages: Vec<Stage> = Vec::with_capacity(entries.len());
    for (i, (label, number)) in entries.into_iter().enumerate() {
        if i == 0 {
            let volume = match number {
                Some(v) if v < 0.0 => {
                    return Err(Error::DefinitionParse {
                        message: format!(
                            "\"{label}\" has invalid volume: {v}. Negative volumes are not allowed in funnels."
                        ),
                    });
                }
                Some(v) => Volume::Count(v.trunc() as u64),
                None => Volume::Indeterminate,
            };
            stages.push(Stage::new(label, volume, Some(Rate::Indeterminate), i));
            continue;
        }

        let incoming = match number {
            Some(r) if !(0.0..=100.0).contains(&r) => {
                return Err(Error::DefinitionParse {
                    message: format!(
                        "\"{label}\" has invalid conversion rate: {r}. Rates must be between 0 and 100."
                    ),
                });
            }
            Some(r) => Rate::Percent(r),
            None => Rate::Indeterminate,
        };
        stages[i - 1].rate = Some(incoming);
        let rate = if i < terminal {
            Some(Rate::Indeterminate)
        } else {
            None
        };
        stages.push(Stage::new(label, Volume::Count(0), rate, i));
    }

    trace!(stages = stages.len(), "parsed funnel definition");

    Ok(Funnel::from_parts(
        title,
        acc_title,
        acc_descr,
        stages,
        revenue.unwrap_or(Amount::Value(0.0)),
    ))
}

fn strip_inline_comment(line: &str) -> &str {
    match line.find("%%") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_key_value(line: &str, key: &str) -> Option<String> {
    let t = line.trim_start();
    if !t.starts_with(key) {
        return None;
    }
    let rest = t.strip_prefix(key)?.trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    Some(rest.to_string())
}

fn parse_acc_descr_inline(line: &str) -> Option<String> {
    let t = line.trim_start();
    if !t.starts_with("accDescr") {
        return None;
    }
    let rest = t.strip_prefix("accDescr")?.trim_start();
    if let Some(rest) = rest.strip_prefix(':') {
        return Some(rest.trim_start().to_string());
    }
    None
}

fn starts_acc_descr_block(line: &str) -> bool {
    let t = line.trim_start();
    if !t.starts_with("accDescr") {
        return false;
    }
    let rest = t.trim_start_matches("accDescr").trim_start();
    rest.starts_with('{')
}

fn parse_stage_line(line: &str) -> Option<(String, Option<f64>)> {
    let t = line.trim_start();
    let (label, rest) = parse_quoted_string(t)?;
    let rest = rest.trim_start();
    if rest.is_empty() {
        return Some((label, None));
    }
    let rest = rest.strip_prefix(':')?.trim_start();

    let mut num = String::new();
    for c in rest.chars() {
        if c.is_ascii_digit() || c == '-' || c == '.' {
            num.push(c);
        } else {
            break;
        }
    }
    if num.is_empty() {
        return None;
    }
    let value: f64 = num.parse().ok()?;
    Some((label, Some(value)))
}

fn parse_quoted_string(input: &str) -> Option<(String, &str)> {
    let mut chars = input.chars();
    let quote = chars.next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let mut out = String::new();
    let mut escaped = false;
    let mut idx = 1;
    for c in chars {
        idx += c.len_utf8();
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == quote {
            return Some((out, &input[idx..]));
        }
        out.push(c);
    }
    None
}
