//! Nom-based line parser.
//!
//! The grammar is matched in a single left-to-right pass. Every repetition
//! takes as much as it can and is never revisited, so parsing is linear in
//! the line length whatever the input:
//!
//! ```text
//! line     = [ "@" tag *( ";" tag ) SP ] [ ":" prefix SP ] command *( SP param ) [ CRLF / LF ]
//! tag      = [ "+" vendor "/" ] key "=" value
//! prefix   = host / nick [ "!" user ] [ "@" host ]
//! command  = 1*letter / 1*digit
//! param    = middle / ":" trailing        ; trailing only as the last param
//! ```

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{opt, recognize, verify},
    multi::separated_list1,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::command::Command;
use crate::error::MessageParseError;
use crate::prefix::Prefix;

use super::tags::{unescape_tag_value, Tag};
use super::types::{Message, ParseLimits};

type Res<'a, O> = IResult<&'a str, O>;

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn is_value_char(c: char) -> bool {
    !matches!(c, '\0' | '\r' | '\n' | ';' | ' ')
}

fn is_middle_char(c: char) -> bool {
    !matches!(c, '\0' | '\r' | '\n' | ' ')
}

fn is_trailing_char(c: char) -> bool {
    !matches!(c, '\0' | '\r' | '\n')
}

/// One hostname label: alphanumerics and hyphens, not starting or ending with `-`.
fn host_label(input: &str) -> Res<'_, &str> {
    verify(take_while1(is_key_char), |label: &str| {
        !label.starts_with('-') && !label.ends_with('-')
    })(input)
}

/// `+vendor/`, where vendor is a dotted hostname (IPv4 addresses included).
fn vendor(input: &str) -> Res<'_, &str> {
    preceded(
        char('+'),
        terminated(recognize(separated_list1(char('.'), host_label)), char('/')),
    )(input)
}

/// A single `[+vendor/]key=value` entry, borrowed from the input.
fn tag_entry(input: &str) -> Res<'_, (Option<&str>, &str, &str)> {
    let (rest, (vendor, key, _, value)) = tuple((
        opt(vendor),
        take_while1(is_key_char),
        char('='),
        take_while(is_value_char),
    ))(input)?;
    Ok((rest, (vendor, key, value)))
}

fn prefix_body(input: &str) -> Res<'_, &str> {
    terminated(preceded(char(':'), take_while1(is_middle_char)), char(' '))(input)
}

fn command_word(input: &str) -> Res<'_, &str> {
    alt((
        take_while1(|c: char| c.is_ascii_alphabetic()),
        take_while1(|c: char| c.is_ascii_digit()),
    ))(input)
}

fn middle(input: &str) -> Res<'_, &str> {
    take_while1(is_middle_char)(input)
}

fn trailing(input: &str) -> Res<'_, &str> {
    take_while(is_trailing_char)(input)
}

/// Remaining input at the point a nom parser gave up.
fn failed_at<'a>(err: nom::Err<nom::error::Error<&'a str>>, fallback: &'a str) -> &'a str {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.input,
        nom::Err::Incomplete(_) => fallback,
    }
}

/// Parse `@tags ` and return the input after the terminating space.
///
/// Tags past `max` are validated but not kept.
fn tags_section<'a>(input: &'a str, max: usize, out: &mut Vec<Tag>) -> Result<&'a str, &'a str> {
    let mut rest = &input[1..];
    loop {
        let (after, (vendor, key, value)) = tag_entry(rest).map_err(|e| failed_at(e, rest))?;
        if out.len() < max {
            out.push(Tag {
                vendor: vendor.map(str::to_owned),
                key: key.to_owned(),
                value: unescape_tag_value(value),
            });
        }

        rest = after;
        match rest.as_bytes().first() {
            Some(b';') => rest = &rest[1..],
            Some(b' ') => return Ok(&rest[1..]),
            _ => return Err(rest),
        }
    }
}

fn prefix_section(input: &str) -> Result<(&str, Prefix), &str> {
    let (rest, body) = prefix_body(input).map_err(|e| failed_at(e, input))?;
    let prefix = Prefix::from_body(body).ok_or(input)?;
    Ok((rest, prefix))
}

/// Parse ` param`* up to the end of input.
///
/// At most `max - 1` middle parameters are kept, so a trailing parameter
/// always has a slot. Returns whether the last kept parameter was a trailing
/// one.
fn params_section<'a>(
    mut rest: &'a str,
    max: usize,
    out: &mut Vec<String>,
) -> Result<bool, &'a str> {
    let max_middle = max.saturating_sub(1);
    let mut was_trailing = false;

    while let Some(after_space) = rest.strip_prefix(' ') {
        if let Some(text) = after_space.strip_prefix(':') {
            let (after, text) = trailing(text).map_err(|e| failed_at(e, text))?;
            if !after.is_empty() {
                return Err(after);
            }
            if out.len() < max {
                out.push(text.to_owned());
                was_trailing = true;
            }
            return Ok(was_trailing);
        }

        let (after, param) = middle(after_space).map_err(|e| failed_at(e, after_space))?;
        if out.len() < max_middle {
            out.push(param.to_owned());
        }
        rest = after;
    }

    if rest.is_empty() {
        Ok(was_trailing)
    } else {
        Err(rest)
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r\n")
        .or_else(|| line.strip_suffix(b"\n"))
        .unwrap_or(line)
}

/// Parse one raw line into a [`Message`].
pub(crate) fn parse_line(line: &[u8], limits: &ParseLimits) -> Result<Message, MessageParseError> {
    use MessageParseError::*;

    if line.len() > limits.max_len {
        return Err(TooLong(line.len()));
    }

    let line = strip_terminator(line);
    if line.is_empty() {
        return Err(EmptyMessage);
    }

    let body = std::str::from_utf8(line).map_err(|e| InvalidUtf8(e.valid_up_to()))?;
    let offset = |rest: &str| body.len() - rest.len();
    let mut rest = body;

    let mut tags = Vec::new();
    if rest.starts_with('@') {
        rest = tags_section(rest, limits.max_tags, &mut tags)
            .map_err(|at| InvalidTags(offset(at)))?;
    }

    let mut prefix = None;
    if rest.starts_with(':') {
        let (after, parsed) = prefix_section(rest).map_err(|at| InvalidPrefix(offset(at)))?;
        prefix = Some(parsed);
        rest = after;
    }

    let (after, command) = command_word(rest).map_err(|e| InvalidCommand(offset(failed_at(e, rest))))?;
    if !(after.is_empty() || after.starts_with(' ')) {
        return Err(InvalidCommand(offset(after)));
    }

    let mut params = Vec::new();
    let trailing = params_section(after, limits.max_params, &mut params)
        .map_err(|at| InvalidParams(offset(at)))?;

    Ok(Message {
        tags,
        prefix,
        command: Command::from(command),
        params,
        trailing,
    })
}
