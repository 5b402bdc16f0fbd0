use std::{num::NonZeroU16, ops::Range, sync::Arc};

use chumsky::{error::Rich, extra, prelude::*, text};
use log::trace;
use thiserror::Error;

use crate::{Move, MoveCatalog};

/// At most this many digits of repeat count
const MAX_REPEAT_DIGITS: usize = 3;

/// At most this many apostrophes after a move
const MAX_TICKS: usize = 10;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("`{token}` is not valid move notation: {reason}")]
    Malformed {
        token: String,
        span: Range<usize>,
        reason: String,
    },
    #[error("`{key}` is not a known move")]
    UnknownMove { key: String, span: Range<usize> },
}

impl ParseError {
    /// Byte range of the offending token within the parsed input
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::Malformed { span, .. } | ParseError::UnknownMove { span, .. } => {
                span.clone()
            }
        }
    }
}

struct RawToken {
    key: String,
    repeat: String,
    ticks: String,
}

/// `<letters><0-3 digits><0-10 apostrophes>`, and nothing else
fn token<'src>() -> impl Parser<'src, &'src str, RawToken, extra::Err<Rich<'src, char>>> {
    let key = any()
        .filter(char::is_ascii_alphabetic)
        .repeated()
        .at_least(1)
        .collect::<String>();

    let repeat = any()
        .filter(char::is_ascii_digit)
        .repeated()
        .at_most(MAX_REPEAT_DIGITS)
        .collect::<String>();

    let ticks = just('\'')
        .repeated()
        .at_most(MAX_TICKS)
        .collect::<String>();

    key.then(repeat)
        .then(ticks)
        .then_ignore(end())
        .map(|((key, repeat), ticks)| RawToken { key, repeat, ticks })
}

fn parse_token(
    catalog: &MoveCatalog,
    text: &str,
    span: Range<usize>,
) -> Result<Move, ParseError> {
    let malformed = |reason: String| ParseError::Malformed {
        token: text.to_owned(),
        span: span.clone(),
        reason,
    };

    let raw = token().parse(text).into_result().map_err(|errs| {
        malformed(
            errs.into_iter()
                .next()
                .map_or_else(|| "unexpected input".to_owned(), |err| err.to_string()),
        )
    })?;

    let repeat = if raw.repeat.is_empty() {
        NonZeroU16::MIN
    } else {
        // At most three digits, so this always fits
        let value = raw
            .repeat
            .parse::<u16>()
            .map_err(|err| malformed(err.to_string()))?;
        NonZeroU16::new(value)
            .ok_or_else(|| malformed("cannot repeat a move zero times".to_owned()))?
    };

    let Some(definition) = catalog.lookup(&raw.key) else {
        return Err(ParseError::UnknownMove { key: raw.key, span });
    };

    // Only the parity of the apostrophes matters
    let reverse = raw.ticks.len() % 2 == 1;

    Ok(Move::new(Arc::clone(definition), repeat, reverse))
}

/// Parse one token such as `R`, `Rw2`, `x'` or `Tperm`.
///
/// # Errors
///
/// Fails if the token is not `<letters><0-3 digits><0-10 apostrophes>` or names no move in the
/// catalog.
pub fn parse_move(catalog: &MoveCatalog, token: &str) -> Result<Move, ParseError> {
    parse_token(catalog, token, 0..token.len())
}

/// Whitespace separated runs of anything else, each with its byte range. Checking the runs
/// against the move grammar happens per run so errors point at a whole token.
fn words<'src>()
-> impl Parser<'src, &'src str, Vec<(&'src str, SimpleSpan)>, extra::Err<Rich<'src, char>>> {
    let word = any()
        .filter(|c: &char| !c.is_whitespace())
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|text, e| (text, e.span()));

    text::whitespace()
        .ignore_then(word.then_ignore(text::whitespace()).repeated().collect::<Vec<_>>())
        .then_ignore(end())
}

/// Parse a whitespace separated sequence of moves. Either every token parses or nothing is
/// returned.
///
/// # Errors
///
/// Returns the error of the first token that fails to parse.
pub fn parse_sequence(catalog: &MoveCatalog, input: &str) -> Result<Vec<Move>, ParseError> {
    let tokens = words().parse(input).into_result().map_err(|errs| {
        let (span, reason) = errs.into_iter().next().map_or_else(
            || (0..input.len(), "unexpected input".to_owned()),
            |err| (err.span().start..err.span().end, err.to_string()),
        );
        ParseError::Malformed {
            token: input.get(span.clone()).unwrap_or(input).to_owned(),
            span,
            reason,
        }
    })?;

    let moves = tokens
        .into_iter()
        .map(|(text, span)| parse_token(catalog, text, span.start..span.end))
        .collect::<Result<Vec<_>, _>>()?;

    trace!("Parsed {} moves from {input:?}", moves.len());

    Ok(moves)
}
