//! Parses words and lists of words written in the usual shorthand for group presentations.
//!
//! A lowercase letter is a generator and the corresponding uppercase letter its inverse. Factors
//! may be raised to integer powers (`a2`, `a^3`, `b-1`, `(ab)^-2`), `1` is the empty word, and a
//! relation `u = v` stands for the word `u v⁻¹`.

use anyhow::{anyhow, bail, Context};
use nom::{
    branch::alt,
    character::complete::{anychar, char, digit1, space0},
    combinator::{map, map_opt, map_res, opt, recognize},
    error::{context, ParseError, VerboseError},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded},
    IResult as IResultBase, Parser,
};

use crate::{Generator, Word};
use std::str::FromStr;

type IResult<I, O> = IResultBase<I, O, VerboseError<I>>;

/// Pad both ends with whitespace
fn space<'a, O, E: ParseError<&'a str>, F: Parser<&'a str, O, E>>(
    f: F,
) -> impl FnMut(&'a str) -> IResultBase<&'a str, O, E> {
    delimited(space0, f, space0)
}

fn exponent(i: &str) -> IResult<&str, i32> {
    map_res(
        preceded(opt(char('^')), recognize(pair(opt(char('-')), digit1))),
        |s: &str| s.parse::<i32>(),
    )(i)
}

fn letter(i: &str) -> IResult<&str, Word> {
    map(map_opt(anychar, Generator::from_char), Word::from)(i)
}

fn atom(i: &str) -> IResult<&str, Word> {
    alt((
        letter,
        map(char('1'), |_| Word::new()),
        context(
            "Parsing bracketed word",
            delimited(char('('), side, char(')')),
        ),
    ))(i)
}

fn factor(i: &str) -> IResult<&str, Word> {
    map(pair(atom, opt(exponent)), |(w, e)| match e {
        Some(e) => w.pow(e),
        None => w,
    })(i)
}

fn side(i: &str) -> IResult<&str, Word> {
    map(many0(space(factor)), |factors| {
        factors.into_iter().fold(Word::new(), |acc, w| acc * w)
    })(i)
}

fn relation(i: &str) -> IResult<&str, Word> {
    map(
        pair(side, opt(preceded(space(char('=')), side))),
        |(lhs, rhs)| match rhs {
            Some(rhs) => lhs * rhs.inverse(),
            None => lhs,
        },
    )(i)
}

fn word_list(i: &str) -> IResult<&str, Vec<Word>> {
    separated_list0(space(char(',')), relation)(i)
}

fn convert_error(i: &str) -> impl FnOnce(nom::Err<VerboseError<&str>>) -> anyhow::Error + '_ {
    move |err| {
        anyhow!(match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => nom::error::convert_error(i, e),
            _ => format!("{err:#}"),
        })
    }
}

/// Parses a single word or relation.
pub fn parse_word(i: &str) -> anyhow::Result<Word> {
    let (rest, word) = relation(i)
        .map_err(convert_error(i))
        .with_context(|| format!("Error when parsing word {i}"))?;
    if rest.is_empty() {
        Ok(word)
    } else {
        Err(anyhow!(
            "Failed to consume all of input. Remaining: '{rest}'"
        ))
    }
}

/// Parses a comma separated list of words. Words that are empty after expansion (`1`, `a0`, or
/// nothing at all between two commas) are dropped.
pub fn parse_words(i: &str) -> anyhow::Result<Vec<Word>> {
    let (rest, words) = word_list(i)
        .map_err(convert_error(i))
        .with_context(|| format!("Error when parsing word list {i}"))?;
    if rest.is_empty() {
        Ok(words.into_iter().filter(|w| !w.is_empty()).collect())
    } else {
        Err(anyhow!(
            "Failed to consume all of input. Remaining: '{rest}'"
        ))
    }
}

/// Parses a list of generator letters separated by commas and/or whitespace, e.g. `"a, b"` or
/// `"a b c"`.
pub fn parse_generators(i: &str) -> anyhow::Result<Vec<Generator>> {
    let mut generators = Vec::new();
    for token in i
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let mut chars = token.chars();
        let generator = match (chars.next().and_then(Generator::new), chars.next()) {
            (Some(g), None) => g,
            _ => bail!("Invalid generator '{token}'. Generators are single lowercase letters"),
        };
        if generators.contains(&generator) {
            bail!("Generator '{generator}' listed twice");
        }
        generators.push(generator);
    }
    Ok(generators)
}

impl FromStr for Word {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_word(s)
    }
}
