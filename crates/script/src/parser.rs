//! A `nom`-based parser for navigation scripts.
//!
//! Accepts a sequence of `var NAME = <literal>;` statements separated by
//! whitespace and comments. Literals are JSON values with the relaxations
//! found in generated JavaScript: single-quoted strings, bare object keys and
//! trailing commas. Arrays and objects may nest at most [`MAX_DEPTH`] levels.
use super::ast::{Binding, Script};
use crate::error::ScriptError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_until, take_while, take_while_m_n},
    character::complete::{alpha1, anychar, char, digit1, multispace1, one_of},
    combinator::{cut, eof, map, map_opt, opt, recognize, value},
    error::{Error, ErrorKind, ParseError},
    multi::{fold_many0, many0, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair, terminated},
};
use serde_json::{Number, Value};
use std::collections::HashSet;

// --- Main Public Parsers ---

/// Parses a whole script into its bindings.
pub fn parse_script(input: &str) -> Result<Script, ScriptError> {
    let bindings = match script(input) {
        Ok((_, bindings)) => bindings,
        Err(e) => return Err(syntax_error(input, e)),
    };

    let mut seen = HashSet::new();
    for b in &bindings {
        if !seen.insert(b.name.as_str()) {
            return Err(ScriptError::DuplicateBinding(b.name.clone()));
        }
    }
    Ok(Script::new(bindings))
}

/// Parses a document consisting of a single bare literal, such as a JSON file.
pub fn parse_value(input: &str) -> Result<Value, ScriptError> {
    match delimited(trivia, literal, (trivia, eof)).parse(input) {
        Ok((_, v)) => Ok(v),
        Err(e) => Err(syntax_error(input, e)),
    }
}

// --- Statements ---

fn script(input: &str) -> IResult<&str, Vec<Binding>> {
    delimited(trivia, many0(terminated(binding, trivia)), eof).parse(input)
}

fn binding(input: &str) -> IResult<&str, Binding> {
    let (input, _) = terminated(alt((tag("var"), tag("let"), tag("const"))), multispace1)
        .parse(input)?;
    let (input, (name, value)) = cut(terminated(
        separated_pair(identifier, ws(char('=')), literal),
        pair(trivia, opt(char(';'))),
    ))
    .parse(input)?;

    Ok((
        input,
        Binding {
            name: name.to_string(),
            value,
        },
    ))
}

// --- Literal Parsers ---

/// Arrays and objects nested deeper than this are rejected.
pub const MAX_DEPTH: usize = 128;

fn literal(input: &str) -> IResult<&str, Value> {
    literal_at(input, 0)
}

/// A literal found inside `depth` enclosing arrays or objects.
fn literal_at(input: &str, depth: usize) -> IResult<&str, Value> {
    match input.chars().next() {
        Some('[') => array_at(input, depth),
        Some('{') => object_at(input, depth),
        _ => alt((null, boolean, number, map(string_literal, Value::String))).parse(input),
    }
}

fn null(input: &str) -> IResult<&str, Value> {
    value(Value::Null, tag("null")).parse(input)
}

fn boolean(input: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Bool(true), tag("true")),
        value(Value::Bool(false), tag("false")),
    ))
    .parse(input)
}

fn number(input: &str) -> IResult<&str, Value> {
    map_opt(
        recognize((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
            opt((one_of("eE"), opt(one_of("+-")), digit1)),
        )),
        |s: &str| match s.parse::<i64>() {
            Ok(i) => Some(Value::from(i)),
            Err(_) => s.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number),
        },
    )
    .parse(input)
}

fn array_at(input: &str, depth: usize) -> IResult<&str, Value> {
    let (input, _) = char('[').parse(input)?;
    let inner = nested(input, depth)?;
    map(
        cut(terminated(
            terminated(
                separated_list0(ws(char(',')), ws(|i| literal_at(i, inner))),
                opt(ws(char(','))),
            ),
            pair(trivia, char(']')),
        )),
        Value::Array,
    )
    .parse(input)
}

fn object_at(input: &str, depth: usize) -> IResult<&str, Value> {
    let (input, _) = char('{').parse(input)?;
    let inner = nested(input, depth)?;
    map(
        cut(terminated(
            terminated(
                separated_list0(ws(char(',')), ws(|i| member(i, inner))),
                opt(ws(char(','))),
            ),
            pair(trivia, char('}')),
        )),
        |members| Value::Object(members.into_iter().collect()),
    )
    .parse(input)
}

fn member(input: &str, depth: usize) -> IResult<&str, (String, Value)> {
    separated_pair(
        alt((
            string_literal,
            map(identifier, String::from),
            map(digit1, String::from),
        )),
        ws(char(':')),
        cut(|i| literal_at(i, depth)),
    )
    .parse(input)
}

/// Depth of the contents of an array or object opened at `depth`.
fn nested(input: &str, depth: usize) -> Result<usize, nom::Err<Error<&str>>> {
    if depth >= MAX_DEPTH {
        return Err(nom::Err::Failure(Error::from_error_kind(
            input,
            ErrorKind::TooLarge,
        )));
    }
    Ok(depth + 1)
}

// --- Strings ---

enum Fragment<'a> {
    Literal(&'a str),
    Escaped(char),
}

fn string_literal(input: &str) -> IResult<&str, String> {
    alt((quoted('"', "\"\\"), quoted('\'', "'\\"))).parse(input)
}

fn quoted<'a>(
    quote: char,
    stop: &'static str,
) -> impl Parser<&'a str, Output = String, Error = Error<&'a str>> {
    preceded(
        char(quote),
        cut(terminated(
            fold_many0(
                alt((
                    map(is_not(stop), Fragment::Literal),
                    map(escaped_char, Fragment::Escaped),
                )),
                String::new,
                |mut s: String, fragment: Fragment<'_>| {
                    match fragment {
                        Fragment::Literal(text) => s.push_str(text),
                        Fragment::Escaped(c) => s.push(c),
                    }
                    s
                },
            ),
            char(quote),
        )),
    )
}

fn escaped_char(input: &str) -> IResult<&str, char> {
    preceded(
        char('\\'),
        alt((
            unicode_escape,
            value('\n', char('n')),
            value('\r', char('r')),
            value('\t', char('t')),
            value('\u{08}', char('b')),
            value('\u{0C}', char('f')),
            value('\0', char('0')),
            // Any other escaped character stands for itself: \" \' \\ \/
            anychar,
        )),
    )
    .parse(input)
}

fn hex4(input: &str) -> IResult<&str, u32> {
    map_opt(
        take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
        |hex: &str| u32::from_str_radix(hex, 16).ok(),
    )
    .parse(input)
}

fn unicode_escape(input: &str) -> IResult<&str, char> {
    let (rest, high) = preceded(char('u'), cut(hex4)).parse(input)?;
    if !(0xD800..0xDC00).contains(&high) {
        return match char::from_u32(high) {
            Some(c) => Ok((rest, c)),
            None => Err(nom::Err::Failure(Error::from_error_kind(input, ErrorKind::Char))),
        };
    }

    // High surrogate: a low surrogate escape must follow.
    let (rest, low) = cut(preceded(tag("\\u"), hex4)).parse(rest)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(nom::Err::Failure(Error::from_error_kind(input, ErrorKind::Char)));
    }
    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    match char::from_u32(code) {
        Some(c) => Ok((rest, c)),
        None => Err(nom::Err::Failure(Error::from_error_kind(input, ErrorKind::Char))),
    }
}

// --- Lexical helpers ---

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"), tag("$"))),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    ))
    .parse(input)
}

fn block_comment(input: &str) -> IResult<&str, &str> {
    recognize((tag("/*"), take_until("*/"), tag("*/"))).parse(input)
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("//"), opt(is_not("\r\n")))).parse(input)
}

/// Whitespace and comments.
fn trivia(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((multispace1, block_comment, line_comment)))).parse(input)
}

/// A combinator that takes a parser `inner` and produces a parser that consumes surrounding whitespace and comments.
fn ws<'a, F, O>(inner: F) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    F: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    delimited(trivia, inner, trivia)
}

// --- Error reporting ---

fn syntax_error(source: &str, err: nom::Err<Error<&str>>) -> ScriptError {
    let (remaining, code) = match err {
        nom::Err::Incomplete(_) => ("", None),
        nom::Err::Error(e) | nom::Err::Failure(e) => (e.input, Some(e.code)),
    };
    let offset = source.len() - remaining.len();
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map(|l| l.chars().count())
        .unwrap_or(0)
        + 1;

    let message = if code == Some(ErrorKind::TooLarge) {
        format!("arrays and objects nested deeper than {} levels", MAX_DEPTH)
    } else if remaining.is_empty() {
        "unexpected end of input".to_string()
    } else {
        let snippet: String = remaining
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(16)
            .collect();
        format!("unexpected input '{}'", snippet)
    };

    ScriptError::Syntax {
        line,
        column,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trivia_skips_comments() {
        let (rest, _) = trivia("  /* licence */ // note\n  var").unwrap();
        assert_eq!(rest, "var");
    }

    #[test]
    fn test_unterminated_comment_is_not_trivia() {
        let (rest, _) = trivia("/* open").unwrap();
        assert_eq!(rest, "/* open");
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(number("42").unwrap().1, json!(42));
        assert_eq!(number("-7").unwrap().1, json!(-7));
        assert_eq!(number("1.5").unwrap().1, json!(1.5));
        assert_eq!(number("2e3").unwrap().1, json!(2000.0));
        assert!(number("abc").is_err());
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(string_literal(r#""a\"b""#).unwrap().1, "a\"b");
        assert_eq!(string_literal(r"'it\'s'").unwrap().1, "it's");
        assert_eq!(string_literal(r#""tab\tnl\n""#).unwrap().1, "tab\tnl\n");
        assert_eq!(string_literal(r#""\u00e9""#).unwrap().1, "é");
        assert_eq!(string_literal(r#""\ud83d\ude00""#).unwrap().1, "😀");
        assert_eq!(string_literal(r#""a\/b""#).unwrap().1, "a/b");
        assert_eq!(string_literal(r#""""#).unwrap().1, "");
    }

    #[test]
    fn test_bad_unicode_escape_is_fatal() {
        assert!(matches!(
            string_literal(r#""\u12""#),
            Err(nom::Err::Failure(_))
        ));
        assert!(matches!(
            string_literal(r#""\ud83d x""#),
            Err(nom::Err::Failure(_))
        ));
    }

    #[test]
    fn test_array_with_trailing_comma() {
        assert_eq!(array_at("[1, 2, ]", 0).unwrap().1, json!([1, 2]));
        assert_eq!(array_at("[ ]", 0).unwrap().1, json!([]));
        assert_eq!(
            array_at("[ [ \"A\", \"a.html\", null ] ]", 0).unwrap().1,
            json!([["A", "a.html", null]])
        );
    }

    #[test]
    fn test_object_keys() {
        let v = object_at(r#"{ "a.html": [0], b: [0, 1], 3: true, }"#, 0).unwrap().1;
        assert_eq!(v, json!({ "a.html": [0], "b": [0, 1], "3": true }));
    }

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn test_nesting_up_to_limit_is_accepted() {
        let v = parse_value(&nested_arrays(MAX_DEPTH)).unwrap();
        let mut level = &v;
        let mut depth = 1;
        while let Some(inner) = level.as_array().and_then(|a| a.first()) {
            level = inner;
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        let err = parse_value(&nested_arrays(MAX_DEPTH + 1)).unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Syntax { line: 1, column, ref message }
                if column == MAX_DEPTH + 2 && message.contains("nested deeper than 128")
        ));

        // Objects count towards the same limit, and much deeper input fails the same way
        let mixed = format!("{}{}", "{a:[".repeat(100), "]}".repeat(100));
        assert!(parse_value(&mixed).is_err());
        assert!(parse_value(&nested_arrays(100_000)).is_err());
    }

    #[test]
    fn test_syntax_error_position() {
        let err = parse_value("[\n  1,\n  @\n]").unwrap_err();
        assert_eq!(
            err,
            ScriptError::Syntax {
                line: 3,
                column: 3,
                message: "unexpected input '@'".to_string(),
            }
        );
    }
}
