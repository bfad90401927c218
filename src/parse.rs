// Grammar for date text. Whitespace may separate any two tokens.
//
//   numeric := INTEGER "/" INTEGER "/" INTEGER [WORD]      e.g. "9/22/2017 AD"
//   named   := WORD INTEGER "," INTEGER [WORD]             e.g. "Sep 22, 2017"
//
// An INTEGER is a run of ASCII digits with an optional leading '-' attached
// directly to it. A WORD is a run of alphabetic characters. A known era may
// also contain spaces or punctuation ("B.C.", "Before Christ"); it is split
// off the end of the text before tokenizing. The fields are returned as text;
// turning them into numbers and months needs the calendar.

use std::cmp::Reverse;
use std::iter::Peekable;

use crate::error::DateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Integer(&'a str),
    Word(&'a str),
    Slash,
    Comma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MonthField<'a> {
    Number(&'a str),
    Name(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateFields<'a> {
    pub(crate) month: MonthField<'a>,
    pub(crate) day: &'a str,
    pub(crate) year: &'a str,
    pub(crate) era: Option<&'a str>,
}

pub(crate) fn parse_date_text<'a>(
    text: &'a str,
    eras: &[&str],
) -> Result<DateFields<'a>, DateError> {
    let invalid = || DateError::InvalidDateText(text.to_string());
    let (body, era) = split_era(text.trim_end(), eras);
    let mut fields = tokenize(body)
        .and_then(|tokens| parse_tokens(&tokens))
        .ok_or_else(invalid)?;
    if era.is_some() {
        if fields.era.is_some() {
            return Err(invalid());
        }
        fields.era = era;
    }
    Ok(fields)
}

// Splits the longest matching era off the end of `text`, ignoring case. The
// era must be preceded by whitespace.
fn split_era<'a>(text: &'a str, eras: &[&str]) -> (&'a str, Option<&'a str>) {
    let mut eras = eras
        .iter()
        .map(|era| era.trim())
        .filter(|era| !era.is_empty())
        .collect::<Vec<_>>();
    eras.sort_by_key(|era| Reverse(era.len()));
    for era in eras {
        if era.len() >= text.len() || !text.is_char_boundary(text.len() - era.len()) {
            continue;
        }
        let (body, suffix) = text.split_at(text.len() - era.len());
        if body.ends_with(char::is_whitespace) && suffix.to_lowercase() == era.to_lowercase() {
            return (body, Some(suffix));
        }
    }
    (text, None)
}

fn tokenize(text: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        if ch.is_whitespace() {
            continue;
        }
        let token = match ch {
            '/' => Token::Slash,
            ',' => Token::Comma,
            '-' | '0'..='9' => {
                if ch == '-' && !matches!(chars.peek(), Some((_, next)) if next.is_ascii_digit()) {
                    return None;
                }
                let end = take_while(&mut chars, text.len(), |c| c.is_ascii_digit());
                Token::Integer(&text[start..end])
            }
            c if c.is_alphabetic() => {
                let end = take_while(&mut chars, text.len(), char::is_alphabetic);
                Token::Word(&text[start..end])
            }
            _ => return None,
        };
        tokens.push(token);
    }
    Some(tokens)
}

// Consumes characters matching `accept` and returns the byte offset just past
// the last one.
fn take_while<I, F>(chars: &mut Peekable<I>, len: usize, accept: F) -> usize
where
    I: Iterator<Item = (usize, char)>,
    F: Fn(char) -> bool,
{
    while let Some(&(_, c)) = chars.peek() {
        if !accept(c) {
            break;
        }
        chars.next();
    }
    match chars.peek() {
        Some(&(offset, _)) => offset,
        None => len,
    }
}

fn parse_tokens<'a>(tokens: &[Token<'a>]) -> Option<DateFields<'a>> {
    let mut cursor = TokenCursor::new(tokens);
    let (month, day, year) = match cursor.next()? {
        Token::Integer(month) => {
            cursor.expect(Token::Slash)?;
            let day = cursor.integer()?;
            cursor.expect(Token::Slash)?;
            (MonthField::Number(month), day, cursor.integer()?)
        }
        Token::Word(name) => {
            let day = cursor.integer()?;
            cursor.expect(Token::Comma)?;
            (MonthField::Name(name), day, cursor.integer()?)
        }
        _ => return None,
    };
    let era = match cursor.peek_next() {
        Some(Token::Word(era)) => {
            cursor.next();
            Some(era)
        }
        _ => None,
    };
    if !cursor.at_end() {
        return None;
    }
    Some(DateFields {
        month,
        day,
        year,
        era,
    })
}

struct TokenCursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    // Index of the next token to be returned.
    pos: usize,
}

impl<'t, 'a> TokenCursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek_next()?;
        self.pos += 1;
        Some(token)
    }

    fn peek_next(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, expected: Token<'a>) -> Option<()> {
        if self.peek_next()? == expected {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    fn integer(&mut self) -> Option<&'a str> {
        match self.peek_next()? {
            Token::Integer(text) => {
                self.pos += 1;
                Some(text)
            }
            _ => None,
        }
    }
}
