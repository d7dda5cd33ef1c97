//! Conversion between a path's point list and its serialized `d` description.
//!
//! Only straight segments exist in the model, so the writer emits a single
//! move-to followed by line-tos and the parser accepts the straight-segment
//! subset of the path grammar (`M L H V Z`, absolute and relative).

use std::fmt::Write as _;
use thiserror::Error;

use super::Point;

#[derive(Debug, Error, PartialEq)]
pub enum PathDataError {
    #[error("unsupported path command '{0}'")]
    UnsupportedCommand(char),

    #[error("invalid number '{0}' in path data")]
    InvalidNumber(String),

    #[error("path data must start with a move-to, found '{0}'")]
    MissingMoveTo(char),

    #[error("command '{command}' expects {expected} coordinates")]
    MissingCoordinates { command: char, expected: usize },
}

/// Writes `M x y L x y ...` for the given points. Empty input yields an empty
/// description.
pub fn path_to_description(points: &[Point]) -> String {
    let mut description = String::new();
    for (index, point) in points.iter().enumerate() {
        if index > 0 {
            description.push(' ');
        }
        let command = if index == 0 { 'M' } else { 'L' };
        let _ = write!(description, "{} {} {}", command, point.x, point.y);
    }
    description
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(data: &str) -> Result<Vec<Token>, PathDataError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = data.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() || c == ',' {
            i += 1;
        } else if c.is_ascii_alphabetic() && c != 'e' && c != 'E' {
            tokens.push(Token::Command(c));
            i += 1;
        } else if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' {
            let start = i;
            let mut seen_dot = false;
            let mut seen_exp = false;
            i += 1;
            if c == '.' {
                seen_dot = true;
            }
            while i < chars.len() {
                let n = chars[i];
                if n.is_ascii_digit() {
                    i += 1;
                } else if n == '.' && !seen_dot && !seen_exp {
                    seen_dot = true;
                    i += 1;
                } else if (n == 'e' || n == 'E') && !seen_exp {
                    seen_exp = true;
                    i += 1;
                    if i < chars.len() && (chars[i] == '-' || chars[i] == '+') {
                        i += 1;
                    }
                } else {
                    break;
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| PathDataError::InvalidNumber(text.clone()))?;
            tokens.push(Token::Number(value));
        } else {
            return Err(PathDataError::UnsupportedCommand(c));
        }
    }

    Ok(tokens)
}

fn take_number(tokens: &[Token], index: &mut usize, command: char, expected: usize) -> Result<f64, PathDataError> {
    match tokens.get(*index) {
        Some(Token::Number(value)) => {
            *index += 1;
            Ok(*value)
        }
        _ => Err(PathDataError::MissingCoordinates { command, expected }),
    }
}

/// Recovers the ordered point list from a description produced by
/// [`path_to_description`] (or any straight-segment path data).
pub fn parse_description(data: &str) -> Result<Vec<Point>, PathDataError> {
    let tokens = tokenize(data)?;
    let mut points: Vec<Point> = Vec::new();
    let mut current = Point::ZERO;
    let mut subpath_start = Point::ZERO;
    let mut index = 0;
    let mut command: Option<char> = None;

    while index < tokens.len() {
        let active = match &tokens[index] {
            Token::Command(c) => {
                index += 1;
                *c
            }
            // Bare coordinates repeat the previous command; after a move-to
            // they continue as line-tos.
            Token::Number(_) => match command {
                Some('M') => 'L',
                Some('m') => 'l',
                Some(c) => c,
                None => return Err(PathDataError::InvalidNumber("leading number".to_owned())),
            },
        };

        if points.is_empty() && !matches!(active, 'M' | 'm') {
            return Err(PathDataError::MissingMoveTo(active));
        }

        match active {
            'M' | 'm' | 'L' | 'l' => {
                let x = take_number(&tokens, &mut index, active, 2)?;
                let y = take_number(&tokens, &mut index, active, 2)?;
                current = if active.is_ascii_lowercase() {
                    Point::new(current.x + x, current.y + y)
                } else {
                    Point::new(x, y)
                };
                if matches!(active, 'M' | 'm') {
                    subpath_start = current;
                }
                points.push(current);
            }
            'H' | 'h' => {
                let x = take_number(&tokens, &mut index, active, 1)?;
                current.x = if active == 'h' { current.x + x } else { x };
                points.push(current);
            }
            'V' | 'v' => {
                let y = take_number(&tokens, &mut index, active, 1)?;
                current.y = if active == 'v' { current.y + y } else { y };
                points.push(current);
            }
            'Z' | 'z' => {
                if current != subpath_start {
                    points.push(subpath_start);
                }
                current = subpath_start;
            }
            other => return Err(PathDataError::UnsupportedCommand(other)),
        }
        command = Some(active);
    }

    Ok(points)
}
