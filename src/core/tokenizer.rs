//! Term tokenizer
//!
//! Splits a raw term such as `1.17*1000g`, `3.0%NaCl` or `100mL` into a
//! leading numeric expression and a trailing unit or solute name. The numeric
//! part may be a chain of `*` and `/` between decimal literals; a pure `*`
//! chain also yields its first and last operands as a density split.

use crate::error::{SolmixError, SolmixResult};
use crate::types::DensitySplit;

/// A token in a solution or concentration term
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A decimal literal with thousands separators removed (e.g. 1000, 1.5e3, -2)
    Number(String),
    /// `*` or `/`
    Operator(char),
    /// `%` directly after the numeric part
    Percent,
    /// Everything after the numeric part: a unit or a solute name
    Suffix(String),
}

/// Tokenizer for a single term
pub struct Tokenizer {
    chars: Vec<char>,
    position: usize,
    allow_percent: bool,
}

impl Tokenizer {
    /// Create a tokenizer for a term with whitespace already removed
    pub fn new(term: &str) -> Self {
        Self {
            chars: term.chars().collect(),
            position: 0,
            allow_percent: false,
        }
    }

    /// Recognize a `%` after the numeric part (concentration terms)
    pub fn with_percent(mut self) -> Self {
        self.allow_percent = true;
        self
    }

    /// Tokenize the whole term
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            match c {
                '0'..='9' | '.' | '-' => {
                    literal.push(c);
                    self.advance();
                }
                // Thousands separators
                ',' | '_' => {
                    self.advance();
                }
                'e' | 'E' if !literal.is_empty() && self.exponent_follows() => {
                    literal.push(c);
                    self.advance();
                }
                '*' | '/' => {
                    Self::flush(&mut literal, &mut tokens);
                    tokens.push(Token::Operator(c));
                    self.advance();
                }
                _ => break,
            }
        }
        Self::flush(&mut literal, &mut tokens);

        if self.allow_percent && self.peek() == Some('%') {
            self.advance();
            tokens.push(Token::Percent);
        }

        let rest: String = self.chars[self.position..].iter().collect();
        if !rest.is_empty() {
            tokens.push(Token::Suffix(rest));
        }

        tokens
    }

    fn flush(literal: &mut String, tokens: &mut Vec<Token>) {
        let text = literal.trim_end_matches('-');
        if !text.is_empty() {
            tokens.push(Token::Number(text.to_string()));
        }
        literal.clear();
    }

    /// An `e` belongs to the number only when an exponent follows it
    fn exponent_follows(&self) -> bool {
        match self.chars.get(self.position + 1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('-') => self
                .chars
                .get(self.position + 2)
                .is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.position += 1;
        }
        c
    }
}

/// A term split into its evaluated number and its suffix
#[derive(Debug, Clone, PartialEq)]
pub struct TermParts {
    pub value: f64,
    /// The literal as written, or the evaluated result of an expression
    pub text: String,
    /// Unit or solute name, possibly empty
    pub suffix: String,
    pub split: Option<DensitySplit>,
    pub percent: bool,
}

/// Split a solution quantity such as `1.05*1000g`
pub fn split_quantity(term: &str) -> SolmixResult<TermParts> {
    assemble(term, Tokenizer::new(term).tokenize())
}

/// Split a concentration clause such as `3.0%NaCl`; a percent is divided by 100
pub fn split_concentration(term: &str) -> SolmixResult<TermParts> {
    let mut parts = assemble(term, Tokenizer::new(term).with_percent().tokenize())?;
    if parts.percent {
        parts.value /= 100.0;
        parts.text = number_text(parts.value);
    }
    Ok(parts)
}

/// True when the text starts with a character of a numeric expression
pub fn starts_numeric(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | ',' | '_' | '*' | '/'))
}

/// Render a value the way a quantity is echoed back: integral values keep one decimal
pub fn number_text(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn assemble(term: &str, tokens: Vec<Token>) -> SolmixResult<TermParts> {
    let mut operands: Vec<String> = Vec::new();
    let mut operators: Vec<char> = Vec::new();
    let mut percent = false;
    let mut suffix = String::new();
    let mut expect_number = true;

    for token in tokens {
        match token {
            Token::Number(literal) if expect_number => {
                operands.push(literal);
                expect_number = false;
            }
            Token::Operator(op) if !expect_number => {
                operators.push(op);
                expect_number = true;
            }
            Token::Operator(op) if !operands.is_empty() => {
                return Err(SolmixError::parse(
                    term,
                    format!("unexpected operator '{op}'"),
                ));
            }
            Token::Percent => percent = true,
            Token::Suffix(rest) => suffix = rest,
            Token::Number(_) | Token::Operator(_) => {
                return Err(SolmixError::parse(term, "no numeric value"));
            }
        }
    }

    // Dangling trailing operators are ignored
    if expect_number {
        operators.pop();
    }
    if operands.is_empty() {
        return Err(SolmixError::parse(term, "no numeric value"));
    }

    let numbers = operands
        .iter()
        .map(|literal| {
            literal
                .parse::<f64>()
                .map_err(|_| SolmixError::parse(term, format!("'{literal}' is not a number")))
        })
        .collect::<SolmixResult<Vec<f64>>>()?;

    let mut value = numbers[0];
    for (op, rhs) in operators.iter().zip(numbers.iter().skip(1)) {
        value = match op {
            '*' => value * rhs,
            _ => {
                if *rhs == 0.0 {
                    return Err(SolmixError::DivisionByZero(term.to_string()));
                }
                value / rhs
            }
        };
    }

    let split = if !operators.is_empty() && operators.iter().all(|op| *op == '*') {
        Some(DensitySplit {
            density: numbers[0],
            volume: numbers[numbers.len() - 1],
        })
    } else {
        None
    };

    let text = if operators.is_empty() {
        operands[0].clone()
    } else {
        number_text(value)
    };

    Ok(TermParts {
        value,
        text,
        suffix,
        split,
        percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(term: &str) -> Vec<Token> {
        Tokenizer::new(term).with_percent().tokenize()
    }

    #[test]
    fn test_tokenize_quantity_with_unit() {
        assert_eq!(
            tokenize("100mL"),
            vec![
                Token::Number("100".to_string()),
                Token::Suffix("mL".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_density_product() {
        assert_eq!(
            tokenize("1.17*1000g"),
            vec![
                Token::Number("1.17".to_string()),
                Token::Operator('*'),
                Token::Number("1000".to_string()),
                Token::Suffix("g".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_percent_and_name() {
        assert_eq!(
            tokenize("3.0%T-N"),
            vec![
                Token::Number("3.0".to_string()),
                Token::Percent,
                Token::Suffix("T-N".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_strips_thousands_separators() {
        assert_eq!(
            tokenize("1,000_000L"),
            vec![
                Token::Number("1000000".to_string()),
                Token::Suffix("L".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_exponent() {
        assert_eq!(
            tokenize("1.5e3mL"),
            vec![
                Token::Number("1.5e3".to_string()),
                Token::Suffix("mL".to_string()),
            ]
        );
        assert_eq!(
            tokenize("2E-2NaCl"),
            vec![
                Token::Number("2E-2".to_string()),
                Token::Suffix("NaCl".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_name_starting_with_e() {
        assert_eq!(
            tokenize("0.1Ethanol"),
            vec![
                Token::Number("0.1".to_string()),
                Token::Suffix("Ethanol".to_string()),
            ]
        );
    }

    #[test]
    fn test_percent_ignored_without_flag() {
        assert_eq!(
            Tokenizer::new("3%").tokenize(),
            vec![
                Token::Number("3".to_string()),
                Token::Suffix("%".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_quantity_plain() {
        let parts = split_quantity("100mL").unwrap();
        assert_eq!(parts.value, 100.0);
        assert_eq!(parts.text, "100");
        assert_eq!(parts.suffix, "mL");
        assert!(parts.split.is_none());
    }

    #[test]
    fn test_split_quantity_density() {
        let parts = split_quantity("1.05*1000g").unwrap();
        assert!((parts.value - 1050.0).abs() < 1e-9);
        assert_eq!(parts.text, "1050.0");
        assert_eq!(parts.suffix, "g");
        assert_eq!(
            parts.split,
            Some(DensitySplit {
                density: 1.05,
                volume: 1000.0
            })
        );
    }

    #[test]
    fn test_split_quantity_division_has_no_split() {
        let parts = split_quantity("300/3").unwrap();
        assert_eq!(parts.value, 100.0);
        assert!(parts.split.is_none());
    }

    #[test]
    fn test_split_quantity_trailing_operator_ignored() {
        let parts = split_quantity("100*mL").unwrap();
        assert_eq!(parts.value, 100.0);
        assert_eq!(parts.suffix, "mL");
    }

    #[test]
    fn test_split_concentration_percent() {
        let parts = split_concentration("3.0%NaCl").unwrap();
        assert!((parts.value - 0.03).abs() < 1e-12);
        assert_eq!(parts.suffix, "NaCl");
        assert!(parts.percent);
    }

    #[test]
    fn test_split_concentration_expression() {
        let parts = split_concentration("3/100*1.0").unwrap();
        assert!((parts.value - 0.03).abs() < 1e-12);
        assert_eq!(parts.suffix, "");
    }

    #[test]
    fn test_split_concentration_ratio() {
        let parts = split_concentration("0.03T-N").unwrap();
        assert!((parts.value - 0.03).abs() < 1e-12);
        assert_eq!(parts.suffix, "T-N");
        assert!(!parts.percent);
    }

    #[test]
    fn test_error_no_number() {
        let err = split_concentration("NaCl").unwrap_err();
        assert!(matches!(err, SolmixError::Parse { .. }));
    }

    #[test]
    fn test_error_invalid_number() {
        let err = split_quantity("1.2.3mL").unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn test_error_double_operator() {
        let err = split_quantity("2**3g").unwrap_err();
        assert!(matches!(err, SolmixError::Parse { .. }));
    }

    #[test]
    fn test_error_division_by_zero() {
        let err = split_quantity("5/0g").unwrap_err();
        assert!(matches!(err, SolmixError::DivisionByZero(_)));
    }

    #[test]
    fn test_starts_numeric() {
        assert!(starts_numeric("100mL"));
        assert!(starts_numeric(".5"));
        assert!(!starts_numeric("abc"));
        assert!(!starts_numeric(""));
    }

    #[test]
    fn test_number_text() {
        assert_eq!(number_text(400.0), "400.0");
        assert_eq!(number_text(0.075), "0.075");
        assert_eq!(number_text(1170.0), "1170.0");
    }
}
