/*
    This module parses L-system rule lists such as "A -> B-A-B; B -> A+B+A;"
*/

mod lexer;
mod verifier;

use std::fmt::Display;

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use verifier::verify_rules;

#[derive(Debug, PartialEq)]
pub enum SpecErrorType {
    // A rule segment has no `->`
    MissingArrow,
    // A rule segment has more than one `->`
    MultipleArrows,
    // The left side of a rule is not exactly one symbol
    InvalidSymbol(String),
    // The same symbol is given two rules
    DuplicateRule(char),
}

impl ErrorType for SpecErrorType {}

impl Display for SpecErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecErrorType::MissingArrow => write!(f, "Expected `->` in rule"),
            SpecErrorType::MultipleArrows => write!(f, "Rule contains more than one `->`"),
            SpecErrorType::InvalidSymbol(symbol) => write!(f, "`{}` is not a single symbol", symbol),
            SpecErrorType::DuplicateRule(symbol) => write!(f, "`{}` already has a rule", symbol),
        }
    }
}

pub type SpecError = Error<SpecErrorType>;
pub type SpecErrors = Errors<SpecErrorType>;

pub type Result<T> = std::result::Result<T, SpecErrorType>;
pub type RuleResult<T> = std::result::Result<T, SpecError>;
pub type SpecResult<T> = std::result::Result<T, SpecErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: char,
    replacement: String,
    location: Location
}

// The text between two arrows (or an arrow and the end of the rule)
fn side_text(tokens: Option<&[Token]>) -> String {
    tokens.unwrap_or_default().iter().map(|t| match t {
        Token::Text(s) => s.as_str(),
        Token::Arrow => ""
    }).collect()
}

fn parse_symbol(text: String) -> Result<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(SpecErrorType::InvalidSymbol(text))
    }
}

fn parse_rule(tokens: &[Token], location: Location) -> Result<Rule> {
    match tokens.iter().filter(|t| **t == Token::Arrow).count() {
        0 => return Err(SpecErrorType::MissingArrow),
        1 => (),
        _ => return Err(SpecErrorType::MultipleArrows)
    }

    let mut sides = tokens.split(|t| *t == Token::Arrow);
    let symbol = parse_symbol(side_text(sides.next()))?;
    let replacement = side_text(sides.next());

    return Ok(Rule {
        symbol,
        replacement,
        location
    });
}

fn parse_lex_rule(rule: &str, location: Location) -> RuleResult<Rule> {
    parse_rule(&lexer::lex_rule(rule), location)
        .map_err(|error| SpecError { location, error })
}

fn grammar_from_rules(rules: Vec<Rule>, start_symbol: &str) -> SpecResult<Grammar> {
    verify_rules(&rules)?;

    let rule_map: Rules = rules.into_iter()
        .map(|rule| (rule.symbol, rule.replacement))
        .collect();

    return Ok(Grammar::new(start_symbol.to_string(), rule_map));
}

// Builds a grammar from a rule list. The start symbol may be any sequence and
// does not need a rule. Every malformed rule is reported, not just the first.
pub fn parse_spec(spec: &str, start_symbol: &str) -> SpecResult<Grammar> {
    let parsed_rules = split_rules(spec).into_iter().map(|(num, rule)| {
        parse_lex_rule(&rule, Location::Rule(num))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_rules.partition(RuleResult::is_ok);
    if errors.len() > 0 {
        return Err(errors.into_iter().map(RuleResult::unwrap_err).collect_vec());
    }
    let rules_unwrapped = rules.into_iter().map(RuleResult::unwrap).collect_vec();

    return grammar_from_rules(rules_unwrapped, start_symbol);
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::iter::zip;

    use super::*;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[test]
    fn parse_normal_rule() {
        let lines = vec![
            vec![text("A"), Token::Arrow, text("B-A-B")],
            vec![text("X"), Token::Arrow]
        ];
        let answers = vec![
            Rule { symbol: 'A', replacement: "B-A-B".to_string(), location: Location::Rule(1) },
            Rule { symbol: 'X', replacement: String::new(), location: Location::Rule(1) }
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_rule(&line[..], Location::Rule(1)), Ok(answer));
        }
    }

    #[test]
    fn parse_malformed_rule() {
        // No separator
        assert_eq!(parse_rule(&[text("AB-A")], Location::None), Err(SpecErrorType::MissingArrow));

        // Two separators
        assert_eq!(parse_rule(
            &lexer::lex_rule("A->B->C")[..],
            Location::None
        ), Err(SpecErrorType::MultipleArrows));

        // Left side is not a single symbol
        assert_eq!(parse_rule(
            &lexer::lex_rule("Ll->rRL")[..],
            Location::None
        ), Err(SpecErrorType::InvalidSymbol("Ll".to_string())));
        assert_eq!(parse_rule(
            &lexer::lex_rule("->F")[..],
            Location::None
        ), Err(SpecErrorType::InvalidSymbol(String::new())));
    }

    #[test]
    fn parse_normal_spec() {
        let spec = "
            A -> +BF-AFA-FB+;
            B -> -AF+BFB+FA-;
        ";
        let parsed = parse_spec(spec, "A").unwrap();

        let mut rules = HashMap::new();
        rules.insert('A', "+BF-AFA-FB+".to_string());
        rules.insert('B', "-AF+BFB+FA-".to_string());

        assert_eq!(parsed, Grammar::new("A".to_string(), rules));
    }

    #[test]
    fn parse_spec_without_trailing_separator() {
        let with = parse_spec("F -> F + G; G -> F - G;", "F").unwrap();
        let without = parse_spec("F->F+G;G->F-G", "F").unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn parse_empty_spec() {
        let parsed = parse_spec("", "F").unwrap();
        assert!(parsed.variables().is_empty());
        assert_eq!(parsed.run(5), "F");
    }

    #[test]
    fn rule_order_is_irrelevant() {
        let forward = parse_spec("A -> B - A - B; B -> A + B + A;", "A").unwrap();
        let backward = parse_spec("B -> A + B + A; A -> B - A - B;", "A").unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn parse_malformed_spec() {
        let parsed = parse_spec("A -> B; oops; B -> A -> B; CD -> A", "A").unwrap_err();

        assert_eq!(parsed, vec![
            SpecError { location: Location::Rule(2), error: SpecErrorType::MissingArrow },
            SpecError { location: Location::Rule(3), error: SpecErrorType::MultipleArrows },
            SpecError { location: Location::Rule(4), error: SpecErrorType::InvalidSymbol("CD".to_string()) }
        ]);
    }

    #[test]
    fn parse_duplicate_rules() {
        let parsed = parse_spec("F -> FF; G -> F; F -> G", "F").unwrap_err();

        assert_eq!(parsed, vec![
            SpecError { location: Location::Rule(3), error: SpecErrorType::DuplicateRule('F') }
        ]);
    }
}
