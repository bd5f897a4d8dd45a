#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Text(String)
}

// Rules are written freely over several lines, so whitespace carries no
// meaning anywhere in a spec
pub fn strip_whitespace(spec: &str) -> String {
    spec.chars().filter(|c| !c.is_whitespace()).collect()
}

// Splits a spec into its rule segments, numbered from 1 in the order they
// are written. Empty segments (such as after a trailing `;`) are dropped.
pub fn split_rules(spec: &str) -> Vec<(usize, String)> {
    strip_whitespace(spec)
        .split(';')
        .enumerate()
        .filter(|(_, segment)| !segment.is_empty())
        .map(|(num, segment)| (num + 1, segment.to_string()))
        .collect()
}

pub fn lex_rule(rule: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();

    let mut rule_chars = rule.chars().peekable();

    while let Some(c) = rule_chars.next() {
        if c == '-' && rule_chars.next_if_eq(&'>').is_some() {
            if !text.is_empty() {
                tokens.push(Token::Text(std::mem::take(&mut text)));
            }
            tokens.push(Token::Arrow);
        } else {
            text.push(c);
        }
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }

    return tokens;
}
