// A post-processing table, tried in order at every position
pub type Substitutions<'a> = [(&'a str, &'a str)];

// Replaces every match of the table's patterns in a single left-to-right
// pass. When several patterns match at one position the earliest one in the
// table wins. Replacements are never rescanned.
pub fn substitute(sequence: &str, table: &Substitutions) -> String {
    let mut result = String::with_capacity(sequence.len());
    let mut rest = sequence;

    'scan: while let Some(c) = rest.chars().next() {
        for (pattern, replacement) in table.iter().filter(|(p, _)| !p.is_empty()) {
            if let Some(tail) = rest.strip_prefix(pattern) {
                result.push_str(replacement);
                rest = tail;
                continue 'scan;
            }
        }
        result.push(c);
        rest = &rest[c.len_utf8()..];
    }

    result
}

// Applies several tables one after the other
pub fn substitute_all(sequence: &str, passes: &[&Substitutions]) -> String {
    passes.iter().fold(sequence.to_string(), |current, table| substitute(&current, table))
}
