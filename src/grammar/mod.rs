/*
    This module is for storing and rewriting L-system grammars
*/

pub mod substitution;

use std::collections::{BTreeSet, HashMap};

use log::debug;

// Every symbol is a single character, every replacement an ordered run of
// symbols
pub type Rules = HashMap<char, String>;

#[derive(Debug, PartialEq)]
pub struct Grammar {
    start_symbol: String,
    rules: Rules,
}

impl Grammar {
    pub(crate) fn new(start_symbol: String, rules: Rules) -> Self {
        Grammar { start_symbol, rules }
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    // Symbols which have a rule
    pub fn variables(&self) -> BTreeSet<char> {
        self.rules.keys().copied().collect()
    }

    // Symbols which appear in a replacement but have no rule of their own
    pub fn constants(&self) -> BTreeSet<char> {
        self.rules
            .values()
            .flat_map(|replacement| replacement.chars())
            .filter(|symbol| !self.rules.contains_key(symbol))
            .collect()
    }

    // Applies every rule to the whole sequence at once, `iterations` times.
    // Each generation reads only from the previous one, so a symbol inserted
    // during a pass is never expanded again in that same pass.
    pub fn rewrite(&self, initial: &str, iterations: usize) -> String {
        let mut current = initial.to_string();
        for generation in 1..=iterations {
            current = self.rewrite_once(&current);
            debug!("generation {}: {} symbols", generation, current.chars().count());
        }
        current
    }

    pub fn run(&self, iterations: usize) -> String {
        self.rewrite(&self.start_symbol, iterations)
    }

    fn rewrite_once(&self, sequence: &str) -> String {
        let mut next = String::with_capacity(sequence.len());
        for symbol in sequence.chars() {
            match self.rules.get(&symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;
    use crate::parser::parse_spec;

    const SIERPINSKI: &str = "A -> B - A - B; B -> A + B + A;";

    fn sierpinski() -> Grammar {
        parse_spec(SIERPINSKI, "A").unwrap()
    }

    #[test]
    fn run_sierpinski() {
        let grammar = sierpinski();
        let answers = vec![
            "A",
            "B-A-B",
            "A+B+A-B-A-B-A+B+A"
        ];

        for (iterations, answer) in zip(0.., answers) {
            assert_eq!(grammar.run(iterations), answer);
        }
    }

    #[test]
    fn rewrite_other_start() {
        assert_eq!(sierpinski().rewrite("AA", 1), "B-A-BB-A-B");
    }

    #[test]
    fn rewrite_zero_iterations_is_identity() {
        let grammar = sierpinski();
        for sequence in ["", "A", "+-", "AB+CD", "ééA"] {
            assert_eq!(grammar.rewrite(sequence, 0), sequence);
        }
    }

    #[test]
    fn rewrite_composes() {
        let grammars = vec![
            sierpinski(),
            parse_spec("F -> F + G; G -> F - G;", "F").unwrap(),
            parse_spec("X -> F[+X]F[-X]+X; F -> FF", "X").unwrap()
        ];

        for grammar in grammars {
            let start = grammar.start_symbol().to_string();
            for n in 0..4 {
                let once = grammar.rewrite(&start, 1);
                assert_eq!(grammar.rewrite(&start, n + 1), grammar.rewrite(&once, n));
            }
        }
    }

    #[test]
    fn rewrite_is_simultaneous() {
        // A's replacement introduces B, which must survive the pass untouched
        let grammar = parse_spec("A -> AB; B -> A", "A").unwrap();
        let sequence = "ABBA";
        let expected_len: usize = sequence.chars()
            .map(|c| grammar.rules.get(&c).map_or(1, |r| r.chars().count()))
            .sum();

        let rewritten = grammar.rewrite(sequence, 1);
        assert_eq!(rewritten, "ABAAAB");
        assert_eq!(rewritten.chars().count(), expected_len);
    }

    #[test]
    fn constants_copied_unchanged() {
        let grammar = parse_spec("F -> F+F", "F").unwrap();
        assert_eq!(grammar.rewrite("[F]-x", 1), "[F+F]-x");
    }

    #[test]
    fn variables_and_constants() {
        let grammar = sierpinski();
        assert_eq!(grammar.variables(), BTreeSet::from(['A', 'B']));
        assert_eq!(grammar.constants(), BTreeSet::from(['+', '-']));
    }

    #[test]
    fn variables_and_constants_are_a_partition() {
        let specs = vec![
            SIERPINSKI,
            "A -> +BF-AFA-FB+; B -> -AF+BFB+FA-;",
            "M -> lFrFRFMFLFlFr; l -> lFRFrFLFlFlFr; r -> rFLFlFRFrFrFl; L -> rFlFLFRFLFlFr; R -> lFrFRFLFRFrFl;",
            ""
        ];

        for spec in specs {
            let grammar = parse_spec(spec, "A").unwrap();
            let variables = grammar.variables();
            let constants = grammar.constants();
            assert!(variables.is_disjoint(&constants));

            let every_symbol: BTreeSet<char> = grammar.rules.iter()
                .flat_map(|(symbol, replacement)| std::iter::once(*symbol).chain(replacement.chars()))
                .collect();
            let union: BTreeSet<char> = variables.union(&constants).copied().collect();
            assert_eq!(union, every_symbol);
        }
    }

    #[test]
    fn start_symbol_needs_no_rule() {
        let grammar = parse_spec("F -> F+F", "X").unwrap();
        assert_eq!(grammar.run(3), "X");
    }
}
