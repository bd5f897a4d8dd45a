use itertools::Itertools;

use super::SpecErrorType::DuplicateRule;
use super::{Rule, SpecError, SpecErrors, SpecResult};

// A variable defined more than once is reported at the rule which first
// redefines it
fn get_duplicate_rules(rules: &[Rule]) -> SpecErrors {
    rules.iter()
        .duplicates_by(|rule| rule.symbol)
        .map(|rule| SpecError {
            location: rule.location,
            error: DuplicateRule(rule.symbol)
        })
        .collect()
}

pub fn verify_rules(rules: &[Rule]) -> SpecResult<()> {
    let mut errors = Vec::new();

    errors.extend(get_duplicate_rules(rules).into_iter());

    if errors.len() > 0 {
        Err(errors)
    } else {
        Ok(())
    }
}
