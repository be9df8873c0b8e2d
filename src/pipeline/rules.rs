// src/pipeline/rules.rs

//! Rule evaluation.
//!
//! An ordered rule list reduces to an OR-of-ANDs expression: each `OR` rule
//! starts a new accumulator slot, every other rule ANDs into the current
//! slot, and the item is eligible when any slot ends up true. Reduction
//! short-circuits: an `OR` rule whose preceding slot is already true ends
//! evaluation immediately, and an AND onto an already-false slot skips the
//! rule body.

use crate::error::Result;
use crate::models::{Item, Operator, Requirement, Rule};
use crate::pipeline::fields;

/// Evaluate an item against an ordered rule list.
///
/// An empty rule list evaluates false.
pub fn evaluate(item: &Item, rules: &[Rule]) -> Result<bool> {
    let mut slots: Vec<bool> = Vec::new();

    for rule in rules {
        match slots.last().copied() {
            None => {
                let value = evaluate_rule(item, rule)?;
                slots.push(value);
            }
            Some(previous) if rule.operator == Operator::Or => {
                // Early exit: one finished slot is already true.
                if previous {
                    return Ok(true);
                }
                let value = evaluate_rule(item, rule)?;
                slots.push(value);
            }
            Some(previous) => {
                let value = previous && evaluate_rule(item, rule)?;
                if let Some(last) = slots.last_mut() {
                    *last = value;
                }
            }
        }
    }

    Ok(slots.into_iter().any(|slot| slot))
}

/// Evaluate a single rule against an item.
pub fn evaluate_rule(item: &Item, rule: &Rule) -> Result<bool> {
    let any = rule.requirement == Requirement::Any;
    let value = fields::resolve_item(&rule.rss_item_field, item)?;

    let equals = family_matches(&value, &rule.equals, str_equals, false, any);
    let contains = family_matches(&value, &rule.contains, str_contains, false, any);
    let starts_with = family_matches(&value, &rule.starts_with, str_starts_with, false, any);
    let ends_with = family_matches(&value, &rule.ends_with, str_ends_with, false, any);
    let equals_ic = family_matches(&value, &rule.equals_ignore_case, str_equals, true, any);
    let contains_ic = family_matches(&value, &rule.contains_ignore_case, str_contains, true, any);
    let starts_with_ic =
        family_matches(&value, &rule.starts_with_ignore_case, str_starts_with, true, any);
    let ends_with_ic = family_matches(&value, &rule.ends_with_ignore_case, str_ends_with, true, any);

    let families = [
        equals,
        contains,
        starts_with,
        ends_with,
        equals_ic,
        contains_ic,
        starts_with_ic,
        ends_with_ic,
    ];

    let combined = if any {
        families.iter().any(|f| *f)
    } else {
        families.iter().all(|f| *f)
    };

    Ok(if rule.negate { !combined } else { combined })
}

/// Evaluate one predicate family against the field value.
///
/// An empty needle list is the identity of the combining operation: a
/// vacuous pass under ALL, a non-contribution under ANY. A non-empty list
/// matches when any needle matches.
fn family_matches(
    value: &str,
    needles: &[String],
    matches: fn(&str, &str) -> bool,
    ignore_case: bool,
    any: bool,
) -> bool {
    if needles.is_empty() {
        return !any;
    }

    let value = fold_case(ignore_case, value);
    needles
        .iter()
        .any(|needle| matches(&value, &fold_case(ignore_case, needle)))
}

fn fold_case(ignore_case: bool, value: &str) -> String {
    if ignore_case {
        value.to_uppercase()
    } else {
        value.to_string()
    }
}

fn str_equals(value: &str, needle: &str) -> bool {
    value == needle
}

fn str_contains(value: &str, needle: &str) -> bool {
    value.contains(needle)
}

fn str_starts_with(value: &str, needle: &str) -> bool {
    value.starts_with(needle)
}

fn str_ends_with(value: &str, needle: &str) -> bool {
    value.ends_with(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item() -> Item {
        Item {
            title: "Release v1.2.3".into(),
            category: "Announcements".into(),
            ..Item::default()
        }
    }

    fn contains_rule(needle: &str) -> Rule {
        Rule {
            rss_item_field: "title".into(),
            contains: vec![needle.into()],
            ..Rule::default()
        }
    }

    #[test]
    fn test_empty_rule_list_is_false() {
        assert!(!evaluate(&sample_item(), &[]).unwrap());
    }

    #[test]
    fn test_single_rule_matches() {
        assert!(evaluate(&sample_item(), &[contains_rule("Release")]).unwrap());
        assert!(!evaluate(&sample_item(), &[contains_rule("Hotfix")]).unwrap());
    }

    #[test]
    fn test_and_semantics() {
        let item = sample_item();
        let both = [contains_rule("Release"), contains_rule("v1")];
        assert!(evaluate(&item, &both).unwrap());

        let second_fails = [contains_rule("Release"), contains_rule("Hotfix")];
        assert!(!evaluate(&item, &second_fails).unwrap());

        let first_fails = [contains_rule("Hotfix"), contains_rule("Release")];
        assert!(!evaluate(&item, &first_fails).unwrap());
    }

    #[test]
    fn test_or_semantics() {
        let item = sample_item();
        let mut second = contains_rule("Release");
        second.operator = Operator::Or;
        let rules = [contains_rule("Hotfix"), second];
        assert!(evaluate(&item, &rules).unwrap());
    }

    #[test]
    fn test_or_short_circuits_before_evaluating() {
        // The second rule references an unknown field; the short-circuit must
        // return before it is ever evaluated.
        let bogus = Rule {
            operator: Operator::Or,
            rss_item_field: "bogus".into(),
            ..Rule::default()
        };
        let rules = [contains_rule("Release"), bogus];
        assert!(evaluate(&sample_item(), &rules).unwrap());
    }

    #[test]
    fn test_and_onto_false_slot_skips_rule() {
        let bogus = Rule {
            rss_item_field: "bogus".into(),
            ..Rule::default()
        };
        let rules = [contains_rule("Hotfix"), bogus];
        assert!(!evaluate(&sample_item(), &rules).unwrap());
    }

    #[test]
    fn test_or_of_ands() {
        let item = sample_item();
        // (Hotfix AND Release) OR (Announcements on category)
        let mut category = Rule {
            rss_item_field: "category".into(),
            equals: vec!["Announcements".into()],
            ..Rule::default()
        };
        category.operator = Operator::Or;
        let rules = [contains_rule("Hotfix"), contains_rule("Release"), category];
        assert!(evaluate(&item, &rules).unwrap());
    }

    #[test]
    fn test_any_requirement_ors_families() {
        // Field contains "v1" but does not start with "y": ANY still passes.
        let rule = Rule {
            rss_item_field: "title".into(),
            requirement: Requirement::Any,
            contains: vec!["v1".into()],
            starts_with: vec!["y".into()],
            ..Rule::default()
        };
        assert!(evaluate_rule(&sample_item(), &rule).unwrap());
    }

    #[test]
    fn test_all_requirement_ands_families() {
        let mut rule = Rule {
            rss_item_field: "title".into(),
            contains: vec!["Release".into()],
            starts_with: vec!["y".into()],
            ..Rule::default()
        };
        assert!(!evaluate_rule(&sample_item(), &rule).unwrap());

        rule.starts_with = vec!["Release".into()];
        assert!(evaluate_rule(&sample_item(), &rule).unwrap());
    }

    #[test]
    fn test_empty_families_are_identity_values() {
        // ALL mode: every empty family is a vacuous pass.
        let all = Rule {
            rss_item_field: "title".into(),
            ..Rule::default()
        };
        assert!(evaluate_rule(&sample_item(), &all).unwrap());

        // ANY mode: empty families contribute nothing, so nothing passes.
        let any = Rule {
            rss_item_field: "title".into(),
            requirement: Requirement::Any,
            ..Rule::default()
        };
        assert!(!evaluate_rule(&sample_item(), &any).unwrap());
    }

    #[test]
    fn test_negate_inverts() {
        let mut rule = contains_rule("Release");
        assert!(evaluate_rule(&sample_item(), &rule).unwrap());
        rule.negate = true;
        assert!(!evaluate_rule(&sample_item(), &rule).unwrap());

        let mut miss = contains_rule("Hotfix");
        miss.negate = true;
        assert!(evaluate_rule(&sample_item(), &miss).unwrap());
    }

    #[test]
    fn test_ignore_case_families() {
        let rule = Rule {
            rss_item_field: "title".into(),
            contains_ignore_case: vec!["rElEaSe".into()],
            ..Rule::default()
        };
        assert!(evaluate_rule(&sample_item(), &rule).unwrap());

        let rule = Rule {
            rss_item_field: "category".into(),
            equals_ignore_case: vec!["ANNOUNCEMENTS".into()],
            ..Rule::default()
        };
        assert!(evaluate_rule(&sample_item(), &rule).unwrap());
    }

    #[test]
    fn test_unknown_field_propagates() {
        let rule = Rule {
            rss_item_field: "bogus".into(),
            ..Rule::default()
        };
        assert!(evaluate(&sample_item(), &[rule]).is_err());
    }
}
