use crate::domain::errors::NUMBER_OUT_OF_RANGE;
use crate::domain::{AlignError, AlignResult, PositionLineRule};
use crate::document::SourceLine;
use regex::Regex;
use std::str::FromStr;

/// Digit groups a line must exceed to count as the position row.
pub const POSITION_DIGIT_GROUP_THRESHOLD: usize = 10;

const DIGIT_RUN_PATTERN: &str = r"[0-9]+";
const SIGNED_DIGIT_RUN_PATTERN: &str = r"-?[0-9]+";
const OFFSET_LINE_PATTERN: &str = r"^0[ \t]+0[ \t]+[0-9]";

#[derive(Debug, Clone)]
pub struct LinePatterns {
    digit_run: Regex,
    signed_digit_run: Regex,
    offset_line: Regex,
}

impl LinePatterns {
    pub fn compile() -> AlignResult<Self> {
        Ok(Self {
            digit_run: compile_pattern("digit_run", DIGIT_RUN_PATTERN)?,
            signed_digit_run: compile_pattern("signed_digit_run", SIGNED_DIGIT_RUN_PATTERN)?,
            offset_line: compile_pattern("offset_line", OFFSET_LINE_PATTERN)?,
        })
    }

    pub fn digit_group_count(&self, text: &str) -> usize {
        self.digit_run.find_iter(text).count()
    }

    pub fn is_position_line(&self, rule: PositionLineRule, text: &str) -> bool {
        match rule {
            PositionLineRule::DigitGroups => self
                .digit_run
                .find_iter(text)
                .nth(POSITION_DIGIT_GROUP_THRESHOLD)
                .is_some(),
            PositionLineRule::ZeroComma => text.trim().starts_with("0 ") && text.contains(','),
        }
    }

    pub fn is_offset_line(&self, text: &str) -> bool {
        self.offset_line.is_match(text)
    }

    pub fn unsigned_runs(&self, line: &SourceLine) -> AlignResult<Vec<u64>> {
        parse_runs(&self.digit_run, line)
    }

    pub fn signed_runs(&self, line: &SourceLine) -> AlignResult<Vec<i64>> {
        parse_runs(&self.signed_digit_run, line)
    }
}

fn compile_pattern(name: &str, pattern: &str) -> AlignResult<Regex> {
    Regex::new(pattern).map_err(|source| {
        AlignError::internal(
            "SYS.PATTERN",
            format!("invalid line pattern {name} '{pattern}': {source}"),
        )
    })
}

fn parse_runs<T: FromStr>(pattern: &Regex, line: &SourceLine) -> AlignResult<Vec<T>> {
    pattern
        .find_iter(&line.text)
        .map(|run| {
            run.as_str().parse::<T>().map_err(|_| {
                AlignError::input_validation(
                    NUMBER_OUT_OF_RANGE,
                    format!(
                        "value '{}' on line {} does not fit a 64-bit integer",
                        run.as_str(),
                        line.number
                    ),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::LinePatterns;
    use crate::domain::PositionLineRule;
    use crate::domain::errors::NUMBER_OUT_OF_RANGE;
    use crate::document::SourceLine;

    fn line(text: &str) -> SourceLine {
        SourceLine {
            number: 7,
            text: text.to_string(),
        }
    }

    #[test]
    fn digit_group_rule_needs_more_than_ten_groups() {
        let patterns = LinePatterns::compile().expect("patterns should compile");

        let ten = "1 2 3 4 5 6 7 8 9 10";
        let eleven = "1 2 3 4 5 6 7 8 9 10 11";
        assert_eq!(patterns.digit_group_count(ten), 10);
        assert!(!patterns.is_position_line(PositionLineRule::DigitGroups, ten));
        assert!(patterns.is_position_line(PositionLineRule::DigitGroups, eleven));
    }

    #[test]
    fn digit_groups_ignore_signs_and_separators() {
        let patterns = LinePatterns::compile().expect("patterns should compile");
        assert_eq!(patterns.digit_group_count("-1,-2;3.4 x5"), 5);
    }

    #[test]
    fn zero_comma_rule_trims_before_matching() {
        let patterns = LinePatterns::compile().expect("patterns should compile");

        assert!(patterns.is_position_line(PositionLineRule::ZeroComma, "   0 100, 200, 300"));
        assert!(!patterns.is_position_line(PositionLineRule::ZeroComma, "0 100 200 300"));
        assert!(!patterns.is_position_line(PositionLineRule::ZeroComma, "10 100, 200"));
        assert!(!patterns.is_position_line(PositionLineRule::ZeroComma, "0,100,200"));
    }

    #[test]
    fn offset_line_must_start_with_two_zero_fields() {
        let patterns = LinePatterns::compile().expect("patterns should compile");

        assert!(patterns.is_offset_line("0 0 12 -4 3"));
        assert!(patterns.is_offset_line("0\t0\t5"));
        assert!(patterns.is_offset_line("0   0   7"));
        assert!(!patterns.is_offset_line(" 0 0 12"));
        assert!(!patterns.is_offset_line("00 0 12"));
        assert!(!patterns.is_offset_line("0 0 -12"));
        assert!(!patterns.is_offset_line("0 1 12"));
    }

    #[test]
    fn unsigned_runs_drop_minus_signs() {
        let patterns = LinePatterns::compile().expect("patterns should compile");
        let values = patterns
            .unsigned_runs(&line("pos: 0, -10, 20"))
            .expect("runs should parse");
        assert_eq!(values, vec![0, 10, 20]);
    }

    #[test]
    fn signed_runs_keep_minus_signs() {
        let patterns = LinePatterns::compile().expect("patterns should compile");
        let values = patterns
            .signed_runs(&line("0 0 5 -5 10 -0"))
            .expect("runs should parse");
        assert_eq!(values, vec![0, 0, 5, -5, 10, 0]);
    }

    #[test]
    fn oversized_runs_report_the_line_number() {
        let patterns = LinePatterns::compile().expect("patterns should compile");
        let error = patterns
            .signed_runs(&line("0 0 99999999999999999999"))
            .expect_err("overflow should fail");

        assert_eq!(error.code(), NUMBER_OUT_OF_RANGE);
        assert!(error.message().contains("line 7"));
    }
}
