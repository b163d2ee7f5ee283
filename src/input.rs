use crate::parse::DIMENSIONS;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("no values supplied; enter 60 comma-separated numbers")]
    Empty,

    #[error("format error: `{token}` is not a number; make sure the values are numbers separated by commas")]
    Format { token: String },

    #[error("expected {expected} values, got {actual}")]
    Length { actual: usize, expected: usize },

    #[error("values are too large to score; the model output overflowed")]
    Unscorable,
}

/// One user-submitted signal, exactly [`DIMENSIONS`] values long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputVector([f64; DIMENSIONS]);

impl InputVector {
    pub fn values(&self) -> &[f64; DIMENSIONS] {
        &self.0
    }
}

/// Parses comma-separated numbers, rejecting anything but exactly
/// [`DIMENSIONS`] finite values. Values are kept as written.
///
/// Every token is checked before the count, so a malformed token is reported
/// even when the count is also wrong.
pub fn parse_input(text: &str) -> Result<InputVector, InputError> {
    if text.trim().is_empty() {
        return Err(InputError::Empty);
    }

    let values = text
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| InputError::Format {
                    token: token.to_owned(),
                })
        })
        .collect::<Result<Vec<f64>, InputError>>()?;

    let actual = values.len();
    let values: [f64; DIMENSIONS] = values.try_into().map_err(|_| InputError::Length {
        actual,
        expected: DIMENSIONS,
    })?;

    Ok(InputVector(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(count: usize) -> Vec<f64> {
        (0..count).map(|i| i as f64 / 97.0).collect()
    }

    fn join(values: &[f64]) -> String {
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[test]
    fn parses_sixty_values_unchanged() {
        let expected = values(DIMENSIONS);
        let input = parse_input(&join(&expected)).unwrap();

        assert_eq!(input.values().as_slice(), expected.as_slice());
    }

    #[test]
    fn tolerates_whitespace_around_tokens() {
        let tokens: Vec<String> = values(DIMENSIONS)
            .iter()
            .map(|v| format!(" {v}\t"))
            .collect();
        let text = format!("  {}  ", tokens.join(",\n"));
        assert!(parse_input(&text).is_ok());
    }

    #[test]
    fn keeps_out_of_range_values_as_written() {
        let mut expected = values(DIMENSIONS);
        expected[0] = 12.5;
        expected[1] = -3.0;

        let input = parse_input(&join(&expected)).unwrap();
        assert!((input.values()[0] - 12.5).abs() < f64::EPSILON);
        assert!((input.values()[1] + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wrong_count_reports_actual_count() {
        for count in [1, 59, 61, 120] {
            assert_eq!(
                parse_input(&join(&values(count))),
                Err(InputError::Length {
                    actual: count,
                    expected: DIMENSIONS
                })
            );
        }
    }

    #[test]
    fn length_error_message_names_both_counts() {
        let err = parse_input(&join(&values(3))).unwrap_err();
        assert_eq!(err.to_string(), "expected 60 values, got 3");
    }

    #[test]
    fn non_numeric_token_is_a_format_error() {
        let mut tokens: Vec<String> = values(DIMENSIONS).iter().map(ToString::to_string).collect();
        tokens[17] = "abc".to_owned();

        assert_eq!(
            parse_input(&tokens.join(",")),
            Err(InputError::Format {
                token: "abc".to_owned()
            })
        );
    }

    #[test]
    fn format_errors_win_over_length_errors() {
        assert!(matches!(
            parse_input("0.1, x, 0.3"),
            Err(InputError::Format { .. })
        ));
    }

    #[test]
    fn empty_tokens_and_non_finite_values_are_format_errors() {
        let trailing = format!("{},", join(&values(DIMENSIONS)));
        assert!(matches!(parse_input(&trailing), Err(InputError::Format { ref token }) if token.is_empty()));
        assert!(matches!(parse_input("NaN"), Err(InputError::Format { .. })));
        assert!(matches!(parse_input("inf"), Err(InputError::Format { .. })));
    }

    #[test]
    fn blank_text_is_empty() {
        assert_eq!(parse_input(""), Err(InputError::Empty));
        assert_eq!(parse_input("  \n "), Err(InputError::Empty));
    }
}
