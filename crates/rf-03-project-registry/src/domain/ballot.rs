//! # Ballot Parsing
//!
//! A ballot is a fixed-length string of `0`/`1` answers to the assessment
//! questionnaire. Only the number of `1`s matters for scoring.

use super::errors::{ProjectError, ProjectResult};

/// Longest questionnaire accepted.
pub const MAX_BALLOT_LENGTH: usize = 256;

/// Validate a ballot and count its yes answers.
pub fn count_yes_answers(choices: &str) -> ProjectResult<u32> {
    if choices.is_empty() {
        return Err(ProjectError::InvalidBallot("empty ballot".to_string()));
    }
    if choices.len() > MAX_BALLOT_LENGTH {
        return Err(ProjectError::InvalidBallot(format!(
            "ballot has {} answers, maximum is {}",
            choices.len(),
            MAX_BALLOT_LENGTH
        )));
    }

    let mut yes = 0u32;
    for (position, answer) in choices.bytes().enumerate() {
        match answer {
            b'1' => yes += 1,
            b'0' => {}
            other => {
                return Err(ProjectError::InvalidBallot(format!(
                    "unexpected character {:?} at position {}",
                    other as char, position
                )))
            }
        }
    }
    Ok(yes)
}
