use std::time::Duration;

use psbot_battle::Choice;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Agent chose {choice}, which is not legal here (legal: {legal:?})")]
    IllegalChoice { choice: Choice, legal: Vec<Choice> },

    #[error("Agent did not decide within {0:?}")]
    DecisionTimeout(Duration),
}
