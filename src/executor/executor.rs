use crate::error::ExecError;

/// What the read loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    Continue,
    Exit,
}

impl ExecOutcome {
    pub fn should_continue(self) -> bool {
        self == ExecOutcome::Continue
    }
}

impl From<ExecOutcome> for i32 {
    fn from(outcome: ExecOutcome) -> i32 {
        match outcome {
            ExecOutcome::Continue => 1,
            ExecOutcome::Exit => 0,
        }
    }
}

pub type ExecStatus = Result<ExecOutcome, ExecError>;

/// Runs an external program named by `args[0]`.
///
/// `args` is never empty and never names a builtin or contains a
/// redirection operator.
pub trait Launcher {
    fn launch(&mut self, args: &[String]) -> ExecStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_form() {
        assert_eq!(i32::from(ExecOutcome::Continue), 1);
        assert_eq!(i32::from(ExecOutcome::Exit), 0);
        assert!(ExecOutcome::Continue.should_continue());
        assert!(!ExecOutcome::Exit.should_continue());
    }
}
