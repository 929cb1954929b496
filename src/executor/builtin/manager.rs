use crate::environment::Environment;
use crate::executor::ExecStatus;
use super::commands::{CdCommand, EchoCommand, ExitCommand, HelpCommand, PwdCommand, TypeCommand};

/// A command that runs inside the shell process.
pub trait BuiltinCommand: Sync {
    fn name(&self) -> &'static str;
    /// `args` excludes the command name.
    fn run(&self, args: &[String], env: &mut Environment) -> ExecStatus;
}

static BUILTINS: &[&dyn BuiltinCommand] = &[
    &CdCommand,
    &HelpCommand,
    &ExitCommand,
    &TypeCommand,
    &EchoCommand,
    &PwdCommand,
];

/// The fixed builtin table, in the order `help` lists it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinManager;

impl BuiltinManager {
    pub fn new() -> Self {
        BuiltinManager
    }

    pub fn lookup(&self, name: &str) -> Option<&'static dyn BuiltinCommand> {
        BUILTINS.iter().copied().find(|cmd| cmd.name() == name)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().map(|cmd| cmd.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order() {
        let names: Vec<_> = BuiltinManager::new().names().collect();
        assert_eq!(names, vec!["cd", "help", "exit", "type", "echo", "pwd"]);
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let mgr = BuiltinManager::new();
        assert!(mgr.is_builtin("cd"));
        assert!(mgr.is_builtin("pwd"));
        assert!(!mgr.is_builtin("CD"));
        assert!(!mgr.is_builtin("cd "));
        assert!(!mgr.is_builtin(""));
        assert!(!mgr.is_builtin("ls"));
        assert_eq!(mgr.lookup("echo").map(|cmd| cmd.name()), Some("echo"));
    }
}
