use std::os::unix::io::RawFd;

use crate::environment::Environment;
use crate::error;
use crate::executor::{ExecOutcome, ExecStatus, Launcher};
use super::builtin::BuiltinManager;
use super::launcher::ForkLauncher;
use super::redirect::RedirectHandler;

/// Runs one command line: redirection first, then a builtin or an external
/// program, then stdout is put back.
pub struct DefaultExecutor<L: Launcher = ForkLauncher> {
    pub builtin_registry: BuiltinManager,
    pub launcher: L,
    output_fd: RawFd,
}

impl DefaultExecutor<ForkLauncher> {
    pub fn new() -> Self {
        Self::with_launcher(ForkLauncher)
    }
}

impl Default for DefaultExecutor<ForkLauncher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Launcher> DefaultExecutor<L> {
    pub fn with_launcher(launcher: L) -> Self {
        DefaultExecutor {
            builtin_registry: BuiltinManager::new(),
            launcher,
            output_fd: libc::STDOUT_FILENO,
        }
    }

    /// Redirects `fd` instead of stdout.
    pub fn with_output_fd(mut self, fd: RawFd) -> Self {
        self.output_fd = fd;
        self
    }

    /// Every error ends the command, is reported here, and the shell keeps
    /// going. Only the `exit` builtin yields `ExecOutcome::Exit`.
    pub fn exec(&mut self, mut args: Vec<String>, env: &mut Environment) -> ExecOutcome {
        if args.is_empty() {
            return ExecOutcome::Continue;
        }

        let redirection = match RedirectHandler::detect(&mut args) {
            Ok(r) => r,
            Err(e) => {
                error::report(&e);
                return ExecOutcome::Continue;
            }
        };
        let saved = match redirection.map(|r| r.install_on(self.output_fd)).transpose() {
            Ok(saved) => saved,
            Err(e) => {
                error::report(&e);
                return ExecOutcome::Continue;
            }
        };

        let status = self.exec_command(&args, env);
        drop(saved);

        match status {
            Ok(outcome) => outcome,
            Err(e) => {
                error::report(&e);
                ExecOutcome::Continue
            }
        }
    }

    fn exec_command(&mut self, args: &[String], env: &mut Environment) -> ExecStatus {
        // `> file` alone: the file is created or truncated, nothing runs.
        let Some(name) = args.first() else {
            return Ok(ExecOutcome::Continue);
        };
        match self.builtin_registry.lookup(name) {
            Some(cmd) => cmd.run(&args[1..], env),
            None => self.launcher.launch(args),
        }
    }
}
