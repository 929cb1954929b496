use std::io::{self, Write};

use crate::environment::Environment;
use crate::error::ExecError;
use crate::executor::{ExecOutcome, ExecStatus};
use super::manager::{BuiltinCommand, BuiltinManager};

/// Writes to the shell's stdout and flushes, so the bytes land wherever
/// stdout points right now (possibly a redirect target).
fn emit(text: &str) -> Result<(), ExecError> {
    let mut out = io::stdout().lock();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

pub struct CdCommand;

impl BuiltinCommand for CdCommand {
    fn name(&self) -> &'static str {
        "cd"
    }
    fn run(&self, args: &[String], env: &mut Environment) -> ExecStatus {
        let target = match args {
            [target] => target,
            [] => return Err(ExecError::BuiltinUsage("cd: expected argument".to_string())),
            _ => return Err(ExecError::BuiltinUsage("cd: too many arguments".to_string())),
        };
        env.change_dir(target)
            .map_err(|source| ExecError::BuiltinOperation { name: "cd", source })?;
        Ok(ExecOutcome::Continue)
    }
}

pub struct HelpCommand;

impl HelpCommand {
    pub fn text() -> String {
        let mut text = String::from(
            "lsh: a line shell\n\
             Type program names and arguments, and hit enter.\n\
             Use `> FILE` or `>> FILE` to send output to a file.\n\
             The following are built in:\n",
        );
        for name in BuiltinManager::new().names() {
            text.push_str("  ");
            text.push_str(name);
            text.push('\n');
        }
        text.push_str("Use the man command for information on other programs.\n");
        text
    }
}

impl BuiltinCommand for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }
    fn run(&self, _args: &[String], _env: &mut Environment) -> ExecStatus {
        emit(&Self::text())?;
        Ok(ExecOutcome::Continue)
    }
}

pub struct ExitCommand;

impl BuiltinCommand for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }
    fn run(&self, _args: &[String], _env: &mut Environment) -> ExecStatus {
        Ok(ExecOutcome::Exit)
    }
}

pub struct TypeCommand;

impl TypeCommand {
    /// Only the builtin table is consulted, never `PATH`.
    pub fn describe(name: &str) -> String {
        if BuiltinManager::new().is_builtin(name) {
            format!("{} is a shell builtin\n", name)
        } else {
            format!("{}: not found\n", name)
        }
    }
}

impl BuiltinCommand for TypeCommand {
    fn name(&self) -> &'static str {
        "type"
    }
    fn run(&self, args: &[String], _env: &mut Environment) -> ExecStatus {
        if args.is_empty() {
            return Err(ExecError::BuiltinUsage("type: expected argument".to_string()));
        }
        let text: String = args.iter().map(|name| Self::describe(name)).collect();
        emit(&text)?;
        Ok(ExecOutcome::Continue)
    }
}

pub struct EchoCommand;

impl EchoCommand {
    /// Re-joins tokens with single spaces. When the first token opens with
    /// `'` or `"`, that quote is peeled off the first and last tokens, and
    /// off both ends of any token wrapped in it.
    pub fn render(args: &[String]) -> String {
        let quote = args
            .first()
            .and_then(|first| first.chars().next())
            .filter(|c| *c == '"' || *c == '\'');
        let Some(quote) = quote else {
            return args.join(" ") + "\n";
        };

        let last = args.len() - 1;
        let mut line = args
            .iter()
            .enumerate()
            .map(|(i, arg)| {
                let wrapped = arg.len() >= 2 && arg.starts_with(quote) && arg.ends_with(quote);
                let mut word = arg.as_str();
                if i == 0 || wrapped {
                    word = word.strip_prefix(quote).unwrap_or(word);
                }
                if i == last || wrapped {
                    word = word.strip_suffix(quote).unwrap_or(word);
                }
                word
            })
            .collect::<Vec<_>>()
            .join(" ");
        line.push('\n');
        line
    }
}

impl BuiltinCommand for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }
    fn run(&self, args: &[String], _env: &mut Environment) -> ExecStatus {
        emit(&Self::render(args))?;
        Ok(ExecOutcome::Continue)
    }
}

pub struct PwdCommand;

impl BuiltinCommand for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }
    fn run(&self, _args: &[String], env: &mut Environment) -> ExecStatus {
        let cwd = env
            .current_dir()
            .map_err(|source| ExecError::BuiltinOperation { name: "pwd", source })?;
        emit(&format!("{}\n", cwd.display()))?;
        Ok(ExecOutcome::Continue)
    }
}
