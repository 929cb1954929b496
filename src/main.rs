use std::io::{self, Write};
use std::process::ExitCode;

use lsh::config::ConfigLoader;
use lsh::environment::Environment;
use lsh::error;
use lsh::executor::DefaultExecutor;
use lsh::lexer;
use lsh::prompt::ShellPrompt;

fn main() -> ExitCode {
    let config = ConfigLoader::load_default().unwrap_or_else(|e| {
        error::report(&e);
        ConfigLoader::default_config()
    });

    let mut env = Environment::new();
    env.apply_vars(&config.env_vars);
    let prompt = ShellPrompt::new(&config.prompt);
    let mut executor = DefaultExecutor::new();

    loop {
        if let Err(e) = prompt.show_prompt() {
            error::report(&e);
        }
        let line = match prompt.read_line() {
            Ok(Some(l)) => l,
            Ok(None) => {
                // End of input counts as `exit`.
                let _ = writeln!(io::stdout());
                break;
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                error::report(&e);
                continue;
            }
            Err(e) => {
                error::report(&e);
                break;
            }
        };

        let args = lexer::tokenize(&line);
        if !executor.exec(args, &mut env).should_continue() {
            break;
        }
    }

    ExitCode::SUCCESS
}
