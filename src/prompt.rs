use std::io::{self, BufRead, Write};

pub struct ShellPrompt {
    prompt: String,
}

impl ShellPrompt {
    pub fn new(prompt: &str) -> Self {
        ShellPrompt { prompt: prompt.to_string() }
    }

    pub fn show_prompt(&self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(self.prompt.as_bytes())?;
        out.flush()
    }

    pub fn read_line(&self) -> io::Result<Option<String>> {
        read_line_from(&mut io::stdin().lock())
    }
}

/// Reads one line without its line terminator. `None` means end of input;
/// a last line with no newline is still returned.
pub fn read_line_from<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    let bytes_read = reader.read_line(&mut buf)?;
    if bytes_read == 0 {
        return Ok(None);
    }
    if buf.ends_with('\n') {
        buf.pop();
        if buf.ends_with('\r') {
            buf.pop();
        }
    }
    Ok(Some(buf))
}
