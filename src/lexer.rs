/// Characters that separate tokens on a command line.
pub const DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

pub fn tokenize(line: &str) -> Vec<String> {
    line.split(DELIMITERS)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
