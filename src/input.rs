//! prompts written to stdout and answered on stdin

use std::io::{self, BufRead, Write};

/// prints the prompt and reads one line. None once stdin is closed
pub fn prompt_line<P>(prompt: P) -> io::Result<Option<String>>
where
    P: AsRef<str>
{
    let mut stdout = io::stdout();

    stdout.write_all(prompt.as_ref().as_bytes())?;
    stdout.flush()?;

    read_line(&mut io::stdin().lock())
}

fn read_line<R>(reader: &mut R) -> io::Result<Option<String>>
where
    R: BufRead
{
    let mut buffer = String::new();

    if reader.read_line(&mut buffer)? == 0 {
        return Ok(None);
    }

    Ok(Some(buffer))
}

/// a line with surrounding whitespace removed. a closed stdin is an error
/// since the caller cannot continue without an answer
pub fn prompt_trimmed<P>(prompt: P) -> io::Result<String>
where
    P: AsRef<str>
{
    match prompt_line(prompt)? {
        Some(given) => Ok(given.trim().to_owned()),
        None => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin was closed")),
    }
}

/// asks until the answer is yes or no. an empty answer or a closed stdin
/// counts as no
pub fn confirm<Q>(question: Q) -> io::Result<bool>
where
    Q: std::fmt::Display
{
    let prompt = format!("{} [y|n]: ", question);

    loop {
        let Some(given) = prompt_line(&prompt)? else {
            return Ok(false);
        };

        match parse_yn(&given) {
            Some(answer) => return Ok(answer),
            None => println!("please answer y or n"),
        }
    }
}

fn parse_yn(given: &str) -> Option<bool> {
    match given.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "" | "n" | "no" => Some(false),
        _ => None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn yes_no_answers() {
        for given in ["y", "Y", "yes", " YES \n"] {
            assert_eq!(parse_yn(given), Some(true), "answer {:?}", given);
        }

        for given in ["", "\n", "n", "No"] {
            assert_eq!(parse_yn(given), Some(false), "answer {:?}", given);
        }

        for given in ["yep", "maybe", "1"] {
            assert_eq!(parse_yn(given), None, "answer {:?}", given);
        }
    }

    #[test]
    fn closed_input_is_none() {
        let mut reader = io::Cursor::new("logout\n");

        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("logout\n"));
        assert_eq!(read_line(&mut reader).unwrap(), None);
    }
}
