use std::io::{self, BufRead, Write};

pub const CONFIRMATION_PROMPT: &str = "¿Está seguro de continuar? (sí/no): ";

/// `Some(true)` for an affirmative answer, `Some(false)` for a negative one,
/// `None` when the answer is not recognised.
pub fn parse_confirmation(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "sí" | "si" | "s" | "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Asks until the answer is recognised. End of input counts as a refusal.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    loop {
        write!(out, "{CONFIRMATION_PROMPT}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }

        match parse_confirmation(&line) {
            Some(answer) => return Ok(answer),
            None => writeln!(out, "Por favor responda 'sí' o 'no'.")?,
        }
    }
}
