//! Interactive confirmation before a batch rewrites test files.

use super::plural;
use crate::error::{CalibrateError, Result};
use std::io::{BufRead, Write};

/// Ask whether to calibrate `count` tests until a yes or no is given.
///
/// `y`/`yes` confirm; `n`/`no` or an empty answer decline; anything else
/// asks again. End of input is a cancellation.
pub fn confirm<R: BufRead, W: Write>(count: usize, input: &mut R, output: &mut W) -> Result<bool> {
    let prompt = format!(
        "Are you sure you want to calibrate {} {}? [y/n] ",
        count,
        plural(count)
    );

    loop {
        write!(output, "{}", prompt)
            .and_then(|()| output.flush())
            .map_err(|e| CalibrateError::io("<stdout>", e))?;

        let mut answer = String::new();
        let read = input
            .read_line(&mut answer)
            .map_err(|e| CalibrateError::io("<stdin>", e))?;
        if read == 0 {
            return Err(CalibrateError::Cancelled);
        }

        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "" | "n" | "no" => return Ok(false),
            _ => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(count: usize, answers: &str) -> (Result<bool>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = confirm(count, &mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn yes_confirms() {
        let (result, prompt) = ask(3, "y\n");
        assert!(result.unwrap());
        assert_eq!(prompt, "Are you sure you want to calibrate 3 tests? [y/n] ");
    }

    #[test]
    fn singular_prompt() {
        let (_, prompt) = ask(1, "Y\n");
        assert_eq!(prompt, "Are you sure you want to calibrate 1 test? [y/n] ");
    }

    #[test]
    fn no_declines() {
        assert!(!ask(2, "n\n").0.unwrap());
        assert!(!ask(2, "\n").0.unwrap());
    }

    #[test]
    fn unrecognized_answer_asks_again() {
        let (result, prompt) = ask(2, "maybe\nyes\n");
        assert!(result.unwrap());
        assert_eq!(prompt.matches("[y/n]").count(), 2);
    }

    #[test]
    fn end_of_input_cancels() {
        let (result, _) = ask(2, "maybe\n");
        assert!(matches!(result, Err(CalibrateError::Cancelled)));
    }
}
