use std::io::{self, BufRead, Write as _};

/// Asks the user a yes/no question before files are modified.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Reads the answer from standard input; an empty answer means yes.
///
/// End of input counts as no, so a closed stdin never modifies files.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question} (Y/n) ")?;
        stdout.flush()?;

        read_answer(&mut io::stdin().lock())
    }
}

fn read_answer(input: &mut impl BufRead) -> io::Result<bool> {
    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}

/// Whether an answer to a `(Y/n)` question accepts it.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.to_ascii_lowercase().starts_with('y')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", true)]
    #[case("\n", true)]
    #[case("y", true)]
    #[case("Yes\n", true)]
    #[case("n", false)]
    #[case("nope", false)]
    #[case("maybe", false)]
    fn test_is_affirmative(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_affirmative(answer), expected);
    }

    #[rstest]
    #[case("", false)]
    #[case("\n", true)]
    #[case("y\n", true)]
    #[case("no\n", false)]
    fn test_read_answer(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(read_answer(&mut input.as_bytes()).unwrap(), expected);
    }
}
