use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdin. An empty answer or end of input picks `default`.
pub fn confirm(question: &str, default: bool) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut input = String::new();
    let hint = if default { "Y/n" } else { "y/N" };

    loop {
        print!("{} ({}): ", question, hint);
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            return Ok(default);
        }

        match parse_answer(&input) {
            Some(answer) => return Ok(answer),
            None if input.trim().is_empty() => return Ok(default),
            None => continue,
        }
    }
}

fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
