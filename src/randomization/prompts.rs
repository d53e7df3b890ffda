//! Validation of the user inputs, and the interactive prompts built on top of it.
//!
//! The `validate_*`, `parse_*` and `check_*` functions do not touch the console.

use dialoguer::Input;
use is_terminal::IsTerminal;

use std::io::{self, BufRead, StdinLock};

use crate::randomization::*;

const SIZE_PROMPT: &str = "Please enter the number of texts to randomize";
const FIELD_TYPE_PROMPT: &str = "Enter the field type of the texts (for example \"integer\", \"select_one\", \"select_multiple\").\n\
If \"select_one\" or \"select_multiple\" is entered, remember to input the list name too";

/// Parses the number of texts. Only positive integers are accepted.
pub fn parse_size(input: &str) -> GenResult<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => InvalidSizeSnafu { input }.fail(),
    }
}

/// Checks that a table can be built for this number of texts.
pub fn check_size(size: usize, rules: &TableRules) -> GenResult<usize> {
    if size == 0 {
        return InvalidSizeSnafu { input: "0" }.fail();
    }
    build_table(size, rules).context(TableSnafu {})?;
    Ok(size)
}

pub fn validate_size(input: &str, rules: &TableRules) -> GenResult<usize> {
    let size = parse_size(input)?;
    check_size(size, rules)
}

/// The output directory must exist: it is never created.
pub fn validate_output_dir<P: AsRef<Path>>(path: P) -> GenResult<PathBuf> {
    let p = path.as_ref();
    if !p.is_dir() {
        return MissingOutputDirectorySnafu { path: p }.fail();
    }
    Ok(p.to_path_buf())
}

/// Where the answers to the prompts come from.
///
/// In a terminal, the prompts go through dialoguer. Otherwise (piped or redirected input),
/// each answer is one line of the input.
pub enum Answers<R: BufRead> {
    Terminal,
    Lines(R),
}

impl Answers<StdinLock<'static>> {
    pub fn from_stdin() -> Answers<StdinLock<'static>> {
        if io::stdin().is_terminal() {
            Answers::Terminal
        } else {
            debug!("from_stdin: stdin is not a terminal, reading lines");
            Answers::Lines(io::stdin().lock())
        }
    }
}

impl<R: BufRead> Answers<R> {
    fn is_terminal(&self) -> bool {
        matches!(self, Answers::Terminal)
    }

    /// One answer, without the line terminator.
    fn ask(&mut self, prompt: &str) -> GenResult<String> {
        match self {
            Answers::Terminal => Input::new()
                .with_prompt(prompt)
                .interact_text()
                .context(PromptSnafu {}),
            Answers::Lines(reader) => {
                println!("{}:", prompt);
                let mut line = String::new();
                let read = reader.read_line(&mut line).context(ReadingInputSnafu {})?;
                ensure!(read > 0, EndOfInputSnafu {});
                Ok(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string())
            }
        }
    }
}

/// Asks for the number of texts until a valid one is entered.
pub fn prompt_size<R: BufRead>(answers: &mut Answers<R>, rules: &TableRules) -> GenResult<usize> {
    loop {
        let input: String = if answers.is_terminal() {
            Input::new()
                .with_prompt(SIZE_PROMPT)
                .validate_with(|s: &String| -> Result<(), String> {
                    validate_size(s, rules).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()
                .context(PromptSnafu {})?
        } else {
            answers.ask(SIZE_PROMPT)?
        };
        match validate_size(&input, rules) {
            Ok(size) => return Ok(size),
            Err(e) => println!("{}", e),
        }
    }
}

pub fn prompt_texts<R: BufRead>(answers: &mut Answers<R>, size: usize) -> GenResult<Vec<String>> {
    println!("Please enter the {} texts to be randomized.\n", size);
    let mut texts: Vec<String> = Vec::with_capacity(size);
    for idx in 1..=size {
        let text = answers.ask(&format!("Insert text {}", idx))?;
        println!("Text {} is \"{}\".\n", idx, text);
        texts.push(text);
    }
    Ok(texts)
}

pub fn prompt_field_type<R: BufRead>(answers: &mut Answers<R>) -> GenResult<String> {
    let field_type = answers.ask(FIELD_TYPE_PROMPT)?;
    println!("The field type entered is \"{}\".\n", field_type);
    Ok(field_type)
}

/// Asks for the output directory once. A directory that does not exist aborts the program.
pub fn prompt_output_dir<R: BufRead>(answers: &mut Answers<R>) -> GenResult<PathBuf> {
    let dir = answers.ask("Please enter the directory in which the files are saved")?;
    validate_output_dir(dir.trim())
}
