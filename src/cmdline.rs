use crate::environment::{self, Environment};
use crate::{interpreter, printer, strings};
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// REPL with no arguments; batch mode with a script path. Arguments past the
/// path are the program's *ARGV*.
pub fn launch(args: Vec<String>, env: &Rc<Environment>) -> Result<(), Error> {
    match args.get(1) {
        Some(path) => {
            environment::set_argv(env, args.get(2..).unwrap_or(&[]));
            run_file(path, env)
        }
        None => {
            environment::set_argv(env, &[]);
            run_repl(env)
        }
    }
}

fn run_file(path: &str, env: &Rc<Environment>) -> Result<(), Error> {
    let form = format!("(load-file {})", strings::string_repr(path));
    match interpreter::rep(&form, env) {
        Ok(_) => Ok(()),
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

fn run_repl(env: &Rc<Environment>) -> Result<(), Error> {
    let interface = setup()?;
    interpreter::rep("(println (str \"Opal [\" *host-language* \"]\"))", env).ok();
    repl(&interface, |line| interpreter::rep(line, env));
    save_history(&interface)?;
    Ok(())
}

pub fn setup() -> std::io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("opal")?;
    interface.set_prompt("user> ")?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    match dirs::data_dir() {
        Some(mut path) => {
            path.push(".opal_history");
            Some(path)
        }
        None => None,
    }
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> std::io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

struct Styles {
    error: Style,
    warn: Style,
}

fn setup_colors() -> Styles {
    if atty::is(atty::Stream::Stdout) {
        Styles {
            error: Style::new().fg(ansi_term::Color::Red).bold(),
            warn: Style::new().fg(ansi_term::Color::Yellow),
        }
    } else {
        Styles {
            error: Style::new(),
            warn: Style::new(),
        }
    }
}

pub fn repl<T, F>(interface: &Interface<T>, mut processor: F)
where
    T: Terminal,
    F: FnMut(&str) -> printer::Result,
{
    use crate::printer::Outcome;
    let styles = setup_colors();
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                let msg = format!("Received signal {:?}", sig);
                writeln!(interface, "{}", styles.warn.paint(msg)).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                interface.add_history_unique(line.clone());
                match processor(&line) {
                    Ok(Outcome::String(s)) => writeln!(interface, "{}", s).ok(),
                    Ok(Outcome::Empty) => continue,
                    Err(e) => writeln!(interface, "{}", styles.error.paint(e)).ok(),
                };
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}
