use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, Command};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Base directory the search segment is appended to.
pub const DEFAULT_BASE_DIR: &str = "src";
/// Notes file written into the working directory.
pub const DEFAULT_OUTPUT_FILENAME: &str = "project_notes.txt";

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the tool runs from; banners are relative to it.
    pub working_dir: PathBuf,
    pub base_dir: PathBuf,
    /// Segment supplied by the user, appended to `base_dir`.
    pub subdir: String,
    pub output_path: PathBuf,
    pub verbosity: u8,
}

impl Config {
    /// Configuration with the stock base directory and output file name.
    pub fn new(working_dir: impl Into<PathBuf>, subdir: impl Into<String>) -> Self {
        let working_dir = working_dir.into();
        Self {
            output_path: working_dir.join(DEFAULT_OUTPUT_FILENAME),
            working_dir,
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            subdir: subdir.into(),
            verbosity: 0,
        }
    }

    /// `base_dir/subdir` as typed, used in messages.
    pub fn requested_path(&self) -> PathBuf {
        self.base_dir.join(&self.subdir)
    }

    pub fn search_root(&self) -> PathBuf {
        self.working_dir.join(self.requested_path())
    }
}

pub fn parse_args() -> Result<Config> {
    let matches = Command::new("srcnotes")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Aggregates .h and .cpp files under src/<SUBDIR> into a single notes file")
        .arg(
            Arg::new("subdir")
                .value_name("SUBDIR")
                .help("Directory to search within the base directory (prompted for when omitted)")
                .num_args(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Sets the output file path")
                .num_args(1),
        )
        .arg(
            Arg::new("base")
                .short('b')
                .long("base")
                .value_name("DIR")
                .help("Sets the base directory the search path is built from")
                .num_args(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increases diagnostic logging (repeatable)")
                .action(ArgAction::Count),
        )
        .get_matches();

    let working_dir = std::env::current_dir().context("Failed to determine current directory")?;

    let base_dir = matches
        .get_one::<String>("base")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BASE_DIR));

    let output_path = matches
        .get_one::<String>("output")
        .map(|o| working_dir.join(o))
        .unwrap_or_else(|| working_dir.join(DEFAULT_OUTPUT_FILENAME));

    let subdir = match matches.get_one::<String>("subdir") {
        Some(subdir) => subdir.clone(),
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            prompt_subdir(&mut stdin.lock(), &mut stdout.lock(), &base_dir)?
        }
    };

    Ok(Config {
        working_dir,
        base_dir,
        subdir,
        output_path,
        verbosity: matches.get_count("verbose"),
    })
}

/// Asks for the directory to search and reads one line of answer.
///
/// Only the line terminator is stripped; an empty answer searches the base
/// directory itself.
pub fn prompt_subdir<R: BufRead, W: Write>(input: &mut R, output: &mut W, base_dir: &Path) -> Result<String> {
    writeln!(output, "This tool aggregates .h and .cpp files into a single text file.")?;
    write!(
        output,
        "Enter the directory to search within '{}/': ",
        base_dir.display()
    )?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read directory name from standard input")?;
    if read == 0 {
        bail!("No directory name was provided on standard input");
    }

    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_reads_one_line() {
        let mut input = Cursor::new("math\nignored\n");
        let mut output = Vec::new();

        let subdir = prompt_subdir(&mut input, &mut output, Path::new("src")).unwrap();

        assert_eq!(subdir, "math");
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Enter the directory to search within 'src/': "));
    }

    #[test]
    fn prompt_keeps_inner_whitespace() {
        let mut input = Cursor::new("my dir \r\n");
        let subdir = prompt_subdir(&mut input, &mut Vec::new(), Path::new("src")).unwrap();
        assert_eq!(subdir, "my dir ");
    }

    #[test]
    fn prompt_accepts_line_without_terminator() {
        let mut input = Cursor::new("ecs");
        let subdir = prompt_subdir(&mut input, &mut Vec::new(), Path::new("src")).unwrap();
        assert_eq!(subdir, "ecs");
    }

    #[test]
    fn prompt_fails_on_closed_input() {
        let mut input = Cursor::new("");
        let err = prompt_subdir(&mut input, &mut Vec::new(), Path::new("src")).unwrap_err();
        assert!(err.to_string().contains("No directory name"));
    }

    #[test]
    fn search_root_joins_base_and_subdir() {
        let config = Config::new("/proj", "foo");
        assert_eq!(config.search_root(), PathBuf::from("/proj/src/foo"));
        assert_eq!(config.requested_path(), PathBuf::from("src/foo"));
        assert_eq!(config.output_path, PathBuf::from("/proj/project_notes.txt"));
    }
}
