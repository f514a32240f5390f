mod error;
mod parser;
mod serialiser;
mod srt;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, Parser as ClapParser};
use regex::Regex;
use walkdir::WalkDir;

fn main() {
    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
        }
    }
}

#[derive(ClapParser)]
#[command(
    about = "Reduce SRT subtitles to a tab-delimited timeline",
    group(ArgGroup::new("source").required(true).args(["input", "directory"]))
)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The subtitle file to convert."
    )]
    input: Option<PathBuf>,
    #[arg(
        short = 'r',
        long,
        value_name = "DIR",
        help = "Convert every .srt file found under the given directory."
    )]
    directory: Option<PathBuf>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut files = Vec::new();
    if let Some(input) = cli.input {
        if !input.is_file() {
            return Err(anyhow!("File '{}' does not exist.", input.display()));
        }
        files.push(input);
    }
    if let Some(directory) = cli.directory {
        files.extend(collect_subtitle_files(&directory)?);
    }

    let srt_suffix = Regex::new("srt$").context("Failed to compile the extension pattern")?;

    for file in &files {
        // One bad file should not take down the rest of the batch.
        if let Err(err) = process_file(&srt_suffix, file) {
            eprintln!("Skipping '{}': {:#}", file.display(), err);
        }
    }

    Ok(())
}

fn collect_subtitle_files(directory: &Path) -> Result<Vec<PathBuf>> {
    if !directory.is_dir() {
        return Err(anyhow!(
            "Directory '{}' does not exist.",
            directory.display()
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(directory) {
        let entry = entry.context(format!(
            "Failed to walk directory: '{}'",
            directory.display()
        ))?;
        if entry.path().extension().map_or(false, |ext| ext == "srt") {
            files.push(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

fn process_file(srt_suffix: &Regex, source_path: &Path) -> Result<()> {
    let destination_path = PathBuf::from(
        srt_suffix
            .replace(&source_path.to_string_lossy(), "txt")
            .into_owned(),
    );
    if destination_path == source_path {
        return Err(anyhow!(
            "Converting this file would overwrite it, because its name does not end in 'srt'."
        ));
    }
    let destination_name = destination_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("Failed to determine a destination file name."))?;

    let source =
        File::open(source_path).context(format!("Failed to open '{}'", source_path.display()))?;
    let destination = File::create(&destination_path).context(format!(
        "Failed to create '{}'",
        destination_path.display()
    ))?;

    let mut writer = BufWriter::new(destination);
    serialiser::serialise(&destination_name, BufReader::new(source), &mut writer)?;
    writer.flush().context("Failed to write to output file.")?;

    Ok(())
}
