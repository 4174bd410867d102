use anyhow::{Context, Result, bail};
use nous_config::Config;
use nous_markdown::to_html;
use std::{
    env, fs,
    io::{self, Read, Write},
    path::{Path, PathBuf},
    process,
};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Render one note file to stdout.
    RenderFile(PathBuf),
    /// Render stdin to stdout.
    RenderStdin,
    /// Render every note selected by the config file.
    RenderNotes,
}

fn parse_args(args: &[String]) -> Option<Command> {
    match args {
        [_] => Some(Command::RenderNotes),
        [_, arg] if arg == "-" => Some(Command::RenderStdin),
        [_, arg] => Some(Command::RenderFile(PathBuf::from(arg))),
        _ => None,
    }
}

/// `argv[0]`, or `nous` when the OS passed no arguments at all.
fn program_name(args: &[String]) -> &str {
    args.first().map_or("nous", String::as_str)
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = parse_args(&args) else {
        eprintln!("Usage: {} [note-file | -]", program_name(&args));
        eprintln!(
            "With no arguments, notes are read from the config file at {}",
            Config::config_path().display()
        );
        process::exit(1);
    };

    if let Err(e) = run(command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    let mut stdout = io::stdout().lock();

    match command {
        Command::RenderFile(path) => {
            let html = render_file(&path)?;
            stdout.write_all(html.as_bytes())?;
        }
        Command::RenderStdin => {
            let mut body = String::new();
            io::stdin()
                .read_to_string(&mut body)
                .context("Failed to read note from stdin")?;
            stdout.write_all(to_html(&body).as_bytes())?;
        }
        Command::RenderNotes => {
            let config_path = Config::config_path();
            let Some(config) = Config::load()? else {
                bail!(
                    "No note file given and no config file found at {}",
                    config_path.display()
                );
            };
            let count = render_notes(&config, &mut stdout)?;
            log::info!("Rendered {count} notes");
        }
    }

    stdout.flush()?;
    Ok(())
}

fn render_file(path: &Path) -> Result<String> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read note {}", path.display()))?;
    Ok(to_html(&body))
}

/// Render every configured note, into `output_path` when set or to `out`.
/// Returns the number of notes rendered.
fn render_notes(config: &Config, out: &mut impl Write) -> Result<usize> {
    let files = config.note_files()?;
    log::info!(
        "Rendering {} notes from {}",
        files.len(),
        config.notes_path.display()
    );

    for file in &files {
        let html = render_file(file)?;
        match &config.output_path {
            Some(output_path) => {
                let target = output_file(&config.notes_path, output_path, file);
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                fs::write(&target, html)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                log::debug!("Wrote {}", target.display());
            }
            None => out.write_all(html.as_bytes())?,
        }
    }

    Ok(files.len())
}

/// Mirror a note's path below `notes_path` into `output_path`, as `.html`.
fn output_file(notes_path: &Path, output_path: &Path, note: &Path) -> PathBuf {
    let relative = match note.strip_prefix(notes_path) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => PathBuf::from(note.file_name().unwrap_or_default()),
    };
    output_path.join(relative).with_extension("html")
}
