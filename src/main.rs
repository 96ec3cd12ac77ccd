use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Hide text in the least significant bits of an image
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log decisions such as carrier resizing (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message and save the result as PNG
    Hide {
        /// Carrier image (PNG, BMP, JPEG, GIF, ...)
        #[arg(short, long)]
        image: PathBuf,

        /// Message to hide, single byte characters only
        #[arg(short, long)]
        message: String,

        /// Optional key; the same key is needed to read the message back
        #[arg(short, long)]
        password: Option<String>,

        /// Where to write the PNG [default: hidden_message_<random>.png]
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Reveal a message hidden with `hide`
    Reveal {
        /// Image holding the message
        #[arg(short, long)]
        image: PathBuf,

        /// Key used when hiding; a wrong key gives a garbled message, not an error
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Prints a percentage on stderr whenever it changes
struct Reporter {
    task: &'static str,
    percent: Option<usize>,
}

impl Reporter {
    fn new(task: &'static str) -> Self {
        Self {
            task,
            percent: None,
        }
    }

    fn update(&mut self, processed: usize, total: usize) {
        let percent = (processed * 100).checked_div(total).unwrap_or(100);
        if self.percent != Some(percent) {
            self.percent = Some(percent);
            eprint!("\r{} {percent:>3}%", self.task);
        }
    }

    fn finish(&self) {
        if self.percent.is_some() {
            eprintln!();
        }
    }
}

fn init_logger(verbose: bool) {
    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();
}

fn default_output() -> PathBuf {
    let id = uuid::Uuid::new_v4().simple().to_string();
    PathBuf::from(format!("hidden_message_{}.png", &id[..8]))
}

fn hide(image: &Path, message: &str, password: Option<&str>, output: PathBuf) -> Result<()> {
    if message.is_empty() {
        bail!("Please enter a message to hide");
    }
    let carrier = lsbtext::file::load(image)
        .with_context(|| format!("Failed to read carrier {}", image.display()))?;

    let mut reporter = Reporter::new("Hiding message");
    let stego = lsbtext::hide(
        carrier,
        message,
        password,
        Some(&mut |processed: usize, total: usize| reporter.update(processed, total)),
    );
    reporter.finish();
    let stego = stego.context("Failed to hide message")?;

    lsbtext::file::save_png(&output, &stego)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Message successfully hidden! Output saved as {}", output.display());
    Ok(())
}

fn reveal(image: &Path, password: Option<&str>) -> Result<()> {
    let carrier = lsbtext::file::load(image)
        .with_context(|| format!("Failed to read image {}", image.display()))?;

    let mut reporter = Reporter::new("Revealing message");
    let message = lsbtext::reveal(
        &carrier,
        password,
        Some(&mut |processed: usize, total: usize| reporter.update(processed, total)),
    );
    reporter.finish();

    match message.context("Failed to reveal message")? {
        Some(message) => println!("Hidden message: {message}"),
        None => println!("No hidden message found in the image."),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    match args.command {
        Command::Hide {
            image,
            message,
            password,
            output,
        } => hide(
            &image,
            &message,
            password.as_deref(),
            output.unwrap_or_else(default_output),
        ),
        Command::Reveal { image, password } => reveal(&image, password.as_deref()),
    }
}
