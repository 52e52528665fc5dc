//! Command-line interface for fancy-lexer
//! This binary tokenizes Fancy source and prints the token stream.
//!
//! Usage:
//!   fancylex `<path>` [--format `<format>`] [--config `<file>`]   - Tokenize a file ("-" or no path: stdin)
//!   fancylex `<path>` --set lexer.tabsize=4 [--set ...]         - Override single settings
//!   fancylex --unprocessed `<path>`                             - Tokenize without preprocessing
//!   fancylex --info                                            - Show lexer registration metadata
//!   fancylex --list-formats                                    - List available output formats

use clap::{Arg, ArgAction, Command};
use fancy_lexer::fancy::config::Loader;
use fancy_lexer::fancy::error::Result;
use fancy_lexer::fancy::formats::{self, OutputFormat, OUTPUT_FORMATS};
use fancy_lexer::fancy::{FancyLexer, Token};
use std::borrow::Cow;
use std::io::Read;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("fancylex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize Fancy source code for syntax highlighting")
        .arg(
            Arg::new("path")
                .help("Path to the Fancy file (\"-\" or omitted: read stdin)")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (raw, json, yaml); defaults to the configured format"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .short('s')
                .value_name("KEY=VALUE")
                .help("Override one setting, e.g. lexer.stripall=true (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("unprocessed")
                .long("unprocessed")
                .help("Tokenize the input exactly as read, skipping preprocessing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("info")
                .long("info")
                .help("Show the lexer's name, aliases, filename patterns and mimetypes")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("info") {
        handle_info_command();
        return;
    }
    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let format = matches.get_one::<String>("format").map(String::as_str);
    let config = matches.get_one::<String>("config").map(String::as_str);
    let settings: Vec<&str> = matches
        .get_many::<String>("set")
        .map(|values| values.map(String::as_str).collect())
        .unwrap_or_default();
    let unprocessed = matches.get_flag("unprocessed");

    match handle_tokenize_command(path, format, config, &settings, unprocessed) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Tokenize the input and render it in the requested format
fn handle_tokenize_command(
    path: &str,
    format: Option<&str>,
    config: Option<&str>,
    settings: &[&str],
    unprocessed: bool,
) -> Result<String> {
    let mut loader = Loader::new();
    if let Some(config) = config {
        loader = loader.with_file(config);
    }
    let config = loader.with_settings(settings.iter().copied())?.build()?;
    let format: OutputFormat = match format {
        Some(name) => name.parse()?,
        None => config.output.format,
    };

    let source = read_source(path)?;
    let lexer = FancyLexer::with_options(config.lexer);
    let text = if unprocessed {
        Cow::Borrowed(source.as_str())
    } else {
        lexer.preprocess(&source)
    };
    debug!(path, bytes = text.len(), %format, "tokenizing");

    let tokens: Vec<Token> = lexer.tokenize(&text).collect();
    formats::render(format, &tokens)
}

fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Handle the --info flag
fn handle_info_command() {
    let info = FancyLexer::INFO;
    println!("name:      {}", info.name);
    println!("aliases:   {}", info.aliases.join(", "));
    println!("filenames: {}", info.filenames.join(", "));
    println!("mimetypes: {}", info.mimetypes.join(", "));
}

/// Handle the --list-formats flag
fn handle_list_formats_command() {
    println!("Available output formats:\n");
    for format in OUTPUT_FORMATS {
        println!("  {}", format);
        println!("    {}", format.description());
        println!();
    }
}
