// The `crate_authors!` macro in clap 2.x expands to code that trips the
// newer rustc `dangerous_implicit_autorefs` deny-by-default lint. The
// expansion lives in the dependency, so allow the lint here.
#![allow(dangerous_implicit_autorefs)]

#[macro_use]
extern crate log;

use std::env::current_dir;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::exit;

use clap::{crate_authors, crate_description, crate_version, App, Arg, SubCommand};

use tegel::config::Config;
use tegel::templates;
use tegel::Error as TError;

macro_rules! unwrap {
    ($e: expr, $error: expr) => {
        match $e {
            Some(e) => e,
            None => return Err(Box::new($error)),
        }
    };
}

fn main() {
    beautylog::init(log::LevelFilter::Info).ok();

    if let Err(e) = run() {
        error!("{}", e);
        exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let matches = App::new("Tegel")
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("init")
                .about("Creates a new default tile project")
                .arg(Arg::with_name("TITLE").required(false)),
        )
        .subcommand(SubCommand::with_name("build").about("Builds the tile project"))
        .get_matches();

    if let Some(init) = matches.subcommand_matches("init") {
        init_project(init.value_of("TITLE"))
    } else if matches.subcommand_matches("build").is_some() {
        build_project()
    } else {
        Ok(())
    }
}

/// Creates a tile project, seeded with the default template.
fn init_project(title: Option<&str>) -> Result<(), Box<dyn Error>> {
    let mut dir = PathBuf::from(unwrap!(current_dir().ok(), TError::CannotReadCurrentDir));

    // With a title, the project gets its own directory; without one, the
    // current directory becomes the project.
    let title = match title {
        Some(title) => {
            dir.push(title);
            String::from(title)
        }
        None => {
            let name = unwrap!(dir.file_name(), TError::CannotReadCurrentDir);
            String::from(unwrap!(name.to_str(), TError::CannotReadCurrentDir))
        }
    };

    fs::create_dir_all(&dir).ok();

    let config = Config::with_title(&title);
    fs::write(dir.join("tegel.toml"), toml::to_string(&config)?)?;
    fs::write(dir.join(&config.input), templates::default_template().text)?;

    Ok(())
}

/// Builds the project of the closest tegel.toml, walking up the directory
/// tree to find it.
fn build_project() -> Result<(), Box<dyn Error>> {
    let mut dir = PathBuf::from(unwrap!(current_dir().ok(), TError::CannotReadCurrentDir));

    let config_path = loop {
        dir.push("tegel.toml");

        if dir.is_file() {
            break dir;
        }

        // Remove tegel.toml, then go to the parent directory
        dir.pop();
        if !dir.pop() {
            return Err(Box::new(TError::NoConfigFile));
        }
    };

    let config: Config = toml::from_str(&fs::read_to_string(&config_path)?)?;
    config.build()?;

    Ok(())
}
