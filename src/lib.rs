//! This crate contains all the tools we need to generate tile pdf documents.
//!
//! A tile is a single page pdf document on which we overlay a few lines of
//! styled text, and which we then place twice, side by side, on a landscape
//! sheet ready for print production.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub mod assets;
pub mod config;
pub mod document;
pub mod fonts;
pub mod layout;
pub mod templates;
pub mod units;

use std::path::PathBuf;
use std::{error, fmt, io, result};

macro_rules! impl_from_error {
    ($type: ty, $variant: path, $from: ty) => {
        impl From<$from> for $type {
            fn from(e: $from) -> $type {
                $variant(e)
            }
        }
    };
}

/// The error type of the library.
#[derive(Debug)]
pub enum Error {
    /// Cannot read current directory.
    CannotReadCurrentDir,

    /// No tegel.toml was found.
    NoConfigFile,

    /// A generation was requested before the base tile document was loaded.
    SourceNotLoaded,

    /// The document has no page.
    MissingPage,

    /// Error while dealing with freetype.
    FreetypeError(freetype::Error),

    /// Error while dealing with the pdf reader or writer.
    PdfError(lopdf::Error),

    /// The specified font was not found.
    FontNotFound(PathBuf),

    /// Another io error occured.
    IoError(io::Error),
}

impl_from_error!(Error, Error::FreetypeError, freetype::Error);
impl_from_error!(Error, Error::PdfError, lopdf::Error);
impl_from_error!(Error, Error::IoError, io::Error);

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::CannotReadCurrentDir => write!(fmt, "cannot read current directory"),
            Error::NoConfigFile => write!(fmt, "no tegel.toml was found"),
            Error::SourceNotLoaded => {
                write!(fmt, "the base tile document was not loaded yet")
            }
            Error::MissingPage => write!(fmt, "the document has no page"),
            Error::FreetypeError(e) => write!(fmt, "freetype error: {}", e),
            Error::PdfError(e) => write!(fmt, "pdf error: {}", e),
            Error::FontNotFound(path) => write!(fmt, "couldn't find font \"{}\"", path.display()),
            Error::IoError(e) => write!(fmt, "an io error occured: {}", e),
        }
    }
}

impl error::Error for Error {}

/// The result type of the library.
pub type Result<T> = result::Result<T, Error>;
