use std::{error, fmt::Display, io, path::PathBuf};

use clap::{Parser, ValueEnum};

pub mod orbit;

#[derive(Debug)]
pub enum Error {
    IOError(io::Error),
    InvalidOrbitSpec(String),
    NoRoot(String),
    MissingBody(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IOError(ioe) => write!(f, "I/O error: {}", ioe),
            Error::InvalidOrbitSpec(s) => {
                write!(f, "Invalid orbit specification({}), expect PARENT)CHILD", s)
            }
            Error::NoRoot(name) => write!(f, "No root object({}) found in given orbits", name),
            Error::MissingBody(name) => write!(f, "Object({}) not found in given orbits", name),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::IOError(ioe) => Some(ioe),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Question {
    /// Total count of direct and indirect orbits
    A,
    /// Minimum orbital transfers between two objects
    B,
}

#[derive(Debug, Parser)]
pub struct CliArgs {
    /// Question part (a or b)
    #[arg(short, long, value_enum, default_value_t = Question::A)]
    pub question: Question,
    /// Path to input file
    #[arg(short, long, default_value = "input.txt")]
    pub file: PathBuf,
    /// Object to start transfers from in question b
    #[arg(long, default_value = orbit::YOU)]
    pub from: String,
    /// Object to reach in question b
    #[arg(long, default_value = orbit::SANTA)]
    pub to: String,
}
