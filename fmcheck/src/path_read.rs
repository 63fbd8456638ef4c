use crate::error::Error;
use std::io::{self, Read};
use std::path::PathBuf;

/// Name of a source and its contents.
pub type PathRead = (String, String);
pub type PathReads<'a> = Box<dyn Iterator<Item = Result<PathRead, Error>> + 'a>;

fn read_all(mut read: impl Read) -> io::Result<String> {
    let mut s = String::new();
    read.read_to_string(&mut s)?;
    Ok(s)
}

/// Return stdin if no files given, else lazily read and return the files.
pub fn path_reads(files: &[PathBuf]) -> PathReads<'_> {
    if files.is_empty() {
        let stdin = || -> Result<PathRead, Error> {
            let contents = read_all(io::stdin())?;
            Ok((String::from("-"), contents))
        };
        Box::new(std::iter::once_with(stdin))
    } else {
        Box::new(files.iter().map(|file| -> Result<PathRead, Error> {
            let name = file.display().to_string();
            let contents = if name == "-" {
                read_all(io::stdin())?
            } else {
                std::fs::read_to_string(file)?
            };
            Ok((name, contents))
        }))
    }
}
