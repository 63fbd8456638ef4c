use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
/// A typechecker for a lambda calculus with erasure, boxes, and self types
pub struct Opt {
    /// Only parse and scope, do not typecheck
    #[arg(long)]
    pub no_check: bool,

    /// Print the normal form of the main term
    #[arg(long)]
    pub norm: bool,

    /// Unfold global definitions when normalising
    #[arg(long)]
    pub unfold: bool,

    /// Omit erased arguments and functions when printing
    #[arg(long)]
    pub erase: bool,

    /// Typecheck every global definition and print its type
    ///
    /// Definitions are checked in the order in which they appear.
    /// Otherwise, only the definitions that the main term depends on are checked.
    #[arg(long)]
    pub defs: bool,

    /// Files to process
    ///
    /// Every file contains a single term, which may introduce definitions.
    /// To read from standard input, use "-" as file name.
    /// If no file is given, standard input is read.
    #[arg(name = "FILE")]
    pub files: Vec<PathBuf>,
}
