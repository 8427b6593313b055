//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

/// Radix conversion, record trees and small text/unit helpers
#[derive(Parser, Debug)]
#[command(name = "vvkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a numeral between bases
    Convert {
        /// Numeral to convert
        number: String,
        /// Target radix (2-62)
        #[arg(long, conflicts_with = "to_alphabet", required_unless_present = "to_alphabet")]
        to: Option<u32>,
        /// Target digit alphabet
        #[arg(long)]
        to_alphabet: Option<String>,
        /// Source radix (default: 10)
        #[arg(long, conflicts_with = "from_alphabet")]
        from: Option<u32>,
        /// Source digit alphabet
        #[arg(long)]
        from_alphabet: Option<String>,
        /// Left-pad the result to this many symbols
        #[arg(long)]
        pad: Option<usize>,
    },

    /// Nest a JSON record set by parent id and print it
    Tree {
        /// JSON file with an object of records (`-` for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Print the leveled records as JSON
        #[arg(long, conflicts_with = "diagram")]
        json: bool,
        /// Print a box-drawing diagram
        #[arg(long)]
        diagram: bool,
        /// Single-line JSON (with --json)
        #[arg(long, requires = "json")]
        compact: bool,
    },

    /// Change the case style of a string
    Case {
        #[arg(value_enum)]
        style: CaseStyle,
        text: String,
        /// Treat dashes as underscores (snake)
        #[arg(long)]
        dashes: bool,
    },

    /// Size notation (e.g. 10M) to bytes
    Size { value: String },

    /// Bytes to size notation
    Bytes {
        bytes: u64,
        /// Decimals to keep
        #[arg(long)]
        precision: Option<usize>,
    },

    /// Seconds to H:MM:SS
    Hms {
        #[arg(allow_hyphen_values = true)]
        seconds: f64,
        /// Split off whole days
        #[arg(long)]
        days: bool,
        /// Fraction digits
        #[arg(long, default_value_t = 3)]
        precision: u32,
    },

    /// Current local time, optionally shifted
    Now {
        /// Offset in seconds
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        offset: i64,
    },

    /// Transliterate Cyrillic to Latin
    Translit {
        text: String,
        /// Ukrainian reading of `и`
        #[arg(long)]
        ukrainian: bool,
    },

    /// Re-type text typed in the wrong keyboard layout
    Keyboard { text: String },

    /// Random letter code
    Code {
        /// Code length (default from config)
        length: Option<usize>,
        /// Symbols added to the canonical alphabet
        #[arg(long, conflicts_with = "letters")]
        extra: Option<String>,
        /// Symbols to use instead of the canonical alphabet
        #[arg(long)]
        letters: Option<String>,
    },

    /// Random 32-char hex id
    Uid,

    /// Relative path between two existing paths
    Relpath {
        #[arg(value_hint = ValueHint::AnyPath)]
        from: PathBuf,
        #[arg(value_hint = ValueHint::AnyPath)]
        to: PathBuf,
    },

    /// Show effective settings
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaseStyle {
    /// fooBar
    Camel,
    /// FooBar
    Studly,
    /// foo_bar
    Snake,
    Ucfirst,
    Lcfirst,
    Ucwords,
}
