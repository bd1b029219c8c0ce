//! Command-line grammar of the `mam` binary.
//!
//! Parsing lives in the library so the grammar can be exercised with
//! [`Cli::try_parse_from`] in tests without spawning the binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::config::{CHUNK_SIZE_DEFAULT, OVERHEAD_MARGIN_DEFAULT};
use crate::container::FormatCode;

/// MAM container tool: compress, decompress, inspect and verify.
#[derive(Debug, Parser)]
#[command(name = "mam", version, about, long_about = None)]
pub struct Cli {
    /// More output (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less output (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress a file into a MAM container
    Compress(CompressArgs),

    /// Expand a MAM container; exits non-zero on any failure
    Decompress(DecompressArgs),

    /// Round-trip a deterministic sample through a decompressor
    Verify(VerifyArgs),

    /// Print the header of one or more containers
    Info(InfoArgs),

    /// Compress many files in parallel
    Batch(BatchArgs),
}

/// Codec parameters shared by the compressing subcommands.
#[derive(Debug, Args)]
pub struct CodecArgs {
    /// Format code: lznt1, xpress, xpress-huff, or a number such as 0x04
    #[arg(long)]
    pub format: Option<FormatCode>,

    /// Chunk size handed to the engine
    #[arg(long, default_value_t = CHUNK_SIZE_DEFAULT)]
    pub chunk_size: u32,

    /// Destination bytes reserved beyond the input length. Incompressible
    /// LZNT1 input needs 2 bytes per 4 KiB chunk, so raise this for such
    /// input above about 8 MiB
    #[arg(long, default_value_t = OVERHEAD_MARGIN_DEFAULT)]
    pub margin: usize,
}

#[derive(Debug, Args)]
pub struct CompressArgs {
    /// Input file, or `stdin`
    pub input: String,

    /// Output file, or `stdout` [default: <INPUT>.mam]
    pub output: Option<String>,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Overwrite an existing output file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct DecompressArgs {
    /// Container file, or `stdin`
    pub input: String,

    /// Output file, or `stdout`
    pub output: String,

    /// Overwrite an existing output file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SampleKind {
    /// "Hello World! " x 100 + "Repeated Data " x 50
    Repeated,
    /// xorshift noise
    Random,
    /// zero bytes
    Empty,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub codec: CodecArgs,

    /// External decompressor, run as `PROGRAM [ARGS..] <input> <output>`
    /// [default: in-process]
    #[arg(long, value_name = "PROGRAM")]
    pub decompressor: Option<PathBuf>,

    /// Extra arguments placed before the file names
    #[arg(last = true, value_name = "ARGS")]
    pub decompressor_args: Vec<String>,

    /// Seconds to wait for the external decompressor
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Sample to round-trip
    #[arg(long, value_enum, default_value_t = SampleKind::Repeated)]
    pub sample: SampleKind,

    /// Sample length in bytes [default: 2000]
    #[arg(long)]
    pub size: Option<usize>,

    /// Seed for the random sample
    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Container files
    #[arg(required = true)]
    pub files: Vec<String>,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Files to compress; each gets a `.mam` sibling
    #[arg(required = true)]
    pub files: Vec<String>,

    #[command(flatten)]
    pub codec: CodecArgs,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 'T', long, default_value_t = 0)]
    pub threads: usize,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,
}
