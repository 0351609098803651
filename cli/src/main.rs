// Copyright 2023 Viktor Reusch
//
// This file is part of sct2_convert.
//
// sct2_convert is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by the
// Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// sct2_convert is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more
// details.
//
// You should have received a copy of the GNU Affero General Public License
// along with sct2_convert. If not, see <https://www.gnu.org/licenses/>.

//! Command-line interface for the SCT2 converter.

mod console;

use std::{
    fs::{self, File},
    io::{self, stdin, stdout, BufReader},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::info;
use sct2_convert::{convert, segment::DEFAULT_TAG, Error, SectorStyle, SourceFormat};

/// Output file of the `xml` command unless `--output` is given.
const XML_OUTPUT: &str = "xml_converted_output.sct2";
/// Output file of the `geojson` command unless `--output` is given.
const GEOJSON_OUTPUT: &str = "output.sct2";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Write log messages to this file instead of STDERR
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an XML line export to SCT2
    Xml(ConvertArgs),
    /// Convert a GeoJSON feature collection to SCT2
    Geojson(ConvertArgs),
    /// Interactively convert DMS coordinates to decimal degrees
    Lookup,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Source file
    input: PathBuf,
    /// Target SCT2 file, overwritten if it exists
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Style tag written on every line
    #[arg(long, default_value = DEFAULT_TAG)]
    tag: String,
    /// File replacing the default header block
    #[arg(long, value_name = "FILE")]
    header: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Opening the log file failed with: {err}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Xml(args) => run_convert(SourceFormat::Xml, args, XML_OUTPUT),
        Commands::Geojson(args) => run_convert(SourceFormat::GeoJson, args, GEOJSON_OUTPUT),
        Commands::Lookup => {
            let mut clipboard = console::system_clipboard();
            console::run(stdin().lock(), stdout(), clipboard.as_mut()).map_err(Error::from)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("sct2 failed with: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Log to STDERR or `log_file`, filtered by `RUST_LOG` (default `warn`).
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

/// Convert `args.input` and write the result once the whole input succeeded.
fn run_convert(format: SourceFormat, args: ConvertArgs, default_output: &str) -> Result<(), Error> {
    let mut style = SectorStyle::new(args.tag);
    if let Some(path) = args.header {
        style = style.with_header(fs::read_to_string(path)?);
    }

    let source = BufReader::new(File::open(&args.input)?);
    let mut sct2 = vec![];
    convert(format, source, &mut sct2, &style)?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_output));
    fs::write(&output, sct2)?;
    info!("wrote {}", output.display());
    Ok(())
}
