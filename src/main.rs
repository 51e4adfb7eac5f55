use clap::{Parser, Subcommand};
use quire::{
    FontObject, GenerationError, IdAllocator, LoadOptions, ObjectWriter, QuireError,
    encode_latin1, load_metrics_file,
};
use std::io::{self, Write};
use std::path::PathBuf;

/// Inspect AFM font metrics and write font objects.
#[derive(Parser)]
#[command(name = "quire", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the name, underline and glyph/kerning counts of a metrics file.
    Inspect {
        file: PathBuf,
        /// Skip malformed lines instead of failing.
        #[arg(long)]
        lenient: bool,
        /// Dump the whole table as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the kerned width of TEXT in points.
    Measure {
        file: PathBuf,
        text: String,
        #[arg(long, default_value_t = 12.0)]
        size: f32,
        #[arg(long)]
        lenient: bool,
    },
    /// Write one font object per metrics file, followed by an xref section.
    Emit {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Object number of the first font; lower numbers are left unused.
        #[arg(long, default_value_t = 1)]
        first_id: u32,
    },
}

fn options(lenient: bool) -> LoadOptions {
    if lenient {
        LoadOptions::lenient()
    } else {
        LoadOptions::default()
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), QuireError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Inspect {
            file,
            lenient,
            json,
        } => {
            let metrics = load_metrics_file(&file, options(lenient))?;
            if json {
                serde_json::to_writer_pretty(&mut out, metrics.as_ref())?;
                writeln!(out)?;
            } else {
                writeln!(out, "FontName:           {}", metrics.name())?;
                writeln!(out, "UnderlinePosition:  {}", metrics.underline_position())?;
                writeln!(out, "UnderlineThickness: {}", metrics.underline_thickness())?;
                writeln!(out, "Glyphs:             {}", metrics.glyph_count())?;
                writeln!(out, "Kerning pairs:      {}", metrics.kerning_pair_count())?;
            }
        }
        Command::Measure {
            file,
            text,
            size,
            lenient,
        } => {
            let metrics = load_metrics_file(&file, options(lenient))?;
            let codes = encode_latin1(&text);
            writeln!(out, "{:.3}", metrics.text_width_pt(&codes, size))?;
        }
        Command::Emit { files, first_id } => {
            let mut ids = IdAllocator::new();
            while ids.allocated() + 1 < first_id {
                ids.allocate().map_err(GenerationError::from)?;
            }

            let mut writer = ObjectWriter::new(&mut out);
            writer.write_header("1.4")?;
            for file in &files {
                let metrics = load_metrics_file(file, LoadOptions::default())?;
                let id = ids.allocate().map_err(GenerationError::from)?;
                let entry = writer.write_object(&FontObject::for_metrics(id, &metrics))?;
                log::info!("{} -> object {} at {}", file.display(), entry.id, entry.offset);
            }
            writer.write_xref()?;
            writer.finish()?;
        }
    }
    Ok(())
}
