use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};

use crate::layout::{
    build_wall, plan_highlights, read_filler_words, read_sentences, search, Grid, MatchMode,
    PassOrder, WallGeometry, WallSettings, DEFAULT_SEED,
};
use crate::render::{console::render_text, svg::render_svg};

/// wordwall - lay out sentences as a traceable letter grid
#[derive(Debug, Parser)]
#[command(name = "wordwall", version, about, long_about = None)]
pub struct Cli {
    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a wall from sentence files, print it, and check every sentence traces.
    Generate(GenerateArgs),

    /// Locate a sentence in an existing grid.
    Search(SearchArgs),

    /// Run the HTTP service (settings from the environment).
    Serve,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Sentence files, one sentence per line. Every sentence will be traceable in the wall.
    #[arg(long, value_name = "FILE", num_args = 1.., required = true)]
    pub sentences: Vec<PathBuf>,

    /// Write the wall as SVG to this file.
    #[arg(long, value_name = "FILE")]
    pub svg: Option<PathBuf>,

    /// Centre-to-centre distance between letters, in centimetres.
    #[arg(long, default_value_t = 1.0)]
    pub x_space: f32,

    /// Centre-to-centre distance between rows, in centimetres.
    #[arg(long, default_value_t = 1.5)]
    pub y_space: f32,

    /// Font size in centimetres.
    #[arg(long, default_value_t = 0.8)]
    pub letter_size: f32,

    /// Maximum wall width in centimetres.
    #[arg(long, default_value_t = 20.0)]
    pub max_width: f32,

    /// Uppercase every letter of the output. Makes the input case-insensitive.
    #[arg(long)]
    pub to_upper: bool,

    /// Treat words that differ only in case as different words.
    #[arg(long)]
    pub case_sensitive: bool,

    #[arg(long, default_value = crate::layout::geometry::DEFAULT_FONT_FAMILY)]
    pub font_family: String,

    /// Pad short rows with filler words.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub add_fill: bool,

    /// Filler word file, one word per line. Defaults to a small built-in pool.
    #[arg(long, value_name = "FILE")]
    pub filler_words: Option<PathBuf>,

    /// Seed for filler word selection.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Add the vocabulary needed to tell the time.
    #[arg(long)]
    pub clock: bool,

    /// Order of words that become ready in the same flattening pass.
    #[arg(long, value_enum, default_value_t = PassOrder::Insertion)]
    pub pass_order: PassOrder,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Grid text file, one row per line.
    #[arg(long, value_name = "FILE")]
    pub grid: PathBuf,

    /// Sentence to locate.
    #[arg(long)]
    pub sentence: String,

    /// Require each word to appear whole within one row.
    #[arg(long)]
    pub contiguous: bool,

    #[arg(long)]
    pub case_sensitive: bool,

    /// Emit the outcome and highlights as JSON.
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    pub fn geometry(&self) -> WallGeometry {
        WallGeometry {
            x_space_cm: self.x_space,
            y_space_cm: self.y_space,
            letter_size_cm: self.letter_size,
            max_width_cm: self.max_width,
            font_family: self.font_family.clone(),
        }
    }

    pub fn settings(&self, columns: usize, filler_words: Vec<String>) -> WallSettings {
        WallSettings {
            columns,
            case_sensitive: self.case_sensitive,
            to_upper: self.to_upper,
            add_fill: self.add_fill,
            seed: self.seed,
            pass_order: self.pass_order,
            filler_words,
            include_clock: self.clock,
        }
    }
}

/// `wordwall generate`
pub fn run_generate(args: &GenerateArgs) -> Result<()> {
    let sentences = read_sentences(&args.sentences).context("Failed to read sentences")?;
    let filler_words = match &args.filler_words {
        Some(path) => read_filler_words(path).context("Failed to read filler words")?,
        None => Vec::new(),
    };

    let geometry = args.geometry();
    let columns = geometry.columns()?;
    info!(columns, sentences = sentences.len(), "Generating wall");

    let wall = build_wall(&sentences, &args.settings(columns, filler_words))?;

    if let Some(path) = &args.svg {
        fs::write(path, render_svg(&wall.grid, &geometry))
            .with_context(|| format!("Failed to write SVG to {}", path.display()))?;
        info!(path = %path.display(), "Wrote SVG");
    }

    print!("{}", render_text(&wall.grid));

    info!("Verifying every sentence is traceable");
    let traced = wall.verify(&sentences).into_result()?;
    info!(traced, "All sentences traceable");
    Ok(())
}

/// `wordwall search`
pub fn run_search(args: &SearchArgs) -> Result<()> {
    let text = fs::read_to_string(&args.grid)
        .with_context(|| format!("Failed to read grid {}", args.grid.display()))?;
    let grid = Grid::parse(&text);

    let mode = if args.contiguous {
        MatchMode::Contiguous
    } else {
        MatchMode::NonContiguous
    };
    let outcome = search(&grid, &args.sentence, mode, !args.case_sensitive);
    let highlights = plan_highlights(&grid, &outcome);

    if let Some(missing) = outcome.missing() {
        warn!(missing, "Sentence only partially found");
    }

    if args.json {
        let body = json!({ "outcome": outcome, "highlights": highlights });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let words: Vec<&str> = args.sentence.split_whitespace().collect();
    for h in &highlights {
        let cells: Vec<String> = h
            .cells
            .iter()
            .map(|c| format!("({},{})", c.row, c.col))
            .collect();
        println!(
            "{} [colour {}]: {}  leds {:?}",
            words.get(h.word_index).copied().unwrap_or("?"),
            h.palette_index,
            cells.join(" "),
            h.serials
        );
    }
    if let Some(missing) = outcome.missing() {
        println!("not found: {missing}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["wordwall", "generate", "--sentences", "a.txt"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.sentences, vec![PathBuf::from("a.txt")]);
        assert!(args.add_fill);
        assert_eq!(args.seed, DEFAULT_SEED);
        assert_eq!(args.pass_order, PassOrder::Insertion);
        assert_eq!(args.geometry().columns().unwrap(), 20);
    }

    #[test]
    fn test_generate_flags() {
        let cli = Cli::try_parse_from([
            "wordwall",
            "generate",
            "--sentences",
            "a.txt",
            "b.txt",
            "--add-fill",
            "false",
            "--to-upper",
            "--pass-order",
            "longest-first",
            "--max-width",
            "15",
            "--x-space",
            "1.5",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.sentences.len(), 2);
        assert!(!args.add_fill);
        assert!(args.to_upper);
        assert_eq!(args.pass_order, PassOrder::LongestFirst);
        assert_eq!(args.geometry().columns().unwrap(), 10);
    }

    #[test]
    fn test_generate_requires_sentences() {
        assert!(Cli::try_parse_from(["wordwall", "generate"]).is_err());
    }

    #[test]
    fn test_run_generate_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let sentences = dir.path().join("sentences.txt");
        let mut file = fs::File::create(&sentences).unwrap();
        writeln!(file, "JT loves Kira\nKira loves JT").unwrap();
        let svg = dir.path().join("wall.svg");

        let args = GenerateArgs {
            sentences: vec![sentences],
            svg: Some(svg.clone()),
            x_space: 1.0,
            y_space: 1.5,
            letter_size: 0.8,
            max_width: 11.0,
            to_upper: false,
            case_sensitive: false,
            font_family: "Arial".to_string(),
            add_fill: false,
            filler_words: None,
            seed: DEFAULT_SEED,
            clock: false,
            pass_order: PassOrder::Insertion,
        };
        run_generate(&args).unwrap();

        let written = fs::read_to_string(&svg).unwrap();
        assert_eq!(written.matches("<text ").count(), 18);
    }

    #[test]
    fn test_run_search_reads_grid_file() {
        let dir = tempfile::tempdir().unwrap();
        let grid = dir.path().join("grid.txt");
        fs::write(&grid, "HAPPY\nBIRTHDAY\nTO YOU\n").unwrap();

        let args = SearchArgs {
            grid,
            sentence: "happy bir".to_string(),
            contiguous: false,
            case_sensitive: false,
            json: true,
        };
        assert!(run_search(&args).is_ok());

        let missing = SearchArgs {
            grid: dir.path().join("nope.txt"),
            sentence: "x".to_string(),
            contiguous: true,
            case_sensitive: false,
            json: false,
        };
        assert!(run_search(&missing).is_err());
    }
}
