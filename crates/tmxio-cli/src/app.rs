//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use tmxio_core::Tmx;

/// Output format for the inspect command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "tmxio")]
#[command(author, version, about = "Inspect TMX translation memories", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the header and contents of a TMX file
    Inspect {
        /// Input TMX file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the whole decoded document as JSON
    Dump {
        /// Input TMX file
        input: PathBuf,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// List segments as tab-separated `tuid  lang  text` lines
    Segments {
        /// Input TMX file
        input: PathBuf,

        /// Only show variants in this language (case-insensitive)
        #[arg(short, long)]
        lang: Option<String>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect { input, format } => inspect_command(&input, format)?,
        Commands::Dump { input, compact } => dump_command(&input, compact)?,
        Commands::Segments { input, lang } => segments_command(&input, lang.as_deref())?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

/// Build the log filter
///
/// `RUST_LOG` directives win when present. Otherwise the level comes from
/// the `-v` count: warn by default, debug with `-v`, trace with `-vv`.
fn log_filter(verbose: u8, directives: Option<&str>) -> EnvFilter {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Read and decode a TMX file, adding the path to any error
pub fn load(input: &Path) -> Result<Tmx> {
    debug!(input = %input.display(), "loading TMX file");
    tmxio_core::read(input)
        .with_context(|| format!("Failed to read TMX file: {}", input.display()))
}

/// Execute the inspect command
pub fn inspect_command(input: &Path, format: OutputFormat) -> Result<()> {
    let tmx = load(input)?;
    let summary = Summary::of(&tmx);
    print!("{}", render_summary(&summary, format)?);
    Ok(())
}

/// Execute the dump command
pub fn dump_command(input: &Path, compact: bool) -> Result<()> {
    let tmx = load(input)?;
    println!("{}", dump_json(&tmx, compact)?);
    Ok(())
}

/// Execute the segments command
pub fn segments_command(input: &Path, lang: Option<&str>) -> Result<()> {
    let tmx = load(input)?;
    for line in segment_lines(&tmx, lang) {
        println!("{line}");
    }
    Ok(())
}

/// Key facts about a TMX document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub version: Option<String>,
    pub creation_tool: Option<String>,
    pub creation_tool_version: Option<String>,
    pub src_lang: Option<String>,
    pub admin_lang: Option<String>,
    pub seg_type: Option<String>,
    pub data_type: Option<String>,
    pub o_tmf: Option<String>,
    /// Number of translation units
    pub units: usize,
    /// Number of variants across all units
    pub variants: usize,
    /// Notes at every level
    pub notes: usize,
    /// Properties at every level
    pub props: usize,
    /// Variants whose segment has no content
    pub empty_segments: usize,
    /// Variant count per language, sorted by language
    pub languages: BTreeMap<String, usize>,
}

/// Placeholder for variants without a language
const NO_LANG: &str = "(none)";

impl Summary {
    /// Collect the summary of a decoded document
    pub fn of(tmx: &Tmx) -> Self {
        let header = &tmx.header;
        let mut summary = Summary {
            version: tmx.version.clone(),
            creation_tool: header.creation_tool.clone(),
            creation_tool_version: header.creation_tool_version.clone(),
            src_lang: header.src_lang.clone(),
            admin_lang: header.admin_lang.clone(),
            seg_type: header.seg_type.clone(),
            data_type: header.data_type.clone(),
            o_tmf: header.o_tmf.clone(),
            units: tmx.body.units.len(),
            notes: header.notes.len(),
            props: header.props.len(),
            ..Default::default()
        };

        for tu in &tmx.body.units {
            summary.notes += tu.notes.len();
            summary.props += tu.props.len();
            summary.variants += tu.variants.len();

            for tuv in &tu.variants {
                summary.notes += tuv.notes.len();
                summary.props += tuv.props.len();
                if tuv.seg.is_empty() {
                    summary.empty_segments += 1;
                }
                let lang = tuv.lang.as_deref().unwrap_or(NO_LANG);
                *summary.languages.entry(lang.to_string()).or_default() += 1;
            }
        }

        summary
    }
}

/// Render a summary as text or JSON
pub fn render_summary(summary: &Summary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(summary)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => Ok(render_summary_text(summary)),
    }
}

fn render_summary_text(summary: &Summary) -> String {
    fn or_dash(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("-")
    }

    let mut out = String::new();
    out.push_str(&format!("TMX {}\n", or_dash(&summary.version)));

    let tool = match (&summary.creation_tool, &summary.creation_tool_version) {
        (Some(tool), Some(version)) => format!("{tool} {version}"),
        (Some(tool), None) => tool.clone(),
        _ => "-".to_string(),
    };
    out.push_str(&format!("  Tool:        {tool}\n"));
    out.push_str(&format!("  Source lang: {}\n", or_dash(&summary.src_lang)));
    out.push_str(&format!("  Admin lang:  {}\n", or_dash(&summary.admin_lang)));
    out.push_str(&format!("  Seg type:    {}\n", or_dash(&summary.seg_type)));
    out.push_str(&format!("  Data type:   {}\n", or_dash(&summary.data_type)));
    out.push_str(&format!("  Orig. TMF:   {}\n", or_dash(&summary.o_tmf)));
    out.push('\n');
    out.push_str(&format!("Units:    {}\n", summary.units));
    out.push_str(&format!("Variants: {}\n", summary.variants));
    out.push_str(&format!("Notes:    {}\n", summary.notes));
    out.push_str(&format!("Props:    {}\n", summary.props));
    if summary.empty_segments > 0 {
        out.push_str(&format!("Empty:    {}\n", summary.empty_segments));
    }

    if !summary.languages.is_empty() {
        out.push('\n');
        out.push_str("Languages:\n");
        let width = summary.languages.keys().map(String::len).max().unwrap_or(0);
        for (lang, count) in &summary.languages {
            out.push_str(&format!("  {lang:<width$}  {count}\n"));
        }
    }

    out
}

/// Serialize the whole document as JSON
pub fn dump_json(tmx: &Tmx, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(tmx)?
    } else {
        serde_json::to_string_pretty(tmx)?
    };
    Ok(json)
}

/// One `tuid<TAB>lang<TAB>text` line per variant, optionally filtered by language
pub fn segment_lines(tmx: &Tmx, lang: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();

    for tu in &tmx.body.units {
        let tuid = tu.tuid.as_deref().unwrap_or_default();
        for tuv in &tu.variants {
            let tuv_lang = tuv.lang.as_deref().unwrap_or_default();
            if let Some(wanted) = lang {
                if !tuv_lang.eq_ignore_ascii_case(wanted) {
                    continue;
                }
            }
            lines.push(format!(
                "{}\t{}\t{}",
                escape_field(tuid),
                escape_field(tuv_lang),
                escape_field(&tuv.seg.text())
            ));
        }
    }

    lines
}

/// Escape characters that would break the line/column layout
fn escape_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const SAMPLE: &str = r#"<tmx version="1.4">
  <header creationtool="Tool" srclang="en" o-tmf="tm">
    <note>Header note</note>
  </header>
  <body>
    <tu tuid="a">
      <prop type="x-domain">UI</prop>
      <tuv xml:lang="en"><seg>Open&#9;file</seg></tuv>
      <tuv xml:lang="de"><note>checked</note><seg>Datei
öffnen</seg></tuv>
    </tu>
    <tu>
      <tuv><seg>orphan</seg></tuv>
      <tuv xml:lang="DE"><seg>Waise</seg></tuv>
    </tu>
  </body>
</tmx>"#;

    fn sample() -> Tmx {
        SAMPLE.parse().unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_inspect() {
        let args = vec!["tmxio", "inspect", "memory.tmx", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Inspect { input, format } => {
                assert_eq!(input, PathBuf::from("memory.tmx"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_inspect_default_format() {
        let cli = Cli::try_parse_from(["tmxio", "inspect", "memory.tmx"]).unwrap();

        match cli.command {
            Commands::Inspect { format, .. } => assert_eq!(format, OutputFormat::Text),
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parse_dump_compact_verbose() {
        let args = ["tmxio", "-vv", "dump", "memory.tmx", "--compact"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Dump { input, compact } => {
                assert_eq!(input, PathBuf::from("memory.tmx"));
                assert!(compact);
            }
            _ => panic!("Expected Dump command"),
        }
    }

    #[test]
    fn test_cli_parse_segments_lang() {
        let cli = Cli::try_parse_from(["tmxio", "segments", "m.tmx", "--lang", "de"]).unwrap();

        match cli.command {
            Commands::Segments { lang, .. } => assert_eq!(lang.as_deref(), Some("de")),
            _ => panic!("Expected Segments command"),
        }
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["tmxio", "inspect"]).is_err());
    }

    #[test]
    fn test_summary_counts() {
        let summary = Summary::of(&sample());

        assert_eq!(summary.version.as_deref(), Some("1.4"));
        assert_eq!(summary.units, 2);
        assert_eq!(summary.variants, 4);
        assert_eq!(summary.notes, 2);
        assert_eq!(summary.props, 1);
        assert_eq!(summary.empty_segments, 0);
        assert_eq!(summary.languages.get("en"), Some(&1));
        assert_eq!(summary.languages.get("de"), Some(&1));
        assert_eq!(summary.languages.get("DE"), Some(&1));
        assert_eq!(summary.languages.get(NO_LANG), Some(&1));
    }

    #[test]
    fn test_summary_counts_empty_segments() {
        let tmx: Tmx = r#"<tmx><body><tu>
            <tuv xml:lang="en"><seg>Save</seg></tuv>
            <tuv xml:lang="fr"><seg/></tuv>
            <tuv xml:lang="de"></tuv>
        </tu></body></tmx>"#
            .parse()
            .unwrap();
        let summary = Summary::of(&tmx);

        assert_eq!(summary.variants, 3);
        assert_eq!(summary.empty_segments, 2);
        let text = render_summary(&summary, OutputFormat::Text).unwrap();
        assert!(text.contains("Empty:    2\n"));
    }

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(0, None).to_string(), "warn");
        assert_eq!(log_filter(0, Some("")).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_verbose_levels() {
        assert_eq!(log_filter(1, None).to_string(), "debug");
        assert_eq!(log_filter(2, None).to_string(), "trace");
        assert_eq!(log_filter(5, None).to_string(), "trace");
    }

    #[test]
    fn test_log_filter_env_directives_win() {
        assert_eq!(log_filter(0, Some("debug")).to_string(), "debug");
        assert_eq!(
            log_filter(1, Some("tmxio_core=trace")).to_string(),
            "tmxio_core=trace"
        );
    }

    #[test]
    fn test_render_summary_text() {
        let text = render_summary(&Summary::of(&sample()), OutputFormat::Text).unwrap();

        assert!(text.starts_with("TMX 1.4\n"));
        assert!(text.contains("  Tool:        Tool\n"));
        assert!(text.contains("  Admin lang:  -\n"));
        assert!(text.contains("Units:    2\n"));
        assert!(text.contains("Languages:\n"));
    }

    #[test]
    fn test_render_summary_json() {
        let json = render_summary(&Summary::of(&sample()), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["units"], 2);
        assert_eq!(value["o_tmf"], "tm");
        assert_eq!(value["admin_lang"], serde_json::Value::Null);
        assert_eq!(value["languages"]["en"], 1);
    }

    #[test]
    fn test_segment_lines_escape_layout_characters() {
        let lines = segment_lines(&sample(), None);

        assert_eq!(
            lines,
            vec![
                "a\ten\tOpen\\tfile",
                "a\tde\tDatei\\nöffnen",
                "\t\torphan",
                "\tDE\tWaise",
            ]
        );
    }

    #[test]
    fn test_segment_lines_filter_ignores_case() {
        let lines = segment_lines(&sample(), Some("de"));

        assert_eq!(lines, vec!["a\tde\tDatei\\nöffnen", "\tDE\tWaise"]);
    }

    #[test]
    fn test_dump_json_compact() {
        let json = dump_json(&sample(), true).unwrap();

        assert!(!json.contains('\n'));
        let back: Tmx = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
