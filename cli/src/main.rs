//! docfields CLI - DOCX field extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docfields::{
    DocxParser, ExtractOptions, ExtractionResult, FieldExtractor, JsonFormat, LabelSet,
    ParseOptions, Strategy,
};

#[derive(Parser)]
#[command(name = "docfields")]
#[command(version)]
#[command(about = "Extract title, abstract and content from DOCX files", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input DOCX files
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title, abstract and content
    Fields {
        /// Input DOCX files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        args: FieldArgs,
    },

    /// Print the flattened paragraph text
    Text {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Use the raw XML scan instead of the block model
        #[arg(long)]
        raw: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Default)]
struct FieldArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,

    /// Output compact JSON (implies --json)
    #[arg(long)]
    compact: bool,

    /// JSON file with custom label vocabularies
    #[arg(long, value_name = "FILE", env = "DOCFIELDS_LABELS")]
    labels: Option<PathBuf>,

    /// Text extraction strategy
    #[arg(long, value_enum, default_value = "auto")]
    strategy: StrategyArg,

    /// Ignore the document's title property
    #[arg(long)]
    no_property_title: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Block model, raw XML scan as fallback
    #[default]
    Auto,
    /// Block model only
    Model,
    /// Raw XML scan only
    Raw,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => Strategy::Auto,
            StrategyArg::Model => Strategy::ObjectModel,
            StrategyArg::Raw => Strategy::RawXml,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Fields { inputs, args }) => cmd_fields(&inputs, &args),
        Some(Commands::Text { input, raw, output }) => cmd_text(&input, raw, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if cli.inputs.is_empty() {
                println!("{}", "Usage: docfields <FILE>...".yellow());
                println!("       docfields --help for more information");
                Ok(())
            } else {
                cmd_fields(&cli.inputs, &FieldArgs::default())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(args: &FieldArgs) -> Result<ExtractOptions, Box<dyn std::error::Error>> {
    let mut options = ExtractOptions::new()
        .with_strategy(args.strategy.into())
        .with_property_title(!args.no_property_title);

    if let Some(path) = &args.labels {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read label file {}: {}", path.display(), e))?;
        options = options.with_labels(LabelSet::from_json(&json)?);
    }

    Ok(options)
}

fn cmd_fields(inputs: &[PathBuf], args: &FieldArgs) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = FieldExtractor::with_options(build_options(args)?)?;

    let results = if inputs.len() > 1 {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Extracting {} files...", inputs.len()));
        let results = extractor.extract_many(inputs);
        pb.finish_and_clear();
        results
    } else {
        inputs
            .iter()
            .map(|path| (path.clone(), extractor.extract(path)))
            .collect()
    };

    let rendered = if args.json || args.compact {
        let format = if args.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        };
        render_json(&results, format)?
    } else {
        render_plain(&results)
    };

    write_output(&rendered, args.output.as_deref())
}

fn render_json(
    results: &[(PathBuf, ExtractionResult)],
    format: JsonFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    if let [(_, fields)] = results {
        return Ok(docfields::fields_to_json(fields, format)?);
    }

    let entries: Vec<serde_json::Value> = results
        .iter()
        .map(|(path, fields)| {
            serde_json::json!({
                "file": path.display().to_string(),
                "fields": fields,
            })
        })
        .collect();

    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&entries)?,
        JsonFormat::Compact => serde_json::to_string(&entries)?,
    };
    Ok(json)
}

fn render_plain(results: &[(PathBuf, ExtractionResult)]) -> String {
    let mut out = String::new();
    let many = results.len() > 1;

    for (path, fields) in results {
        if many {
            out.push_str(&format!("{}\n", path.display().to_string().cyan().bold()));
            out.push_str(&format!("{}\n", "─".repeat(40).dimmed()));
        }
        out.push_str(&format!(
            "{}: {}\n",
            "Title".bold(),
            fields.title.as_deref().unwrap_or("-")
        ));
        out.push_str(&format!(
            "{}: {}\n",
            "Abstract".bold(),
            fields.abstract_text.as_deref().unwrap_or("-")
        ));
        out.push_str(&format!("{}:\n{}\n", "Content".bold(), fields.content));
        if many {
            out.push('\n');
        }
    }

    out
}

fn write_output(text: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_text(input: &Path, raw: bool, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = if raw {
        let parser = DocxParser::open(input)?;
        docfields::parser::raw_text(parser.package())?
    } else {
        docfields::extract_text(input)?
    };

    write_output(&text, output)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient so metadata still shows when the body is damaged
    let parser = DocxParser::open_with_options(input, ParseOptions::new().lenient())?;
    let metadata = parser.metadata()?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: DOCX", "Format".bold());

    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref subject) = metadata.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref creator) = metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref keywords) = metadata.keywords {
        println!("{}: {}", "Keywords".bold(), keywords);
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    match parser.parse() {
        Ok(doc) => {
            let text = docfields::render::to_text(&doc);
            println!("{}: {}", "Blocks".bold(), doc.block_count());
            println!("{}: {}", "Headings".bold(), doc.heading_count());
            println!("{}: {}", "Tables".bold(), doc.table_count());
            println!("{}: {}", "Words".bold(), text.split_whitespace().count());
            println!("{}: {}", "Characters".bold(), text.chars().count());
        }
        Err(e) => {
            log::warn!("Cannot build block model: {}", e);
            println!("{}: {}", "Body".bold(), "unreadable".red());
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docfields".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX field extraction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_mapping() {
        assert_eq!(Strategy::from(StrategyArg::Auto), Strategy::Auto);
        assert_eq!(Strategy::from(StrategyArg::Model), Strategy::ObjectModel);
        assert_eq!(Strategy::from(StrategyArg::Raw), Strategy::RawXml);
    }

    #[test]
    fn test_build_options_loads_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        fs::write(&path, r#"{"abstract_start": ["summary"]}"#).unwrap();

        let args = FieldArgs {
            labels: Some(path),
            no_property_title: true,
            ..Default::default()
        };
        let options = build_options(&args).unwrap();
        assert_eq!(options.labels.abstract_start, vec!["summary".to_string()]);
        assert!(!options.use_property_title);
    }

    #[test]
    fn test_build_options_missing_label_file() {
        let args = FieldArgs {
            labels: Some(PathBuf::from("/no/such/labels.json")),
            ..Default::default()
        };
        assert!(build_options(&args).is_err());
    }

    #[test]
    fn test_render_json_single_and_many() {
        let fields = ExtractionResult::new(Some("T".to_string()), None, "C");
        let single = vec![(PathBuf::from("a.docx"), fields.clone())];
        assert_eq!(
            render_json(&single, JsonFormat::Compact).unwrap(),
            r#"{"title":"T","abstract":null,"content":"C"}"#
        );

        let many = vec![
            (PathBuf::from("a.docx"), fields.clone()),
            (PathBuf::from("b.docx"), ExtractionResult::empty()),
        ];
        let json = render_json(&many, JsonFormat::Compact).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["file"], "a.docx");
        assert_eq!(value[1]["fields"]["content"], "");
    }

    #[test]
    fn test_render_plain_marks_missing() {
        colored::control::set_override(false);
        let results = vec![(PathBuf::from("a.docx"), ExtractionResult::empty())];
        let out = render_plain(&results);
        assert!(out.contains("Title: -"));
        assert!(out.contains("Abstract: -"));
    }
}
