use crate::config::parse_provider;
use clap::{Parser, Subcommand, ValueEnum};
use genai::adapter::AdapterKind;
use std::path::PathBuf;

/// Research-backed recommendations for GenAI codebases
#[derive(Parser, Debug)]
#[command(
    name = "litscout",
    about = "Research-backed recommendations for GenAI codebases",
    version,
    author,
    long_about = "litscout scans a Python codebase for GenAI techniques (LLM APIs, RAG, vector \
                  databases, embeddings, agents, prompt engineering), searches recent research \
                  on each technique, extracts failure modes and best practices, and turns them \
                  into prioritized recommendations pointing at your code."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the full analysis and print a report",
        long_about = "Extracts the archive (or uses the directory as is), detects GenAI \
                      techniques, retrieves papers, extracts insights and prints the report.\n\n\
                      Examples:\n  \
                      litscout analyze app.tar.gz\n  \
                      litscout analyze ./my-app --format json --output report.json\n  \
                      litscout analyze app.tgz --offline"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Detect GenAI techniques without contacting any service",
        long_about = "Scans the codebase and prints the detected techniques only.\n\n\
                      Examples:\n  \
                      litscout detect ./my-app\n  \
                      litscout detect app.tar.gz --format yaml"
    )]
    Detect(DetectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "PATH", help = "Archive (.zip, .tar.gz, .tgz, .tar) or source directory")]
    pub path: PathBuf,

    #[arg(
        short = 'n',
        long,
        value_name = "NAME",
        help = "Codebase name shown in the report (defaults to the file name)"
    )]
    pub name: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Skip the extraction model and use built-in insights")]
    pub offline: bool,

    #[arg(
        short = 'p',
        long,
        value_parser = parse_provider_arg,
        help = "Extraction provider (overrides LITSCOUT_PROVIDER)"
    )]
    pub provider: Option<AdapterKind>,

    #[arg(
        short = 'm',
        long,
        value_name = "MODEL",
        help = "Extraction model (overrides LITSCOUT_MODEL)"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Timeout for each outbound request (overrides LITSCOUT_REQUEST_TIMEOUT)"
    )]
    pub timeout: Option<u64>,

    #[arg(long, help = "Do not draw a progress bar")]
    pub no_progress: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(value_name = "PATH", help = "Archive (.zip, .tar.gz, .tgz, .tar) or source directory")]
    pub path: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_provider_arg(s: &str) -> Result<AdapterKind, String> {
    parse_provider(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_analyze_args() {
        let args = CliArgs::parse_from(["litscout", "analyze", "app.tar.gz"]);
        match args.command {
            Commands::Analyze(analyze) => {
                assert_eq!(analyze.path, PathBuf::from("app.tar.gz"));
                assert_eq!(analyze.format, OutputFormatArg::Human);
                assert!(analyze.name.is_none());
                assert!(analyze.output.is_none());
                assert!(analyze.provider.is_none());
                assert!(analyze.timeout.is_none());
                assert!(!analyze.offline);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_with_all_options() {
        let args = CliArgs::parse_from([
            "litscout",
            "analyze",
            "./app",
            "--name",
            "demo",
            "--format",
            "json",
            "--output",
            "report.json",
            "--offline",
            "--provider",
            "claude",
            "--timeout",
            "45",
        ]);
        match args.command {
            Commands::Analyze(analyze) => {
                assert_eq!(analyze.name.as_deref(), Some("demo"));
                assert_eq!(analyze.format, OutputFormatArg::Json);
                assert_eq!(analyze.output, Some(PathBuf::from("report.json")));
                assert!(analyze.offline);
                assert_eq!(analyze.provider, Some(AdapterKind::Anthropic));
                assert_eq!(analyze.timeout, Some(45));
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_invalid_provider_rejected() {
        let result =
            CliArgs::try_parse_from(["litscout", "analyze", "./app", "--provider", "mistral"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_detect_with_format() {
        let args = CliArgs::parse_from(["litscout", "detect", "./app", "-f", "yaml"]);
        match args.command {
            Commands::Detect(detect) => {
                assert_eq!(detect.path, PathBuf::from("./app"));
                assert_eq!(detect.format, OutputFormatArg::Yaml);
            }
            _ => panic!("Expected Detect command"),
        }
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["litscout", "-v", "-q", "detect", "./app"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_path_is_required() {
        assert!(CliArgs::try_parse_from(["litscout", "analyze"]).is_err());
    }
}
