use anyhow::{Context, Result, bail};
use relative_path::RelativePathBuf;
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};
use transcript_weave_config::{Config, ConfigError, OutputFormat};
use transcript_weave_engine::{
    LineInput, NodeIdGenerator,
    markup::{KindRenderers, to_html, to_text},
    notation, render_lines,
};

const USAGE: &str = "Usage: transcript-weave-cli [CORPUS_PATH] [--html]";

/// A line read from the corpus, tagged with the file it came from.
struct CorpusLine {
    file: RelativePathBuf,
    input: LineInput,
}

struct Options {
    config: Config,
}

impl Options {
    fn from_args(args: &[String]) -> Result<Self> {
        let html = args.iter().any(|a| a == "--html");
        let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
        if let Some(unknown) = args.iter().find(|a| a.starts_with("--") && *a != "--html") {
            bail!("Unknown option {unknown}\n{USAGE}");
        }

        let mut config = match positional.as_slice() {
            [] => Config::load()
                .context("Failed to load config")?
                .with_context(|| {
                    format!(
                        "No corpus path given and no config at {}\n{USAGE}",
                        Config::config_path().display()
                    )
                })?,
            [path] => {
                let from_config = saved_settings(Config::load());
                let mut config = Config::new(PathBuf::from(path));
                if let Some(saved) = from_config {
                    config.line_pattern = saved.line_pattern;
                    config.format = saved.format;
                    config.workers = saved.workers;
                }
                config
            }
            _ => bail!("Too many arguments\n{USAGE}"),
        };

        if html {
            config.format = OutputFormat::Html;
        }
        Ok(Self { config })
    }

    fn workers(&self) -> usize {
        self.config.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Settings from the config file to layer under a command-line corpus path.
/// A broken config file is reported and skipped.
fn saved_settings(loaded: Result<Option<Config>, ConfigError>) -> Option<Config> {
    loaded.unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {e}");
        None
    })
}

fn read_corpus(config: &Config) -> Result<Vec<CorpusLine>> {
    if !config.corpus_path.is_dir() {
        bail!("Corpus directory not found: {}", config.corpus_path.display());
    }

    let files = config.line_files()?;
    log::info!(
        "Found {} line file(s) in {}",
        files.len(),
        config.corpus_path.display()
    );

    let mut lines = vec![];
    for path in files {
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file = relative_to(&config.corpus_path, &path)?;
        let parsed =
            notation::parse_lines(&text).with_context(|| format!("Failed to parse {file}"))?;
        log::debug!("{file}: {} line(s)", parsed.len());

        lines.extend(parsed.into_iter().map(|line| CorpusLine {
            file: file.clone(),
            input: LineInput {
                id: line.id,
                leaves: line.leaves,
            },
        }));
    }
    Ok(lines)
}

fn relative_to(root: &Path, path: &Path) -> Result<RelativePathBuf> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    RelativePathBuf::from_path(relative)
        .with_context(|| format!("Cannot express {} relative to the corpus", path.display()))
}

fn render(config: &Config, lines: &[CorpusLine], workers: usize) -> Result<Vec<String>> {
    let inputs: Vec<LineInput> = lines.iter().map(|l| l.input.clone()).collect();
    let renderer = KindRenderers::default();
    let ids = NodeIdGenerator::new();

    let results = render_lines(&inputs, &renderer, &ids, workers);

    lines
        .iter()
        .zip(results)
        .map(|(line, result)| {
            let rendered =
                result.with_context(|| format!("Failed to render {}:{}", line.file, line.input.id))?;
            let body = match config.format {
                OutputFormat::Text => to_text(&rendered.nodes),
                OutputFormat::Html => to_html(&rendered.nodes),
            };
            Ok(format!("{}:{}\t{body}", line.file, rendered.id))
        })
        .collect()
}

fn run(args: &[String]) -> Result<Vec<String>> {
    let options = Options::from_args(args)?;
    let lines = read_corpus(&options.config)?;
    let workers = options.workers();
    log::info!("Rendering {} line(s) on {workers} worker(s)", lines.len());
    render(&options.config, &lines, workers)
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            for line in output {
                println!("{line}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
