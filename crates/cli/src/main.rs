use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use precis_core::{
    Dictionary, NoiseFilter, OutputFormat, Pipeline, PipelineConfig, ProcessedBlog, fetch_file, fetch_stdin,
};

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Summarize a web page and render a lexical translation of the summary
#[derive(Parser, Debug)]
#[command(name = "precis")]
#[command(author = "Precis Contributors")]
#[command(version)]
#[command(about = "Summarize a web page and translate the summary", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Source URL recorded for file or stdin input
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "15", value_name = "SECS")]
    timeout: u64,

    /// Maximum number of redirects to follow
    #[arg(long, default_value = "5", value_name = "NUM")]
    max_redirects: usize,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// JSON dictionary file (default: user config, then built-in)
    #[arg(long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// JSON array of noise phrases replacing the built-in blocklist
    #[arg(long, value_name = "FILE")]
    noise: Option<PathBuf>,

    /// Maximum number of summary sentences
    #[arg(long, default_value = "3", value_name = "NUM")]
    sentences: usize,

    /// Maximum characters of content kept in the output
    #[arg(long, default_value = "5000", value_name = "NUM")]
    content_limit: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn is_remote(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("precis_core=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn build_config(args: &Args) -> anyhow::Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder()
        .timeout(args.timeout)
        .max_redirects(args.max_redirects)
        .max_sentences(args.sentences)
        .content_limit(args.content_limit);

    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua.as_str());
    }

    if let Some(path) = &args.noise {
        let noise = NoiseFilter::from_file(path)
            .with_context(|| format!("Failed to load noise phrases: {}", path.display()))?;
        builder = builder.noise(noise);
    }

    Ok(builder.build())
}

fn load_dictionary(args: &Args) -> anyhow::Result<Dictionary> {
    match &args.dictionary {
        Some(path) => {
            Dictionary::from_file(path).with_context(|| format!("Failed to load dictionary: {}", path.display()))
        }
        None => Dictionary::load_default().context("Failed to load dictionary"),
    }
}

async fn run(args: &Args, pipeline: &Pipeline<precis_core::HttpFetcher>) -> anyhow::Result<ProcessedBlog> {
    if is_remote(&args.input) {
        if args.verbose {
            echo::print_step(1, 3, &format!("Fetching {}", args.input.bright_white().underline()));
        }
        let started = Instant::now();
        let blog = pipeline
            .process(&args.input)
            .await
            .with_context(|| format!("Failed to process {}", args.input))?;
        if args.verbose {
            echo::print_timing("fetch + process", started.elapsed());
        }
        return Ok(blog);
    }

    let html = if args.input == "-" {
        if args.verbose {
            echo::print_step(1, 3, "Reading from stdin");
        }
        fetch_stdin().context("Failed to read from stdin")?
    } else {
        if args.verbose {
            echo::print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        echo::print_step(2, 3, "Extracting and summarizing");
    }

    let url = args.url.as_deref().unwrap_or(&args.input);
    let started = Instant::now();
    let blog = pipeline.process_html(url, &html).context("Failed to process page")?;
    if args.verbose {
        echo::print_timing("process", started.elapsed());
    }
    Ok(blog)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();
        init_tracing();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let config = build_config(&args)?;
    let dictionary = Arc::new(load_dictionary(&args)?);
    if args.verbose {
        eprintln!(
            "  {} {} entries",
            "Dictionary:".dimmed(),
            dictionary.len().to_string().bright_white()
        );
    }

    let pipeline = Pipeline::new(config, dictionary).context("Failed to build HTTP client")?;

    let blog = match run(&args, &pipeline).await {
        Ok(blog) => blog,
        Err(err) => {
            if args.verbose {
                echo::print_error(&format!("{:#}", err));
            }
            return Err(err);
        }
    };

    if args.verbose {
        echo::print_details(&blog);
        echo::print_step(3, 3, "Writing output");
    }

    let output = blog.to_format(args.format).context("Failed to render output")?;

    match &args.output {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
