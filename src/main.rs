use clap::Parser;
use tracing_subscriber::EnvFilter;

use rxbridge::demo::{Example, TextLog, TextSink};

/// Plays the observable/publisher bridging examples and prints what the text
/// view would show.
#[derive(Debug, Parser)]
#[command(name = "rxbridge", version, about)]
struct Cli {
    /// Example to play, by tag (101, 102, 103) or name. Plays all of them when omitted.
    #[arg(env = "RXBRIDGE_EXAMPLE")]
    example: Option<Example>,

    /// Print each example's text view once it has finished instead of
    /// streaming lines as they are appended.
    #[arg(long)]
    buffered: bool,
}

/// Streams lines to stdout as they are appended.
#[derive(Clone, Copy)]
struct StdoutSink;

impl TextSink for StdoutSink {
    fn append(&self, line: &str) {
        println!("{line}");
    }

    fn clear(&self) {}
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let examples = match cli.example {
        Some(example) => vec![example],
        None => Example::ALL.to_vec(),
    };

    for example in examples {
        if cli.buffered {
            let log = TextLog::new();
            example.play(&log);
            println!("{}", log.text());
        } else {
            example.play(&StdoutSink);
        }
    }
}
