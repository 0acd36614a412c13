use anyhow::anyhow;
use slog::{Drain, Level, LevelFilter, Logger};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;
use tokenpost::{Endpoints, TokenPostClient};

#[macro_use]
extern crate slog;

mod config;

use config::Config;

fn logger(level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build();
    let drain = Mutex::new(drain).fuse();
    let drain = LevelFilter::new(drain, level).fuse();
    Logger::root(drain, o!("app" => "tokenpost"))
}

/// Sign in with the configured credentials, post the payload and write the
/// response body to `out`.
async fn post<W: Write>(config: &Config, log: Logger, out: &mut W) -> anyhow::Result<()> {
    let endpoints = Endpoints::new(&config.login_url, &config.data_url)
        .map_err(|e| anyhow!("bad endpoint in config: {}", e))?;

    let mut builder =
        TokenPostClient::builder(endpoints, &config.credentials.email, config.password()?)
            .logger(log);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let client = builder
        .build()
        .await
        .map_err(|e| anyhow!("failed to sign in: {}", e))?;
    let body = client
        .send()
        .await
        .map_err(|e| anyhow!("failed to post payload: {}", e))?;
    writeln!(out, "{}", body)?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program = &args[0].clone();
    let brief = format!("Usage: {} [options] -c CONFIG", program);

    let mut opts = getopts::Options::new();
    opts.optopt("c", "", "config file", "CONFIG");
    opts.optflag("v", "", "debug logging");
    opts.optflag("h", "", "print this help");
    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => return Err(anyhow!("{}\n{}", e, opts.usage(&brief))),
    };

    if matches.opt_present("h") {
        print!("{}", opts.usage(&brief));
        return Ok(());
    }

    let path = matches
        .opt_str("c")
        .ok_or_else(|| anyhow!("Required option 'c' missing\n{}", opts.usage(&brief)))?;
    let config = Config::from_file(&path)
        .map_err(|e| anyhow!("Failed to parse config file: {}", e))?;

    let level = if matches.opt_present("v") {
        Level::Debug
    } else {
        Level::Info
    };
    let log = logger(level);

    let mut stdout = std::io::stdout();
    post(&config, log, &mut stdout).await
}
