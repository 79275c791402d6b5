use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{ArgGroup, Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ubuntu_image_fetcher::repositories::{self as repos, Repositories, Repository};
use ubuntu_image_fetcher::transport::HttpCatalogSource;
use ubuntu_image_fetcher::{CatalogError, Lookup, ReleaseResolver};

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "ubuntu-image-fetcher",
    about = "Query Ubuntu cloud image releases and disk image checksums",
    version
)]
#[command(group(ArgGroup::new("query").required(true).args(["releases", "lts", "sha256"])))]
struct Cli {
    /// List supported Ubuntu releases
    #[arg(long)]
    releases: bool,

    /// Show the current LTS release
    #[arg(long)]
    lts: bool,

    /// Show the SHA256 of the disk image for a release (e.g. "Ubuntu 22.04 LTS", "22.04", "jammy")
    #[arg(long, value_name = "RELEASE_NAME")]
    sha256: Option<String>,

    /// Only consider images built for this architecture
    #[arg(long, requires = "sha256")]
    arch: Option<String>,

    /// Override the catalog URL
    #[arg(long, value_name = "URL")]
    catalog_url: Option<String>,

    /// Read repository definitions from this file instead of the built-in list
    #[arg(long, value_name = "FILE")]
    indexes: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Set log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Debug, PartialEq, Eq)]
enum Query {
    Releases,
    Lts,
    Sha256 { release_name: String, arch: Option<String> },
}

impl Cli {
    fn query(&self) -> Query {
        if let Some(release_name) = &self.sha256 {
            Query::Sha256 {
                release_name: release_name.clone(),
                arch: self.arch.clone(),
            }
        } else if self.lts {
            Query::Lts
        } else {
            Query::Releases
        }
    }

    /// The `ubuntu` repository with command line overrides applied.
    fn repository(&self) -> Result<Repository> {
        let repositories = match &self.indexes {
            Some(path) => Repositories::from_file(path)
                .with_context(|| format!("read repository definitions from {}", path.display()))?,
            None => Repositories::embedded().context("read built-in repository definitions")?,
        };

        let mut repository = repositories.require(repos::UBUNTU)?;
        if let Some(url) = &self.catalog_url {
            repos::validate_url(url)?;
            repository.set_url(url);
        }

        Ok(repository)
    }
}

fn initialize_tracing(log_level: &LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let repository = cli.repository()?;
    let timeout = match cli.timeout {
        Some(secs) => Duration::from_secs(secs),
        None => repository.timeout()?,
    };

    let source = HttpCatalogSource::new(repository.url(), timeout)?;
    let mut resolver = ReleaseResolver::new(source);
    if let Some(base) = repository.base_for_paths() {
        resolver = resolver.with_base_for_paths(base);
    }

    match cli.query() {
        Query::Releases => match resolver.releases().await? {
            Lookup::Found(releases) => {
                println!("Supported Ubuntu Releases:");
                for release in releases {
                    println!("{release}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Lookup::NotFound(reason) => {
                eprintln!("Error: {reason}");
                Ok(ExitCode::FAILURE)
            }
        },
        Query::Lts => match resolver.current_lts().await? {
            Lookup::Found(title) => {
                println!("Current LTS Version: {title}");
                Ok(ExitCode::SUCCESS)
            }
            Lookup::NotFound(reason) => {
                eprintln!("Error: {reason}");
                Ok(ExitCode::FAILURE)
            }
        },
        Query::Sha256 { release_name, arch } => {
            match resolver.checksum_for_release(&release_name, arch.as_deref()).await? {
                Lookup::Found(image) => {
                    debug!(
                        product = image.product_id(),
                        version = image.version_id(),
                        title = image.release_title().unwrap_or("<none>"),
                        arch = image.arch().unwrap_or("<none>"),
                        url = image.url().unwrap_or("<none>"),
                        "resolved disk image"
                    );
                    println!("SHA256 for {release_name}: {}", image.sha256());
                    Ok(ExitCode::SUCCESS)
                }
                Lookup::NotFound(reason) => {
                    eprintln!("Error: {reason}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            return match err.print() {
                Ok(()) => code,
                Err(io_err) => {
                    eprintln!("Error: failed to print usage: {io_err}");
                    ExitCode::FAILURE
                }
            };
        }
    };

    initialize_tracing(&cli.log_level);

    match run(&cli).await {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<CatalogError>() {
                Some(catalog_err) if catalog_err.is_transport() => {
                    eprintln!("Error: could not fetch catalog: {err:#}")
                }
                Some(catalog_err) if catalog_err.is_malformed() => {
                    eprintln!("Error: could not parse catalog: {err:#}")
                }
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
