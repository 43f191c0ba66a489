use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporldl::{
    cli,
    config::{self, DEFAULT_OUTPUT_DIR},
    error, utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
  args_conflicts_with_subcommands = true,
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    /// Without a subcommand `sporldl` behaves like `sporldl download`
    #[clap(flatten)]
    download: DownloadOpts,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Download a Spotify playlist as MP3 files
    Download(DownloadOpts),

    /// Remove leftover non-MP3 files from a download folder
    Clean(CleanOpts),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct DownloadOpts {
    /// Playlist URL, URI or ID; asked for on the console when omitted
    pub playlist: Option<String>,

    /// Folder the MP3 files are written to
    #[clap(long, short, env = "SPORLDL_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// yt-dlp executable (default: looked up on PATH)
    #[clap(long = "yt-dlp", env = "YT_DLP_PATH")]
    pub yt_dlp: Option<PathBuf>,

    /// ffmpeg executable or the folder containing it (default: looked up on PATH)
    #[clap(long = "ffmpeg-location", env = "FFMPEG_LOCATION")]
    pub ffmpeg: Option<PathBuf>,

    /// Reject matches whose title shares less than this fraction of the track title's words
    #[clap(long, default_value = "0", value_parser = utils::parse_similarity)]
    pub min_similarity: f64,
}

#[derive(Parser, Debug, Clone)]
pub struct CleanOpts {
    /// Folder to clean
    #[clap(long, short, env = "SPORLDL_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Download(cli.download)) {
        Command::Download(opt) => {
            cli::download(cli::DownloadOptions {
                playlist: opt.playlist,
                output_dir: opt.output,
                yt_dlp: opt.yt_dlp,
                ffmpeg: opt.ffmpeg,
                min_similarity: opt.min_similarity,
            })
            .await
        }
        Command::Clean(opt) => cli::clean(&opt.output).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
