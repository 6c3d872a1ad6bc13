use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use wheelfeed::feed::{
    self, DEFAULT_SOCKET_PATH, DetectorFrame, FeedClient, FeedMessage, SocketPath,
};

#[derive(Parser, Debug)]
#[command(name = "wheelfeed", version, about, long_about = None)]
struct Cli {
    /// Socket the spinwheel app listens on
    #[arg(short = 's', long, default_value = DEFAULT_SOCKET_PATH)]
    socket: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Stream a recorded tracker session (one JSON message per line)
    Replay {
        file: PathBuf,

        /// Frames sent per second
        #[arg(long, default_value_t = 30.0)]
        fps: f64,

        /// Start over when the recording ends
        #[arg(short = 'l', long = "loop")]
        repeat: bool,
    },
    /// Send a single frame with no hands
    Clear,
    /// Drop pinch, press and grab state in the app
    Reset,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let socket = SocketPath::new(cli.socket);

    match cli.command {
        Commands::Replay { file, fps, repeat } => replay(&socket, &file, fps, repeat),
        Commands::Clear => send_once(&socket, FeedMessage::Frame(DetectorFrame::empty())),
        Commands::Reset => send_once(&socket, FeedMessage::Reset),
    }
}

fn send_once(socket: &SocketPath, message: FeedMessage) -> anyhow::Result<()> {
    let mut client = FeedClient::connect(socket)?;
    client.send(&message)?;
    Ok(())
}

fn load_recording(path: &Path) -> anyhow::Result<Vec<FeedMessage>> {
    let contents = fs_err::read_to_string(path)?;
    let messages: Vec<FeedMessage> = contents
        .lines()
        .enumerate()
        .filter_map(|(n, line)| match feed::parse_line(line) {
            Ok(msg) => msg,
            Err(e) => {
                log::warn!("Skipping line {} of {}: {}", n + 1, path.display(), e);
                None
            }
        })
        .collect();
    Ok(messages)
}

fn replay(socket: &SocketPath, path: &Path, fps: f64, repeat: bool) -> anyhow::Result<()> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("--fps must be a positive number, got {}", fps);
    }

    let messages = load_recording(path)?;
    if messages.is_empty() {
        anyhow::bail!("No feed messages found in {}", path.display());
    }

    let mut client = FeedClient::connect(socket)?;
    let interval = Duration::from_secs_f64(1.0 / fps);
    log::info!(
        "Replaying {} messages from {} at {} fps",
        messages.len(),
        path.display(),
        fps
    );

    loop {
        for message in &messages {
            client.send(message)?;
            thread::sleep(interval);
        }
        if !repeat {
            break;
        }
    }
    Ok(())
}
