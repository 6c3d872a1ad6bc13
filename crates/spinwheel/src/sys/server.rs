use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::UnixListener;
use wheelfeed::feed::{self, SocketPath};

pub async fn run_server(tx: Sender<AppEvent>, socket_path: SocketPath) {
    let path = socket_path.as_str();

    // stale socket from a previous run
    if fs_err::metadata(path).is_ok() {
        if let Err(e) = fs_err::remove_file(path) {
            log::warn!("{}", e);
        }
    }

    let listener = match UnixListener::bind(path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket_path, e);
            return;
        }
    };
    log::info!("Listening for landmark frames on {}", socket_path);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    log::info!("Hand tracker connected");
                    let frames = forward_lines(stream, &tx).await;
                    log::info!("Hand tracker disconnected after {} messages", frames);
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Forwards every decodable line to the app. Bad lines are logged and skipped.
/// Returns the number of messages forwarded.
async fn forward_lines<R>(reader: R, tx: &Sender<AppEvent>) -> usize
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut forwarded = 0;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Feed read error: {}", e);
                break;
            }
        };

        match feed::parse_line(&line) {
            Ok(Some(message)) => {
                if tx.send(message.into()).await.is_err() {
                    break;
                }
                forwarded += 1;
            }
            Ok(None) => {}
            Err(e) => log::warn!("Skipping malformed feed line: {}", e),
        }
    }
    forwarded
}
