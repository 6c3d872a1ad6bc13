//! Newline-delimited JSON protocol between a hand tracker and the wheel.
//!
//! Each line is one [`FeedMessage`]:
//!
//! ```text
//! {"type":"frame","video":{"width":1280,"height":720},"hands":[[{"x":0.5,"y":0.5}, ...]]}
//! {"type":"reset"}
//! ```

use crate::geometry::Size;
use crate::landmarks::HandLandmarks;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::os::unix::net::UnixStream;
use thiserror::Error;

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/spinwheel.sock";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SocketPath(String);

impl SocketPath {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new(DEFAULT_SOCKET_PATH)
    }
}

/// One detector result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectorFrame {
    /// Camera frame size; the viewport size is assumed when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Size>,
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
}

impl DetectorFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Only the first detected hand drives the wheel.
    pub fn primary_hand(&self) -> Option<&HandLandmarks> {
        self.hands.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeedMessage {
    Frame(DetectorFrame),
    Reset,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to connect to feed socket {path}: {source}")]
    Connect {
        path: SocketPath,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Malformed feed message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Blank lines decode to `None`.
pub fn parse_line(line: &str) -> Result<Option<FeedMessage>, FeedError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(line)?))
}

pub fn encode_line(message: &FeedMessage) -> Result<String, FeedError> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

pub struct FeedClient {
    stream: UnixStream,
}

impl FeedClient {
    pub fn connect(path: &SocketPath) -> Result<Self, FeedError> {
        let stream = UnixStream::connect(path.as_str()).map_err(|source| FeedError::Connect {
            path: path.clone(),
            source,
        })?;
        Ok(Self { stream })
    }

    pub fn send(&mut self, message: &FeedMessage) -> Result<(), FeedError> {
        self.stream.write_all(encode_line(message)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{INDEX_TIP, LANDMARK_COUNT, Landmark};

    #[test]
    fn test_parse_frame() {
        let points: Vec<String> = (0..LANDMARK_COUNT)
            .map(|i| format!("{{\"x\":{},\"y\":0.5}}", i as f64 / 100.0))
            .collect();
        let line = format!(
            "{{\"type\":\"frame\",\"video\":{{\"width\":1280,\"height\":720}},\"hands\":[[{}]]}}",
            points.join(",")
        );

        let Some(FeedMessage::Frame(frame)) = parse_line(&line).unwrap() else {
            panic!("expected a frame");
        };
        assert_eq!(frame.video, Some(Size::new(1280.0, 720.0)));
        let hand = frame.primary_hand().unwrap();
        assert!(hand.is_complete());
        assert_eq!(hand.index_tip(), Some(Landmark::new(0.08, 0.5)));
        assert_eq!(hand[INDEX_TIP].z, 0.0);
    }

    #[test]
    fn test_parse_frame_without_hands_or_video() {
        let msg = parse_line("{\"type\":\"frame\"}").unwrap();
        assert_eq!(msg, Some(FeedMessage::Frame(DetectorFrame::empty())));
    }

    #[test]
    fn test_parse_reset_and_blank() {
        assert_eq!(parse_line(" {\"type\":\"reset\"} \n").unwrap(), Some(FeedMessage::Reset));
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        assert!(matches!(
            parse_line("{\"type\":\"wave\"}"),
            Err(FeedError::Json(_))
        ));
        assert!(matches!(parse_line("not json"), Err(FeedError::Json(_))));
    }

    #[test]
    fn test_encode_is_one_line() {
        let line = encode_line(&FeedMessage::Reset).unwrap();
        assert_eq!(line, "{\"type\":\"reset\"}\n");
    }

    #[test]
    fn test_empty_frame_has_no_primary_hand() {
        assert!(DetectorFrame::empty().primary_hand().is_none());
    }
}
