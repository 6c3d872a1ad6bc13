use wheelfeed::feed::{DetectorFrame, FeedMessage};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Frame(DetectorFrame),
    Reset,
    ConfigReload,
}

impl From<FeedMessage> for AppEvent {
    fn from(message: FeedMessage) -> Self {
        match message {
            FeedMessage::Frame(frame) => AppEvent::Frame(frame),
            FeedMessage::Reset => AppEvent::Reset,
        }
    }
}
