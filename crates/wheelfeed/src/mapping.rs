use crate::geometry::{Point, Size};
use crate::landmarks::Landmark;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// How the camera frame is laid onto the viewport.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VideoFit {
    /// Scale to cover the viewport, cropping overflow, aspect preserved.
    #[default]
    #[strum(to_string = "cover", serialize = "fill", serialize = "aspect-fill")]
    Cover,
    /// Scale each axis independently to the viewport.
    #[strum(serialize = "stretch")]
    Stretch,
}

/// Maps normalized landmarks into viewport pixels with the same scale, offset
/// and horizontal mirror the video is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoTransform {
    drawn: Size,
    offset: Point,
}

impl VideoTransform {
    /// `None` when either size is degenerate.
    pub fn new(fit: VideoFit, video: Size, viewport: Size) -> Option<Self> {
        if video.is_degenerate() || viewport.is_degenerate() {
            return None;
        }

        let drawn = match fit {
            VideoFit::Cover => {
                let scale = (viewport.width / video.width).max(viewport.height / video.height);
                Size::new(video.width * scale, video.height * scale)
            }
            VideoFit::Stretch => viewport,
        };
        // centered, so the crop is split evenly and survives mirroring
        let offset = Point::new(
            (viewport.width - drawn.width) / 2.0,
            (viewport.height - drawn.height) / 2.0,
        );

        Some(Self { drawn, offset })
    }

    /// Size of the scaled video, which may exceed the viewport when covering.
    pub fn drawn_size(&self) -> Size {
        self.drawn
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn to_pixels(&self, landmark: Landmark) -> Point {
        Point::new(
            self.offset.x + (1.0 - landmark.x) * self.drawn.width,
            self.offset.y + landmark.y * self.drawn.height,
        )
    }
}
