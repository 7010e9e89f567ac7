mod capture;
mod recognizer;
mod session;
mod text;

pub use capture::{Frame, ScreenGrabber, XcapGrabber, crop_rgba, encode_png};
pub use recognizer::{Recognizer, platform_recognizer};
pub use session::CaptureService;
pub use text::{NO_TEXT_FOUND, OcrLine, join_lines};
