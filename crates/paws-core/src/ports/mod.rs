//! Ports - 抽象化レイヤー
//!
//! 外部システム（画像 API、時刻、Presentation への通知）への
//! インターフェースを trait として定義し、実装の詳細を隠蔽します。

pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod image_source;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::{ChannelEventSink, EventSink, NoopEventSink, RecordingEventSink};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::image_source::ImageSource;
