//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **HttpImageSource**: cataas API（本番用）
//! - **ScriptedImageSource / RepeatingImageSource**: テスト・デモ用

pub mod http_source;
pub mod scripted_source;

pub use self::http_source::HttpImageSource;
pub use self::scripted_source::{RepeatingImageSource, ScriptedImageSource};
