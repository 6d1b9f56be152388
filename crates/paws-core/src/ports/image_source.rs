//! ImageSource port - 外部の画像 API の抽象化
//!
//! 1 回の呼び出しで 1 件の画像を取得します。リトライ・重複排除・
//! URL の正規化は Deck Loader 側の責務です。

use async_trait::async_trait;

use crate::domain::{FetchError, RawImage};

/// ImageSource は画像を 1 件取得する
///
/// slot タスクから並行に呼ばれるので `Send + Sync` を要求します。
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self) -> Result<RawImage, FetchError>;

    /// Origin used to absolutize relative urls returned by this source.
    fn base_origin(&self) -> &str;
}
