use std::time::Duration;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `url` to the shortening service; answer with `Msg::ShortenCompleted`.
    Shorten { request_id: RequestId, url: String },
    /// Copy `text` to the clipboard; answer with `Msg::CopyCompleted`.
    CopyToClipboard { text: String },
    /// Deliver `Msg::NoticeExpired { generation }` after `after`.
    ScheduleNoticeExpiry { generation: u64, after: Duration },
}
