#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BusError {
    #[error("channel closed by peer")]
    ChannelClosed,
}
