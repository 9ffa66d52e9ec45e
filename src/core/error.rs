use thiserror::Error;

/// Why a placement, removal or inventory change was rejected. Rejections never mutate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ActionError {
    #[error("cell already occupied")]
    CellOccupied,
    #[error("nothing to destroy")]
    NothingToDestroy,
    #[error("item or its block descriptor is missing")]
    MissingItem,
    #[error("stack is full")]
    StackFull,
    #[error("inventory is full")]
    InventoryFull,
    #[error("no item in the selected slot")]
    InvalidSelection,
    #[error("target is out of range")]
    OutOfRange,
}
