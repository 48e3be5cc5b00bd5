//! Collaborator traits implemented outside the simulation core.

use crate::geom::Vec2;
use crate::id::{DepthKey, TokenId};

/// Receives visual updates for tokens.
///
/// The simulation never reads anything back from a presenter; it pushes
/// positions and depth keys as they change. Implementations must not
/// panic.
pub trait Presenter: Send {
    /// `token` moved to `position`.
    fn place(&mut self, token: TokenId, position: Vec2);

    /// `token` is now drawn at `depth`.
    fn set_depth(&mut self, token: TokenId, depth: DepthKey);
}

/// Presenter that discards every update. Used for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn place(&mut self, _token: TokenId, _position: Vec2) {}

    fn set_depth(&mut self, _token: TokenId, _depth: DepthKey) {}
}
