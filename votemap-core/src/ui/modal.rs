use super::{ScreenPoint, Size};

pub const DEFAULT_MODAL_SIZE: Size = Size::new(320.0, 200.0);

/// Top left corner of a modal that is shown next to `anchor`.
///
/// The modal opens to the bottom right of the anchor and flips
/// to the left or upwards if it would overflow the viewport.
/// The result is always clamped to the viewport. Along an axis
/// where the modal is larger than the viewport it is pinned to `0`.
/// Without an anchor the modal is centered.
pub fn modal_position(anchor: Option<ScreenPoint>, modal: Size, viewport: Size) -> ScreenPoint {
    let Some(anchor) = anchor else {
        return ScreenPoint::new(
            clamp_axis((viewport.width - modal.width) / 2.0, modal.width, viewport.width),
            clamp_axis((viewport.height - modal.height) / 2.0, modal.height, viewport.height),
        );
    };
    let mut x = anchor.x;
    let mut y = anchor.y;
    if x + modal.width > viewport.width {
        x -= modal.width;
    }
    if y + modal.height > viewport.height {
        y -= modal.height;
    }
    ScreenPoint::new(
        clamp_axis(x, modal.width, viewport.width),
        clamp_axis(y, modal.height, viewport.height),
    )
}

fn clamp_axis(pos: f64, extent: f64, available: f64) -> f64 {
    let max = available - extent;
    if max <= 0.0 || pos.is_nan() {
        return 0.0;
    }
    pos.clamp(0.0, max)
}
