pub mod bins1d;
pub mod bins2d;
pub mod common;
pub mod points;

pub use bins1d::{bin_tooltip, reduce_bins_1d, BinContentKind, DrawBin};
pub use bins2d::{cell_tooltip, reduce_bins_2d, DrawCell};
pub use common::{group_by_pixel, pick_extremum, EnvelopePicker, PixelGroup, MERGE_DISTANCE_PX};
pub use points::reduce_points;
