pub mod group_set;
pub mod input;
pub mod row;
pub mod scale;
pub mod ticks;
pub mod types;

pub use group_set::GroupSet;
pub use input::{ForestRecord, ForestTable};
pub use row::{ConfidenceInterval, Row, RowModel, RowModelOptions, RowRole};
pub use scale::LinearScale;
pub use ticks::{MAX_TICK_BINS, format_tick_value, max_n_ticks};
pub use types::{AxisLimits, Viewport};
