// Delta representation and ordered collections.
//
// - `span`: a classified, priced changed-byte range
// - `order`: priority and start-offset ordering strategies
// - `list`: the sorted owning collection, aggregates and split recovery

pub mod list;
pub mod order;
pub mod span;

pub use list::{DeltaList, PriorityList, StartList, Verbosity};
pub use order::{DeltaOrder, PriorityOrder, StartOrder};
pub use span::{Delta, DeltaKind, changed_pixels};
