pub mod dataset;
pub mod lock;
pub mod table;
pub mod target;

pub use dataset::{read_table, write_table, AppendReceipt, Dataset};
pub use lock::PathLocks;
pub use table::Table;
pub use target::{confine, dataset_family, filename_timestamp, resolve_target, stamped_path, ResolvedTarget};
