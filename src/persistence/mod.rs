pub mod files;
pub mod snapshot;
pub mod store;

pub use files::{atomic_write, config_file, ensure_flow_dir, get_flow_dir, init_local_flow, read_file, store_file};
pub use snapshot::{
    focus_key, load_focus_buckets, load_tasks, save_focus_bucket, save_tasks, TasksSource,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};
