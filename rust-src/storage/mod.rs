//! Storage layer for recorded health entries.

mod csv_store;

#[allow(unused_imports)]
pub use csv_store::{
    load_entries,
    save_entries,
    read_entries,
    write_entries,
    RecordStore,
    COLUMNS,
};
