//! `shiplabel_io_orders` v1:
//! Order-export loader kernel.
//!
//! Modules:
//! - `conf`   : column names and sentinels
//! - `spec`   : row/group models and errors
//! - `loader` : CSV read, column validation and grouping
//! - `util`   : pure cell helpers
pub mod conf;
pub mod loader;
pub mod spec;
mod util;

pub use conf::{
    C_COL_LINEITEM_NAME, C_COL_ORDER_ID, C_COL_SHIPPING_CITY, C_COL_SHIPPING_COUNTRY,
    C_COL_SHIPPING_NAME, C_COL_SHIPPING_PHONE, C_COL_SHIPPING_PROVINCE, C_COL_SHIPPING_STREET,
    C_COL_SHIPPING_ZIP, C_MISSING_SENTINEL, TUP_REQUIRED_COLUMNS,
};
pub use loader::{group_order_rows, load_order_groups, read_order_rows, validate_required_columns};
pub use spec::{LoadOrdersError, SpecOrderGroup, SpecOrderRow};
