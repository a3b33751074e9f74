//! Order-export column names and shared sentinels.

/// Order identifier column (Shopify exports call it `Name`).
pub const C_COL_ORDER_ID: &str = "Name";
/// Receiver name column.
pub const C_COL_SHIPPING_NAME: &str = "Shipping Name";
/// Receiver street column. Also the guard field for address defaulting.
pub const C_COL_SHIPPING_STREET: &str = "Shipping Street";
/// Line-item name column.
pub const C_COL_LINEITEM_NAME: &str = "Lineitem name";
/// Receiver city column.
pub const C_COL_SHIPPING_CITY: &str = "Shipping City";
/// Receiver zip column.
pub const C_COL_SHIPPING_ZIP: &str = "Shipping Zip";
/// Receiver province column.
pub const C_COL_SHIPPING_PROVINCE: &str = "Shipping Province";
/// Receiver country column.
pub const C_COL_SHIPPING_COUNTRY: &str = "Shipping Country";
/// Receiver phone column.
pub const C_COL_SHIPPING_PHONE: &str = "Shipping Phone";

/// Columns that must be present in the export, in reporting order.
pub const TUP_REQUIRED_COLUMNS: [&str; 9] = [
    C_COL_ORDER_ID,
    C_COL_SHIPPING_NAME,
    C_COL_SHIPPING_STREET,
    C_COL_LINEITEM_NAME,
    C_COL_SHIPPING_CITY,
    C_COL_SHIPPING_ZIP,
    C_COL_SHIPPING_PROVINCE,
    C_COL_SHIPPING_COUNTRY,
    C_COL_SHIPPING_PHONE,
];

/// Text rendered in place of a missing address field.
pub const C_MISSING_SENTINEL: &str = "N/A";
