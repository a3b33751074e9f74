//! CSV read, required-column validation and order grouping.

use std::collections::HashMap;
use std::path::Path;

use polars::prelude::{Column, CsvReadOptions, DataFrame, SerReader};

use crate::conf::{
    C_COL_LINEITEM_NAME, C_COL_ORDER_ID, C_COL_SHIPPING_CITY, C_COL_SHIPPING_COUNTRY,
    C_COL_SHIPPING_NAME, C_COL_SHIPPING_PHONE, C_COL_SHIPPING_PROVINCE, C_COL_SHIPPING_STREET,
    C_COL_SHIPPING_ZIP, TUP_REQUIRED_COLUMNS,
};
use crate::spec::{LoadOrdersError, SpecOrderGroup, SpecOrderRow};
use crate::util::derive_text_from_any_value;

/// Load an order export and group its rows by order identifier.
///
/// Groups keep the order in which each identifier first appears in the file.
/// Rows without an order identifier are dropped with a warning.
///
/// Returns [`LoadOrdersError`] for structural problems only: missing file,
/// unreadable CSV, or absent required columns.
pub fn load_order_groups<P>(file_orders: P) -> Result<Vec<SpecOrderGroup>, LoadOrdersError>
where
    P: AsRef<Path>,
{
    let l_rows = read_order_rows(file_orders)?;
    let l_groups = group_order_rows(l_rows);
    tracing::info!("Processing {} orders...", l_groups.len());
    Ok(l_groups)
}

/// Read all order rows from a CSV export, without grouping.
pub fn read_order_rows<P>(file_orders: P) -> Result<Vec<SpecOrderRow>, LoadOrdersError>
where
    P: AsRef<Path>,
{
    let path_file_orders = file_orders.as_ref();
    if !path_file_orders.is_file() {
        return Err(LoadOrdersError::InputNotFound {
            path: path_file_orders.to_path_buf(),
        });
    }

    let df_orders = read_csv_as_text(path_file_orders)?;
    let l_colnames: Vec<String> = df_orders
        .get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect();

    let l_missing = validate_required_columns(&l_colnames);
    if !l_missing.is_empty() {
        return Err(LoadOrdersError::MissingColumns {
            missing: l_missing,
            present: l_colnames,
        });
    }

    let col_order_id = select_column(&df_orders, path_file_orders, C_COL_ORDER_ID)?;
    let col_name = select_column(&df_orders, path_file_orders, C_COL_SHIPPING_NAME)?;
    let col_street = select_column(&df_orders, path_file_orders, C_COL_SHIPPING_STREET)?;
    let col_city = select_column(&df_orders, path_file_orders, C_COL_SHIPPING_CITY)?;
    let col_zip = select_column(&df_orders, path_file_orders, C_COL_SHIPPING_ZIP)?;
    let col_province = select_column(&df_orders, path_file_orders, C_COL_SHIPPING_PROVINCE)?;
    let col_country = select_column(&df_orders, path_file_orders, C_COL_SHIPPING_COUNTRY)?;
    let col_phone = select_column(&df_orders, path_file_orders, C_COL_SHIPPING_PHONE)?;
    let col_lineitem = select_column(&df_orders, path_file_orders, C_COL_LINEITEM_NAME)?;

    let read_cell = |col: &Column, n_idx_row: usize| -> Result<Option<String>, LoadOrdersError> {
        let value = col
            .get(n_idx_row)
            .map_err(|err| LoadOrdersError::ParseFailed {
                path: path_file_orders.to_path_buf(),
                message: format!("Failed to read cell at row {n_idx_row}: {err}"),
            })?;
        Ok(derive_text_from_any_value(value))
    };

    let mut l_rows = Vec::with_capacity(df_orders.height());
    let mut n_rows_without_id = 0usize;
    for n_idx_row in 0..df_orders.height() {
        let Some(order_id) = read_cell(col_order_id, n_idx_row)? else {
            n_rows_without_id += 1;
            continue;
        };
        l_rows.push(SpecOrderRow {
            order_id,
            shipping_name: read_cell(col_name, n_idx_row)?,
            shipping_street: read_cell(col_street, n_idx_row)?,
            shipping_city: read_cell(col_city, n_idx_row)?,
            shipping_zip: read_cell(col_zip, n_idx_row)?,
            shipping_province: read_cell(col_province, n_idx_row)?,
            shipping_country: read_cell(col_country, n_idx_row)?,
            shipping_phone: read_cell(col_phone, n_idx_row)?,
            lineitem_name: read_cell(col_lineitem, n_idx_row)?,
        });
    }

    if n_rows_without_id > 0 {
        tracing::warn!(
            "Skipped {n_rows_without_id} row(s) without `{C_COL_ORDER_ID}` in {}",
            path_file_orders.display()
        );
    }
    tracing::debug!(
        "Read {} order rows from {}",
        l_rows.len(),
        path_file_orders.display()
    );
    Ok(l_rows)
}

/// Return the required columns missing from `columns_present`, in required order.
pub fn validate_required_columns(columns_present: &[String]) -> Vec<String> {
    TUP_REQUIRED_COLUMNS
        .iter()
        .filter(|c_required| !columns_present.iter().any(|c_name| c_name == *c_required))
        .map(|c_required| c_required.to_string())
        .collect()
}

/// Group rows by order identifier, preserving first-appearance order.
pub fn group_order_rows(rows: Vec<SpecOrderRow>) -> Vec<SpecOrderGroup> {
    let mut l_groups: Vec<SpecOrderGroup> = Vec::new();
    let mut dict_pos: HashMap<String, usize> = HashMap::new();

    for row in rows {
        match dict_pos.get(&row.order_id) {
            Some(n_idx) => l_groups[*n_idx].rows.push(row),
            None => {
                dict_pos.insert(row.order_id.clone(), l_groups.len());
                l_groups.push(SpecOrderGroup {
                    order_id: row.order_id.clone(),
                    rows: vec![row],
                });
            }
        }
    }

    l_groups
}

fn select_column<'a>(
    df_orders: &'a DataFrame,
    path_file_orders: &Path,
    name: &str,
) -> Result<&'a Column, LoadOrdersError> {
    df_orders
        .column(name)
        .map_err(|err| LoadOrdersError::ParseFailed {
            path: path_file_orders.to_path_buf(),
            message: err.to_string(),
        })
}

/// Read every column as text so numeric-looking fields keep their raw form.
fn read_csv_as_text(path_file_orders: &Path) -> Result<DataFrame, LoadOrdersError> {
    let derive_err = |err: polars::prelude::PolarsError| LoadOrdersError::ParseFailed {
        path: path_file_orders.to_path_buf(),
        message: err.to_string(),
    };

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path_file_orders.to_path_buf()))
        .map_err(derive_err)?
        .finish()
        .map_err(derive_err)
}
