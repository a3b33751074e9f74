//! Pure derivation of label content from one order group.

use std::collections::HashMap;

use shiplabel_io_orders::{C_MISSING_SENTINEL, SpecOrderGroup};

use crate::spec::{SpecItemCount, SpecLabelDocument, SpecLabelLayout, SpecReceiverAddress};
use crate::util::strip_float_suffix;

/// Build the label content for `group`.
///
/// The item table keeps first-seen order and is cut at
/// `layout.n_items_max` rows; `total_items` still counts every item.
pub fn render_label(group: &SpecOrderGroup, layout: &SpecLabelLayout) -> SpecLabelDocument {
    let l_tally = derive_item_tally(group);
    let n_total_items = l_tally.iter().map(|item| item.quantity).sum();

    SpecLabelDocument {
        order_id: group.order_id.clone(),
        title: layout.title.clone(),
        sender_lines: layout.sender_lines.clone(),
        receiver: derive_receiver_address(group),
        total_items: n_total_items,
        items: l_tally.into_iter().take(layout.n_items_max).collect(),
    }
}

/// Derive the receiver block from the first row of `group`.
///
/// The name is checked on its own. Street, city, zip, province, country and
/// phone all share the street field as their missing-check: with no street
/// every one of them is `N/A`, with a street each takes its own raw value
/// (empty when that cell is itself missing). Zip and phone then lose a
/// trailing `.0`.
pub fn derive_receiver_address(group: &SpecOrderGroup) -> SpecReceiverAddress {
    let Some(row) = group.row_first() else {
        return derive_sentinel_address();
    };

    let name = row
        .shipping_name
        .clone()
        .unwrap_or_else(|| C_MISSING_SENTINEL.to_string());

    // Guard field: street decides for the whole address, not each field for itself.
    let if_has_street = row.shipping_street.is_some();
    let take = |value: &Option<String>| -> String {
        if if_has_street {
            value.clone().unwrap_or_default()
        } else {
            C_MISSING_SENTINEL.to_string()
        }
    };

    SpecReceiverAddress {
        name,
        street: take(&row.shipping_street),
        city: take(&row.shipping_city),
        zip: strip_float_suffix(&take(&row.shipping_zip)),
        province: take(&row.shipping_province),
        country: take(&row.shipping_country),
        phone: strip_float_suffix(&take(&row.shipping_phone)),
    }
}

/// Count rows per line-item name in first-seen order, skipping missing names.
pub fn derive_item_tally(group: &SpecOrderGroup) -> Vec<SpecItemCount> {
    let mut l_tally: Vec<SpecItemCount> = Vec::new();
    let mut dict_pos: HashMap<&str, usize> = HashMap::new();

    for row in &group.rows {
        let Some(name) = row.lineitem_name.as_deref() else {
            continue;
        };
        match dict_pos.get(name) {
            Some(n_idx) => l_tally[*n_idx].quantity += 1,
            None => {
                dict_pos.insert(name, l_tally.len());
                l_tally.push(SpecItemCount {
                    name: name.to_string(),
                    quantity: 1,
                });
            }
        }
    }

    l_tally
}

fn derive_sentinel_address() -> SpecReceiverAddress {
    SpecReceiverAddress {
        name: C_MISSING_SENTINEL.to_string(),
        street: C_MISSING_SENTINEL.to_string(),
        city: C_MISSING_SENTINEL.to_string(),
        zip: C_MISSING_SENTINEL.to_string(),
        province: C_MISSING_SENTINEL.to_string(),
        country: C_MISSING_SENTINEL.to_string(),
        phone: C_MISSING_SENTINEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use shiplabel_io_orders::{SpecOrderGroup, SpecOrderRow};

    use super::{derive_item_tally, derive_receiver_address, render_label};
    use crate::spec::SpecLabelLayout;

    fn row_full(order_id: &str, item: Option<&str>) -> SpecOrderRow {
        SpecOrderRow {
            order_id: order_id.to_string(),
            shipping_name: Some("Ann Rao".to_string()),
            shipping_street: Some("12 Lake Rd".to_string()),
            shipping_city: Some("Bengaluru".to_string()),
            shipping_zip: Some("560037.0".to_string()),
            shipping_province: Some("Karnataka".to_string()),
            shipping_country: Some("IN".to_string()),
            shipping_phone: Some("8904620890.0".to_string()),
            lineitem_name: item.map(ToString::to_string),
        }
    }

    fn group(order_id: &str, rows: Vec<SpecOrderRow>) -> SpecOrderGroup {
        SpecOrderGroup {
            order_id: order_id.to_string(),
            rows,
        }
    }

    #[test]
    fn receiver_strips_float_suffix_from_zip_and_phone() {
        let address = derive_receiver_address(&group("#1", vec![row_full("#1", Some("x"))]));
        assert_eq!(address.zip, "560037");
        assert_eq!(address.phone, "8904620890");
        assert_eq!(address.city, "Bengaluru");
        assert_eq!(
            address.to_lines(),
            vec![
                "Ann Rao".to_string(),
                "12 Lake Rd".to_string(),
                "Bengaluru, 560037".to_string(),
                "Karnataka,IN".to_string(),
                "Phone:8904620890".to_string(),
            ]
        );
    }

    #[test]
    fn receiver_missing_street_defaults_whole_address() {
        let mut row = row_full("#1", Some("x"));
        row.shipping_street = None;
        let address = derive_receiver_address(&group("#1", vec![row]));

        assert_eq!(address.name, "Ann Rao");
        for c_value in [
            &address.street,
            &address.city,
            &address.zip,
            &address.province,
            &address.country,
            &address.phone,
        ] {
            assert_eq!(c_value, "N/A");
        }
    }

    #[test]
    fn receiver_with_street_keeps_own_missing_values() {
        let mut row = row_full("#1", Some("x"));
        row.shipping_city = None;
        row.shipping_name = None;
        let address = derive_receiver_address(&group("#1", vec![row]));

        assert_eq!(address.name, "N/A");
        assert_eq!(address.city, "");
        assert_eq!(address.street, "12 Lake Rd");
    }

    #[test]
    fn receiver_uses_first_row_only() {
        let mut row_second = row_full("#1", Some("y"));
        row_second.shipping_city = Some("Mysuru".to_string());
        let address = derive_receiver_address(&group(
            "#1",
            vec![row_full("#1", Some("x")), row_second],
        ));
        assert_eq!(address.city, "Bengaluru");
    }

    #[test]
    fn item_tally_sums_to_rows_with_names() {
        let grp = group(
            "#1",
            vec![
                row_full("#1", Some("b")),
                row_full("#1", None),
                row_full("#1", Some("a")),
                row_full("#1", Some("b")),
            ],
        );
        let l_tally = derive_item_tally(&grp);

        assert_eq!(l_tally.len(), 2);
        assert_eq!(l_tally[0].name, "b");
        assert_eq!(l_tally[0].quantity, 2);
        assert_eq!(l_tally[1].name, "a");
        let n_sum: usize = l_tally.iter().map(|item| item.quantity).sum();
        assert_eq!(n_sum, grp.count_items());
    }

    #[test]
    fn render_label_truncates_items_but_counts_all() {
        let l_rows = ["p", "q", "r", "s", "t", "u", "p"]
            .iter()
            .map(|c_item| row_full("#A", Some(c_item)))
            .collect();
        let doc = render_label(&group("#A", l_rows), &SpecLabelLayout::default());

        let l_names: Vec<&str> = doc.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(l_names, vec!["p", "q", "r", "s", "t"]);
        assert_eq!(doc.items[0].quantity, 2);
        assert_eq!(doc.total_items, 7);
        assert_eq!(doc.sender_lines.len(), 5);
    }
}
