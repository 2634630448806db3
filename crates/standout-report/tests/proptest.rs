//! Property-based tests for binding and rendering using proptest.

use proptest::prelude::*;
use standout_report::{Cell, HtmlRenderer, RowBinder, TableRenderer};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct Item {
    label: String,
    qty: i32,
    price: f64,
}

fn item_strategy() -> impl Strategy<Value = Item> {
    ("[a-z<>&\" ]{0,12}", any::<i32>(), any::<f64>())
        .prop_map(|(label, qty, price)| Item { label, qty, price })
}

fn binder_with(columns: usize) -> RowBinder<Item> {
    let mut binder = RowBinder::new();
    for i in 0..columns {
        let title = format!("C{}", i);
        let registered = match i % 3 {
            0 => binder.column(title, |r: &Item| r.label.clone()),
            1 => binder.column(title, |r: &Item| r.qty),
            _ => binder.column(title, |r: &Item| r.price),
        };
        registered.unwrap();
    }
    binder
}

fn collect(binder: &RowBinder<Item>, items: &[Item]) -> Vec<Vec<Cell>> {
    binder.rows(items).map(|row| row.collect()).collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Every row has exactly one cell per column, in column order.
    #[test]
    fn rows_are_rectangular(
        items in prop::collection::vec(item_strategy(), 0..20),
        columns in 0usize..8,
    ) {
        let binder = binder_with(columns);
        let rows = collect(&binder, &items);

        prop_assert_eq!(rows.len(), items.len());
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.len(), columns);
            for (j, cell) in row.iter().enumerate() {
                prop_assert_eq!(cell.row(), i);
                prop_assert_eq!(cell.column(), j);
            }
        }
    }

    /// The HTML body has N rows of M cells.
    #[test]
    fn html_has_n_rows_of_m_cells(
        items in prop::collection::vec(item_strategy(), 0..10),
        columns in 1usize..6,
    ) {
        let binder = binder_with(columns);
        let html = HtmlRenderer::new().render_to_string(&binder, &items).unwrap();

        prop_assert_eq!(html.lines().filter(|l| l.starts_with("<th>") || l.starts_with("<th ")).count(), columns);
        prop_assert_eq!(html.lines().filter(|l| *l == "<tr>").count(), items.len());
        prop_assert_eq!(
            html.lines().filter(|l| l.starts_with("<td")).count(),
            items.len() * columns
        );
    }

    /// Failing one (row, column) pair flags only that cell.
    #[test]
    fn extraction_failure_is_isolated(
        items in prop::collection::vec(item_strategy(), 1..15),
        pick in any::<prop::sample::Index>(),
    ) {
        let bad = pick.index(items.len());
        let bad_label = items[bad].label.clone();
        let bad_qty = items[bad].qty;

        let mut binder = binder_with(2);
        binder.try_column("Check", move |r: &Item| {
            if r.label == bad_label && r.qty == bad_qty {
                Err("rejected")
            } else {
                Ok(1u8)
            }
        }).unwrap();

        let rows = collect(&binder, &items);
        prop_assert_eq!(rows.len(), items.len());
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.len(), 3);
            prop_assert!(!row[0].is_error());
            prop_assert!(row[1].error().is_none());
            let same = items[i].label == items[bad].label && items[i].qty == items[bad].qty;
            prop_assert_eq!(row[2].error().is_some(), same);
        }
    }

    /// Float cells: NaN is null, MAX is error, negatives are flagged, and
    /// nothing else is null.
    #[test]
    fn float_sentinel_law(v in any::<f64>()) {
        let mut binder = RowBinder::<f64>::new();
        binder.column("V", |v: &f64| *v).unwrap();
        let cell = binder.cell(&v, 0, 0).unwrap();

        prop_assert_eq!(cell.is_null(), v.is_nan() || v == f64::MAX);
        prop_assert_eq!(cell.is_error(), v == f64::MAX);
        prop_assert_eq!(cell.is_negative(), v < 0.0);
        prop_assert_eq!(cell.display().is_some(), !v.is_nan() && v != f64::MAX);
    }

    /// Integer cells: MIN is null, MAX is error, display is never the raw sentinel.
    #[test]
    fn int_sentinel_law(v in any::<i32>()) {
        let mut binder = RowBinder::<i32>::new();
        binder.column("V", |v: &i32| *v).unwrap();
        let cell = binder.cell(&v, 0, 0).unwrap();

        prop_assert_eq!(cell.is_null(), v == i32::MIN || v == i32::MAX);
        prop_assert_eq!(cell.is_error(), v == i32::MAX);
        if cell.is_null() {
            prop_assert!(cell.display().is_none());
        } else {
            let digits: String = cell.display().unwrap().chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(digits, v.to_string());
        }
    }

    /// Error messages never exceed 80 display columns.
    #[test]
    fn error_messages_are_truncated(msg in "[a-zA-Z0-9 \\n\\t日本語]{0,300}") {
        let cell = Cell::failed(&msg);
        let shown = cell.error().unwrap();
        prop_assert!(unicode_width::UnicodeWidthStr::width(shown) <= 80);
        prop_assert!(!shown.contains('\n'));
    }
}
