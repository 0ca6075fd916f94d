//! Property-based checks of the watermark and the strict greater-than filter

use merger_lib::CellValue;
use merger_lib::test_utils::{make_table, serial_rows};
use merger_lib::watermark::{coerce_serial, filter_above, watermark};
use proptest::prelude::*;

const SERIAL: &str = "Serial_Number";

fn serial_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|n| CellValue::Number(n as f64)),
        (-1_000_000i64..1_000_000).prop_map(|n| CellValue::Text(n.to_string())),
        "[A-Za-z/ ]{0,6}".prop_map(CellValue::Text),
        Just(CellValue::Empty),
        Just(CellValue::Error("#N/A".to_string())),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000, ..ProptestConfig::default()
    })]

    #[test]
    fn test_watermark_is_max_of_numeric_values(serials in prop::collection::vec(serial_cell(), 0..40)) {
        let table = make_table(&[SERIAL, "Label"], serial_rows(&serials));
        let numeric: Vec<f64> = serials.iter().filter_map(coerce_serial).collect();

        let expected = numeric.iter().cloned().fold(None, |max: Option<f64>, v| {
            Some(max.map_or(v, |m| m.max(v)))
        });
        prop_assert_eq!(watermark(&table, SERIAL), expected);
    }

    #[test]
    fn test_filter_keeps_exactly_rows_above_in_order(
        serials in prop::collection::vec(serial_cell(), 0..40),
        mark in -1_000_000i64..1_000_000,
    ) {
        let table = make_table(&[SERIAL, "Label"], serial_rows(&serials));
        let accepted = filter_above(&table, SERIAL, Some(mark as f64));

        let expected: Vec<Vec<CellValue>> = table
            .rows
            .iter()
            .filter(|row| coerce_serial(&row[0]).is_some_and(|s| s > mark as f64))
            .cloned()
            .collect();
        prop_assert_eq!(&accepted.rows, &expected);

        for row in &accepted.rows {
            let serial = coerce_serial(&row[0]);
            prop_assert!(serial.is_some());
        }
    }

    #[test]
    fn test_non_numeric_never_passes(text in "[A-Za-z/]{1,8}", mark in -1000i64..1000) {
        prop_assume!(text.parse::<f64>().is_err());
        let table = make_table(&[SERIAL, "Label"], serial_rows(&[CellValue::Text(text)]));
        prop_assert!(filter_above(&table, SERIAL, Some(mark as f64)).is_empty());
    }

    #[test]
    fn test_all_at_or_below_watermark_adds_nothing(values in prop::collection::vec(-1000i64..1000, 1..30)) {
        let cells: Vec<CellValue> = values.iter().map(|v| CellValue::Number(*v as f64)).collect();
        let table = make_table(&[SERIAL, "Label"], serial_rows(&cells));
        let mark = watermark(&table, SERIAL);
        prop_assert!(filter_above(&table, SERIAL, mark).is_empty());
    }
}
