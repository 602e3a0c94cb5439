use indexmap::IndexMap;
use pretty_assertions::assert_eq;

use jsys_bcsv::{calc_hash, from_bytes, to_bytes, Column, FieldType, NameTable, Table, Value};

fn effect_schema() -> Vec<Column> {
    vec![
        Column::new("GroupName", FieldType::StringOffset),
        Column::new("StartFrame", FieldType::Long),
        Column::new("ScaleValue", FieldType::Float),
        Column::new("DrawOrder", FieldType::StringOffset),
    ]
}

#[test]
fn write_then_read_preserves_cells() {
    let mut table = Table::new(effect_schema());
    table
        .push_row(vec![
            Value::String("Kuribo".into()),
            Value::Int(-30),
            Value::Float(1.5),
            Value::String("3D".into()),
        ])
        .unwrap();
    table
        .push_row(vec![
            Value::String("Patakuri".into()),
            Value::Int(0),
            Value::Float(1.0),
            Value::String("".into()),
        ])
        .unwrap();

    let bytes = to_bytes(&table).unwrap();
    assert_eq!(bytes.len() % 32, 0);

    let decoded = from_bytes(&bytes, &NameTable::new()).unwrap();
    assert_eq!(decoded.columns(), table.columns());
    assert_eq!(decoded.rows(), table.rows());
}

#[test]
fn reencode_is_a_fixpoint() {
    let mut table = Table::new(effect_schema());
    table
        .push_row(vec![
            Value::String("Dossun".into()),
            Value::Int(12),
            Value::Float(0.25),
            Value::String("INDIRECT".into()),
        ])
        .unwrap();

    let first = to_bytes(&table).unwrap();
    let second = to_bytes(&from_bytes(&first, &NameTable::new()).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_hash_roundtrips_as_hex_label() {
    let mystery = Column {
        hash: 0xDEAD_BEEF,
        label: "_0xdeadbeef".to_owned(),
        ..Column::new("_0xdeadbeef", FieldType::Long)
    };
    assert_eq!(mystery.hash, 0xDEAD_BEEF);

    let mut table = Table::new(vec![mystery]);
    table.push_row(vec![Value::Int(42)]).unwrap();

    let bytes = to_bytes(&table).unwrap();
    let decoded = from_bytes(&bytes, &NameTable::new()).unwrap();
    assert_eq!(decoded.columns()[0].label, "_0xdeadbeef");
    assert_eq!(decoded.columns()[0].hash, 0xDEAD_BEEF);
    assert_eq!(decoded.get(0, "_0xdeadbeef"), Some(&Value::Int(42)));

    let again = to_bytes(&decoded).unwrap();
    assert_eq!(bytes, again);
}

#[test]
fn bit_packing_roundtrips_across_windows() {
    // Disjoint windows of one Long word, including a signed mid-word window.
    let windows = [(0x0000_00FFu32, 0u8), (0x000F_FF00, 8), (0xFFF0_0000, 20)];
    let values = [
        [0i32, 1, -1],
        [127, -2048, 2047],
        [-128, 100, -100],
    ];

    for row_values in values {
        // All three columns share row offset 0 through their disjoint masks.
        let columns: Vec<Column> = windows
            .iter()
            .enumerate()
            .map(|(i, (mask, shift))| Column {
                mask: *mask,
                shift: *shift,
                ..Column::new(&format!("w{i}"), FieldType::Long)
            })
            .collect();

        let mut table = Table::with_layout(columns);
        table
            .push_row(row_values.iter().map(|v| Value::Int(*v)).collect())
            .unwrap();

        let bytes = to_bytes(&table).unwrap();
        let decoded = from_bytes(&bytes, &NameTable::new()).unwrap();
        for (i, v) in row_values.iter().enumerate() {
            assert_eq!(decoded.get(0, &format!("w{i}")), Some(&Value::Int(*v)));
        }
    }
}

#[test]
fn row_map_resolves_columns_by_label() {
    let mut table = Table::new(effect_schema());
    let mut row = IndexMap::new();
    row.insert("DrawOrder".to_owned(), Value::String("2D".into()));
    row.insert("GroupName".to_owned(), Value::String("Teresa".into()));
    row.insert("StartFrame".to_owned(), Value::Int(0));
    row.insert("ScaleValue".to_owned(), Value::Float(1.0));
    table.push_row_map(row).unwrap();

    let bytes = to_bytes(&table).unwrap();
    let decoded = from_bytes(&bytes, &NameTable::new()).unwrap();
    assert_eq!(
        decoded.get(0, "GroupName"),
        Some(&Value::String("Teresa".into()))
    );
    assert_eq!(decoded.get(0, "DrawOrder"), Some(&Value::String("2D".into())));
}

#[test]
fn known_hash_constants_match_wire() {
    let table = Table::new(vec![Column::new("EffectName", FieldType::StringOffset)]);
    let bytes = to_bytes(&table).unwrap();
    assert_eq!(&bytes[0x10..0x14], calc_hash("EffectName").to_be_bytes().as_slice());
}
