//! Table grid scenarios: construction, merging and reopening existing tables.

use super::*;
use crate::common::TableWidth;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::tree::{DocumentTree, MemoryTree};

fn dxa(widths: &[i64]) -> Vec<TableWidth> {
    widths.iter().map(|&w| TableWidth::dxa(w)).collect()
}

fn new_table(widths: &[i64], rows: usize) -> (MemoryTree, Table) {
    let mut tree = MemoryTree::new();
    let body = tree.body().unwrap();
    let mut table = Table::insert(&mut tree, body, &dxa(widths)).unwrap();
    table.add_rows(&mut tree, rows).unwrap();
    (tree, table)
}

fn row_widths(tree: &MemoryTree, row: &TableRow) -> Vec<i64> {
    row.cells()
        .iter()
        .map(|c| c.width(tree).unwrap().value)
        .collect()
}

#[test]
fn test_three_column_merge_scenario() {
    let (mut tree, mut table) = new_table(&[1000, 2000, 3000], 1);
    let untouched = table.cell(0, 2).unwrap().node();

    table.merge_right(&mut tree, 0, 0, 1).unwrap();

    let row = table.row(0).unwrap();
    assert_eq!(row.cell_count(), 2);
    let first = row.cell(0).unwrap();
    assert_eq!(first.width(&tree).unwrap(), TableWidth::dxa(3000));
    assert_eq!(first.grid_span(&tree).unwrap(), 2);
    let second = row.cell(1).unwrap();
    assert_eq!(second.node(), untouched);
    assert_eq!(second.width(&tree).unwrap(), TableWidth::dxa(3000));
    assert_eq!(second.grid_span(&tree).unwrap(), 1);

    // The grid itself is unchanged
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.column_widths(), dxa(&[1000, 2000, 3000]).as_slice());
}

#[test]
fn test_four_column_merge_past_last_cell_fails() {
    let (mut tree, mut table) = new_table(&[500, 500, 500, 500], 1);
    let before = tree.to_xml(table.node()).unwrap();

    let err = table.merge_right(&mut tree, 0, 3, 1).unwrap_err();
    assert!(matches!(err, OoxmlError::OutOfRange { .. }));
    assert_eq!(tree.to_xml(table.node()).unwrap(), before);
    assert_eq!(table.row(0).unwrap().cell_count(), 4);
}

#[test]
fn test_merge_right_on_missing_row() {
    let (mut tree, mut table) = new_table(&[500, 500], 1);
    assert!(matches!(
        table.merge_right(&mut tree, 3, 0, 1),
        Err(OoxmlError::OutOfRange { what: "row index", index: 3, bound: 1 })
    ));
}

#[test]
fn test_merge_down_marks_origin_and_continuations() {
    let (mut tree, mut table) = new_table(&[1000, 1000, 1000], 4);

    table.merge_down(&mut tree, 0, 1, 2).unwrap();

    assert_eq!(
        table.cell(0, 1).unwrap().v_merge(&tree).unwrap(),
        Some(VMergeState::Restart)
    );
    for r in 1..=2 {
        assert_eq!(
            table.cell(r, 1).unwrap().v_merge(&tree).unwrap(),
            Some(VMergeState::Continue)
        );
    }
    assert_eq!(table.cell(3, 1).unwrap().v_merge(&tree).unwrap(), None);

    // Other columns untouched
    for r in 0..4 {
        for c in [0, 2] {
            assert_eq!(table.cell(r, c).unwrap().v_merge(&tree).unwrap(), None);
        }
        assert_eq!(table.row(r).unwrap().cell_count(), 3);
    }
}

#[test]
fn test_merge_down_validation_leaves_table_unchanged() {
    let (mut tree, mut table) = new_table(&[1000, 1000], 3);
    let before = tree.to_xml(table.node()).unwrap();

    assert!(matches!(
        table.merge_down(&mut tree, 0, 0, 0),
        Err(OoxmlError::InvalidArgument(_))
    ));
    assert!(matches!(
        table.merge_down(&mut tree, 1, 0, 2),
        Err(OoxmlError::OutOfRange { what: "last merged row index", index: 3, bound: 3 })
    ));
    assert!(matches!(
        table.merge_down(&mut tree, 5, 0, 1),
        Err(OoxmlError::OutOfRange { what: "row index", .. })
    ));
    assert!(matches!(
        table.merge_down(&mut tree, 0, 2, 1),
        Err(OoxmlError::OutOfRange { what: "cell index", .. })
    ));
    assert_eq!(tree.to_xml(table.node()).unwrap(), before);
}

#[test]
fn test_merge_down_huge_count_is_out_of_range() {
    let (mut tree, mut table) = new_table(&[1000, 1000], 3);
    let before = tree.to_xml(table.node()).unwrap();

    for row in 0..3 {
        assert!(matches!(
            table.merge_down(&mut tree, row, 0, usize::MAX),
            Err(OoxmlError::OutOfRange { what: "last merged row index", index: usize::MAX, bound: 3 })
        ));
    }
    assert_eq!(tree.to_xml(table.node()).unwrap(), before);
    assert_eq!(table.cell(1, 0).unwrap().v_merge(&tree).unwrap(), None);
}

#[test]
fn test_shorter_merge_down_trims_earlier_chain() {
    let (mut tree, mut table) = new_table(&[1000, 1000], 5);
    table.merge_down(&mut tree, 0, 1, 3).unwrap();
    table.merge_down(&mut tree, 0, 1, 1).unwrap();

    let states: Vec<_> = (0..5)
        .map(|r| table.cell(r, 1).unwrap().v_merge(&tree).unwrap())
        .collect();
    assert_eq!(
        states,
        vec![
            Some(VMergeState::Restart),
            Some(VMergeState::Continue),
            None,
            None,
            None,
        ]
    );
    for r in 0..5 {
        assert_eq!(table.cell(r, 0).unwrap().v_merge(&tree).unwrap(), None);
    }
}

#[test]
fn test_merge_down_keeps_separate_chain_below() {
    let (mut tree, mut table) = new_table(&[1000], 5);
    table.merge_down(&mut tree, 3, 0, 1).unwrap();
    table.merge_down(&mut tree, 0, 0, 1).unwrap();

    // Row 2 is unmerged, so the chain at rows 3-4 is not touched
    assert_eq!(table.cell(2, 0).unwrap().v_merge(&tree).unwrap(), None);
    assert_eq!(
        table.cell(3, 0).unwrap().v_merge(&tree).unwrap(),
        Some(VMergeState::Restart)
    );
    assert_eq!(
        table.cell(4, 0).unwrap().v_merge(&tree).unwrap(),
        Some(VMergeState::Continue)
    );
}

#[test]
fn test_merge_down_follows_grid_columns() {
    let (mut tree, mut table) = new_table(&[1000, 1000, 1000], 2);
    // Row 0: [A A][B]; row 1: [C][D][E]
    table.merge_right(&mut tree, 0, 0, 1).unwrap();

    // Cell B sits at grid column 2, which is physical index 2 in row 1
    table.merge_down(&mut tree, 0, 1, 1).unwrap();
    assert_eq!(
        table.cell(1, 2).unwrap().v_merge(&tree).unwrap(),
        Some(VMergeState::Continue)
    );
    assert_eq!(table.cell(1, 1).unwrap().v_merge(&tree).unwrap(), None);
    assert_eq!(table.cell(1, 0).unwrap().v_merge(&tree).unwrap(), None);
}

#[test]
fn test_merge_down_rejects_misaligned_rows() {
    let (mut tree, mut table) = new_table(&[1000, 1000, 1000], 2);
    // Row 1: [C C][E]
    table.merge_right(&mut tree, 1, 0, 1).unwrap();
    let before = tree.to_xml(table.node()).unwrap();

    // Row 0 cell 1 starts at grid column 1, covered by row 1's spanning cell
    assert!(matches!(
        table.merge_down(&mut tree, 0, 1, 1),
        Err(OoxmlError::InvalidArgument(_))
    ));
    assert_eq!(tree.to_xml(table.node()).unwrap(), before);
    assert_eq!(table.cell(0, 1).unwrap().v_merge(&tree).unwrap(), None);
}

#[test]
fn test_table_markup() {
    let (mut tree, mut table) = new_table(&[1000, 2000], 1);
    table
        .set_borders(&mut tree, &TableBorder::default())
        .unwrap()
        .set_width_percent(&mut tree, 100)
        .unwrap();
    table.cell_mut(0, 0).unwrap().set_text(&mut tree, "A & B").unwrap();

    let xml = tree.to_xml(table.node()).unwrap();
    assert!(xml.starts_with("<w:tbl><w:tblPr><w:tblW w:w=\"5000\" w:type=\"pct\"/><w:tblBorders>"));
    assert!(xml.contains(
        "<w:insideV w:val=\"single\" w:sz=\"4\" w:space=\"0\" w:color=\"000000\"/></w:tblBorders></w:tblPr>"
    ));
    assert!(xml.contains("<w:tblGrid><w:gridCol w:w=\"1000\"/><w:gridCol w:w=\"2000\"/></w:tblGrid>"));
    assert!(xml.contains("<w:t>A &amp; B</w:t>"));
    assert!(xml.ends_with("</w:tr></w:tbl>"));

    assert_eq!(table.width(&tree).unwrap(), TableWidth::percent(100));
    assert_eq!(
        table.border(&tree, BorderEdge::InsideH).unwrap(),
        Some(TableBorder::default())
    );
    assert!(table.set_width_percent(&mut tree, 0).is_err());
}

#[test]
fn test_open_existing_table_round_trip() {
    let (mut tree, mut table) = new_table(&[1000, 2000, 3000], 3);
    table.merge_right(&mut tree, 0, 1, 1).unwrap();
    table.merge_down(&mut tree, 0, 0, 2).unwrap();
    table.cell_mut(2, 2).unwrap().set_text(&mut tree, "tail").unwrap();

    let xml = tree.document_xml().unwrap();
    let mut reparsed = MemoryTree::from_xml(&xml).unwrap();
    let body = reparsed.body().unwrap();
    let tbl = reparsed.first_child_named(body, "w:tbl").unwrap().unwrap();
    let reopened = Table::open(&mut reparsed, tbl).unwrap();

    assert_eq!(reopened.column_widths(), dxa(&[1000, 2000, 3000]).as_slice());
    assert_eq!(reopened.row_count(), 3);
    let first = reopened.row(0).unwrap();
    assert_eq!(first.cell_count(), 2);
    assert_eq!(row_widths(&reparsed, first), vec![1000, 5000]);
    assert_eq!(first.cell(1).unwrap().grid_span(&reparsed).unwrap(), 2);
    assert_eq!(first.cell(1).unwrap().merge_right(), 1);
    assert_eq!(
        reopened.cell(0, 0).unwrap().v_merge(&reparsed).unwrap(),
        Some(VMergeState::Restart)
    );
    assert_eq!(
        reopened.cell(2, 0).unwrap().v_merge(&reparsed).unwrap(),
        Some(VMergeState::Continue)
    );
    assert_eq!(reopened.cell(2, 2).unwrap().text(&reparsed).unwrap(), "tail");

    // Nothing was padded, so the markup is unchanged
    assert_eq!(reparsed.document_xml().unwrap(), xml);
}

#[test]
fn test_open_pads_short_rows() {
    let xml = r#"<w:tbl>
  <w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr>
  <w:tblGrid><w:gridCol w:w="1200"/><w:gridCol w:w="2400"/></w:tblGrid>
  <w:tr><w:tc><w:p><w:r><w:t>only</w:t></w:r></w:p></w:tc></w:tr>
  <w:tr/>
</w:tbl>"#;
    let mut tree = MemoryTree::from_xml(xml).unwrap();
    let tbl = tree.root();
    let table = Table::open(&mut tree, tbl).unwrap();

    assert_eq!(table.row_count(), 2);
    let first = table.row(0).unwrap();
    assert_eq!(first.cell_count(), 2);
    assert_eq!(first.cell(0).unwrap().text(&tree).unwrap(), "only");
    // The existing cell had no width; the padded one takes its column's width
    assert_eq!(first.cell(0).unwrap().width(&tree).unwrap(), TableWidth::auto());
    assert_eq!(first.cell(1).unwrap().width(&tree).unwrap(), TableWidth::dxa(2400));
    assert_eq!(row_widths(&tree, table.row(1).unwrap()), vec![1200, 2400]);
}

#[test]
fn test_open_rejects_over_full_row_without_padding_earlier_rows() {
    let xml = r#"<w:tbl>
  <w:tblGrid><w:gridCol w:w="1200"/><w:gridCol w:w="2400"/></w:tblGrid>
  <w:tr><w:tc><w:p/></w:tc></w:tr>
  <w:tr><w:tc><w:tcPr><w:gridSpan w:val="3"/></w:tcPr><w:p/></w:tc></w:tr>
</w:tbl>"#;
    let mut tree = MemoryTree::from_xml(xml).unwrap();
    let tbl = tree.root();
    let before = tree.to_xml(tbl).unwrap();

    assert!(matches!(
        Table::open(&mut tree, tbl),
        Err(OoxmlError::InvalidFormat(_))
    ));
    assert_eq!(tree.to_xml(tbl).unwrap(), before);
    let first_row = tree.children_named(tbl, "w:tr").unwrap()[0];
    assert_eq!(tree.children_named(first_row, "w:tc").unwrap().len(), 1);
}

#[test]
fn test_open_rejects_malformed_tables() {
    let mut tree = MemoryTree::from_xml("<w:tbl><w:tr/></w:tbl>").unwrap();
    let root = tree.root();
    assert!(matches!(
        Table::open(&mut tree, root),
        Err(OoxmlError::InvalidFormat(_))
    ));

    let mut tree = MemoryTree::from_xml("<w:tbl><w:tblGrid/></w:tbl>").unwrap();
    let root = tree.root();
    assert!(matches!(
        Table::open(&mut tree, root),
        Err(OoxmlError::InvalidFormat(_))
    ));

    let mut tree = MemoryTree::new();
    let body = tree.body().unwrap();
    assert!(matches!(
        Table::open(&mut tree, body),
        Err(OoxmlError::InvalidFormat(_))
    ));
    assert!(matches!(
        Table::insert(&mut tree, body, &[]),
        Err(OoxmlError::InvalidArgument(_))
    ));
}

#[test]
fn test_with_layout() {
    let mut tree = MemoryTree::new();
    let body = tree.body().unwrap();
    let layout = TableLayout {
        rows: 3,
        header_rows: 1,
        width_percent: Some(80),
        header_shading: Some(Shading::fill("D9D9D9")),
        ..TableLayout::default()
    };

    let table = Table::with_layout(&mut tree, body, 4, &layout).unwrap();
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_widths(), dxa(&[2340, 2340, 2340, 2340]).as_slice());
    assert_eq!(table.width(&tree).unwrap(), TableWidth::percent(80));
    assert_eq!(
        table.border(&tree, BorderEdge::Top).unwrap(),
        Some(TableBorder::default())
    );

    let header = table.row(0).unwrap();
    assert!(header.is_header(&tree).unwrap());
    for cell in header.cells() {
        assert_eq!(cell.shading(&tree).unwrap(), Some(Shading::fill("D9D9D9")));
    }
    let body_row = table.row(1).unwrap();
    assert!(!body_row.is_header(&tree).unwrap());
    assert_eq!(body_row.cell(0).unwrap().shading(&tree).unwrap(), None);
}

#[test]
fn test_nested_table_in_cell() {
    let (mut tree, mut table) = new_table(&[4000, 4000], 1);
    let cell = table.cell_mut(0, 1).unwrap();
    let mut nested = cell.add_table(&mut tree, &dxa(&[2000, 2000])).unwrap();
    nested.add_row(&mut tree).unwrap();
    nested.merge_right(&mut tree, 0, 0, 1).unwrap();

    let outer_cell = table.cell(0, 1).unwrap();
    assert_eq!(tree.parent(nested.node()), Some(outer_cell.node()));
    // Outer table untouched by the nested merge
    assert_eq!(table.row(0).unwrap().cell_count(), 2);
    assert_eq!(nested.row(0).unwrap().cell_count(), 1);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn widths_strategy() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(1i64..10_000, 1..12)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_fresh_row_matches_grid(widths in widths_strategy()) {
            let (tree, table) = new_table(&widths, 1);
            let row = table.row(0).unwrap();
            prop_assert_eq!(row.cell_count(), widths.len());
            prop_assert_eq!(row_widths(&tree, row), widths);
        }

        #[test]
        fn prop_merge_right_conserves_width(
            widths in widths_strategy(),
            start in 0usize..12,
            count in 1usize..12,
        ) {
            let (mut tree, mut table) = new_table(&widths, 1);
            let before = tree.to_xml(table.node()).unwrap();
            let result = table.merge_right(&mut tree, 0, start, count);

            if start + count < widths.len() {
                let absorbed = result.unwrap();
                prop_assert_eq!(absorbed.len(), count);
                let row = table.row(0).unwrap();
                prop_assert_eq!(row.cell_count(), widths.len() - count);

                let expected: i64 = widths[start..=start + count].iter().sum();
                let survivor = row.cell(start).unwrap();
                prop_assert_eq!(survivor.width(&tree).unwrap(), TableWidth::dxa(expected));
                prop_assert_eq!(survivor.grid_span(&tree).unwrap(), count + 1);

                let total: i64 = row_widths(&tree, row).iter().sum();
                prop_assert_eq!(total, widths.iter().sum::<i64>());
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(tree.to_xml(table.node()).unwrap(), before);
                prop_assert_eq!(table.row(0).unwrap().cell_count(), widths.len());
            }
        }

        #[test]
        fn prop_bulk_shading_reaches_every_cell(
            widths in widths_strategy(),
            fill in "[0-9A-F]{6}",
        ) {
            let (mut tree, mut table) = new_table(&widths, 1);
            let shading = Shading::fill(&fill);
            table.row_mut(0).unwrap().set_shading(&mut tree, &shading).unwrap();
            for cell in table.row(0).unwrap().cells() {
                prop_assert_eq!(cell.shading(&tree).unwrap(), Some(shading.clone()));
            }
        }
    }
}
