//! End-to-end layout checks over whole documents.

use chrono::NaiveDate;
use swimlane_engine::{
    Epic, LayoutConstants, PackOrder, Swimlane, TimelineDocument, TimelineModel, TimelineWindow,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn assert_lane_invariants(model: &TimelineModel) {
    let layout = model.layout();
    for (lane, geometry) in model.lanes().iter().zip(&layout.lanes) {
        // Same-row items never overlap.
        for (i, a) in lane.items.iter().enumerate() {
            for (j, b) in lane.items.iter().enumerate().skip(i + 1) {
                if geometry.items[i].row == geometry.items[j].row {
                    assert!(
                        !a.interval().overlaps(&b.interval()),
                        "{}: {} and {} overlap in row {}",
                        lane.name,
                        a.label,
                        b.label,
                        geometry.items[i].row
                    );
                }
            }
        }

        // Rows are 0..row_count with no gaps.
        if !lane.items.is_empty() {
            let mut rows: Vec<usize> = geometry.items.iter().map(|item| item.row).collect();
            rows.sort_unstable();
            rows.dedup();
            assert_eq!(rows, (0..geometry.row_count).collect::<Vec<_>>());
        }

        for item in &geometry.items {
            let left = item.left_percent.value();
            assert!((0.0..=100.0).contains(&left));
            assert!(item.width_percent.value() >= 0.0);
        }
    }
}

#[test]
fn sample_document_layout() {
    let model = TimelineDocument::sample().into_model();
    let layout = model.layout();

    let heights: Vec<u32> = layout.lanes.iter().map(|l| l.height_px).collect();
    assert_eq!(heights, vec![150, 80, 80, 80, 80, 150, 80]);
    assert_eq!(layout.total_height_px, 700);

    let ecomm_rows: Vec<usize> = layout.lanes[0].items.iter().map(|i| i.row).collect();
    assert_eq!(ecomm_rows, vec![0, 1, 0]);

    assert_lane_invariants(&model);
}

#[test]
fn sample_document_by_start_keeps_invariants() {
    let mut doc = TimelineDocument::sample();
    doc.pack_order = PackOrder::ByStart;
    assert_lane_invariants(&doc.into_model());
}

#[test]
fn reference_geometry() {
    let window = TimelineWindow::new(date(2023, 1, 1), date(2023, 12, 31)).unwrap();
    let lane = Swimlane::new("Reference")
        .with_item(Epic::new("January", date(2023, 1, 1), date(2023, 2, 1), "blue"))
        .with_item(Epic::new("Summer", date(2023, 7, 1), date(2023, 8, 31), "blue"))
        .with_item(Epic::new("Overlap", date(2023, 1, 15), date(2023, 7, 15), "blue"))
        .with_item(Epic::new("Third", date(2023, 1, 20), date(2023, 7, 20), "blue"));
    let model = TimelineModel::new(window, LayoutConstants::new(60, 10, 10).unwrap(), vec![lane]);
    let layout = model.layout();
    let items = &layout.lanes[0].items;

    assert_eq!(items[0].width_percent.to_string(), "8.49%");
    assert_eq!(items[1].left_percent.to_string(), "49.59%");
    assert_eq!(layout.lanes[0].row_count, 3);
    assert_eq!(layout.lanes[0].height_px, 220);
    assert_eq!(items[2].top_px, 80);
    assert_eq!(items[3].top_px, 150);

    assert_lane_invariants(&model);
}

#[test]
fn dense_lane_keeps_invariants() {
    let window = TimelineWindow::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
    let mut lane = Swimlane::new("Dense");
    for i in 0..60u32 {
        let start = date(2024, 1, 1) + chrono::Days::new(u64::from((i * 37) % 300));
        let end = start + chrono::Days::new(u64::from(5 + (i * 13) % 40));
        lane.items.push(Epic::new(format!("e{i}"), start, end, "green"));
    }
    for order in [PackOrder::Insertion, PackOrder::ByStart] {
        let model =
            TimelineModel::new(window, LayoutConstants::default(), vec![lane.clone()]).with_pack_order(order);
        assert_lane_invariants(&model);
    }
}
