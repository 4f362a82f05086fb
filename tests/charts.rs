use lvmviz::chart::{html, svg, ChartData, ChartOptions, SegmentOrder};
use lvmviz::collectors::pvdisplay::parse_pvdisplay;
use lvmviz::collectors::sample::SAMPLE_PVDISPLAY;
use lvmviz::util::palette::ColorMap;
use std::fs;

fn sample_chart(opts: &ChartOptions) -> ChartData {
    let model = parse_pvdisplay(SAMPLE_PVDISPLAY);
    ChartData::build(&model, &ColorMap::with_defaults(&model), opts)
}

#[test]
fn writes_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lvm_segments_sample.svg");
    svg::write(&sample_chart(&ChartOptions::default()), &path).unwrap();

    let doc = fs::read_to_string(&path).unwrap();
    assert!(doc.contains("Space Usage by PV"));
    assert!(doc.contains("Detailed Segments Distribution"));
    for lv in ["root", "swap", "home", "media", "backup"] {
        assert!(doc.contains(&format!(">{}</text>", lv)), "legend missing {}", lv);
    }
}

#[test]
fn writes_html_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.html");
    html::write(&sample_chart(&ChartOptions::default()), &path).unwrap();

    let doc = fs::read_to_string(&path).unwrap();
    assert!(doc.starts_with("<!DOCTYPE html>"));
    assert!(doc.contains("d3.v7.min.js"));
    assert!(doc.contains(r#""lv":"FREE""#));
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.svg");
    let err = svg::write(&sample_chart(&ChartOptions::default()), &path).unwrap_err();
    assert!(format!("{:#}", err).contains("writing"));
}

#[test]
fn segment_order_is_a_presentation_choice() {
    let text = "PV Name /dev/sda\n--- Physical Segments ---\n\
                Physical extent 100 to 199:\nFREE\n\
                Physical extent 0 to 99:\nLogical volume /dev/vg/root\n";
    let model = parse_pvdisplay(text);
    let colors = ColorMap::with_defaults(&model);

    // the model keeps parse order either way
    assert_eq!(model.get("/dev/sda").unwrap().segments[0].start, 100);

    let sorted = ChartData::build(&model, &colors, &ChartOptions::default());
    assert_eq!(sorted.timeline[0].slices[0].lv, "root");

    let opts = ChartOptions { segment_order: SegmentOrder::Parse, ..ChartOptions::default() };
    let listed = ChartData::build(&model, &colors, &opts);
    assert_eq!(listed.timeline[0].slices[0].lv, "FREE");
}
