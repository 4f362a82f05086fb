use crate::models::allocation::AllocationMap;
use crate::util::palette::ColorMap;
use crate::util::summary::Summary;
use serde_json::{json, Value};

/// One-shot JSON document of the parsed model, colors and summary.
pub fn build(map: &AllocationMap, summary: &Summary, colors: &ColorMap, source: &str) -> Value {
    let color_list: Vec<Value> = colors.entries()
        .map(|(owner, c)| json!({ "owner": owner, "free": owner.is_free(), "color": c }))
        .collect();

    json!({
        "lvmviz_version":   env!("CARGO_PKG_VERSION"),
        "timestamp":        chrono::Local::now().to_rfc3339(),
        "source":           source,
        "physical_volumes": map,
        "colors":           color_list,
        "summary":          summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::{pvdisplay::parse_pvdisplay, sample::SAMPLE_PVDISPLAY};

    #[test]
    fn snapshot_shape() {
        let map = parse_pvdisplay(SAMPLE_PVDISPLAY);
        let v = build(&map, &Summary::from_model(&map), &ColorMap::with_defaults(&map), "sample");

        let sda = &v["physical_volumes"]["/dev/sda2"];
        assert_eq!(sda["vg_name"], "vg_system");
        assert_eq!(sda["segments"][0]["owner"], "root");
        assert_eq!(sda["segments"][0]["logical_extents"][1], 8191);
        assert_eq!(sda["segments"][3]["owner"], "FREE");
        let free: Vec<&Value> = v["colors"].as_array().unwrap().iter()
            .filter(|c| c["free"] == true)
            .collect();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0]["owner"], "FREE");
        assert_eq!(free[0]["color"], "#E8E8E8");
        assert_eq!(v["summary"]["pvs"].as_array().unwrap().len(), 3);
    }
}
