use crate::collectors::{pvdisplay, sample};
use crate::config::PvdisplayConfig;
use crate::error::SourceError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Where the `pvdisplay` text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    File(PathBuf),
    Live,
    Sample,
}

impl InputSource {
    pub fn read(&self, cfg: &PvdisplayConfig) -> Result<String, SourceError> {
        match self {
            InputSource::File(path) => fs::read_to_string(path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => SourceError::FileNotFound(path.clone()),
                _ => SourceError::Read { path: path.clone(), source: e },
            }),
            InputSource::Live   => pvdisplay::run_pvdisplay(cfg),
            InputSource::Sample => Ok(sample::SAMPLE_PVDISPLAY.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            InputSource::File(path) => format!("file {}", path.display()),
            InputSource::Live       => "live system".to_string(),
            InputSource::Sample     => "built-in sample".to_string(),
        }
    }

    /// Default artifact file name, without extension.
    ///
    /// `data/pv.txt` → `lvm_segments_data_pv_txt`
    pub fn artifact_stem(&self) -> String {
        match self {
            InputSource::File(path) => {
                let flat: String = path.to_string_lossy()
                    .chars()
                    .map(|c| if c == '.' || c == '/' { '_' } else { c })
                    .collect();
                format!("lvm_segments_{}", flat)
            }
            InputSource::Live   => "lvm_segments_live".to_string(),
            InputSource::Sample => "lvm_segments_sample".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_stem_flattens_path() {
        let src = InputSource::File(PathBuf::from("./dumps/pv.out.txt"));
        assert_eq!(src.artifact_stem(), "lvm_segments___dumps_pv_out_txt");
        assert_eq!(InputSource::Live.artifact_stem(), "lvm_segments_live");
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let src = InputSource::File(PathBuf::from("/nonexistent/lvmviz/pv.txt"));
        match src.read(&PvdisplayConfig::default()) {
            Err(SourceError::FileNotFound(p)) => assert_eq!(p, PathBuf::from("/nonexistent/lvmviz/pv.txt")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn sample_needs_no_system_access() {
        let text = InputSource::Sample.read(&PvdisplayConfig::default()).unwrap();
        assert!(text.contains("--- Physical Segments ---"));
    }
}
