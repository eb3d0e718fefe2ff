use crate::image::Rect;
use crate::MosaicParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct MosaicToolConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    /// Region to process; the whole image when absent
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub params: MosaicParams,
    pub output: MosaicOutputConfig,
    /// Render through the preview path and save only the processed rect
    #[serde(default)]
    pub preview: bool,
}

#[derive(Debug, Deserialize)]
pub struct MosaicOutputConfig {
    pub image: PathBuf,
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct GradientDumpConfig {
    #[serde(rename = "input")]
    pub input: PathBuf,
    #[serde(default)]
    pub rect: Option<Rect>,
    #[serde(default)]
    pub params: MosaicParams,
    pub output_dir: PathBuf,
}

impl MosaicToolConfig {
    pub fn rect_or_full(&self, width: usize, height: usize) -> Rect {
        self.rect.unwrap_or(Rect::new(0, 0, width, height))
    }
}

pub fn load_config(path: &Path) -> Result<MosaicToolConfig, String> {
    read_json(path)
}

pub fn load_gradient_config(path: &Path) -> Result<GradientDumpConfig, String> {
    read_json(path)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TilingKind;

    #[test]
    fn minimal_config_uses_default_params() {
        let cfg: MosaicToolConfig = serde_json::from_str(
            r#"{"input": "in.png", "output": {"image": "out.png"}}"#,
        )
        .expect("parses");
        assert_eq!(cfg.params, MosaicParams::default());
        assert!(!cfg.preview);
        assert_eq!(cfg.rect_or_full(30, 20), Rect::new(0, 0, 30, 20));
    }

    #[test]
    fn explicit_rect_and_params() {
        let cfg: MosaicToolConfig = serde_json::from_str(
            r#"{
                "input": "in.png",
                "rect": {"x": 4, "y": 5, "w": 10, "h": 12},
                "params": {"tiling": "octagons", "seed": 42},
                "output": {"image": "out.png", "report_json": "out/report.json"},
                "preview": true
            }"#,
        )
        .expect("parses");
        assert_eq!(cfg.rect, Some(Rect::new(4, 5, 10, 12)));
        assert_eq!(cfg.params.tiling, TilingKind::Octagons);
        assert_eq!(cfg.params.seed, 42);
        assert!(cfg.preview);
    }
}
