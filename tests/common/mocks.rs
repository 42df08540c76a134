//! In-memory collaborators.

use cartoee::{
    decode_thumbnail, CartoeeError, Colorbar, ImageSource, MarginAdjust, PlotSurface, Region,
    Result, Session, ViewExtent,
};
use image::RgbaImage;
use std::cell::RefCell;

use super::image_utils::{encode_png, solid_raster};

/// Serves a solid-color PNG and records the queries it receives
pub struct MockSource {
    pub footprint: Region,
    pub color: [u8; 4],
    pub size: (u32, u32),
    /// Project the session must carry, anything else is unauthorized
    pub project: String,
    pub queries: RefCell<Vec<Vec<(String, String)>>>,
}

impl MockSource {
    pub fn new(project: &str) -> Self {
        Self {
            footprint: Region::global(),
            color: [10, 20, 30, 255],
            size: (8, 4),
            project: project.to_string(),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn last_query(&self) -> Vec<(String, String)> {
        self.queries.borrow().last().cloned().unwrap_or_default()
    }

    fn authorize(&self, session: &Session) -> Result<()> {
        if session.project != self.project {
            return Err(CartoeeError::Fetch {
                message: format!("project '{}' is not authorized", session.project),
            });
        }
        Ok(())
    }
}

impl ImageSource for MockSource {
    fn bounds(&self, session: &Session) -> Result<Region> {
        self.authorize(session)?;
        Ok(self.footprint)
    }

    fn thumbnail(&self, session: &Session, query: &[(String, String)]) -> Result<RgbaImage> {
        self.authorize(session)?;
        self.queries.borrow_mut().push(query.to_vec());
        let bytes = encode_png(&solid_raster(self.size.0, self.size.1, self.color));
        decode_thumbnail(&bytes)
    }
}

/// Records everything drawn on it
#[derive(Default)]
pub struct RecordingSurface {
    pub rasters: Vec<(RgbaImage, ViewExtent)>,
    pub colorbars: Vec<Colorbar>,
    pub margins: Vec<MarginAdjust>,
}

impl PlotSurface for RecordingSurface {
    fn add_raster(&mut self, raster: RgbaImage, extent: ViewExtent) {
        self.rasters.push((raster, extent));
    }

    fn add_colorbar(&mut self, colorbar: Colorbar) {
        self.colorbars.push(colorbar);
    }

    fn adjust_margins(&mut self, adjust: MarginAdjust) {
        self.margins.push(adjust);
    }
}
