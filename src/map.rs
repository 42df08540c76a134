//! Map orchestration over the imagery and plotting collaborators.
//!
//! Neither fetching nor drawing happens here: an [`ImageSource`] turns query
//! parameters into a raster, and a [`PlotSurface`] places rasters and
//! colorbars. This module validates inputs, builds the request, and wires the
//! results from one to the other.

use image::RgbaImage;
use std::time::Instant;
use tracing::{debug, info};

use crate::colorbar::{AxesRect, Colorbar, ColorbarLocation, MarginAdjust, Orientation};
use crate::error::{CartoeeError, Result};
use crate::legend::{build_legend_with, LegendOptions};
use crate::logging::{log_error, log_operation_end, log_operation_start};
use crate::thumbnail::{Region, ThumbnailRequest, ViewExtent};
use crate::vis::VisParams;

/// Authenticated context for talking to the imagery service.
///
/// Always passed explicitly; nothing is initialised behind the caller's back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub project: String,
    pub credentials: Option<String>,
}

impl Session {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: impl Into<String>) -> Self {
        self.credentials = Some(credentials.into());
        self
    }
}

/// An image hosted by the imagery service
pub trait ImageSource {
    /// Footprint of the image, used when no region is requested
    fn bounds(&self, session: &Session) -> Result<Region>;

    /// Render a thumbnail for the given query parameters
    fn thumbnail(&self, session: &Session, query: &[(String, String)]) -> Result<RgbaImage>;
}

/// A map axes that rasters and colorbars can be drawn onto
pub trait PlotSurface {
    /// Draw a raster covering `extent` (plate carrée degrees, origin upper)
    fn add_raster(&mut self, raster: RgbaImage, extent: ViewExtent);

    fn add_colorbar(&mut self, colorbar: Colorbar);

    /// Move a figure margin to make room for a colorbar
    fn adjust_margins(&mut self, _adjust: MarginAdjust) {}
}

/// Decode thumbnail bytes (PNG or any format `image` recognises) into RGBA
pub fn decode_thumbnail(bytes: &[u8]) -> Result<RgbaImage> {
    if bytes.is_empty() {
        return Err(CartoeeError::Fetch {
            message: "imagery service returned an empty body".to_string(),
        });
    }
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Fetch a thumbnail of `source` and draw it on `surface`.
///
/// `scale` names a color scale to colorize the image with; it cannot be
/// combined with an explicit `palette` in the request.
pub fn add_layer<S, P>(
    source: &S,
    session: &Session,
    surface: &mut P,
    request: &ThumbnailRequest,
    scale: Option<&str>,
) -> Result<ViewExtent>
where
    S: ImageSource + ?Sized,
    P: PlotSurface + ?Sized,
{
    let start = Instant::now();
    log_operation_start("add_layer", Some(&session.project));

    let result = fetch_layer(source, session, request, scale);
    log_operation_end("add_layer", start, result.is_ok());

    match result {
        Ok((raster, extent)) => {
            debug!(
                width = raster.width(),
                height = raster.height(),
                extent = ?extent,
                "Adding raster layer"
            );
            surface.add_raster(raster, extent);
            Ok(extent)
        }
        Err(e) => {
            log_error(&e, "add_layer");
            Err(e)
        }
    }
}

fn fetch_layer<S>(
    source: &S,
    session: &Session,
    request: &ThumbnailRequest,
    scale: Option<&str>,
) -> Result<(RgbaImage, ViewExtent)>
where
    S: ImageSource + ?Sized,
{
    let query = request.query_params(scale)?;

    let extent = match &request.region {
        Some(region) => region.view_extent(),
        None => source.bounds(session)?.view_extent(),
    };

    let raster = source.thumbnail(session, &query)?;
    Ok((raster, extent))
}

/// Create a surface with `new_surface` and add `source` to it
pub fn get_map<S, P, F>(
    source: &S,
    session: &Session,
    new_surface: F,
    request: &ThumbnailRequest,
    scale: Option<&str>,
) -> Result<P>
where
    S: ImageSource + ?Sized,
    P: PlotSurface,
    F: FnOnce() -> P,
{
    let mut surface = new_surface();
    add_layer(source, session, &mut surface, request, scale)?;
    Ok(surface)
}

/// Build a colorbar from visualization parameters and draw it on `surface`
pub fn add_colorbar<P>(
    surface: &mut P,
    location: ColorbarLocation,
    params: &VisParams,
    scale: Option<&str>,
    discrete: bool,
    options: LegendOptions,
) -> Result<Colorbar>
where
    P: PlotSurface + ?Sized,
{
    let legend = build_legend_with(params, scale, discrete, options).map_err(|e| {
        log_error(&e, "add_colorbar");
        e
    })?;

    Ok(attach_colorbar(surface, Colorbar::new(legend, location)))
}

/// Like [`add_colorbar`], but in axes chosen by the caller
pub fn add_colorbar_in_axes<P>(
    surface: &mut P,
    rect: AxesRect,
    orientation: Orientation,
    params: &VisParams,
    scale: Option<&str>,
    discrete: bool,
    options: LegendOptions,
) -> Result<Colorbar>
where
    P: PlotSurface + ?Sized,
{
    let colorbar = build_legend_with(params, scale, discrete, options)
        .and_then(|legend| Colorbar::in_axes(legend, rect, orientation))
        .map_err(|e| {
            log_error(&e, "add_colorbar_in_axes");
            e
        })?;

    Ok(attach_colorbar(surface, colorbar))
}

fn attach_colorbar<P>(surface: &mut P, colorbar: Colorbar) -> Colorbar
where
    P: PlotSurface + ?Sized,
{
    info!(
        placement = ?colorbar.placement,
        discrete = colorbar.legend.is_discrete(),
        label = ?colorbar.legend.label(),
        "Adding colorbar"
    );
    if let Some(adjust) = colorbar.margin_adjust() {
        surface.adjust_margins(adjust);
    }
    surface.add_colorbar(colorbar.clone());

    colorbar
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};

    #[test]
    fn test_decode_thumbnail_roundtrip() {
        let img: RgbaImage = ImageBuffer::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

        let decoded = decode_thumbnail(bytes.get_ref()).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_thumbnail_errors() {
        assert!(matches!(decode_thumbnail(&[]), Err(CartoeeError::Fetch { .. })));
        assert!(matches!(
            decode_thumbnail(b"<html>403 Forbidden</html>"),
            Err(CartoeeError::Image(_))
        ));
    }

    #[test]
    fn test_session() {
        let session = Session::new("my-project").with_credentials("token");
        assert_eq!(session.project, "my-project");
        assert_eq!(session.credentials.as_deref(), Some("token"));
    }
}
