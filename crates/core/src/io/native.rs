//! Native GeoTIFF reading/writing (without GDAL)
//!
//! Uses the `tiff` crate. Handles single-band grids with
//! ModelPixelScale/ModelTiepoint georeferencing and a GDAL_NODATA sentinel;
//! enable the `gdal` feature for full GeoTIFF support (projections, tiled
//! layouts, compression options).

use std::fs::File;
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

use crate::error::{Error, Result};
use crate::raster::{GeoTransform, Raster, RasterElement};

// GeoTIFF / GDAL georeferencing tags. The `tiff` crate exposes these as named
// `Tag` variants (`ModelPixelScaleTag` = 33550, etc.); addressing them via
// `Tag::Unknown(..)` would not match what the decoder stores, so use the named
// variants on both the read and write sides.
const TAG_MODEL_PIXEL_SCALE: Tag = Tag::ModelPixelScaleTag;
const TAG_MODEL_TIEPOINT: Tag = Tag::ModelTiepointTag;
const TAG_GEO_KEY_DIRECTORY: Tag = Tag::GeoKeyDirectoryTag;
const TAG_GDAL_NODATA: Tag = Tag::GdalNodata;

/// Read the first band of a GeoTIFF file into a raster
pub fn read_geotiff<T, P>(path: P) -> Result<Raster<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    let mut decoder =
        Decoder::new(file).map_err(|e| Error::Other(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Other(format!("cannot read TIFF dimensions: {}", e)))?;
    let rows = height as usize;
    let cols = width as usize;

    let image = decoder
        .read_image()
        .map_err(|e| Error::Other(format!("cannot read TIFF image data: {}", e)))?;

    let data: Vec<T> = match image {
        DecodingResult::F32(buf) => cast_buffer(&buf),
        DecodingResult::F64(buf) => cast_buffer(&buf),
        DecodingResult::U8(buf) => cast_buffer(&buf),
        DecodingResult::U16(buf) => cast_buffer(&buf),
        DecodingResult::I16(buf) => cast_buffer(&buf),
        DecodingResult::I32(buf) => cast_buffer(&buf),
        _ => {
            return Err(Error::UnsupportedDataType(
                "unsupported TIFF pixel format".to_string(),
            ))
        }
    };

    if data.len() != rows * cols {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let mut raster = Raster::from_vec(data, rows, cols)?;

    if let Ok(transform) = read_geotransform(&mut decoder) {
        raster.set_transform(transform);
    }
    if let Some(nodata) = read_nodata(&mut decoder) {
        raster.set_nodata(num_traits::cast(nodata));
    }

    Ok(raster)
}

fn cast_buffer<S, T>(buf: &[S]) -> Vec<T>
where
    S: Copy + num_traits::NumCast,
    T: RasterElement,
{
    buf.iter()
        .map(|&v| num_traits::cast(v).unwrap_or_else(T::default_nodata))
        .collect()
}

/// GeoTransform from ModelPixelScaleTag + ModelTiepointTag
fn read_geotransform<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
) -> Result<GeoTransform> {
    let scale = decoder
        .get_tag_f64_vec(TAG_MODEL_PIXEL_SCALE)
        .map_err(|_| Error::Other("no pixel scale tag".into()))?;
    let tiepoint = decoder
        .get_tag_f64_vec(TAG_MODEL_TIEPOINT)
        .map_err(|_| Error::Other("no tiepoint tag".into()))?;

    if scale.len() < 2 || tiepoint.len() < 6 {
        return Err(Error::Other("cannot determine geotransform".into()));
    }

    // tiepoint: [I, J, K, X, Y, Z] maps raster point (I, J) to map (X, Y);
    // scale: [ScaleX, ScaleY, ScaleZ]
    let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
    let origin_y = tiepoint[4] + tiepoint[1] * scale[1];

    Ok(GeoTransform::new(origin_x, origin_y, scale[0], -scale[1]))
}

/// No-data sentinel from the GDAL_NODATA ascii tag
fn read_nodata<R: std::io::Read + std::io::Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    let text = decoder
        .get_tag_ascii_string(TAG_GDAL_NODATA)
        .ok()?;
    text.trim().trim_end_matches('\0').parse::<f64>().ok()
}

/// Write a raster to a GeoTIFF file.
///
/// The native writer stores cells as 32-bit float and emits the
/// georeferencing tags plus a minimal GeoKey directory so downstream GIS
/// tools recognize the output as a GeoTIFF.
pub fn write_geotiff<T, P>(raster: &Raster<T>, path: P) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    let mut encoder =
        TiffEncoder::new(file).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    let (rows, cols) = raster.shape();
    let data: Vec<f32> = raster
        .data()
        .iter()
        .map(|&v| num_traits::cast(v).unwrap_or(f32::NAN))
        .collect();

    let mut image = encoder
        .new_image::<Gray32Float>(cols as u32, rows as u32)
        .map_err(|e| Error::Other(format!("cannot create TIFF image: {}", e)))?;

    let gt = raster.transform();

    let scale = [gt.pixel_width, gt.pixel_height.abs(), 0.0];
    image
        .encoder()
        .write_tag(TAG_MODEL_PIXEL_SCALE, &scale[..])
        .map_err(|e| Error::Other(format!("cannot write scale tag: {}", e)))?;

    let tiepoint = [0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    image
        .encoder()
        .write_tag(TAG_MODEL_TIEPOINT, &tiepoint[..])
        .map_err(|e| Error::Other(format!("cannot write tiepoint tag: {}", e)))?;

    // Minimal GeoKey directory: projected model, pixel-is-area
    let geokeys: [u16; 12] = [
        1, 1, 0, 2, //
        1024, 0, 1, 1, //
        1025, 0, 1, 1, //
    ];
    image
        .encoder()
        .write_tag(TAG_GEO_KEY_DIRECTORY, &geokeys[..])
        .map_err(|e| Error::Other(format!("cannot write geokey tag: {}", e)))?;

    if let Some(nodata) = raster.nodata().and_then(|nd| nd.to_f64()) {
        image
            .encoder()
            .write_tag(TAG_GDAL_NODATA, format!("{}", nodata).as_str())
            .map_err(|e| Error::Other(format!("cannot write nodata tag: {}", e)))?;
    }

    image
        .write_data(&data)
        .map_err(|e| Error::Other(format!("cannot write image data: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn geotiff_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dtm.tif");

        let mut raster: Raster<f32> = Raster::new(4, 6);
        raster.set_transform(GeoTransform::new(1000.0, 2000.0, 0.4, -0.4));
        raster.set_nodata(Some(-9999.0));
        for row in 0..4 {
            for col in 0..6 {
                raster.set(row, col, (row * 6 + col) as f32).unwrap();
            }
        }

        write_geotiff(&raster, &path).unwrap();
        let loaded: Raster<f32> = read_geotiff(&path).unwrap();

        assert_eq!(loaded.shape(), (4, 6));
        assert_relative_eq!(loaded.transform().origin_x, 1000.0);
        assert_relative_eq!(loaded.transform().origin_y, 2000.0);
        assert_relative_eq!(loaded.transform().pixel_width, 0.4);
        assert_relative_eq!(loaded.transform().pixel_height, -0.4);
        assert_eq!(loaded.nodata(), Some(-9999.0));
        assert_eq!(loaded.get(2, 3).unwrap(), 15.0);
    }
}
