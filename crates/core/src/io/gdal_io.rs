//! GeoTIFF reading and writing through GDAL
//!
//! Full-fidelity backend: arbitrary source data types, compressed and tiled
//! layouts, CRS metadata. Selected over the native backend when the `gdal`
//! feature is enabled.

use std::path::Path;

use gdal::raster::GdalType;
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};

use crate::crs::Crs;
use crate::error::Result;
use crate::raster::{GeoTransform, Raster, RasterElement};

/// Read the first band of a GeoTIFF file into a raster
pub fn read_geotiff<T, P>(path: P) -> Result<Raster<T>>
where
    T: RasterElement + GdalType + Copy,
    P: AsRef<Path>,
{
    let dataset = Dataset::open(path.as_ref())?;
    let band = dataset.rasterband(1)?;

    let (cols, rows) = dataset.raster_size();
    let buffer = band.read_as::<T>((0, 0), (cols, rows), (cols, rows), None)?;

    let mut raster = Raster::from_vec(buffer.data().to_vec(), rows, cols)?;

    if let Ok(gt) = dataset.geo_transform() {
        raster.set_transform(GeoTransform::from_gdal(gt));
    }

    if let Ok(srs) = dataset.spatial_ref() {
        let crs = match srs.auth_code() {
            Ok(code) => Some(Crs::from_epsg(code as u32)),
            Err(_) => srs.to_wkt().ok().map(Crs::from_wkt),
        };
        raster.set_crs(crs);
    }

    if let Some(nodata) = band.no_data_value() {
        raster.set_nodata(num_traits::cast(nodata));
    }

    Ok(raster)
}

/// Write a raster to a GeoTIFF file, preserving transform, CRS and nodata
pub fn write_geotiff<T, P>(raster: &Raster<T>, path: P) -> Result<()>
where
    T: RasterElement + GdalType + Copy,
    P: AsRef<Path>,
{
    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let (rows, cols) = raster.shape();

    let mut dataset = driver.create_with_band_type::<T, _>(path.as_ref(), cols, rows, 1)?;
    dataset.set_geo_transform(&raster.transform().to_gdal())?;

    if let Some(crs) = raster.crs() {
        let srs = match crs.epsg() {
            Some(code) => Some(SpatialRef::from_epsg(code)?),
            None => crs.wkt().map(SpatialRef::from_wkt).transpose()?,
        };
        if let Some(srs) = srs {
            dataset.set_spatial_ref(&srs)?;
        }
    }

    let mut band = dataset.rasterband(1)?;
    if let Some(nodata) = raster.nodata().and_then(|nd| nd.to_f64()) {
        band.set_no_data_value(Some(nodata))?;
    }

    let data: Vec<T> = raster.data().iter().copied().collect();
    let mut buffer = gdal::raster::Buffer::new((cols, rows), data);
    band.write((0, 0), (cols, rows), &mut buffer)?;

    Ok(())
}
