//! Coordinates, great-circle distance and proximity query parsing.

use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{MarketplaceError, MarketplaceResult};

/// Mean earth radius used for haversine distances.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Rejects non-finite values and coordinates outside the valid ranges.
    pub fn new(latitude: f64, longitude: f64) -> MarketplaceResult<Self> {
        check_range("latitude", latitude, 90.0)?;
        check_range("longitude", longitude, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Haversine distance in meters.
    pub fn distance_meters(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().min(1.0).asin()
    }

    /// GeoJSON point; coordinates are `[longitude, latitude]`.
    pub fn to_geojson(&self) -> Document {
        doc! {
            "type": "Point",
            "coordinates": [self.longitude, self.latitude],
        }
    }
}

fn check_range(name: &str, value: f64, limit: f64) -> MarketplaceResult<()> {
    if !value.is_finite() {
        return Err(MarketplaceError::Validation(format!(
            "Invalid {name}: must be a finite number"
        )));
    }
    if !(-limit..=limit).contains(&value) {
        return Err(MarketplaceError::Validation(format!(
            "Invalid {name}: must be between -{limit} and {limit}"
        )));
    }
    Ok(())
}

/// Query string of the `/nearby` endpoints.
///
/// Values stay raw strings until [`NearbyParams::parse`] so a bad value is
/// reported under its own name. All three are required.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyParams {
    /// Center latitude in degrees, -90 to 90
    #[param(value_type = f64, example = 12.97)]
    pub latitude: Option<String>,
    /// Center longitude in degrees, -180 to 180
    #[param(value_type = f64, example = 77.59)]
    pub longitude: Option<String>,
    /// Search radius in meters
    #[param(value_type = f64, example = 5000.0)]
    pub radius: Option<String>,
}

impl NearbyParams {
    /// Returns the search center and radius in meters.
    pub fn parse(&self) -> MarketplaceResult<(GeoPoint, f64)> {
        let latitude = parse_number("latitude", self.latitude.as_deref())?;
        let longitude = parse_number("longitude", self.longitude.as_deref())?;
        let radius = parse_number("radius", self.radius.as_deref())?;

        let center = GeoPoint::new(latitude, longitude)?;
        if radius < 0.0 {
            return Err(MarketplaceError::Validation(
                "Invalid radius: must be zero or positive".to_string(),
            ));
        }

        Ok((center, radius))
    }
}

fn parse_number(name: &str, raw: Option<&str>) -> MarketplaceResult<f64> {
    let raw = raw.ok_or_else(|| MarketplaceError::Validation(format!("Missing {name}")))?;
    let value: f64 = raw.trim().parse().map_err(|_| {
        MarketplaceError::Validation(format!("Invalid {name}: expected a number, got '{raw}'"))
    })?;

    if !value.is_finite() {
        return Err(MarketplaceError::Validation(format!(
            "Invalid {name}: must be a finite number"
        )));
    }
    Ok(value)
}
